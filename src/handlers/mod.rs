/*
 * One module per native message family, in the order the window procedure
 * consults them. Each handler is expressed over `Platform` so it runs against
 * the scripted mock in tests.
 */
pub mod hit_test_handler;
pub mod nc_calc_size_handler;
pub mod region_classifier;
pub mod snap_layout_handler;
