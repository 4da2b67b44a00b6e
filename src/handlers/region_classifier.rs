/*
 * Maps native hit-test codes onto the semantic window parts the snap-layout
 * state machine reasons about. Pure and total: unknown codes fall to
 * `WindowPart::Outside`.
 */
use crate::messages::{
    HTBORDER, HTBOTTOM, HTBOTTOMLEFT, HTBOTTOMRIGHT, HTCAPTION, HTCLIENT, HTCLOSE, HTHELP, HTLEFT,
    HTREDUCE, HTRIGHT, HTSYSMENU, HTTOP, HTTOPLEFT, HTTOPRIGHT, HTZOOM,
};
use crate::types::WindowPart;

pub fn classify_hit_test(code: i32) -> WindowPart {
    match code {
        HTCLIENT => WindowPart::ClientArea,
        HTCAPTION => WindowPart::TitleBar,
        HTSYSMENU | HTHELP | HTREDUCE | HTZOOM | HTCLOSE => WindowPart::ChromeButton,
        HTLEFT | HTRIGHT | HTTOP | HTTOPLEFT | HTTOPRIGHT | HTBOTTOM | HTBOTTOMLEFT
        | HTBOTTOMRIGHT => WindowPart::ResizeBorder,
        HTBORDER => WindowPart::FixedBorder,
        _ => WindowPart::Outside,
    }
}
