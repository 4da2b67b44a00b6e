/*
 * Error type shared by the frameless-window layer. Registration calls on the
 * context facade report bad input through `InvalidArgument`; everything that
 * touches the operating system degrades to native behavior instead of failing,
 * so the remaining variants only surface from setup paths (subclass
 * installation, capability detection).
 */
use std::fmt;

#[derive(Debug)]
pub enum PlatformError {
    InvalidArgument(String),
    InvalidHandle(String),
    OperationFailed(String),
    InitializationFailed(String),
    #[cfg(target_os = "windows")]
    Win32(windows::core::Error),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            PlatformError::InvalidHandle(msg) => write!(f, "Invalid handle: {msg}"),
            PlatformError::OperationFailed(msg) => write!(f, "Operation failed: {msg}"),
            PlatformError::InitializationFailed(msg) => {
                write!(f, "Initialization failed: {msg}")
            }
            #[cfg(target_os = "windows")]
            PlatformError::Win32(err) => write!(f, "Win32 error: {err}"),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(target_os = "windows")]
            PlatformError::Win32(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(target_os = "windows")]
impl From<windows::core::Error> for PlatformError {
    fn from(err: windows::core::Error) -> Self {
        PlatformError::Win32(err)
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;
