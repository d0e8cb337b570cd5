#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,

    /// Invalid CLI input (bad flags, out-of-range values).
    InvalidInput = 30,

    /// Internal/runtime error (logging setup, crashed request tasks, degenerate statistics).
    RuntimeError = 40,
}

impl ExitCode {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
