//! # Process termination effect.
//!
//! A fatal log line ends the process. The logger performs this through the
//! [`Terminate`] trait so the journal stays free of process-lifecycle side
//! effects and tests can substitute their own effect.

use std::io::Write;

/// Ends the program after a fatal log message was journaled.
pub trait Terminate: Send + Sync + 'static {
    fn terminate(&self, message: &str) -> !;
}

/// Writes the message to stderr and exits with a non-zero status.
#[derive(Debug, Clone, Copy)]
pub struct ProcessExit {
    code: i32,
}

impl ProcessExit {
    /// Exit with `code`; a zero code is bumped to 1.
    #[must_use]
    pub fn with_code(code: i32) -> Self {
        Self {
            code: if code == 0 { 1 } else { code },
        }
    }

    #[inline]
    pub fn code(&self) -> i32 {
        self.code
    }
}

impl Default for ProcessExit {
    fn default() -> Self {
        Self { code: 1 }
    }
}

impl Terminate for ProcessExit {
    fn terminate(&self, message: &str) -> ! {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{message}");
        let _ = stderr.flush();
        std::process::exit(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_never_zero() {
        assert_eq!(ProcessExit::default().code(), 1);
        assert_eq!(ProcessExit::with_code(0).code(), 1);
        assert_eq!(ProcessExit::with_code(3).code(), 3);
    }
}
