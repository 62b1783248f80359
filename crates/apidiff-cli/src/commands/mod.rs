//! Subcommand handlers

pub mod check;

/// Process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// No breaking changes
    Clean,
    /// At least one breaking change or removed package
    Breaking,
    Error,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Clean => 0,
            ExitStatus::Breaking => 1,
            ExitStatus::Error => 2,
        }
    }
}
