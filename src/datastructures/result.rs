use std::fmt;

/// Outcome of one key press, shown as the status line and then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    Success(String),
    Failure(String),
    /// Neither success nor failure, e.g. a cancelled prompt or an unmapped key.
    Info(String),
}

impl ActionResult {
    pub fn message(&self) -> &str {
        match self {
            ActionResult::Success(message)
            | ActionResult::Failure(message)
            | ActionResult::Info(message) => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ActionResult::Failure(_))
    }
}

impl fmt::Display for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
