use std::time::Duration;

/// Seconds the undo prompt counts down before the delete is committed.
pub const UNDO_WINDOW_SECS: u32 = 5;

/// One countdown step of the undo prompt.
pub const COUNTDOWN_UNIT: Duration = Duration::from_secs(1);

/// How long a plain notification stays up.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

/// A plain notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

/// The undo affordance shown while a delete is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoPrompt {
    pub message: String,
    pub seconds_left: u32,
}

impl UndoPrompt {
    pub fn new(name: &str) -> Self {
        Self {
            message: format!("{} deleted", name),
            seconds_left: UNDO_WINDOW_SECS,
        }
    }

    /// Count down one unit. Returns true once the countdown has run out.
    pub fn tick(&mut self) -> bool {
        self.seconds_left = self.seconds_left.saturating_sub(1);
        self.seconds_left == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_prompt_counts_down_to_zero() {
        let mut prompt = UndoPrompt::new("Ann Lee");
        assert_eq!(prompt.message, "Ann Lee deleted");
        assert_eq!(prompt.seconds_left, 5);

        for expected in [4, 3, 2, 1] {
            assert!(!prompt.tick());
            assert_eq!(prompt.seconds_left, expected);
        }
        assert!(prompt.tick());
        assert_eq!(prompt.seconds_left, 0);
        assert!(prompt.tick());
    }
}
