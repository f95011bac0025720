use std::time::Duration;

use crate::constants::{OPEN_BLINK_INTERVAL_MS, RESUME_BLINK_INTERVAL_MS, REVEAL_DELAY_MS};

/// Where the encounter state machine currently sits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialoguePhase {
    /// No encounter in progress
    #[default]
    Closed,
    /// Capturing keystrokes into the input buffer
    Composing,
    /// Waiting for the philosopher's reply
    Submitting,
    /// Revealing the reply character by character
    Streaming,
}

/// Key events the engine understands. The host maps its real input events
/// onto these; tests construct them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Backspace,
    Enter,
    Escape,
}

/// Pacing of an encounter: the two cursor blink cadences and the delay
/// between revealed characters. The faster blink greets a fresh prompt;
/// the slower one marks a conversation already underway.
#[derive(Debug, Clone, Copy)]
pub struct DialogueTiming {
    /// Blink period right after an encounter opens
    pub open_blink: Duration,
    /// Blink period once a reply has come back
    pub resume_blink: Duration,
    /// Delay between revealed characters
    pub reveal_delay: Duration,
}

impl Default for DialogueTiming {
    fn default() -> Self {
        Self {
            open_blink: Duration::from_millis(OPEN_BLINK_INTERVAL_MS),
            resume_blink: Duration::from_millis(RESUME_BLINK_INTERVAL_MS),
            reveal_delay: Duration::from_millis(REVEAL_DELAY_MS),
        }
    }
}
