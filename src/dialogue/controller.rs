use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use super::surface::SharedSurface;
use super::types::{DialoguePhase, DialogueTiming, KeyInput};
use crate::api::ConversationGateway;
use crate::constants::{PROMPT_CURSOR, SKIP_KEY, THINKING_INDICATOR};
use crate::philosophers::Philosopher;

/// Everything alive during one encounter. One instance exists for the whole
/// controller; `phase == Closed` means nobody is being talked to.
struct DialogueState {
    phase: DialoguePhase,
    philosopher: Option<Philosopher>,
    input: String,
    cursor_visible: bool,
    skip_requested: Arc<AtomicBool>,
    blink: Option<JoinHandle<()>>,
    exchange: Option<JoinHandle<()>>,
}

impl DialogueState {
    fn new() -> Self {
        Self {
            phase: DialoguePhase::Closed,
            philosopher: None,
            input: String::new(),
            cursor_visible: true,
            skip_requested: Arc::new(AtomicBool::new(false)),
            blink: None,
            exchange: None,
        }
    }

    /// What the surface shows while composing: the buffer, plus the cursor
    /// glyph whenever it is on
    fn prompt(&self) -> String {
        if self.cursor_visible {
            format!("{}{}", self.input, PROMPT_CURSOR)
        } else {
            self.input.clone()
        }
    }

    fn abort_blink(&mut self) {
        if let Some(task) = self.blink.take() {
            task.abort();
        }
    }

    fn abort_exchange(&mut self) {
        if let Some(task) = self.exchange.take() {
            task.abort();
        }
    }
}

/// Per-encounter state machine: `Closed -> Composing -> Submitting ->
/// Streaming -> Composing`, fed by `handle_key` and drawing on one shared
/// surface. The host opens an encounter when the player walks up to a
/// philosopher and closes it when proximity is lost; everything between is
/// owned here.
///
/// The cursor blink and the request/reveal exchange run as scheduled tasks
/// owned by the live encounter. Closing an encounter aborts them, so a
/// stale timer can never touch a surface that no longer belongs to it.
pub struct DialogueController {
    gateway: Arc<ConversationGateway>,
    surface: SharedSurface,
    timing: DialogueTiming,
    state: Arc<Mutex<DialogueState>>,
}

impl DialogueController {
    pub fn new(
        gateway: Arc<ConversationGateway>,
        surface: SharedSurface,
        timing: DialogueTiming,
    ) -> Self {
        Self {
            gateway,
            surface,
            timing,
            state: Arc::new(Mutex::new(DialogueState::new())),
        }
    }

    /// Begin an encounter: fresh buffer, bare prompt, fast blink. Refused
    /// (returns false) while another encounter is active.
    pub fn open(&self, philosopher: &Philosopher) -> bool {
        let mut state = self.state.lock();
        if state.phase != DialoguePhase::Closed {
            return false;
        }
        state.phase = DialoguePhase::Composing;
        state.philosopher = Some(philosopher.clone());
        state.input.clear();
        state.cursor_visible = true;

        let text = state.prompt();
        self.surface.lock().show(&text);
        state.blink = Some(tokio::spawn(run_blink(
            Arc::clone(&self.state),
            self.surface.clone(),
            self.timing.open_blink,
        )));

        debug!(philosopher = %philosopher.id, "dialogue opened");
        true
    }

    /// Feed one key event into the machine. The current phase decides what a
    /// key means: outside `Composing` everything is ignored, except the skip
    /// key while a reply is streaming.
    pub fn handle_key(&self, key: KeyInput) {
        let mut state = self.state.lock();
        match state.phase {
            DialoguePhase::Closed | DialoguePhase::Submitting => {}
            DialoguePhase::Streaming => {
                if key == KeyInput::Char(SKIP_KEY) {
                    state.skip_requested.store(true, Ordering::Relaxed);
                }
            }
            DialoguePhase::Composing => self.handle_composing_key(&mut state, key),
        }
    }

    fn handle_composing_key(&self, state: &mut DialogueState, key: KeyInput) {
        match key {
            KeyInput::Char(c) => {
                state.input.push(c);
                let text = state.prompt();
                self.surface.lock().show(&text);
            }
            KeyInput::Backspace => {
                state.input.pop();
                let text = state.prompt();
                self.surface.lock().show(&text);
            }
            KeyInput::Enter => {
                if state.input.trim().is_empty() {
                    self.restart_prompt(state);
                } else {
                    self.submit(state);
                }
            }
            KeyInput::Escape => self.close_encounter(state),
        }
    }

    /// Submitting an empty line just wakes the prompt back up, at the
    /// slower cadence of an ongoing conversation
    fn restart_prompt(&self, state: &mut DialogueState) {
        state.abort_blink();
        state.cursor_visible = true;
        let text = state.prompt();
        self.surface.lock().show(&text);
        state.blink = Some(tokio::spawn(run_blink(
            Arc::clone(&self.state),
            self.surface.clone(),
            self.timing.resume_blink,
        )));
    }

    /// Hand the turn over to the exchange task. The blink dies first so a
    /// stray toggle cannot race the thinking indicator.
    fn submit(&self, state: &mut DialogueState) {
        let Some(philosopher) = state.philosopher.clone() else {
            return;
        };
        state.abort_blink();
        state.abort_exchange();
        state.phase = DialoguePhase::Submitting;
        state.skip_requested = Arc::new(AtomicBool::new(false));
        let message = std::mem::take(&mut state.input);

        self.surface.lock().show(THINKING_INDICATOR);

        state.exchange = Some(tokio::spawn(run_exchange(
            Arc::clone(&self.state),
            self.surface.clone(),
            Arc::clone(&self.gateway),
            self.timing,
            philosopher,
            message,
            Arc::clone(&state.skip_requested),
        )));
    }

    /// Tear the encounter down from any phase: scheduled tasks die, the
    /// buffer empties, the surface disappears. Safe to call when already
    /// closed.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.phase == DialoguePhase::Closed {
            return;
        }
        self.close_encounter(&mut state);
    }

    fn close_encounter(&self, state: &mut DialogueState) {
        state.abort_blink();
        state.abort_exchange();
        state.phase = DialoguePhase::Closed;
        state.philosopher = None;
        state.input.clear();
        self.surface.lock().hide();
        debug!("dialogue closed");
    }

    /// Is an encounter active in any phase?
    pub fn is_open(&self) -> bool {
        self.state.lock().phase != DialoguePhase::Closed
    }

    /// Current phase of the encounter machine
    pub fn phase(&self) -> DialoguePhase {
        self.state.lock().phase
    }

    /// The philosopher currently engaged, if any
    pub fn active_philosopher(&self) -> Option<Philosopher> {
        self.state.lock().philosopher.clone()
    }
}

/// Toggle the prompt cursor until the encounter leaves `Composing`. The
/// redraw happens under the state lock, after the phase check: a task the
/// abort has not reached yet can never repaint a surface that was just
/// hidden.
async fn run_blink(state: Arc<Mutex<DialogueState>>, surface: SharedSurface, period: Duration) {
    loop {
        tokio::time::sleep(period).await;
        {
            let mut state = state.lock();
            if state.phase != DialoguePhase::Composing {
                break;
            }
            state.cursor_visible = !state.cursor_visible;
            let text = state.prompt();
            surface.lock().show(&text);
        }
    }
}

/// One full turn: wait for the reply, then reveal it character by character.
/// Submission always resolves because `send_message` never fails, so a
/// degraded reply streams exactly like a real one. Skipping is cooperative:
/// the in-flight delay finishes, the remaining steps are dropped, and the
/// surface ends with the complete reply no matter when the flag was raised.
/// Every surface write sits under the state lock behind a phase check, for
/// the same reason as in `run_blink`.
async fn run_exchange(
    state: Arc<Mutex<DialogueState>>,
    surface: SharedSurface,
    gateway: Arc<ConversationGateway>,
    timing: DialogueTiming,
    philosopher: Philosopher,
    message: String,
    skip: Arc<AtomicBool>,
) {
    let reply = gateway.send_message(&philosopher, &message).await;

    {
        let mut state = state.lock();
        if state.phase != DialoguePhase::Submitting {
            return;
        }
        state.phase = DialoguePhase::Streaming;
        surface.lock().show("");
    }

    let mut revealed = String::new();
    for ch in reply.chars() {
        if skip.load(Ordering::Relaxed) {
            break;
        }
        revealed.push(ch);
        {
            let state = state.lock();
            if state.phase != DialoguePhase::Streaming {
                return;
            }
            surface.lock().show(&revealed);
        }
        tokio::time::sleep(timing.reveal_delay).await;
    }

    let mut st = state.lock();
    if st.phase != DialoguePhase::Streaming {
        return;
    }
    // Skipped or not, the reveal never leaves a half-shown reply behind
    surface.lock().show(&reply);
    st.phase = DialoguePhase::Composing;
    st.input.clear();
    st.cursor_visible = true;
    st.blink = Some(tokio::spawn(run_blink(
        Arc::clone(&state),
        surface.clone(),
        timing.resume_blink,
    )));
}
