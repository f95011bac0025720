use std::sync::Arc;

use parking_lot::Mutex;

/// The one text output an encounter draws on. The host decides what a shown
/// surface looks like on screen; the engine only ever writes through these
/// three calls.
pub trait DialogueSurface: Send {
    /// Replace the displayed text and make the surface visible
    fn show(&mut self, text: &str);

    /// Take the surface off screen and drop its text
    fn hide(&mut self);

    /// Is the surface currently on screen?
    fn is_visible(&self) -> bool;
}

/// Handle shared between the controller and its scheduled tasks
pub type SharedSurface = Arc<Mutex<dyn DialogueSurface>>;

/// Plain text-buffer surface. The terminal host keeps the concrete handle
/// and renders whatever it holds on every frame.
#[derive(Debug, Default)]
pub struct TextSurface {
    text: String,
    visible: bool,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text, empty once hidden
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl DialogueSurface for TextSurface {
    fn show(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.visible = true;
    }

    fn hide(&mut self) {
        self.text.clear();
        self.visible = false;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
