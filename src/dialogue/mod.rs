// Gateway module for the dialogue engine - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod controller;
mod surface;
mod types;

// Public re-exports - the ONLY way to access dialogue functionality
pub use controller::DialogueController;
pub use surface::{DialogueSurface, SharedSurface, TextSurface};
pub use types::{DialoguePhase, DialogueTiming, KeyInput};
