/// Session management module - Gateway

mod manager;
mod store;

pub use manager::SessionManager;
pub use store::{Session, SessionOrigin, SessionStore};
