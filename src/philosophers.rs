use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A character the player can walk up to and talk with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Philosopher {
    pub id: String,
    pub display_name: String,
    /// A fixed reply served without touching the network when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_reply: Option<String>,
}

impl Philosopher {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            canonical_reply: None,
        }
    }

    pub fn with_canonical_reply(mut self, reply: impl Into<String>) -> Self {
        self.canonical_reply = Some(reply.into());
        self
    }
}

/// Everyone placed in the agora, in walk order
pub static ROSTER: Lazy<Vec<Philosopher>> = Lazy::new(|| {
    vec![
        Philosopher::new("socrates", "Socrates"),
        Philosopher::new("aristotle", "Aristotle"),
        Philosopher::new("plato", "Plato"),
        Philosopher::new("descartes", "Descartes"),
        Philosopher::new("leibniz", "Leibniz"),
        Philosopher::new("ada_lovelace", "Ada Lovelace"),
        Philosopher::new("turing", "Turing"),
        Philosopher::new("searle", "Searle"),
        Philosopher::new("chomsky", "Chomsky"),
        Philosopher::new("dennett", "Dennett"),
        Philosopher::new("miguel", "Miguel").with_canonical_reply(
            "Hey! Sorry friend, but I'm currently writing my Substack article for tomorrow. \
             Check out The Neural Maze if you are interested in my projects!",
        ),
        Philosopher::new("paul", "Paul").with_canonical_reply(
            "Hey, I'm busy teaching my cat AI with my latest course. I can't talk right now. \
             Check out Decoding ML for more on my thoughts.",
        ),
    ]
});

/// Look a character up by id
pub fn find(id: &str) -> Option<&'static Philosopher> {
    ROSTER.iter().find(|p| p.id == id)
}
