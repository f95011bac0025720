/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const SESSION_ENDPOINT: &str = "/session";
pub const CHAT_ENDPOINT: &str = "/chat";
pub const RESET_MEMORY_ENDPOINT: &str = "/reset-memory";

// Timeouts
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

// Session Policy
pub const SESSION_TTL_HOURS: i64 = 24;
pub const SESSION_FILE_NAME: &str = "session.json";

// Dialogue Timing
pub const OPEN_BLINK_INTERVAL_MS: u64 = 300;
pub const RESUME_BLINK_INTERVAL_MS: u64 = 530;
pub const REVEAL_DELAY_MS: u64 = 30;

// Dialogue Glyphs
pub const PROMPT_CURSOR: char = '|';
pub const THINKING_INDICATOR: &str = "...";
pub const SKIP_KEY: char = ' ';

// UI Configuration
pub const UI_REFRESH_INTERVAL_MS: u64 = 33;
pub const DIALOGUE_PANEL_HEIGHT: u16 = 8;
