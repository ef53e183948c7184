// Team Shuffler - Core Library
// Roster store + group generator, shared by the CLI/TUI and the web server

pub mod error;
pub mod member;
pub mod roster;
pub mod grouping;
pub mod session;
pub mod config;
pub mod import;

// Only compile the HTTP API when the server feature is enabled
#[cfg(feature = "server")]
pub mod api;

#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use error::{Result, ShuffleError};
pub use member::{normalize_name, Member};
pub use roster::{Roster, RosterId, RosterStore};
pub use grouping::{
    format_groups, generate, generate_groups, group_sizes, shuffle,
    GenerationResult, Group, EMPTY_GROUPS_MESSAGE,
};
pub use session::Session;
pub use config::{Config, ServerSettings, ShuffleSettings, TeamSettings, DEFAULT_CONFIG_FILE};
pub use import::{load_csv, read_csv, ImportSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
