//! Configuration and dependency initialization.

pub mod dependencies;
pub mod settings;

pub use dependencies::{connect_client, ConnectionMode, Dependencies};
pub use settings::Settings;
