//! fintrack-config
//!
//! Persistent user settings: currency, reminder configuration, budget goals.
//! Owns the Settings data structure plus disk persistence helpers. Replaces
//! ambient global access with an explicit load-on-start / save-on-mutate
//! store object.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::SettingsManager;
pub use model::Settings;
