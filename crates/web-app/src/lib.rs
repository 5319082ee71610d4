#![warn(clippy::pedantic)]

pub mod log;
pub mod preview;
mod service;
mod settings;
mod wizard;

pub use service::Service;
pub use settings::{Settings, SettingsRepository, SettingsService};
pub use wizard::Wizard;
