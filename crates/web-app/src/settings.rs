use liftplan_domain::Flow;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    #[serde(with = "FlowDef")]
    pub flow: Flow,
    /// Apply the movement group rules also to exercises saved by the simple editor.
    pub strict_movement_groups: bool,
    #[serde(with = "LevelFilterDef")]
    pub log_level: LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            flow: Flow::Standard,
            strict_movement_groups: false,
            log_level: LevelFilter::Info,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Flow", rename_all = "snake_case")]
enum FlowDef {
    Standard,
    Compact,
    Coached,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "LevelFilter")]
enum LevelFilterDef {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default() {
        let settings = Settings::default();
        assert_eq!(settings.flow, Flow::Standard);
        assert!(!settings.strict_movement_groups);
        assert_eq!(settings.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_serialization() {
        let settings = Settings {
            flow: Flow::Coached,
            strict_movement_groups: true,
            log_level: LevelFilter::Debug,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(
            json,
            r#"{"flow":"coached","strict_movement_groups":true,"log_level":"Debug"}"#
        );
        assert_eq!(serde_json::from_str::<Settings>(&json).unwrap(), settings);
    }
}
