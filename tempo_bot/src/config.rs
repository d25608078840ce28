use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tempo_engine::Policy;
use tracing_subscriber::filter::LevelFilter;

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl From<LogLevel> for LevelFilter {
    fn from(arg: LogLevel) -> LevelFilter {
        match arg {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Off => LevelFilter::OFF,
        }
    }
}

/// Configuration for the bot, read once at startup.
#[derive(Debug, Deserialize)]
pub struct BotConfig {
    pub host: String,
    pub port: u16,
    pub tls: bool,
    pub nick: String,
    pub password: String,
    pub channels: Vec<String>,
    /// Command prefix, e.g. ","
    pub prefix: String,
    /// Nick of the bridge relay whose messages carry a wrapped sender
    #[serde(default)]
    pub bridge_nick: Option<String>,
    /// Parameters exactly matching any of these words are rejected
    #[serde(default)]
    pub block: Vec<String>,
    /// Where the state snapshot document lives
    pub state_file: PathBuf,
    #[serde(default)]
    pub log_level: Option<LogLevel>,
    /// Timebox policy knobs
    pub timebox: Policy,
}

impl BotConfig {
    /// Load configuration from a file
    pub fn load_file<P: AsRef<Path>>(filename: P) -> Result<Self, anyhow::Error> {
        let mut file = File::open(filename)?;
        let mut config = String::new();
        file.read_to_string(&mut config)?;
        Ok(json5::from_str(&config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: BotConfig = json5::from_str(
            r##"{
                host: "irc.example.org",
                port: 6697,
                tls: true,
                nick: "tempo",
                password: "secret",
                channels: ["#work", "#play"],
                prefix: ",",
                bridge_nick: "bridge",
                block: ["nsfw"],
                state_file: "tempo-state.json",
                log_level: "debug",
                timebox: {
                    keep_timeboxes: 100,
                    keep_duration_seconds: 604800,
                    max_print_channel: 10,
                    max_print_private: 20,
                    default_duration_minutes: 30,
                    duration_multiple_minutes: 5,
                    min_duration_minutes: 15,
                    max_duration_minutes: 60,
                },
            }"##,
        )
        .unwrap();

        assert_eq!(config.host, "irc.example.org");
        assert_eq!(config.channels.len(), 2);
        assert_eq!(config.bridge_nick.as_deref(), Some("bridge"));
        assert_eq!(config.timebox.min_duration_minutes, 15);
        assert!(!config.timebox.dev_mode);
    }

    #[test]
    fn optional_fields_default() {
        let config: BotConfig = json5::from_str(
            r##"{
                host: "irc.example.org",
                port: 6667,
                tls: false,
                nick: "tempo",
                password: "",
                channels: ["#work"],
                prefix: ",",
                state_file: "tempo-state.json",
                timebox: {
                    keep_timeboxes: 100,
                    keep_duration_seconds: 604800,
                    max_print_channel: 10,
                    max_print_private: 20,
                    default_duration_minutes: 30,
                    duration_multiple_minutes: 5,
                    min_duration_minutes: 15,
                    max_duration_minutes: 60,
                },
            }"##,
        )
        .unwrap();

        assert_eq!(config.bridge_nick, None);
        assert!(config.block.is_empty());
        assert!(config.log_level.is_none());
    }
}
