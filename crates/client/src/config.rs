//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use siege_runtime::{PresentationTimings, RuntimeConfig};

/// Configuration required to bootstrap the runtime and pick a wave.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding `config.toml`, `archetypes.ron` and `waves.ron`.
    pub data_dir: PathBuf,
    pub wave: String,
    pub max_turns: u64,
    pub busy_timeout: Option<Duration>,
    pub time_scale: f32,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("crates/game/content/data"),
            wave: "opening".to_string(),
            max_turns: 100,
            busy_timeout: Some(Duration::from_secs(5)),
            time_scale: 1.0,
            session_id: None,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SIEGE_DATA_DIR` - Content directory (default: bundled data)
    /// - `SIEGE_WAVE` - Wave to play (default: `opening`)
    /// - `SIEGE_MAX_TURNS` - Turn limit before a stalemate (default: 100)
    /// - `SIEGE_BUSY_TIMEOUT_MS` - Busy wait limit, `0` waits forever (default: 5000)
    /// - `SIEGE_TIME_SCALE` - Presentation speed factor, `0` is instant (default: 1.0)
    /// - `SIEGE_SESSION_ID` - Session identifier for log files (default: auto-generated)
    /// - `SIEGE_LOG_DIR` - Log directory (default: platform-specific)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("SIEGE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(wave) = env::var("SIEGE_WAVE") {
            config.wave = wave;
        }
        if let Some(turns) = read_env::<u64>("SIEGE_MAX_TURNS") {
            config.max_turns = turns;
        }
        if let Some(ms) = read_env::<u64>("SIEGE_BUSY_TIMEOUT_MS") {
            config.busy_timeout = (ms > 0).then(|| Duration::from_millis(ms));
        }
        if let Some(scale) = read_env::<f32>("SIEGE_TIME_SCALE")
            && scale.is_finite()
        {
            config.time_scale = scale.max(0.0);
        }

        config.session_id = env::var("SIEGE_SESSION_ID").ok();
        config.log_dir = env::var("SIEGE_LOG_DIR").ok().map(PathBuf::from);

        config
    }

    /// Runtime settings; the encounter rules come from the content directory.
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            timings: PresentationTimings::default().with_time_scale(self.time_scale),
            busy_timeout: self.busy_timeout,
            max_turns: self.max_turns,
            ..RuntimeConfig::default()
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
