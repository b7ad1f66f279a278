use std::{env, path::PathBuf, time::Duration};

pub const LONG_PRESS: Duration = Duration::from_millis(380);
pub const NOTICE_TTL: Duration = Duration::from_millis(2000);
pub const SAVE_CONFIRMATION: Duration = Duration::from_millis(1500);
pub const SWIPE_THRESHOLD_PX: f64 = 60.0;
pub const ACTIVATION_HAPTIC_MS: u64 = 30;
pub const LOG_HAPTIC_MS: u64 = 50;
/// Distance from the pie centre to each revealed orbital, in pie units.
pub const ORBIT_RADIUS: f64 = 150.0;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_dir = env::var("APP_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        Self { port, data_dir }
    }
}
