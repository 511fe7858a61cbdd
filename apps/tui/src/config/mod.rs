// Config module for sharkwatch
// Resolves runtime settings from .env and the environment

mod settings;

pub use settings::{
    init_app_config, AppConfig, ConfigError, API_URL_VAR, DEBUG_VAR, LOG_FILE_VAR,
    RANGE_DAYS_VAR,
};
