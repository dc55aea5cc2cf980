//! Server configuration, loaded once at startup and carried in the axum
//! state so handlers never reach for ambient globals.

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    /// Public origin used to build share links, e.g. "https://forkful.app".
    pub base_url: String,
}

impl AppConfig {
    pub fn load() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: try_load("PORT", "3000"),
            base_url: try_load("BASE_URL", "http://localhost:3000"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
