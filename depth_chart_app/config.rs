use dotenvy::dotenv;
use std::env;

use crate::locks::LockPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub lock_policy: LockPolicy,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let http_port = match env::var("DEPTH_CHART_HTTP_PORT") {
            Ok(val) => val.parse::<u16>().unwrap_or(8080),
            Err(_) => 8080,
        };

        let lock_policy = match env::var("DEPTH_CHART_LOCK_POLICY") {
            Ok(val) => val.parse::<LockPolicy>().unwrap_or_else(|_| {
                tracing::warn!("Unknown DEPTH_CHART_LOCK_POLICY '{val}', using per-namespace locks");
                LockPolicy::PerNamespace
            }),
            Err(_) => LockPolicy::PerNamespace,
        };

        let db_max_connections = match env::var("DEPTH_CHART_DB_MAX_CONNECTIONS") {
            Ok(val) => val.parse::<u32>().unwrap_or(5).max(1),
            Err(_) => 5,
        };

        Self {
            http_port,
            lock_policy,
            db_max_connections,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 8080,
            lock_policy: LockPolicy::PerNamespace,
            db_max_connections: 5,
        }
    }
}
