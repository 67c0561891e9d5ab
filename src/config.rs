// src/config.rs

use std::env;
use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub rust_log: String,
    pub port: u16,
    pub database_max_connections: u32,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .map(|v| v.parse().expect("PORT must be a valid port number"))
            .unwrap_or(3000);

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .map(|v| {
                v.parse()
                    .expect("DATABASE_MAX_CONNECTIONS must be a positive integer")
            })
            .unwrap_or(5);

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        Self {
            database_url,
            jwt_secret,
            rust_log,
            port,
            database_max_connections,
            log_dir,
        }
    }
}
