// src/config.rs

use std::{env, net::SocketAddr, path::PathBuf};

use dotenvy::dotenv;
use url::Url;

/// Default token and cookie lifetime: seven days.
pub const DEFAULT_JWT_EXPIRATION: u64 = 60 * 60 * 24 * 7;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// Title shown alongside the film stream.
pub const FILM_TITLE: &str = "The Money Talk";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Lifetime of issued tokens, in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub bind_addr: SocketAddr,
    pub film_url: Url,
    pub static_dir: PathBuf,
    /// Optional JSON file replacing the built-in question bank.
    pub question_bank_path: Option<PathBuf>,
    pub cookie_secure: bool,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://film.db?mode=rwc".to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_JWT_EXPIRATION);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .expect("BIND_ADDR must be a socket address");

        let film_url = env::var("FILM_URL")
            .unwrap_or_else(|_| "https://player.vimeo.com/video/film".to_string());
        let film_url = Url::parse(&film_url)
            .expect("FILM_URL must be a valid URL");

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public"));

        let question_bank_path = env::var("QUESTION_BANK_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE"))
            .unwrap_or(false);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            bind_addr,
            film_url,
            static_dir,
            question_bank_path,
            cookie_secure,
            allowed_origins,
        }
    }
}
