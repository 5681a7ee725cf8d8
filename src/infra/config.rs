use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,
    /// Origin of the signup/admin frontend allowed by CORS.
    pub cors_origin: HeaderValue,
    /// Shared secret for the admin dashboard. Sent as a Bearer credential on
    /// every admin request.
    pub admin_password: SecretString,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr = get_env_default(
            "BIND_ADDR",
            SocketAddr::from(([127, 0, 0, 1], 5000)),
        );
        let database_url: String = get_env("DATABASE_URL");
        let database_max_connections: u32 = get_env_default("DATABASE_MAX_CONNECTIONS", 5);
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:5173"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");
        let admin_password: SecretString =
            SecretString::new(get_env::<String>("ADMIN_PASSWORD").into());

        Self {
            bind_addr,
            database_url,
            database_max_connections,
            cors_origin,
            admin_password,
        }
    }
}
