use std::{env, net::IpAddr, net::SocketAddr};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SESSION: &str = "demo_user";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Session key for visitors without a session cookie.
    pub default_session: String,
}

impl Config {
    /// Reads `HOST`, `PORT` and `DEFAULT_SESSION`; bad or missing values fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(IpAddr::from([0, 0, 0, 0])),
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            default_session: env::var("DEFAULT_SESSION")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SESSION.to_string()),
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
