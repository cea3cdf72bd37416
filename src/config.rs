/// Service configuration loaded from environment variables.
#[derive(Debug)]
pub struct GatekeyConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL (OTP cache + pending-login sessions).
    pub redis_url: String,
    /// Notification collaborator send endpoint (receives OTP emails).
    pub notify_url: String,
    /// TCP port to listen on (default 3110). Env var: `GATEKEY_PORT`.
    pub port: u16,
    /// Optional cookie Domain attribute for the pending-login cookie.
    pub cookie_domain: Option<String>,
}

impl GatekeyConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            redis_url: std::env::var("REDIS_URL").expect("REDIS_URL"),
            notify_url: std::env::var("NOTIFY_URL").expect("NOTIFY_URL"),
            port: std::env::var("GATEKEY_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3110),
            cookie_domain: std::env::var("COOKIE_DOMAIN").ok(),
        }
    }
}
