use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expires_hours: i64,
    /// Shared credentials for the site-wide perimeter gate. When either is
    /// missing the gate fails closed (503) rather than open.
    pub gate_user: Option<String>,
    pub gate_pass: Option<String>,
    pub upload_dir: String,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3001);
        let jwt_secret = env::var("JWT_SECRET")?;
        let jwt_expires_hours = env::var("JWT_EXPIRES_HOURS")
            .ok()
            .and_then(|h| h.parse::<i64>().ok())
            .unwrap_or(24);
        let gate_user = env::var("SITE_GATE_USER").ok().filter(|s| !s.is_empty());
        let gate_pass = env::var("SITE_GATE_PASS").ok().filter(|s| !s.is_empty());
        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string());
        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|b| b.parse::<usize>().ok())
            .unwrap_or(10 * 1024 * 1024);
        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            jwt_expires_hours,
            gate_user,
            gate_pass,
            upload_dir,
            max_upload_bytes,
        })
    }
}
