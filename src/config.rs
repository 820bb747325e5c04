use std::env;

/// Runtime configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub token_days: i64,
    pub data_dir: String,
    pub cors_url: String,
}

impl Config {
    pub fn init() -> Config {
        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "service_booking_secret_key_2024".to_string());
        let token_days = env::var("TOKEN_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(7);
        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
        let cors_url =
            env::var("CORS_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        Config {
            jwt_secret,
            token_days,
            data_dir,
            cors_url,
        }
    }
}
