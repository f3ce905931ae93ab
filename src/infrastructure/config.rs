use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub profile: String,
    /// Load demo genres, movies and a customer at start-up
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let profile = env::var("PROFILE").unwrap_or_else(|_| "default".to_string());

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            if profile == "default" {
                "sqlite://video_rental.db?mode=rwc".to_string()
            } else {
                format!("sqlite://video_rental_{}.db?mode=rwc", profile)
            }
        });

        Self {
            database_url,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            profile,
            seed_demo: env::var("SEED_DEMO")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(false),
        }
    }
}
