use std::env;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: parse_or(env::var("PORT").ok(), DEFAULT_PORT),
            max_connections: parse_or(
                env::var("DATABASE_MAX_CONNECTIONS").ok(),
                DEFAULT_MAX_CONNECTIONS,
            ),
        })
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_values_fall_back_to_defaults() {
        assert_eq!(parse_or(Some("8080".into()), DEFAULT_PORT), 8080);
        assert_eq!(parse_or(Some("eighty".into()), DEFAULT_PORT), DEFAULT_PORT);
        assert_eq!(parse_or(None, DEFAULT_MAX_CONNECTIONS), DEFAULT_MAX_CONNECTIONS);
    }
}
