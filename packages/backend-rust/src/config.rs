use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PREDICTOR_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_PREDICTOR_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_PREDICTOR_MAX_RETRIES: usize = 2;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub predictor: PredictorConfig,
}

#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PREDICTOR_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_PREDICTOR_TIMEOUT_MS),
            max_retries: DEFAULT_PREDICTOR_MAX_RETRIES,
        }
    }
}

impl PredictorConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("PREDICTOR_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_PREDICTOR_URL.to_string());

        let timeout = std::env::var("PREDICTOR_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_PREDICTOR_TIMEOUT_MS));

        let max_retries = std::env::var("PREDICTOR_MAX_RETRIES")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .unwrap_or(DEFAULT_PREDICTOR_MAX_RETRIES);

        Self {
            base_url,
            timeout,
            max_retries,
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            host,
            port,
            log_level,
            predictor: PredictorConfig::from_env(),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let config = PredictorConfig::with_base_url("http://localhost:8000/");
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.max_retries, DEFAULT_PREDICTOR_MAX_RETRIES);
    }

    #[test]
    fn test_bind_addr() {
        let config = Config {
            host: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 8080,
            log_level: "info".to_string(),
            predictor: PredictorConfig::default(),
        };
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:8080");
    }
}
