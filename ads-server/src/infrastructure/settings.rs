use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Settings {
    pub http_addr: String,
    pub grpc_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub grpc_concurrency_limit: usize,
    pub grpc_max_decoding_message_size_bytes: usize,
    pub grpc_max_encoding_message_size_bytes: usize,
    pub shutdown_timeout_secs: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let http_addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:18080".to_string());
        let grpc_addr = std::env::var("GRPC_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let cors_origins = parse_cors_origins(
            std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:8000,http://127.0.0.1:8000".to_string()),
        );
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let http_request_body_limit_bytes = parse_positive(
            "HTTP_REQUEST_BODY_LIMIT_BYTES",
            std::env::var("HTTP_REQUEST_BODY_LIMIT_BYTES").ok(),
            1024 * 1024,
        )?;
        let http_concurrency_limit = parse_positive(
            "HTTP_CONCURRENCY_LIMIT",
            std::env::var("HTTP_CONCURRENCY_LIMIT").ok(),
            256,
        )?;
        let grpc_concurrency_limit = parse_positive(
            "GRPC_CONCURRENCY_LIMIT",
            std::env::var("GRPC_CONCURRENCY_LIMIT").ok(),
            256,
        )?;
        let grpc_max_decoding_message_size_bytes = parse_positive(
            "GRPC_MAX_DECODING_MESSAGE_SIZE_BYTES",
            std::env::var("GRPC_MAX_DECODING_MESSAGE_SIZE_BYTES").ok(),
            4 * 1024 * 1024,
        )?;
        let grpc_max_encoding_message_size_bytes = parse_positive(
            "GRPC_MAX_ENCODING_MESSAGE_SIZE_BYTES",
            std::env::var("GRPC_MAX_ENCODING_MESSAGE_SIZE_BYTES").ok(),
            4 * 1024 * 1024,
        )?;
        let shutdown_timeout_secs = parse_positive(
            "SHUTDOWN_TIMEOUT_SECS",
            std::env::var("SHUTDOWN_TIMEOUT_SECS").ok(),
            30,
        )?;

        Ok(Self {
            http_addr,
            grpc_addr,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            grpc_concurrency_limit,
            grpc_max_decoding_message_size_bytes,
            grpc_max_encoding_message_size_bytes,
            shutdown_timeout_secs,
        })
    }
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_positive<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr + Default + PartialEq,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = match raw {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?,
        None => default,
    };

    if value == T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
