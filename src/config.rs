//! Server configuration
//!
//! Values come from `lexnum-server` flags, each backed by a `LEXNUM_*`
//! environment variable (see `src/bin/lexnum_server.rs`).

use std::net::SocketAddr;

use crate::core::{Converter, DEFAULT_MAX_PESOS, HARD_MAX_PESOS};
use crate::error::{LexNumError, LexNumResult};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_FILE_SIZE_MB: usize = 16;
pub const DEFAULT_OUTPUT_FILENAME: &str = "resultado.xlsx";
pub const DEFAULT_LOG_FILTER: &str = "lexnum=info,lexnum_server=info,tower_http=info";

/// API Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Upload limit for `/convertir_excel`, in megabytes.
    pub max_file_size_mb: usize,
    /// Download name of the converted workbook.
    pub output_filename: String,
    /// Ceiling on the integer part of any amount.
    pub max_pesos: u64,
    /// `tracing_subscriber::EnvFilter` directives. When unset, `RUST_LOG`
    /// applies, then [`DEFAULT_LOG_FILTER`].
    pub log_filter: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            max_pesos: DEFAULT_MAX_PESOS,
            log_filter: None,
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> LexNumResult<()> {
        if self.max_file_size_mb == 0 {
            return Err(LexNumError::Config(
                "max_file_size_mb must be greater than zero".to_string(),
            ));
        }
        if self.max_pesos > HARD_MAX_PESOS {
            return Err(LexNumError::Config(format!(
                "max_pesos must not exceed {}",
                HARD_MAX_PESOS
            )));
        }
        if !self.output_filename.to_lowercase().ends_with(".xlsx") {
            return Err(LexNumError::Config(format!(
                "output_filename must end in .xlsx, got '{}'",
                self.output_filename
            )));
        }
        self.socket_addr().map(|_| ())
    }

    pub fn socket_addr(&self) -> LexNumResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| LexNumError::Config(format!("invalid listen address: {}", e)))
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }

    pub fn converter(&self) -> LexNumResult<Converter> {
        Converter::with_max_pesos(self.max_pesos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_file_size_mb, 16);
        assert_eq!(config.output_filename, "resultado.xlsx");
        assert_eq!(config.max_pesos, 999_999_999);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_address_format() {
        let config = ApiConfig {
            host: "192.168.1.100".to_string(),
            port: 9090,
            ..Default::default()
        };
        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.port(), 9090);
        assert_eq!(addr.to_string(), "192.168.1.100:9090");
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let config = ApiConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LexNumError::Config(_))));
    }

    #[test]
    fn test_zero_upload_limit_is_rejected() {
        let config = ApiConfig {
            max_file_size_mb: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LexNumError::Config(_))));
    }

    #[test]
    fn test_max_pesos_above_hard_limit_is_rejected() {
        let config = ApiConfig {
            max_pesos: HARD_MAX_PESOS + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(config.converter().is_err());
    }

    #[test]
    fn test_output_filename_must_be_xlsx() {
        let config = ApiConfig {
            output_filename: "resultado.csv".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_body_bytes() {
        let config = ApiConfig {
            max_file_size_mb: 2,
            ..Default::default()
        };
        assert_eq!(config.max_body_bytes(), 2 * 1024 * 1024);
    }
}
