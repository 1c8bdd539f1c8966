//! LexNum API Server binary
//!
//! HTTP front end for the amount-to-text converter.

use clap::Parser;
use lexnum::api::run_api_server;
use lexnum::config::{
    ApiConfig, DEFAULT_HOST, DEFAULT_MAX_FILE_SIZE_MB, DEFAULT_OUTPUT_FILENAME, DEFAULT_PORT,
};
use lexnum::core::DEFAULT_MAX_PESOS;

#[derive(Parser, Debug)]
#[command(name = "lexnum-server")]
#[command(version)]
#[command(about = "LexNum API Server - amounts to formal Spanish currency text over HTTP")]
#[command(long_about = r#"
LexNum API Server

Form endpoints (used by the web page):
  - POST /convertir_texto  - {"numero": "1523.45"} -> {"texto": "..."}
  - POST /convertir_excel  - multipart field 'archivo' (.xlsx/.xls),
                             returns the workbook with a 'Texto' column

JSON API:
  - POST /api/v1/convert        - {"amount": 1523.45}
  - POST /api/v1/convert/batch  - {"amounts": [1, "2.50", null]}

Additional endpoints:
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Features:
  - CORS enabled for cross-origin requests
  - Security headers on every response
  - Graceful shutdown on SIGINT/SIGTERM
  - Tracing and structured logging (--log-level, else RUST_LOG)

Example usage:
  lexnum-server                           # Start on localhost:8080
  lexnum-server --host 0.0.0.0 --port 3000 --max-file-size-mb 32

  curl -X POST http://localhost:8080/convertir_texto \
    -H "Content-Type: application/json" \
    -d '{"numero": "1523.45"}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = DEFAULT_HOST, env = "LEXNUM_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "LEXNUM_PORT")]
    port: u16,

    /// Upload limit for /convertir_excel, in MB
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE_MB, env = "LEXNUM_MAX_FILE_SIZE_MB")]
    max_file_size_mb: usize,

    /// File name offered for the converted workbook
    #[arg(long, default_value = DEFAULT_OUTPUT_FILENAME, env = "LEXNUM_OUTPUT_FILENAME")]
    output_filename: String,

    /// Largest integer part accepted
    #[arg(long, default_value_t = DEFAULT_MAX_PESOS, env = "LEXNUM_MAX_PESOS")]
    max_pesos: u64,

    /// Log filter directives; takes precedence over RUST_LOG
    /// [default: lexnum=info,lexnum_server=info,tower_http=info]
    #[arg(long = "log-level", env = "LEXNUM_LOG")]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        max_file_size_mb: args.max_file_size_mb,
        output_filename: args.output_filename,
        max_pesos: args.max_pesos,
        log_filter: args.log_filter,
    };

    run_api_server(config).await
}
