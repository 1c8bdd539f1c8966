//! LexNum API Server module
//!
//! Provides the HTTP endpoints behind the web page plus a JSON API.
//! Run with `lexnum-server`.

pub mod handlers;
pub mod server;

pub use server::{build_router, run_api_server, AppState};
