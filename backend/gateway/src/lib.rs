//! Pawtoon Gateway HTTP API Server
//!
//! Exposes the generation endpoints, maps the pipeline error taxonomy to
//! HTTP statuses, and serves the liveness/health routes.

pub mod generate_api;
pub mod server;

pub use server::{build_router, start_server, GatewayState};
