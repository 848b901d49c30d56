//! restgate
//!
//! Serve REST APIs as Model Context Protocol (MCP) tool servers. Each
//! upstream operation is a data-only [`descriptor::ToolDescriptor`]; a
//! single generic dispatch path validates arguments, shapes the HTTP
//! request, issues it, and normalizes the response into a uniform
//! `{ok, status, body}` envelope.

#![deny(unsafe_code)]

pub mod bindings;
pub mod body;
pub mod config;
pub mod descriptor;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod request;
pub mod server;
pub mod transport;

// Re-exports
pub use config::{BindingConfig, BindingConfigBuilder};
pub use descriptor::{Method, ParamLocation, ParamType, ParameterSpec, ToolDescriptor};
pub use envelope::ResponseEnvelope;
pub use error::{Error, Result};
pub use registry::{Invocation, ToolRegistry};
pub use server::McpToolServer;
