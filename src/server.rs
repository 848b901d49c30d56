//! MCP binding over the `rmcp` SDK.
//!
//! Exposes every registered tool through `tools/list` and `tools/call`.
//! Handlers never raise to the transport: validation, network, and
//! upstream failures all come back as the envelope's `{error, …}` body
//! with the MCP error flag set.

use crate::envelope::ResponseEnvelope;
use crate::error::{Error, Result};
use crate::registry::{Invocation, ToolRegistry};
use rmcp::{
    Error as McpError, RoleServer, ServerHandler, ServiceExt,
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    transport::stdio,
};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::descriptor::{ParamType, ToolDescriptor};

/// MCP server exposing one tool registry
#[derive(Clone)]
pub struct McpToolServer {
    registry: Arc<ToolRegistry>,
}

impl McpToolServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// The MCP tool catalog, in registration order
    fn tool_catalog(&self) -> Vec<Tool> {
        self.registry
            .descriptors()
            .map(|descriptor| {
                let description = if descriptor.description.is_empty() {
                    descriptor.summary.clone()
                } else {
                    descriptor.description.clone()
                };
                Tool::new(
                    descriptor.name.clone(),
                    description,
                    Arc::new(input_schema(descriptor)),
                )
            })
            .collect()
    }
}

impl ServerHandler for McpToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Tools for the {} REST API. Each tool maps to one HTTP operation; \
                 results are the upstream JSON payload, or an {{error, status}} object \
                 when the call fails.",
                self.registry.name()
            )),
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: self.tool_catalog(),
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let arguments = request.arguments.unwrap_or_default();
        let invocation = Invocation::new(request.name.to_string(), arguments);
        // Cancellation aborts the in-flight HTTP request; the dispatch
        // future is dropped and the pooled connection released.
        let envelope = tokio::select! {
            () = context.ct.cancelled() => ResponseEnvelope::cancelled(),
            envelope = self.registry.dispatch(invocation) => envelope,
        };
        let content = Content::text(envelope.body.to_string());
        Ok(if envelope.ok {
            CallToolResult::success(vec![content])
        } else {
            CallToolResult::error(vec![content])
        })
    }
}

/// Serve the registry over stdio until the peer disconnects
pub async fn serve_stdio(registry: ToolRegistry) -> Result<()> {
    let server = McpToolServer::new(registry);
    let service = server
        .serve(stdio())
        .await
        .map_err(|e| Error::Transport(format!("failed to start MCP server: {e}")))?;
    service
        .waiting()
        .await
        .map_err(|e| Error::Transport(format!("MCP server terminated abnormally: {e}")))?;
    Ok(())
}

/// JSON Schema for a tool's arguments, generated from its parameter specs
fn input_schema(descriptor: &ToolDescriptor) -> Map<String, Value> {
    let mut properties = Map::new();
    for spec in &descriptor.parameters {
        let typed = match spec.param_type {
            ParamType::String => serde_json::json!({ "type": "string" }),
            ParamType::Integer => serde_json::json!({ "type": "integer" }),
            ParamType::Number => serde_json::json!({ "type": "number" }),
            ParamType::Boolean => serde_json::json!({ "type": "boolean" }),
            ParamType::Object => serde_json::json!({ "type": "object" }),
            ParamType::StringList => {
                serde_json::json!({ "type": "array", "items": { "type": "string" } })
            }
            ParamType::NumberList => {
                serde_json::json!({ "type": "array", "items": { "type": "number" } })
            }
        };
        let mut property = typed
            .as_object()
            .cloned()
            .expect("schema fragments are objects");
        if let Some(description) = &spec.description {
            property.insert("description".to_string(), Value::from(description.clone()));
        }
        if let Some(default) = &spec.default {
            property.insert("default".to_string(), default.clone());
        }
        properties.insert(spec.name.clone(), Value::Object(property));
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), Value::from("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    let required: Vec<Value> = descriptor
        .parameters
        .iter()
        .filter(|spec| spec.required)
        .map(|spec| Value::from(spec.name.clone()))
        .collect();
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BindingConfig;
    use crate::descriptor::{Method, ParameterSpec};
    use serde_json::json;

    fn server() -> McpToolServer {
        let config = BindingConfig::builder("TEST")
            .base_url("https://api.example.com")
            .resolve_with(|_| None)
            .unwrap();
        let mut registry = ToolRegistry::new("test", config).unwrap();
        registry
            .register(
                ToolDescriptor::new("get_pet_by_id", Method::Get, "/pet/{petId}")
                    .summary("Find pet by ID")
                    .param(
                        ParameterSpec::path("petId", ParamType::Integer)
                            .describe("ID of pet to return"),
                    )
                    .param(
                        ParameterSpec::query("verbose", ParamType::Boolean)
                            .default_value(json!(false)),
                    )
                    .param(ParameterSpec::query("tags", ParamType::StringList)),
            )
            .unwrap();
        McpToolServer::new(registry)
    }

    #[test]
    fn test_input_schema_shape() {
        let server = server();
        let descriptor = server.registry().get("get_pet_by_id").unwrap();
        let schema = Value::Object(input_schema(descriptor));
        assert_eq!(
            schema,
            json!({
                "type": "object",
                "properties": {
                    "petId": {
                        "type": "integer",
                        "description": "ID of pet to return"
                    },
                    "verbose": { "type": "boolean", "default": false },
                    "tags": { "type": "array", "items": { "type": "string" } }
                },
                "required": ["petId"]
            })
        );
    }

    #[test]
    fn test_schema_without_required_params_omits_required() {
        let descriptor = ToolDescriptor::new("get_inventory", Method::Get, "/store/inventory");
        let schema = input_schema(&descriptor);
        assert!(!schema.contains_key("required"));
        assert_eq!(schema["type"], "object");
    }

    #[test]
    fn test_tool_catalog_uses_summary_as_fallback_description() {
        let server = server();
        let tools = server.tool_catalog();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name.as_ref(), "get_pet_by_id");
    }
}
