//! Tool registry: registration, argument validation, and dispatch.
//!
//! A registry binds one upstream API (config + transport + descriptors).
//! It is immutable once built and safe for concurrent readers; dispatch
//! never mutates registry state. Argument coercion is permissive and
//! one-way: coercing an already-coerced map is the identity.

use crate::config::BindingConfig;
use crate::descriptor::{ParamLocation, ParamType, ToolDescriptor};
use crate::envelope::ResponseEnvelope;
use crate::error::{Error, Result};
use crate::request;
use crate::transport::HttpTransport;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// One tool call in flight; created per invocation and discarded after
#[derive(Debug, Clone)]
pub struct Invocation {
    pub tool_name: String,
    pub arguments: Map<String, Value>,
    /// Correlates log lines for one call
    pub correlation_id: Uuid,
}

impl Invocation {
    pub fn new<S: Into<String>>(tool_name: S, arguments: Map<String, Value>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments,
            correlation_id: Uuid::new_v4(),
        }
    }
}

/// In-process catalog of tool descriptors for one upstream API
#[derive(Debug)]
pub struct ToolRegistry {
    /// Binding display name, e.g. `petstore`
    name: String,
    config: BindingConfig,
    transport: HttpTransport,
    tools: HashMap<String, ToolDescriptor>,
    /// Registration order, for stable catalog listings
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create an empty registry bound to the given upstream
    pub fn new<S: Into<String>>(name: S, config: BindingConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self {
            name: name.into(),
            config,
            transport,
            tools: HashMap::new(),
            order: Vec::new(),
        })
    }

    /// Binding display name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    /// Register one descriptor; validates its invariants and rejects
    /// duplicate names
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<()> {
        descriptor.validate()?;
        if self.tools.contains_key(&descriptor.name) {
            return Err(Error::descriptor(format!(
                "duplicate tool: {}",
                descriptor.name
            )));
        }
        self.order.push(descriptor.name.clone());
        self.tools.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Register a whole catalog table
    pub fn register_all<I: IntoIterator<Item = ToolDescriptor>>(
        &mut self,
        descriptors: I,
    ) -> Result<()> {
        for descriptor in descriptors {
            self.register(descriptor)?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name)
    }

    /// Descriptors in registration order
    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.order
            .iter()
            .map(|name| &self.tools[name.as_str()])
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Validate and coerce an argument map against a descriptor.
    ///
    /// Returns the coerced map with defaults applied. Null arguments are
    /// treated as absent throughout.
    pub fn validate_arguments(
        &self,
        descriptor: &ToolDescriptor,
        arguments: &Map<String, Value>,
    ) -> Result<Map<String, Value>> {
        let mut validated = Map::new();
        for (name, value) in arguments {
            let spec = descriptor
                .param_named(name)
                .ok_or_else(|| Error::validation(format!("unknown argument: {name}")))?;
            if value.is_null() {
                continue;
            }
            // Raw bodies pass through verbatim: a pre-serialized JSON string
            // is as valid as a structured value.
            let coerced = if spec.location == ParamLocation::BodyRaw {
                value.clone()
            } else {
                coerce(name, value, spec.param_type)?
            };
            validated.insert(name.clone(), coerced);
        }
        for spec in &descriptor.parameters {
            if validated.contains_key(&spec.name) {
                continue;
            }
            if spec.required {
                return Err(Error::validation(format!(
                    "missing required argument: {}",
                    spec.name
                )));
            }
            if let Some(default) = &spec.default {
                validated.insert(spec.name.clone(), default.clone());
            }
        }
        Ok(validated)
    }

    /// Run one invocation end to end: validate, shape, issue, normalize.
    ///
    /// Every failure resolves to an envelope; nothing escapes as an error.
    pub async fn dispatch(&self, invocation: Invocation) -> ResponseEnvelope {
        let correlation_id = invocation.correlation_id;
        let Some(descriptor) = self.get(&invocation.tool_name) else {
            return ResponseEnvelope::validation_error(format!(
                "unknown tool: {}",
                invocation.tool_name
            ));
        };
        let arguments = match self.validate_arguments(descriptor, &invocation.arguments) {
            Ok(arguments) => arguments,
            Err(error) => return ResponseEnvelope::validation_error(error.to_string()),
        };
        let plan = match request::build_plan(&self.config, descriptor, &arguments) {
            Ok(plan) => plan,
            Err(error) => return ResponseEnvelope::validation_error(error.to_string()),
        };
        debug!(
            tool = %invocation.tool_name,
            %correlation_id,
            method = descriptor.method.as_str(),
            url = %plan.url,
            "issuing upstream request"
        );
        let envelope = self.transport.execute(plan).await;
        debug!(
            tool = %invocation.tool_name,
            %correlation_id,
            status = envelope.status,
            ok = envelope.ok,
            "upstream response normalized"
        );
        envelope
    }
}

/// Coerce one argument to its declared type.
///
/// Permissive and one-way: numeric strings become numbers, `"true"` becomes
/// a boolean, scalars stringify for string parameters, comma-separated
/// strings split into lists. Already-typed values pass through unchanged.
fn coerce(name: &str, value: &Value, param_type: ParamType) -> Result<Value> {
    let mismatch = || {
        Error::validation(format!(
            "invalid argument {name}: expected {}",
            param_type.as_str()
        ))
    };
    match param_type {
        ParamType::Integer => match value {
            Value::Number(number) => {
                if number.is_i64() || number.is_u64() {
                    Ok(value.clone())
                } else {
                    // Floats are accepted only with a zero fractional part.
                    let float = number.as_f64().ok_or_else(mismatch)?;
                    if float.fract() == 0.0 && float >= i64::MIN as f64 && float <= i64::MAX as f64
                    {
                        Ok(Value::from(float as i64))
                    } else {
                        Err(mismatch())
                    }
                }
            }
            Value::String(text) => text
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| mismatch()),
            _ => Err(mismatch()),
        },
        ParamType::Number => match value {
            Value::Number(_) => Ok(value.clone()),
            Value::String(text) => {
                let parsed = text.trim().parse::<f64>().map_err(|_| mismatch())?;
                if parsed.is_finite() {
                    Ok(Value::from(parsed))
                } else {
                    Err(mismatch())
                }
            }
            _ => Err(mismatch()),
        },
        ParamType::Boolean => match value {
            Value::Bool(_) => Ok(value.clone()),
            Value::String(text) => {
                if text.eq_ignore_ascii_case("true") {
                    Ok(Value::Bool(true))
                } else if text.eq_ignore_ascii_case("false") {
                    Ok(Value::Bool(false))
                } else {
                    Err(mismatch())
                }
            }
            _ => Err(mismatch()),
        },
        ParamType::String => match value {
            Value::String(_) => Ok(value.clone()),
            Value::Bool(flag) => Ok(Value::from(flag.to_string())),
            Value::Number(number) => Ok(Value::from(number.to_string())),
            _ => Err(mismatch()),
        },
        ParamType::StringList => coerce_list(name, value, ParamType::String, false),
        ParamType::NumberList => coerce_list(name, value, ParamType::Number, true),
        ParamType::Object => match value {
            Value::Object(_) => Ok(value.clone()),
            _ => Err(mismatch()),
        },
    }
}

/// Lists accept a sequence of the element type or one comma-separated
/// string. Number elements are trimmed before parsing; string elements are
/// kept verbatim.
fn coerce_list(name: &str, value: &Value, element: ParamType, trim: bool) -> Result<Value> {
    match value {
        Value::Array(items) => {
            let coerced = items
                .iter()
                .map(|item| coerce(name, item, element))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Array(coerced))
        }
        Value::String(text) => {
            let coerced = text
                .split(',')
                .map(|piece| {
                    let piece = if trim { piece.trim() } else { piece };
                    coerce(name, &Value::from(piece), element)
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Array(coerced))
        }
        _ => Err(Error::validation(format!(
            "invalid argument {name}: expected {}",
            if element == ParamType::Number {
                ParamType::NumberList.as_str()
            } else {
                ParamType::StringList.as_str()
            }
        ))),
    }
}
