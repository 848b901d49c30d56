//! Request shaping: from a descriptor plus validated arguments to a
//! concrete [`RequestPlan`].
//!
//! Path arguments are percent-encoded with the RFC 3986 unreserved set,
//! query parameters are appended only when present (lists as repeated
//! pairs, booleans lowercase), and the body is selected per the
//! descriptor: one raw value, or fields assembled from their json paths.

use crate::body;
use crate::config::BindingConfig;
use crate::descriptor::{Method, ParamLocation, ToolDescriptor};
use crate::error::{Error, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::{Map, Value};
use url::Url;

/// Everything except RFC 3986 unreserved characters gets percent-encoded
const PATH_SEGMENT_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Selected request body encoding
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON-serialized value
    Json(Value),
    /// Pre-serialized payload sent unmodified as `application/json`
    Raw(String),
}

/// Fully shaped request, ready for the transport
#[derive(Debug, Clone)]
pub struct RequestPlan {
    pub method: Method,
    /// Absolute URL with the query string already applied
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

/// Build the request plan for one invocation.
///
/// `arguments` must already be validated and coerced by the registry; every
/// path placeholder therefore has a matching argument.
pub fn build_plan(
    config: &BindingConfig,
    descriptor: &ToolDescriptor,
    arguments: &Map<String, Value>,
) -> Result<RequestPlan> {
    let mut path = descriptor.path_template.clone();
    for spec in descriptor.params_at(ParamLocation::Path) {
        let value = arguments.get(&spec.name).ok_or_else(|| {
            Error::validation(format!("missing required argument: {}", spec.name))
        })?;
        let text = scalar_to_string(&spec.name, value)?;
        let encoded = utf8_percent_encode(&text, PATH_SEGMENT_ENCODE).to_string();
        path = path.replace(&format!("{{{}}}", spec.name), &encoded);
    }

    let mut url = Url::parse(&format!("{}{}", config.base_url(), path))
        .map_err(|e| Error::config(format!("invalid request URL for '{path}': {e}")))?;

    let mut pairs: Vec<(String, String)> = Vec::new();
    for spec in descriptor.params_at(ParamLocation::Query) {
        let Some(value) = arguments.get(&spec.name) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        match value {
            Value::Array(items) => {
                for item in items {
                    pairs.push((spec.name.clone(), scalar_to_string(&spec.name, item)?));
                }
            }
            _ => pairs.push((spec.name.clone(), scalar_to_string(&spec.name, value)?)),
        }
    }
    if !pairs.is_empty() {
        let mut editor = url.query_pairs_mut();
        for (name, value) in &pairs {
            editor.append_pair(name, value);
        }
        drop(editor);
    }

    let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
    if let Some((name, value)) = config.auth_header() {
        headers.push((name, value));
    }
    for spec in descriptor.params_at(ParamLocation::Header) {
        let Some(value) = arguments.get(&spec.name) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        headers.push((spec.name.clone(), scalar_to_string(&spec.name, value)?));
    }

    Ok(RequestPlan {
        method: descriptor.method,
        url,
        headers,
        body: select_body(descriptor, arguments)?,
    })
}

/// Pick the body encoding per the descriptor's body parameters
fn select_body(
    descriptor: &ToolDescriptor,
    arguments: &Map<String, Value>,
) -> Result<Option<RequestBody>> {
    if let Some(spec) = descriptor.params_at(ParamLocation::BodyRaw).next() {
        return Ok(match arguments.get(&spec.name) {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => Some(RequestBody::Raw(raw.clone())),
            Some(value) => Some(RequestBody::Json(value.clone())),
        });
    }

    let mut fields: Vec<(&str, &Value)> = Vec::new();
    for spec in descriptor.params_at(ParamLocation::BodyField) {
        let Some(value) = arguments.get(&spec.name) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        let json_path = spec
            .json_path
            .as_deref()
            .expect("validated descriptor: body field has a json path");
        fields.push((json_path, value));
    }
    if fields.is_empty() {
        return Ok(None);
    }
    Ok(Some(RequestBody::Json(body::assemble(fields)?)))
}

/// Canonical string form of a scalar argument.
///
/// Booleans become lowercase `true`/`false`, numbers their decimal form,
/// strings pass through verbatim.
fn scalar_to_string(name: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Number(number) => Ok(number.to_string()),
        _ => Err(Error::validation(format!(
            "invalid argument {name}: expected a scalar value"
        ))),
    }
}
