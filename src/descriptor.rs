//! Data-only tool descriptors.
//!
//! The code generator emits tables of [`ToolDescriptor`] values, one per
//! upstream operation; a single generic dispatch path in the registry
//! replaces per-endpoint functions. Descriptors are immutable after
//! registration, and every structural invariant is checked up front by
//! [`ToolDescriptor::validate`] so a bad table fails fast at startup.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// `{placeholder}` segments in a path template
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}/]+)\}").expect("placeholder regex is valid"));

/// HTTP method of an upstream operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

/// Where a parameter lands in the outgoing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamLocation {
    /// Interpolated into the path template
    Path,
    /// Appended to the query string when present
    Query,
    /// Sent verbatim as a request header
    Header,
    /// Placed inside the JSON body at `json_path`
    BodyField,
    /// The entire request body
    BodyRaw,
}

/// Declared parameter type; drives argument coercion and the MCP schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    StringList,
    NumberList,
    Object,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::StringList => "string-list",
            ParamType::NumberList => "number-list",
            ParamType::Object => "object",
        }
    }
}

/// One caller-facing parameter of a tool
#[derive(Debug, Clone, Serialize)]
pub struct ParameterSpec {
    /// Identifier exposed to the caller
    pub name: String,
    pub location: ParamLocation,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub required: bool,
    /// Optional literal applied when the caller omits the argument
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Dot-and-index path locating a body-field value, e.g. `rules[0].filters.name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_path: Option<String>,
    /// Human description surfaced in the generated MCP schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterSpec {
    fn new<S: Into<String>>(name: S, location: ParamLocation, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            location,
            param_type,
            required: false,
            default: None,
            json_path: None,
            description: None,
        }
    }

    /// Path parameter; always required
    pub fn path<S: Into<String>>(name: S, param_type: ParamType) -> Self {
        Self {
            required: true,
            ..Self::new(name, ParamLocation::Path, param_type)
        }
    }

    /// Optional query parameter; omitted from the URL when absent or null
    pub fn query<S: Into<String>>(name: S, param_type: ParamType) -> Self {
        Self::new(name, ParamLocation::Query, param_type)
    }

    /// Header parameter, sent verbatim
    pub fn header<S: Into<String>>(name: S, param_type: ParamType) -> Self {
        Self::new(name, ParamLocation::Header, param_type)
    }

    /// Body field located at `json_path` inside the assembled JSON body
    pub fn body_field<S: Into<String>, P: Into<String>>(
        name: S,
        param_type: ParamType,
        json_path: P,
    ) -> Self {
        Self {
            json_path: Some(json_path.into()),
            ..Self::new(name, ParamLocation::BodyField, param_type)
        }
    }

    /// The entire request body as one argument
    pub fn body_raw<S: Into<String>>(name: S, param_type: ParamType) -> Self {
        Self::new(name, ParamLocation::BodyRaw, param_type)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn describe<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Immutable record mapping one MCP tool to one HTTP operation
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    /// Unique tool name within a registry
    pub name: String,
    /// One-line summary for the LLM-facing catalog
    pub summary: String,
    /// Longer description; falls back to the summary when empty
    pub description: String,
    pub method: Method,
    /// Path with zero or more `{placeholder}` segments
    pub path_template: String,
    pub parameters: Vec<ParameterSpec>,
    /// Opaque response shape note, kept for documentation only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_shape: Option<String>,
}

impl ToolDescriptor {
    pub fn new<N: Into<String>, P: Into<String>>(name: N, method: Method, path_template: P) -> Self {
        Self {
            name: name.into(),
            summary: String::new(),
            description: String::new(),
            method,
            path_template: path_template.into(),
            parameters: Vec::new(),
            response_shape: None,
        }
    }

    pub fn summary<S: Into<String>>(mut self, summary: S) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn param(mut self, spec: ParameterSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    pub fn response_shape<S: Into<String>>(mut self, shape: S) -> Self {
        self.response_shape = Some(shape.into());
        self
    }

    /// Placeholder names appearing in the path template, in order
    pub fn placeholders(&self) -> Vec<&str> {
        PLACEHOLDER_RE
            .captures_iter(&self.path_template)
            .map(|captures| captures.get(1).expect("capture group 1").as_str())
            .collect()
    }

    /// Parameters at the given location
    pub fn params_at(&self, location: ParamLocation) -> impl Iterator<Item = &ParameterSpec> {
        self.parameters
            .iter()
            .filter(move |spec| spec.location == location)
    }

    /// Look up a parameter by caller-facing name
    pub fn param_named(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|spec| spec.name == name)
    }

    /// Check every structural invariant of the descriptor.
    ///
    /// Called by the registry on registration; a failure here means the
    /// generated table is broken and the process should not start.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::descriptor("tool name cannot be empty"));
        }

        let mut seen = HashSet::new();
        for spec in &self.parameters {
            if !seen.insert(spec.name.as_str()) {
                return Err(Error::descriptor(format!(
                    "tool '{}': duplicate parameter '{}'",
                    self.name, spec.name
                )));
            }
        }

        let placeholders: HashSet<&str> = self.placeholders().into_iter().collect();
        let path_params: HashSet<&str> = self
            .params_at(ParamLocation::Path)
            .map(|spec| spec.name.as_str())
            .collect();
        if placeholders != path_params {
            return Err(Error::descriptor(format!(
                "tool '{}': path template placeholders {:?} do not match path parameters {:?}",
                self.name, placeholders, path_params
            )));
        }
        for spec in self.params_at(ParamLocation::Path) {
            if !spec.required {
                return Err(Error::descriptor(format!(
                    "tool '{}': path parameter '{}' must be required",
                    self.name, spec.name
                )));
            }
        }

        let raw_count = self.params_at(ParamLocation::BodyRaw).count();
        if raw_count > 1 {
            return Err(Error::descriptor(format!(
                "tool '{}': more than one body-raw parameter",
                self.name
            )));
        }
        if raw_count == 1 && self.params_at(ParamLocation::BodyField).next().is_some() {
            return Err(Error::descriptor(format!(
                "tool '{}': body-raw parameter cannot coexist with body fields",
                self.name
            )));
        }
        for spec in self.params_at(ParamLocation::BodyField) {
            if spec.json_path.as_deref().is_none_or(str::is_empty) {
                return Err(Error::descriptor(format!(
                    "tool '{}': body field '{}' is missing its json path",
                    self.name, spec.name
                )));
            }
        }

        Ok(())
    }
}
