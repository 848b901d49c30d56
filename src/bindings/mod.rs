//! Upstream API bindings.
//!
//! One module per wrapped REST API, each exporting a generated table of
//! tool descriptors plus the binding profile (environment prefix and auth
//! header shape). The runtime never special-cases an API: everything an
//! upstream needs is expressed through the descriptor table and the
//! binding profile.

use crate::config::{BindingConfig, BindingConfigBuilder};
use crate::descriptor::ToolDescriptor;
use crate::error::Result;
use crate::registry::ToolRegistry;

pub mod argo_workflows;
pub mod argocd;
pub mod pagerduty;
pub mod petstore;
pub mod splunk;

/// Profile of one upstream API binding
#[derive(Debug, Clone, Copy)]
pub struct ApiBinding {
    /// Binding name, as used on the command line
    pub name: &'static str,
    /// Environment variable prefix, e.g. `ARGOCD` for `ARGOCD_API_URL`
    pub env_prefix: &'static str,
    /// Header carrying the credential
    pub auth_header_name: &'static str,
    /// Credential format with `{token}` substituted
    pub auth_header_format: &'static str,
    catalog: fn() -> Vec<ToolDescriptor>,
}

impl ApiBinding {
    /// The generated descriptor table for this upstream
    pub fn catalog(&self) -> Vec<ToolDescriptor> {
        (self.catalog)()
    }

    /// Config builder pre-seeded with this binding's env prefix and auth shape
    pub fn config_builder(&self) -> BindingConfigBuilder {
        BindingConfig::builder(self.env_prefix)
            .auth_header_name(self.auth_header_name)
            .auth_header_format(self.auth_header_format)
    }

    /// Build a registry holding the full catalog
    pub fn registry(&self, config: BindingConfig) -> Result<ToolRegistry> {
        let mut registry = ToolRegistry::new(self.name, config)?;
        registry.register_all(self.catalog())?;
        Ok(registry)
    }
}

/// All known bindings
pub fn all() -> [ApiBinding; 5] {
    [
        ApiBinding {
            name: "petstore",
            env_prefix: "PETSTORE",
            auth_header_name: "api_key",
            auth_header_format: "{token}",
            catalog: petstore::catalog,
        },
        ApiBinding {
            name: "argocd",
            env_prefix: "ARGOCD",
            auth_header_name: "Authorization",
            auth_header_format: "Token {token}",
            catalog: argocd::catalog,
        },
        ApiBinding {
            name: "argo-workflows",
            env_prefix: "ARGO_WORKFLOWS",
            auth_header_name: "Authorization",
            auth_header_format: "Bearer {token}",
            catalog: argo_workflows::catalog,
        },
        ApiBinding {
            name: "pagerduty",
            env_prefix: "PAGERDUTY",
            auth_header_name: "Authorization",
            auth_header_format: "Token {token}",
            catalog: pagerduty::catalog,
        },
        ApiBinding {
            name: "splunk",
            env_prefix: "SPLUNK",
            auth_header_name: "X-SF-Token",
            auth_header_format: "{token}",
            catalog: splunk::catalog,
        },
    ]
}

/// Look up a binding by its command-line name
pub fn by_name(name: &str) -> Option<ApiBinding> {
    all().into_iter().find(|binding| binding.name == name)
}
