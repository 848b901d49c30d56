//! restgate CLI entrypoint
//! Resolves a binding's configuration and serves its tool catalog over MCP.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use restgate::bindings::{self, ApiBinding};
use restgate::server;
use std::process::ExitCode;

// External imports (alphabetized)
use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// Exit code for configuration failures (missing base URL, bad catalog)
const EXIT_MISCONFIGURED: u8 = 2;

#[derive(Parser)]
#[command(name = "restgate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Serve one API binding as an MCP server over stdio
    Serve {
        /// Binding name: petstore, argocd, argo-workflows, pagerduty, splunk
        binding: String,
        /// Upstream base URL; overrides the environment
        #[arg(long)]
        base_url: Option<String>,
        /// Credential for the upstream API; overrides the environment
        #[arg(long)]
        token: Option<String>,
        /// Total per-request timeout in seconds
        #[arg(long)]
        timeout_seconds: Option<u64>,
        /// Disable upstream TLS certificate verification
        #[arg(long)]
        insecure: bool,
    },
    /// Print a binding's tool catalog without contacting the upstream
    #[command(name = "list-tools")]
    ListTools {
        /// Binding name: petstore, argocd, argo-workflows, pagerduty, splunk
        binding: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Log to stderr only: stdout belongs to the MCP transport.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve {
            binding,
            base_url,
            token,
            timeout_seconds,
            insecure,
        } => serve(&binding, base_url, token, timeout_seconds, insecure).await,
        Commands::ListTools { binding } => list_tools(&binding),
    }
}

/// Look up a binding or exit with the misconfiguration code
fn resolve_binding(name: &str) -> Result<ApiBinding, ExitCode> {
    bindings::by_name(name).ok_or_else(|| {
        let known: Vec<&str> = bindings::all().iter().map(|binding| binding.name).collect();
        error!(binding = name, ?known, "unknown binding");
        ExitCode::from(EXIT_MISCONFIGURED)
    })
}

/// Run the MCP stdio server for one binding
async fn serve(
    name: &str,
    base_url: Option<String>,
    token: Option<String>,
    timeout_seconds: Option<u64>,
    insecure: bool,
) -> ExitCode {
    let binding = match resolve_binding(name) {
        Ok(binding) => binding,
        Err(code) => return code,
    };

    let mut builder = binding.config_builder();
    if let Some(base_url) = base_url {
        builder = builder.base_url(base_url);
    }
    if let Some(token) = token {
        builder = builder.auth_token(token);
    }
    if let Some(timeout_seconds) = timeout_seconds {
        builder = builder.timeout_seconds(timeout_seconds);
    }
    if insecure {
        builder = builder.verify_tls(false);
    }

    let config = match builder.resolve() {
        Ok(config) => config,
        Err(e) => {
            error!(binding = name, error = %e, "configuration is invalid");
            return ExitCode::from(EXIT_MISCONFIGURED);
        }
    };
    let registry = match binding.registry(config) {
        Ok(registry) => registry,
        Err(e) => {
            error!(binding = name, error = %e, "tool catalog failed validation");
            return ExitCode::from(EXIT_MISCONFIGURED);
        }
    };

    info!(
        binding = name,
        tools = registry.len(),
        base_url = registry.config().base_url(),
        "serving MCP tools over stdio"
    );
    match server::serve_stdio(registry).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(binding = name, error = %e, "server terminated");
            ExitCode::FAILURE
        }
    }
}

/// Print the catalog for a binding
fn list_tools(name: &str) -> ExitCode {
    let binding = match resolve_binding(name) {
        Ok(binding) => binding,
        Err(code) => return code,
    };
    let catalog = binding.catalog();
    println!("Tools for binding '{}':", binding.name);
    for descriptor in &catalog {
        println!(
            "  {:<28} {:>6} {:<48} {}",
            descriptor.name,
            descriptor.method.as_str(),
            descriptor.path_template,
            descriptor.summary
        );
    }
    println!("\n{} tool(s)", catalog.len());
    ExitCode::SUCCESS
}
