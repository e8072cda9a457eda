//! CLI definitions for the artifact lifecycle.
//!
//! # Usage
//!
//! ```bash
//! devtls key                     # generate/overwrite tls.key
//! devtls request example.com     # build tls.csr for example.com
//! devtls sign                    # self-sign tls.crt from tls.key + tls.csr
//! devtls reset example.com       # key, request and sign in one run
//! TARGET_DIR=/etc/tls devtls status
//! ```

use std::io;
use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use devtls_config::{
    CliOverrides, LoggingConfig, apply_overrides, load_or_default, validate_config,
};
use devtls_core::defaults;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::engine::{CryptoEngine, OpensslEngine};
use crate::error::CertError;
use crate::keygen::KeyGenerator;
use crate::pipeline::Orchestrator;
use crate::request::RequestBuilder;
use crate::sign::CertificateSigner;
use crate::store::{ArtifactKind, ArtifactStore};

/// Local TLS key, CSR and self-signed certificate management.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "devtls",
    version,
    about = "Issue a local TLS key, CSR and self-signed certificate",
    arg_required_else_help = true,
    propagate_version = true
)]
pub struct CertArgs {
    /// Config file path (json/jsonc/yaml/toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: CliOverrides,

    #[command(subcommand)]
    pub command: CertCommands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CertCommands {
    /// Generate (or overwrite) the private key.
    Key,

    /// Generate (or overwrite) the certificate signing request.
    Request {
        /// Domain used as subject CN and sole DNS SubjectAlternativeName.
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        domain: String,
    },

    /// Self-sign the certificate from the existing key and request.
    Sign,

    /// Run key, request and sign in sequence.
    Reset {
        /// Domain used as subject CN and sole DNS SubjectAlternativeName.
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        domain: String,
    },

    /// Show which artifacts exist in the target directory.
    Status,
}

/// Outcome of a failed [`CertArgs`] parse: the text to print and the exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub message: String,
    /// `true` when `message` belongs on stderr.
    pub to_stderr: bool,
    pub exit_code: u8,
}

impl ParseFailure {
    /// `--help` and `--version` exit 0; every other parse error exits 1.
    /// Unknown subcommands also get the full help so all subcommands are listed.
    pub fn from_error(err: &clap::Error) -> Self {
        let mut message = err.render().to_string();
        if err.kind() == ErrorKind::InvalidSubcommand {
            message.push('\n');
            message.push_str(&CertArgs::command().render_help().to_string());
        }
        let to_stderr = err.use_stderr();
        Self {
            message,
            to_stderr,
            exit_code: if to_stderr { 1 } else { 0 },
        }
    }
}

/// Run the CLI with the given arguments.
pub fn run(args: CertArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_or_default(args.config.as_deref())?;
    apply_overrides(&mut config, &args.overrides);
    validate_config(&config)?;

    init_tracing(&config.logging);

    let store = ArtifactStore::from_config(&config.store);
    info!(
        version = devtls_core::VERSION,
        target_dir = %store.target_dir().display(),
        command = ?args.command,
        "devtls starting"
    );

    execute(
        &args.command,
        &store,
        &OpensslEngine::new(),
        config.certificate.validity_days,
    )?;
    Ok(())
}

/// Dispatch one command against `store` and print its summary to stdout.
pub fn execute<E: CryptoEngine + ?Sized>(
    command: &CertCommands,
    store: &ArtifactStore,
    engine: &E,
    validity_days: u32,
) -> Result<(), CertError> {
    match command {
        CertCommands::Key => {
            KeyGenerator::new(store, engine).generate()?;
            println!("Private key written:");
            print_artifact(store, ArtifactKind::Key);
        }
        CertCommands::Request { domain } => {
            RequestBuilder::new(store, engine).build(domain)?;
            println!("Certificate signing request written:");
            print_artifact(store, ArtifactKind::Request);
            println!("  Domain:      {}", domain);
        }
        CertCommands::Sign => {
            CertificateSigner::new(store, engine)
                .validity_days(validity_days)
                .sign()?;
            println!("Self-signed certificate written:");
            print_artifact(store, ArtifactKind::Certificate);
            println!("  Valid for:   {} days", validity_days);
        }
        CertCommands::Reset { domain } => {
            Orchestrator::new(store, engine)
                .validity_days(validity_days)
                .reset(domain)?;
            println!("Key material reset:");
            for kind in ArtifactKind::ALL {
                print_artifact(store, kind);
            }
            println!("  Domain:      {}", domain);
            println!("  Valid for:   {} days", validity_days);
        }
        CertCommands::Status => {
            println!("Target directory: {}", store.target_dir().display());
            println!("State:            {}", store.state());
            for kind in ArtifactKind::ALL {
                let presence = if store.exists(kind) { "present" } else { "missing" };
                println!("  {:<28} {:<8} {}", kind, presence, store.path(kind).display());
            }
        }
    }
    Ok(())
}

fn print_artifact(store: &ArtifactStore, kind: ArtifactKind) {
    let label = match kind {
        ArtifactKind::Key => "Private key:",
        ArtifactKind::Request => "Request:",
        ArtifactKind::Certificate => "Certificate:",
    };
    println!("  {:<12} {}", label, store.path(kind).display());
}

/// Initialize tracing subscriber with the given logging configuration.
///
/// Supports:
/// - `level`: Base log level (trace, debug, info, warn, error)
/// - `format`: Output format (json, pretty, compact). Default: pretty
/// - `output`: Output target (stdout, stderr). Default: stderr
/// - `filters`: Per-module log level overrides
fn init_tracing(config: &LoggingConfig) {
    // Build the env filter from base level and per-module filters
    let base_level = config.level.as_deref().unwrap_or(defaults::DEFAULT_LOG_LEVEL);
    let mut filter_str = base_level.to_string();

    for (module, level) in &config.filters {
        filter_str.push(',');
        filter_str.push_str(module);
        filter_str.push('=');
        filter_str.push_str(level);
    }

    let filter = EnvFilter::try_new(&filter_str)
        .unwrap_or_else(|_| EnvFilter::new(defaults::DEFAULT_LOG_LEVEL));

    let format = config.format.as_deref().unwrap_or(defaults::DEFAULT_LOG_FORMAT);
    let output = config.output.as_deref().unwrap_or(defaults::DEFAULT_LOG_OUTPUT);

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = match (format, output) {
        ("json", "stdout") => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stdout))
            .try_init(),
        ("json", _) => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init(),
        ("compact", "stdout") => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_writer(io::stdout))
            .try_init(),
        ("compact", _) => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_writer(io::stderr))
            .try_init(),
        (_, "stdout") => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stdout))
            .try_init(),
        // pretty to stderr is default
        _ => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stderr))
            .try_init(),
    };
}
