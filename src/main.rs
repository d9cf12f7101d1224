//! Signature MVC
//!
//! A small MVC web framework served over HTTP with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────▶ http (axum, request id, limits)
//!                  │
//!                  ▼
//!              Application ──▶ Router ──▶ matcher chain (default, uri)
//!                  │                         │
//!                  │                         ▼
//!                  │                 Request: controller, action, params
//!                  ▼
//!              Dispatcher ──▶ Container ──▶ Controller ──▶ Outcome
//!                  ▲                                   │
//!                  └──────────── Forward ◀─────────────┘
//!                  │
//!                  ▼
//!     Client Response ◀── Response (status, headers, body)
//!
//!     Cross-cutting: config (TOML, hot reload), observability, lifecycle
//! ```
//!
//! Without `--config` the demo routes are served on the default settings.

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::Method;
use clap::{Parser, Subcommand};
use url::form_urlencoded;

use signature_mvc::application::Application;
use signature_mvc::config::loader::load_config;
use signature_mvc::config::validation::validate_config;
use signature_mvc::config::{self, AppConfig};
use signature_mvc::demo;
use signature_mvc::lifecycle::startup;
use signature_mvc::mvc::Request;
use signature_mvc::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "signature-mvc")]
#[command(version, about = "Signature MVC framework server and routing tools", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve HTTP (default)
    Serve,
    /// Validate the configuration and print the route table
    Check,
    /// Show which controller and action a URI resolves to
    Route { uri: String },
    /// Build a link to a named route
    Link {
        route: String,
        /// Arguments as KEY=VALUE
        #[arg(value_parser = parse_key_value)]
        arguments: Vec<(String, String)>,
    },
    /// Dispatch a request offline and print the raw response
    Request {
        uri: String,
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got \"{raw}\""))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            let mut config = AppConfig::default();
            demo::install_routes(&mut config);
            validate_config(&config).map_err(|errors| format!("{errors:?}"))?;
            config
        }
    };

    let shared = config::shared(config);
    let container = Arc::new(demo::build_container(shared.clone()));
    let app = Application::new(container, shared);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            init_logging(&app.config().observability)?;
            tracing::info!(version = env!("CARGO_PKG_VERSION"), "signature-mvc starting");
            startup::serve(app, cli.config.as_deref()).await?;
        }
        Command::Check => print_routes(&app),
        Command::Route { uri } => {
            let mut request = Request::with_uri(uri);
            let matched = app.route(&mut request)?;
            println!("controller: {}", request.controller_name());
            println!("action:     {}", request.controller_action_name());
            for (name, value) in request.controller_action_parameters().iter() {
                println!("param:      {name} = {value}");
            }
            if !matched {
                println!("(no route matched, fallback applied)");
            }
        }
        Command::Link { route, arguments } => {
            println!("{}", app.links().build(&route, arguments)?);
        }
        Command::Request { uri, method } => {
            let mut request = Request::with_uri(uri.clone());
            request.set_method(Method::from_bytes(method.to_uppercase().as_bytes())?);
            if let Some((_, query)) = uri.split_once('?') {
                request.set_parameters(form_urlencoded::parse(query.as_bytes()).into_owned());
            }

            let mut response = app.handle(request)?;
            let mut stdout = std::io::stdout().lock();
            response.output(&mut stdout)?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}

fn print_routes(app: &Application) {
    let config = app.config();
    println!("configuration ok");
    for matcher in &config.routing.matchers {
        println!("[{}]", matcher.kind);
        for route in &matcher.routes {
            let known = if app.container().has_controller(&route.controller) {
                ""
            } else {
                "  (controller not registered)"
            };
            println!(
                "  {:<20} {:<32} {}::{}{}",
                route.name,
                route.uris.join(", "),
                route.controller,
                route.action,
                known
            );
        }
    }
}
