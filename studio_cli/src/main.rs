//! # Structural Studio CLI
//!
//! Create, edit, analyze and report on `.sketch` files from the terminal.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use studio_core::components::ComponentKind;
use studio_core::loads::LoadDirection;

mod commands;

#[derive(Parser)]
#[command(name = "studio")]
#[command(version, about = "Structural Studio - quick stress checks for structural sketches")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty sketch seeded with the default material library.
    New {
        path: PathBuf,

        #[arg(short, long, default_value = "Untitled sketch")]
        title: String,
    },

    /// Place a component (wall, beam, column, support).
    Add {
        path: PathBuf,

        kind: ComponentKind,

        /// Horizontal position, percent of the workspace
        #[arg(long, default_value_t = 50.0)]
        x: f64,

        /// Vertical position, percent of the workspace
        #[arg(long, default_value_t = 50.0)]
        y: f64,
    },

    /// Add a load to a component.
    Load {
        path: PathBuf,

        component: Uuid,

        /// Magnitude in kN (kN·m for moments); defaults to the sketch setting
        #[arg(short, long)]
        magnitude: Option<f64>,

        #[arg(short, long, default_value = "axial")]
        direction: LoadDirection,

        #[arg(short, long)]
        label: Option<String>,
    },

    /// Run the stress check and print the results.
    Analyze {
        path: PathBuf,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the text report, or write it to a file.
    Report {
        path: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build and analyze a small reference sketch in memory.
    Demo,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::New { path, title } => commands::new_sketch(&path, &title),
        Commands::Add { path, kind, x, y } => commands::add_component(&path, kind, x, y),
        Commands::Load {
            path,
            component,
            magnitude,
            direction,
            label,
        } => commands::add_load(&path, component, magnitude, direction, label),
        Commands::Analyze { path, json } => commands::analyze(&path, json),
        Commands::Report { path, output } => commands::report(&path, output.as_deref()),
        Commands::Demo => commands::demo(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        if cli.verbose {
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{json}");
            }
        }
        std::process::exit(1);
    }
}
