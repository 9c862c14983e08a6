//! Ember CLI - Command-line interface for Ember scenes

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{behaviors, check, dump, init, scene};

#[derive(Parser)]
#[command(name = "ember")]
#[command(about = "Author, check and inspect Ember scene files", long_about = None)]
#[command(version)]
struct Cli {
    /// Project directory containing ember.toml
    #[arg(long, global = true, default_value = ".")]
    project: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Ember project
    Init {
        /// Project name/directory
        name: String,
    },

    /// Scene operations
    #[command(subcommand)]
    Scene(scene::SceneCommands),

    /// Load a scene and report every problem found
    Check {
        /// Path to scene file
        scene: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Load a scene and print it in canonical form
    Dump {
        /// Path to scene file
        scene: String,
    },

    /// List the behaviors a scene can attach
    Behaviors,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { name } => init::run(&name),
        Commands::Scene(cmd) => scene::run(cmd, &cli.project),
        Commands::Check { scene, format } => check::run(check::CheckArgs {
            scene,
            project: cli.project,
            format,
        }),
        Commands::Dump { scene } => dump::run(&scene, &cli.project),
        Commands::Behaviors => behaviors::run(&cli.project),
    }
}
