//! modstack command line
//!
//! Parses a modifier stack against a cluster catalog and prints the tree.
//!
//! Usage:
//!   modstack-cli parse BEVEL:a BEVEL:b WEIGHTED_NORMAL:w
//!   modstack-cli parse --stack stack.json --catalog catalog.json --json
//!   modstack-cli catalog

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use modstack_cli::{build_tree, load_catalog, load_stack, render_catalog, render_tree};
use modstack_state::save;
use modstack_tree::TreeConfig;
use std::{fs, path::PathBuf};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "modstack-cli")]
#[command(about = "Group modifier stacks into clusters")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Cluster catalog file (stock catalog if omitted)
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a stack and print the resulting tree
    Parse {
        /// Stack file: a JSON array of {"name", "type"} objects
        #[arg(short, long)]
        stack: Option<PathBuf>,

        /// Saved layout to restore before parsing
        #[arg(long)]
        state: Option<PathBuf>,

        /// Cap on layer parsing passes
        #[arg(long, default_value = "10")]
        max_iterations: usize,

        /// Print the layout record as JSON instead of a tree
        #[arg(long)]
        json: bool,

        /// Primitives as TYPE:name, top to bottom
        primitives: Vec<String>,
    },
    /// List the catalog's cluster types
    Catalog,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();

    let mut config = TreeConfig::default();
    let catalog = load_catalog(args.catalog.as_deref(), config.replace_definitions)?;

    match args.command {
        Command::Catalog => print!("{}", render_catalog(&catalog)),
        Command::Parse {
            stack,
            state,
            max_iterations,
            json,
            primitives,
        } => {
            config.parser.max_layer_iterations = max_iterations;
            let stack = load_stack(stack.as_deref(), &primitives)?;
            let state = state
                .map(|path| {
                    fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read state file {}", path.display()))
                })
                .transpose()?;
            info!(primitives = stack.len(), "parsing stack");

            let tree = build_tree(stack, catalog, config, state)?;
            for diagnostic in tree.diagnostics().warnings() {
                warn!("{}", diagnostic.message);
            }
            if json {
                println!("{}", save(tree.get_tree().items()).to_json()?);
            } else {
                print!("{}", render_tree(tree.get_tree()));
            }
        }
    }
    Ok(())
}
