//! NetBridge CLI: convert CML/VIRL topologies to GNS3 projects.
//!
//! Usage:
//!   netbridge convert -i <input>... -o <dir> [-m mapping.json] [--force]
//!   netbridge list-mappings
//!   netbridge init-mappings [path] [--force]

use clap::{Parser, Subcommand};
use netbridge::mapping::user_mapping_path;
use netbridge::{Converter, MappingTable};
use std::path::{Path, PathBuf};
use tracing::{error, info, Level};

#[derive(Parser)]
#[command(
    name = "netbridge",
    version,
    about = "Convert CML/VIRL topologies to GNS3 projects"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert CML/VIRL topology files to a GNS3 project
    Convert {
        /// Input CML (YAML) or VIRL (XML) file; repeat for several files
        #[arg(short = 'i', long = "input", required = true)]
        inputs: Vec<PathBuf>,
        /// Output directory for the GNS3 project
        #[arg(short, long)]
        output: PathBuf,
        /// Custom node mapping JSON file
        #[arg(short, long)]
        mapping: Option<PathBuf>,
        /// Overwrite an existing output directory
        #[arg(long)]
        force: bool,
    },
    /// List the default node type mappings
    ListMappings,
    /// Write the default mappings to a JSON file for editing
    InitMappings {
        /// Destination (defaults to the per-user mapping file)
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(debug: bool) {
    tracing_subscriber::fmt()
        .with_max_level(if debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();
}

/// Built-in mappings merged with `--mapping`, or with the per-user file when present
fn load_mappings(mapping: Option<&Path>) -> Result<MappingTable, String> {
    let overrides = match mapping {
        Some(path) => Some(path.to_path_buf()),
        None => user_mapping_path().filter(|p| p.is_file()),
    };
    let Some(path) = overrides else {
        return Ok(MappingTable::builtin().clone());
    };

    let custom = MappingTable::load(&path).map_err(|e| format!("Error loading custom mappings: {}", e))?;
    println!("Loaded custom node mappings from {}", path.display());
    Ok(MappingTable::builtin().merged(&custom))
}

fn cmd_convert(inputs: &[PathBuf], output: &Path, mapping: Option<&Path>, force: bool) -> i32 {
    if output.exists() && !force {
        eprintln!(
            "Error: Output directory '{}' already exists. Use --force to overwrite.",
            output.display()
        );
        return 1;
    }
    for input in inputs {
        if !input.is_file() {
            eprintln!("Error: Input file '{}' does not exist", input.display());
            return 1;
        }
    }
    if let Err(e) = std::fs::create_dir_all(output) {
        eprintln!("Error: cannot create '{}': {}", output.display(), e);
        return 1;
    }

    let mappings = match load_mappings(mapping) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };
    let converter = Converter::new(mappings);

    let mut code = 0;
    for (input, result) in converter.convert_batch(inputs, output) {
        match result {
            Ok(report) => {
                println!(
                    "Successfully converted {} to GNS3 project at {}",
                    input.display(),
                    report.stats.project_file.display()
                );
                println!(
                    "Created {} nodes and {} links",
                    report.stats.node_count, report.stats.link_count
                );
                if !report.warnings.is_empty() {
                    info!("{} warning(s) for {}", report.warnings.len(), input.display());
                }
            }
            Err(e) => {
                error!("Conversion error for {}: {}", input.display(), e);
                eprintln!("Error during conversion of {}: {}", input.display(), e);
                code = 1;
            }
        }
    }
    code
}

fn cmd_list_mappings() -> i32 {
    println!("Default CML/VIRL to GNS3 node mappings:");
    for (node_type, mapping) in MappingTable::builtin().iter() {
        println!("  {}: {}", node_type, mapping.template());
    }
    0
}

fn cmd_init_mappings(path: Option<PathBuf>, force: bool) -> i32 {
    let Some(path) = path.or_else(user_mapping_path) else {
        eprintln!("Error: no configuration directory found; pass a path");
        return 1;
    };
    if path.exists() && !force {
        eprintln!(
            "Error: '{}' already exists. Use --force to overwrite.",
            path.display()
        );
        return 1;
    }
    match MappingTable::builtin().save(&path) {
        Ok(()) => {
            println!("Wrote default node mappings to {}", path.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);
    if cli.debug {
        println!("Debug mode enabled");
    }

    let code = match cli.command {
        Commands::Convert {
            inputs,
            output,
            mapping,
            force,
        } => cmd_convert(&inputs, &output, mapping.as_deref(), force),
        Commands::ListMappings => cmd_list_mappings(),
        Commands::InitMappings { path, force } => cmd_init_mappings(path, force),
    };
    std::process::exit(code);
}
