use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use densest::batch::{self, BatchConfig};
use densest::convert::{self, ConvertOptions, SizeRegistry};
use densest::{io, peel};

#[derive(Parser)]
#[command(name = "densest")]
#[command(about = "Densest-subgraph 2-approximation over edge-list files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Approximate the densest subgraph of one edge-list file
    Run {
        /// Input edge list, one "<from> <to>" entry per line
        input: PathBuf,

        /// Where to write the densest subgraph
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verify that every entry has its reverse before peeling
        #[arg(long, default_value_t = false)]
        check_symmetry: bool,
    },
    /// Run every dataset of a data directory in random order
    Batch {
        /// JSON batch configuration (defaults apply when absent)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Data directory, overriding the configuration
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Shuffle seed, overriding the configuration
        #[arg(long)]
        seed: Option<u64>,

        /// Write the run records as JSON here
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Convert a raw dataset into a symmetric edge list
    Convert {
        /// Raw edge list
        raw: PathBuf,

        /// Converted output
        out: PathBuf,

        /// Field separator (whitespace when omitted)
        #[arg(long)]
        separator: Option<char>,

        /// Leading lines to skip
        #[arg(long, default_value_t = 0)]
        skip: usize,

        /// Dataset name for the size registry
        #[arg(long, requires = "sizes")]
        name: Option<String>,

        /// Size registry to update
        #[arg(long, requires = "name")]
        sizes: Option<PathBuf>,
    },
    /// Summarise accumulated running times
    Times {
        /// JSON batch configuration (defaults apply when absent)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Data directory, overriding the configuration
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            output,
            check_symmetry,
        } => cmd_run(&input, output.as_deref(), check_symmetry)?,
        Commands::Batch {
            config,
            data_dir,
            seed,
            report,
        } => {
            let mut config = load_config(config.as_deref(), data_dir)?;
            if seed.is_some() {
                config.seed = seed;
            }
            cmd_batch(&config, report.as_deref())?;
        }
        Commands::Convert {
            raw,
            out,
            separator,
            skip,
            name,
            sizes,
        } => {
            let options = ConvertOptions {
                separator,
                skip_lines: skip,
            };
            let registry = name.as_deref().zip(sizes.as_deref());
            let size = convert::convert_file(&raw, &out, &options, registry)
                .with_context(|| format!("Failed to convert {}", raw.display()))?;
            println!("{}: {} nodes, {} edges", out.display(), size.nodes, size.edges);
        }
        Commands::Times {
            config,
            data_dir,
            json,
        } => {
            let config = load_config(config.as_deref(), data_dir)?;
            cmd_times(&config, json)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<BatchConfig> {
    let mut config = match path {
        Some(path) => BatchConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => BatchConfig::default(),
    };
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config)
}

fn cmd_run(input: &Path, output: Option<&Path>, check_symmetry: bool) -> Result<()> {
    let graph = io::load_edge_file(input)?;
    if check_symmetry {
        graph
            .check_symmetric()
            .with_context(|| format!("{} is not symmetric", input.display()))?;
    }

    let start = Instant::now();
    let peeling = peel(&graph);
    let densest = graph.induced_subgraph(peeling.survivors());
    let elapsed = start.elapsed();

    println!(
        "{}: {} nodes, {} edges -> {} nodes, {} edges, density {:.4} in {:.2?}",
        input.display(),
        graph.node_count(),
        graph.edge_count(),
        densest.node_count(),
        densest.edge_count(),
        peeling.best_density(),
        elapsed
    );

    if let Some(output) = output {
        io::export_edge_file(&densest, output)?;
        println!("Subgraph written to {}", output.display());
    }
    Ok(())
}

fn cmd_batch(config: &BatchConfig, report: Option<&Path>) -> Result<()> {
    config.validate()?;
    let records = batch::run_all(config)?;
    println!("Finished {} datasets", records.len());

    if let Some(report) = report {
        if let Some(parent) = report.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(report, json).with_context(|| format!("Failed to write {}", report.display()))?;
        println!("Report written to {}", report.display());
    }
    Ok(())
}

fn cmd_times(config: &BatchConfig, json: bool) -> Result<()> {
    let sizes_path = config.sizes_path();
    let mut registry = SizeRegistry::load(&sizes_path)?;
    let summary = batch::summarize_times(config, &mut registry)?;
    registry.save(&sizes_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("| Dataset | n + m | Samples | Mean (ns) | ±(ns) |");
    println!("|---|---|---|---|---|");
    for d in &summary.datasets {
        println!(
            "| {} | {} | {} | {:.0} | {:.0} |",
            d.name,
            d.size.total(),
            d.samples,
            d.mean_nanos,
            d.half_std_nanos
        );
    }
    match summary.fit {
        Some(fit) => println!(
            "\ntime ≈ {:.4} ns · (n + m) + {:.0} ns, R² = {:.5}",
            fit.slope, fit.intercept, fit.r_squared
        ),
        None => println!("\nNot enough datasets for a linear fit"),
    }
    Ok(())
}
