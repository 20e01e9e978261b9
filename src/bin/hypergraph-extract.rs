//! Convert one pickled hypergraph dataset into CSR text artifacts.
//!
//! # Usage
//!
//! ```bash
//! # writes <DATA_DIR>/processed/{H_data,H_indices,H_indptr,labels,meta}.txt
//! hypergraph-extract data/cora
//!
//! # additionally write <DATA_DIR>/cora.json and <DATA_DIR>/cora_labels.txt
//! hypergraph-extract data/cora --json --name cora
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use anyhow::Result;
use clap::Parser;
use hypergraph_sieve::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hypergraph-extract")]
#[command(about = "Convert a hypergraph dataset (classic or Villain pickle layout) to CSR text files")]
struct Args {
    /// Path to the dataset directory
    data_dir: PathBuf,

    /// Output subdirectory, relative to the dataset directory
    #[arg(long, default_value = "processed")]
    output_subdir: PathBuf,

    /// Also write <NAME>.json and <NAME>_labels.txt into the dataset directory
    #[arg(long)]
    json: bool,

    /// Dataset name used by the JSON export
    #[arg(long, default_value = "hypergraph")]
    name: String,

    /// Fail on edges with no nodes instead of skipping them
    #[arg(long)]
    strict_empty_edges: bool,

    /// Merge repeated (node, edge) incidences into one summed entry
    #[arg(long)]
    sum_duplicates: bool,
}

impl Args {
    fn options(&self) -> ConvertOptions {
        let mut opts = ConvertOptions::default().with_output_subdir(&self.output_subdir);
        if self.json {
            opts = opts.with_json_export(&self.name);
        }
        if self.strict_empty_edges {
            opts = opts.with_empty_edges(EmptyEdgeHandling::Error);
        }
        if self.sum_duplicates {
            opts = opts.with_duplicates(DuplicateHandling::Sum);
        }
        opts
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let report = convert_dataset(&args.data_dir, &args.options())?;

    println!(
        "{} layout: {} nodes, {} edges, {} nonzeros, {} labelled, {} empty edge(s)",
        report.layout,
        report.n_nodes,
        report.n_edges,
        report.nnz,
        report.labelled_nodes,
        report.empty_edges.len()
    );
    for path in &report.written {
        println!("  wrote {}", path.display());
    }
    Ok(())
}
