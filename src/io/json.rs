//! JSON export of a hypergraph with per-node attributes.
//!
//! Produces `<name>.json`:
//!
//! ```json
//! {
//!   "hypergraph-data": { "name": "<name>" },
//!   "node-data": { "<node>": { ...attributes } },
//!   "edge-dict": { "<edge index>": ["<node>", ...] }
//! }
//! ```
//!
//! and `<name>_labels.txt` with one integer label per node. Node names are
//! the Python `str()` of the raw ids; `node-data` follows the dense node
//! order and `edge-dict` the edge order.

use crate::algs::align::AlignedLabels;
use crate::algs::renumber::DenseIndex;
use crate::hypergraph_error::HypergraphError;
use crate::io::csr_text::CsrTextWriter;
use crate::topology::hypergraph::Hypergraph;
use serde_json::{Map, Value, json};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Build the JSON document.
pub fn to_json_document(
    name: &str,
    hg: &Hypergraph,
    nodes: &DenseIndex,
    labels: &AlignedLabels,
) -> Value {
    let mut node_data = Map::with_capacity(nodes.len());
    for (i, key) in nodes.keys().iter().enumerate() {
        let attrs = labels
            .attributes
            .as_ref()
            .and_then(|a| a.get(i))
            .cloned()
            .unwrap_or_default();
        node_data.insert(key.to_string(), Value::Object(attrs));
    }

    let mut edge_dict = Map::with_capacity(hg.n_edges());
    for (e, (_, members)) in hg.edges().enumerate() {
        let names: Vec<Value> = members.iter().map(|n| Value::String(n.to_string())).collect();
        edge_dict.insert(e.to_string(), Value::Array(names));
    }

    json!({
        "hypergraph-data": { "name": name },
        "node-data": node_data,
        "edge-dict": edge_dict,
    })
}

/// Write `<name>.json` and `<name>_labels.txt` into `dir`.
pub fn write_json_export(
    dir: &Path,
    name: &str,
    hg: &Hypergraph,
    nodes: &DenseIndex,
    labels: &AlignedLabels,
) -> Result<Vec<PathBuf>, HypergraphError> {
    let json_path = dir.join(format!("{name}.json"));
    let doc = to_json_document(name, hg, nodes, labels);
    let file = File::create(&json_path).map_err(|e| HypergraphError::io(&json_path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &doc).map_err(|source| HypergraphError::Json {
        path: json_path.clone(),
        source,
    })?;
    writer
        .flush()
        .map_err(|e| HypergraphError::io(&json_path, e))?;

    let labels_path = dir.join(format!("{name}_labels.txt"));
    let file = File::create(&labels_path).map_err(|e| HypergraphError::io(&labels_path, e))?;
    CsrTextWriter
        .write_tokens(BufWriter::new(file), &labels.labels)
        .map_err(|e| HypergraphError::io(&labels_path, e))?;

    log::info!("JSON export saved to {}", json_path.display());
    Ok(vec![json_path, labels_path])
}
