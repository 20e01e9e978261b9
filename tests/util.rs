#![allow(dead_code)]
use hypergraph_sieve::io::pickle::{PickleValue, to_pickle_bytes};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn int(v: i64) -> PickleValue {
    PickleValue::Int(v)
}

pub fn text(s: &str) -> PickleValue {
    PickleValue::Str(s.to_string())
}

pub fn ints(v: &[i64]) -> PickleValue {
    PickleValue::Seq(v.iter().copied().map(PickleValue::Int).collect())
}

pub fn seq(items: Vec<PickleValue>) -> PickleValue {
    PickleValue::Seq(items)
}

pub fn dict(entries: Vec<(PickleValue, PickleValue)>) -> PickleValue {
    PickleValue::Map(entries)
}

/// `{key: [nodes...]}` with integer node ids, in the given order.
pub fn edge_dict(entries: Vec<(PickleValue, Vec<i64>)>) -> PickleValue {
    dict(entries.into_iter().map(|(k, nodes)| (k, ints(&nodes))).collect())
}

pub fn write_pickle(dir: &Path, name: &str, value: &PickleValue) {
    let bytes = to_pickle_bytes(value).expect("encode pickle");
    fs::write(dir.join(name), bytes).expect("write pickle");
}

pub fn dataset_dir() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

/// Lines of a text artifact.
pub fn lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
        .lines()
        .map(str::to_string)
        .collect()
}

/// Scenario A hypergraph: `{"e0": [1, 2], "e1": [2, 3]}`.
pub fn scenario_a() -> PickleValue {
    edge_dict(vec![(text("e0"), vec![1, 2]), (text("e1"), vec![2, 3])])
}
