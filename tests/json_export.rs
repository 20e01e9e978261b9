mod util;

use hypergraph_sieve::prelude::*;
use serde_json::{Value, json};
use std::fs;
use util::*;

#[test]
fn json_export_writes_node_attributes_and_labels() {
    let dir = dataset_dir();
    write_pickle(dir.path(), "hypergraph.pickle", &scenario_a());
    write_pickle(
        dir.path(),
        "labels.pickle",
        &dict(vec![
            (int(1), int(5)),
            (
                int(2),
                dict(vec![(text("venue"), text("KDD")), (text("year"), int(2019))]),
            ),
            (int(3), text("x")),
        ]),
    );

    let opts = ConvertOptions::default().with_json_export("toy");
    let report = convert_dataset(dir.path(), &opts).unwrap();
    assert!(report.written.iter().any(|p| p.ends_with("toy.json")));

    let doc: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("toy.json")).unwrap()).unwrap();
    assert_eq!(doc["hypergraph-data"], json!({ "name": "toy" }));
    assert_eq!(doc["node-data"]["1"], json!({ "label": "5" }));
    assert_eq!(doc["node-data"]["2"], json!({ "venue": "KDD", "year": 2019 }));
    assert_eq!(doc["node-data"]["3"], json!({ "label": "x" }));
    assert_eq!(doc["edge-dict"], json!({ "0": ["1", "2"], "1": ["2", "3"] }));

    // the record label resolves to the sentinel in both outputs
    assert_eq!(lines(&dir.path().join("toy_labels.txt")), ["5", "-1", "-1"]);
    assert_eq!(
        lines(&dir.path().join("processed/labels.txt")),
        ["5", "-1", "-1"]
    );
}

#[test]
fn json_is_pretty_printed_with_two_spaces() {
    let dir = dataset_dir();
    write_pickle(dir.path(), "H.pickle", &scenario_a());
    convert_dataset(dir.path(), &ConvertOptions::default().with_json_export("hypergraph")).unwrap();

    let text = fs::read_to_string(dir.path().join("hypergraph.json")).unwrap();
    assert!(text.starts_with("{\n  \"hypergraph-data\""), "{text}");
    assert!(text.contains("\"1\": {}"));
}
