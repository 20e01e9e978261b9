mod util;

use hypergraph_sieve::prelude::*;
use util::*;

#[test]
fn scenario_a_unlabelled_hypergraph() {
    let dir = dataset_dir();
    write_pickle(dir.path(), "H.pickle", &scenario_a());

    let report = convert_dataset(dir.path(), &ConvertOptions::default()).expect("convert");
    assert_eq!(report.layout, LayoutKind::Villain);
    assert_eq!((report.n_nodes, report.n_edges, report.nnz), (3, 2, 4));
    assert_eq!(report.labelled_nodes, 0);

    let out = dir.path().join("processed");
    assert_eq!(lines(&out.join("H_data.txt")), ["1.000000"; 4]);
    assert_eq!(lines(&out.join("H_indices.txt")), ["0", "0", "1", "1"]);
    assert_eq!(lines(&out.join("H_indptr.txt")), ["0", "1", "3", "4"]);
    assert_eq!(lines(&out.join("labels.txt")), ["-1", "-1", "-1"]);
    assert_eq!(lines(&out.join("meta.txt")), ["3 2"]);
}

#[test]
fn scenario_a_in_memory_entries() {
    let dir = dataset_dir();
    write_pickle(dir.path(), "H.pickle", &scenario_a());
    let raw = load_dataset(dir.path()).unwrap();
    let conv = convert_raw(&raw, &ConvertOptions::default()).unwrap();

    assert_eq!(
        conv.renumbering.nodes.keys(),
        &[Key::Int(1), Key::Int(2), Key::Int(3)]
    );
    let entries: Vec<_> = conv
        .dataset
        .matrix()
        .triples()
        .map(|(r, c, _)| (r, c))
        .collect();
    assert_eq!(entries, vec![(0, 0), (1, 0), (1, 1), (2, 1)]);
}

#[test]
fn scenario_b_unconvertible_label_becomes_sentinel() {
    let dir = dataset_dir();
    write_pickle(dir.path(), "hypergraph.pickle", &scenario_a());
    write_pickle(
        dir.path(),
        "labels.pickle",
        &dict(vec![(int(1), int(5)), (int(2), text("x")), (int(3), int(7))]),
    );

    let report = convert_dataset(dir.path(), &ConvertOptions::default()).unwrap();
    assert_eq!(report.layout, LayoutKind::Classic);
    assert_eq!(report.labelled_nodes, 2);
    assert_eq!(
        lines(&dir.path().join("processed/labels.txt")),
        ["5", "-1", "7"]
    );
}

#[test]
fn scenario_c_parallel_indices_are_grouped() {
    let dir = dataset_dir();
    write_pickle(
        dir.path(),
        "H.pickle",
        &seq(vec![ints(&[0, 0, 1]), ints(&[0, 1, 1])]),
    );

    let raw = load_dataset(dir.path()).unwrap();
    assert_eq!(raw.layout, LayoutKind::Villain);
    assert!(raw.labels.is_absent());
    let edges: Vec<_> = raw
        .hypergraph
        .edges()
        .map(|(k, n)| (k.clone(), n.to_vec()))
        .collect();
    assert_eq!(
        edges,
        vec![
            (Key::Int(0), vec![Key::Int(0)]),
            (Key::Int(1), vec![Key::Int(0), Key::Int(1)]),
        ]
    );
}

#[test]
fn scenario_d_empty_edge_keeps_its_slot() {
    let dir = dataset_dir();
    write_pickle(
        dir.path(),
        "H.pickle",
        &edge_dict(vec![(int(10), vec![1, 2]), (int(11), vec![]), (int(12), vec![2, 3])]),
    );

    let report = convert_dataset(dir.path(), &ConvertOptions::default()).unwrap();
    assert_eq!(report.n_edges, 3);
    assert_eq!(report.nnz, 4);
    assert_eq!(report.empty_edges, vec![1]);

    let out = dir.path().join("processed");
    assert_eq!(lines(&out.join("H_indices.txt")), ["0", "0", "2", "2"]);
    assert_eq!(lines(&out.join("H_indptr.txt")), ["0", "1", "3", "4"]);
    assert_eq!(lines(&out.join("meta.txt")), ["3 3"]);
}

#[test]
fn scenario_d_strict_mode_aborts() {
    let dir = dataset_dir();
    write_pickle(
        dir.path(),
        "H.pickle",
        &edge_dict(vec![(int(10), vec![1]), (int(11), vec![])]),
    );
    let opts = ConvertOptions::default().with_empty_edges(EmptyEdgeHandling::Error);
    let err = convert_dataset(dir.path(), &opts).unwrap_err();
    assert!(matches!(err.root(), HypergraphError::EmptyEdge { index: 1, .. }));
    assert!(err.to_string().contains(&dir.path().display().to_string()));
    assert!(!dir.path().join("processed").exists());
}
