use hypergraph_sieve::prelude::*;
use proptest::prelude::*;

fn arb_hypergraph() -> impl Strategy<Value = Vec<Vec<i64>>> {
    prop::collection::vec(prop::collection::vec(-5i64..40, 0..6), 0..12)
}

fn to_hypergraph(edges: &[Vec<i64>]) -> Hypergraph {
    Hypergraph::from_edges(
        edges
            .iter()
            .enumerate()
            .map(|(e, nodes)| (Key::Int(100 - e as i64), nodes.iter().copied().map(Key::Int).collect())),
    )
}

fn build(hg: &Hypergraph) -> (Renumbering, CsrMatrix) {
    let r = renumber(hg).unwrap();
    let b = build_incidence(hg, &r, EmptyEdgeHandling::Ignore, DuplicateHandling::Keep).unwrap();
    (r, b.matrix)
}

proptest! {
    #[test]
    fn row_pointer_invariants(edges in arb_hypergraph()) {
        let hg = to_hypergraph(&edges);
        let (r, m) = build(&hg);
        let ptr = m.indptr();
        prop_assert_eq!(ptr.len(), r.nodes.len() + 1);
        prop_assert_eq!(ptr[0], 0);
        prop_assert!(ptr.windows(2).all(|w| w[0] <= w[1]));
        let expected_nnz: usize = edges.iter().map(Vec::len).sum();
        prop_assert_eq!(ptr[r.nodes.len()], expected_nnz);
        prop_assert_eq!(m.nnz(), expected_nnz);
        prop_assert!(m.validate_invariants().is_ok());
    }

    #[test]
    fn every_entry_is_a_real_incidence(edges in arb_hypergraph()) {
        let hg = to_hypergraph(&edges);
        let (r, m) = build(&hg);
        for (row, col, val) in m.triples() {
            prop_assert!(col < r.edges.len());
            prop_assert_eq!(val, 1.0);
            let node = r.nodes.key_of(row).unwrap();
            let edge = r.edges.key_of(col).unwrap();
            prop_assert!(hg.nodes_of(edge).unwrap().contains(node));
        }
    }

    #[test]
    fn node_order_depends_only_on_the_id_set(edges in arb_hypergraph()) {
        let hg = to_hypergraph(&edges);
        let mut reversed = edges.clone();
        reversed.reverse();
        for e in reversed.iter_mut() {
            e.reverse();
        }
        let a = renumber(&hg).unwrap();
        let b = renumber(&to_hypergraph(&reversed)).unwrap();
        prop_assert_eq!(a.nodes.keys(), b.nodes.keys());
        prop_assert!(a.nodes.keys().windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(renumber(&hg).unwrap(), a);
    }

    #[test]
    fn empty_edges_do_not_shift_columns(edges in arb_hypergraph()) {
        let hg = to_hypergraph(&edges);
        let (r, m) = build(&hg);
        prop_assert_eq!(r.edges.len(), edges.len());
        let mut per_col = vec![0usize; edges.len()];
        for &c in m.indices() {
            per_col[c] += 1;
        }
        let sizes: Vec<usize> = edges.iter().map(Vec::len).collect();
        prop_assert_eq!(per_col, sizes);
    }

    #[test]
    fn labels_have_one_entry_per_node(edges in arb_hypergraph(), modulus in 1i64..5) {
        let hg = to_hypergraph(&edges);
        let r = renumber(&hg).unwrap();
        let values = (0..20)
            .map(|i| hypergraph_sieve::io::pickle::PickleValue::Int(i % modulus))
            .collect();
        let src = LabelSource::from_pickle(
            hypergraph_sieve::io::pickle::PickleValue::Seq(values),
            std::path::Path::new("L.pickle"),
        )
        .unwrap();
        let aligned = align_labels(&r.nodes, &src, LabelMode::Scalar).unwrap();
        prop_assert_eq!(aligned.labels.len(), r.nodes.len());
        for (key, &label) in r.nodes.keys().iter().zip(&aligned.labels) {
            let id = key.as_int().unwrap();
            if (0..20).contains(&id) {
                prop_assert_eq!(label, id % modulus);
            } else {
                prop_assert_eq!(label, SENTINEL_LABEL);
            }
        }
    }
}
