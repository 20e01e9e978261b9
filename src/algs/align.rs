//! Alignment of raw labels onto the dense node order.

use crate::algs::renumber::DenseIndex;
use crate::hypergraph_error::HypergraphError;
use crate::topology::labels::{LabelMode, LabelSource, RawLabel, SENTINEL_LABEL};
use serde_json::{Map, Value};

/// Per-node attribute record kept in [`LabelMode::Rich`].
pub type NodeAttributes = Map<String, Value>;

/// Labels in dense node order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlignedLabels {
    /// One integer per node; [`SENTINEL_LABEL`] when unresolved.
    pub labels: Vec<i64>,
    /// Per-node attributes, only in rich mode.
    pub attributes: Option<Vec<NodeAttributes>>,
}

impl AlignedLabels {
    /// Number of nodes with a real (non-sentinel) label.
    pub fn resolved(&self) -> usize {
        self.labels.iter().filter(|&&l| l != SENTINEL_LABEL).count()
    }
}

/// Resolve one integer label per node of `nodes`, in dense order.
///
/// Unresolvable labels become [`SENTINEL_LABEL`]; only an array source
/// indexed by a non-integer node id is an error.
pub fn align_labels(
    nodes: &DenseIndex,
    source: &LabelSource,
    mode: LabelMode,
) -> Result<AlignedLabels, HypergraphError> {
    let mut labels = Vec::with_capacity(nodes.len());
    let mut attributes = match mode {
        LabelMode::Rich => Some(Vec::with_capacity(nodes.len())),
        LabelMode::Scalar => None,
    };

    for key in nodes.keys() {
        let raw = source.lookup(key)?;
        labels.push(raw.and_then(RawLabel::as_int).unwrap_or(SENTINEL_LABEL));

        if let Some(attrs) = attributes.as_mut() {
            attrs.push(node_attributes(source, raw));
        }
    }

    Ok(AlignedLabels { labels, attributes })
}

fn node_attributes(source: &LabelSource, raw: Option<&RawLabel>) -> NodeAttributes {
    let mut info = NodeAttributes::new();
    // array-sourced labels carry no attributes
    if !matches!(source, LabelSource::Mapping { .. }) {
        return info;
    }
    match raw {
        Some(RawLabel::Record(entries)) => {
            for (k, v) in entries {
                info.insert(k.python_str(), v.to_json());
            }
        }
        Some(RawLabel::Scalar(v)) => {
            info.insert("label".to_string(), Value::String(v.python_str()));
        }
        None => {}
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::pickle::PickleValue;
    use crate::topology::key::Key;
    use std::path::Path;

    fn nodes(v: &[i64]) -> DenseIndex {
        DenseIndex::from_ordered(v.iter().copied().map(Key::Int))
    }

    fn mapping(entries: Vec<(i64, PickleValue)>) -> LabelSource {
        LabelSource::from_pickle(
            PickleValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (PickleValue::Int(k), v))
                    .collect(),
            ),
            Path::new("labels.pickle"),
        )
        .unwrap()
    }

    #[test]
    fn absent_source_gives_sentinels() {
        let out = align_labels(&nodes(&[1, 2, 3]), &LabelSource::Absent, LabelMode::Scalar).unwrap();
        assert_eq!(out.labels, vec![-1, -1, -1]);
        assert!(out.attributes.is_none());
        assert_eq!(out.resolved(), 0);
    }

    #[test]
    fn unconvertible_scalars_fall_back() {
        let src = mapping(vec![
            (1, PickleValue::Int(5)),
            (2, PickleValue::Str("x".into())),
            (3, PickleValue::Int(7)),
        ]);
        let out = align_labels(&nodes(&[1, 2, 3]), &src, LabelMode::Scalar).unwrap();
        assert_eq!(out.labels, vec![5, -1, 7]);
        assert_eq!(out.resolved(), 2);
    }

    #[test]
    fn rich_mode_records_attributes_and_emits_sentinel() {
        let record = PickleValue::Map(vec![
            (PickleValue::Str("class".into()), PickleValue::Int(3)),
            (PickleValue::Str("name".into()), PickleValue::Str("n1".into())),
        ]);
        let src = mapping(vec![(1, record), (2, PickleValue::Str("4".into()))]);
        let out = align_labels(&nodes(&[1, 2, 9]), &src, LabelMode::Rich).unwrap();
        assert_eq!(out.labels, vec![-1, 4, -1]);

        let attrs = out.attributes.unwrap();
        assert_eq!(attrs[0].get("class"), Some(&Value::from(3)));
        assert_eq!(attrs[0].get("name"), Some(&Value::from("n1")));
        assert_eq!(attrs[1].get("label"), Some(&Value::from("4")));
        assert!(attrs[2].is_empty());
    }

    #[test]
    fn scalar_mode_ignores_records() {
        let record = PickleValue::Map(vec![(PickleValue::Str("label".into()), PickleValue::Int(3))]);
        let src = mapping(vec![(1, record)]);
        let out = align_labels(&nodes(&[1]), &src, LabelMode::Scalar).unwrap();
        assert_eq!(out.labels, vec![-1]);
    }

    #[test]
    fn array_source_indexes_by_raw_id() {
        let src = LabelSource::from_pickle(
            PickleValue::Seq(vec![
                PickleValue::Int(0),
                PickleValue::Float(1.9),
                PickleValue::None,
            ]),
            Path::new("L.pickle"),
        )
        .unwrap();
        let out = align_labels(&nodes(&[0, 1, 2, 7]), &src, LabelMode::Rich).unwrap();
        assert_eq!(out.labels, vec![0, 1, -1, -1]);
        assert!(out.attributes.unwrap().iter().all(|a| a.is_empty()));
    }

    #[test]
    fn array_source_with_string_ids_is_malformed() {
        let src = LabelSource::from_pickle(
            PickleValue::Seq(vec![PickleValue::Int(0)]),
            Path::new("L.pickle"),
        )
        .unwrap();
        let ids = DenseIndex::from_ordered([Key::from("a")]);
        let err = align_labels(&ids, &src, LabelMode::Scalar).unwrap_err();
        assert!(matches!(err, HypergraphError::MalformedStructure { .. }));
    }
}
