//! Plain-text CSR artifacts.
//!
//! # Format
//! One token per line:
//! - `H_data.txt`: nonzero values, fixed-point (`1.000000`)
//! - `H_indices.txt`: column (edge) index of each nonzero
//! - `H_indptr.txt`: row pointers, `n_nodes + 1` lines
//! - `labels.txt`: one integer label per node
//! - `meta.txt`: a single line `"<n_nodes> <n_edges>"`
//!
//! Writes are not atomic; a failed run leaves whatever was written so far.

use crate::data::csr::CsrMatrix;
use crate::data::incidence::{IncidenceDataset, IncidenceMeta};
use crate::hypergraph_error::HypergraphError;
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DATA_FILE: &str = "H_data.txt";
pub const INDICES_FILE: &str = "H_indices.txt";
pub const INDPTR_FILE: &str = "H_indptr.txt";
pub const LABELS_FILE: &str = "labels.txt";
pub const META_FILE: &str = "meta.txt";

/// Writer for the five text artifacts.
#[derive(Debug, Default, Clone)]
pub struct CsrTextWriter;

impl CsrTextWriter {
    /// Write one token per line.
    pub fn write_tokens<W, T, I>(&self, mut writer: W, tokens: I) -> std::io::Result<()>
    where
        W: Write,
        T: Display,
        I: IntoIterator<Item = T>,
    {
        for tok in tokens {
            writeln!(writer, "{tok}")?;
        }
        writer.flush()
    }

    /// Write values in fixed-point notation.
    pub fn write_values<W: Write>(&self, mut writer: W, values: &[f64]) -> std::io::Result<()> {
        for v in values {
            writeln!(writer, "{v:.6}")?;
        }
        writer.flush()
    }

    /// Write all artifacts of `dataset` into `out_dir`, creating it if needed.
    /// Returns the written paths.
    pub fn write_dir(
        &self,
        out_dir: &Path,
        dataset: &IncidenceDataset,
    ) -> Result<Vec<PathBuf>, HypergraphError> {
        fs::create_dir_all(out_dir).map_err(|e| HypergraphError::io(out_dir, e))?;
        let m = dataset.matrix();
        let mut written = Vec::with_capacity(5);

        written.push(self.emit(out_dir, DATA_FILE, |w| self.write_values(w, m.data()))?);
        written.push(self.emit(out_dir, INDICES_FILE, |w| self.write_tokens(w, m.indices()))?);
        written.push(self.emit(out_dir, INDPTR_FILE, |w| self.write_tokens(w, m.indptr()))?);
        written.push(self.emit(out_dir, LABELS_FILE, |w| self.write_tokens(w, dataset.labels()))?);
        written.push(self.emit(out_dir, META_FILE, |w| {
            self.write_tokens(w, [dataset.meta()])
        })?);

        log::info!(
            "Wrote {} nonzeros for {} nodes to {}",
            m.nnz(),
            m.n_rows(),
            out_dir.display()
        );
        Ok(written)
    }

    fn emit<F>(&self, dir: &Path, name: &str, body: F) -> Result<PathBuf, HypergraphError>
    where
        F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
    {
        let path = dir.join(name);
        let file = File::create(&path).map_err(|e| HypergraphError::io(&path, e))?;
        let mut writer = BufWriter::new(file);
        body(&mut writer).map_err(|e| HypergraphError::io(&path, e))?;
        Ok(path)
    }
}

/// Reader that reconstructs an [`IncidenceDataset`] from the text artifacts.
#[derive(Debug, Default, Clone)]
pub struct CsrTextReader;

impl CsrTextReader {
    /// Parse one token per line; blank lines are skipped.
    pub fn read_tokens<T, R>(&self, reader: R, path: &Path) -> Result<Vec<T>, HypergraphError>
    where
        T: FromStr,
        R: BufRead,
    {
        let mut out = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| HypergraphError::io(path, e))?;
            let tok = line.trim();
            if tok.is_empty() {
                continue;
            }
            let value = tok.parse::<T>().map_err(|_| HypergraphError::TextParse {
                path: path.to_path_buf(),
                line: i + 1,
                detail: format!("invalid token `{tok}`"),
            })?;
            out.push(value);
        }
        Ok(out)
    }

    /// Parse `meta.txt` content.
    pub fn read_meta<R: BufRead>(
        &self,
        mut reader: R,
        path: &Path,
    ) -> Result<IncidenceMeta, HypergraphError> {
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| HypergraphError::io(path, e))?;
        line.parse::<IncidenceMeta>()
            .map_err(|detail| HypergraphError::TextParse {
                path: path.to_path_buf(),
                line: 1,
                detail,
            })
    }

    /// Read and validate all artifacts in `dir`.
    pub fn read_dir(&self, dir: &Path) -> Result<IncidenceDataset, HypergraphError> {
        let meta_path = dir.join(META_FILE);
        let meta = self.read_meta(open(&meta_path)?, &meta_path)?;

        let indptr: Vec<usize> = self.read_file(dir, INDPTR_FILE)?;
        let indices: Vec<usize> = self.read_file(dir, INDICES_FILE)?;
        let data: Vec<f64> = self.read_file(dir, DATA_FILE)?;
        let labels: Vec<i64> = self.read_file(dir, LABELS_FILE)?;

        let matrix = CsrMatrix::try_from_parts(meta.n_nodes, meta.n_edges, data, indices, indptr)?;
        IncidenceDataset::try_new(matrix, labels)
    }

    fn read_file<T: FromStr>(&self, dir: &Path, name: &str) -> Result<Vec<T>, HypergraphError> {
        let path = dir.join(name);
        self.read_tokens(open(&path)?, &path)
    }
}

fn open(path: &Path) -> Result<BufReader<File>, HypergraphError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| HypergraphError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_use_fixed_point() {
        let mut buf = Vec::new();
        CsrTextWriter.write_values(&mut buf, &[1.0, 2.5]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1.000000\n2.500000\n");
    }

    #[test]
    fn tokens_one_per_line() {
        let mut buf = Vec::new();
        CsrTextWriter.write_tokens(&mut buf, [-1i64, 5, 7]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "-1\n5\n7\n");
    }

    #[test]
    fn bad_token_reports_line() {
        let err = CsrTextReader
            .read_tokens::<usize, _>("0\n\n1\nx\n".as_bytes(), Path::new("H_indptr.txt"))
            .unwrap_err();
        assert!(matches!(err, HypergraphError::TextParse { line: 4, .. }));
    }

    #[test]
    fn meta_line_is_parsed() {
        let meta = CsrTextReader
            .read_meta("3 2\n".as_bytes(), Path::new("meta.txt"))
            .unwrap();
        assert_eq!(meta, IncidenceMeta { n_nodes: 3, n_edges: 2 });
    }
}
