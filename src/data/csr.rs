//! Compressed Sparse Row matrices and their coordinate-form builder.
//!
//! [`CooBuilder`] accumulates `(row, col, value)` triples in flat growable
//! buffers; [`CooBuilder::into_csr`] performs a single stable counting sort
//! by row, so entries of one row keep their insertion order. The resulting
//! [`CsrMatrix`] is immutable.

use crate::debug_invariants::DebugInvariants;
use crate::hypergraph_error::HypergraphError;
use std::collections::HashMap;

/// What to do with repeated column indices inside one row.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DuplicateHandling {
    /// Keep every entry; each repeated incidence is its own nonzero.
    #[default]
    Keep,
    /// Merge repeats into the first occurrence, adding values.
    Sum,
}

/// Immutable CSR matrix with `f64` values.
#[derive(Clone, Debug, PartialEq)]
pub struct CsrMatrix {
    n_rows: usize,
    n_cols: usize,
    data: Vec<f64>,
    indices: Vec<usize>,
    indptr: Vec<usize>,
}

impl CsrMatrix {
    /// Matrix of the given shape with no nonzeros.
    pub fn empty(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            data: Vec::new(),
            indices: Vec::new(),
            indptr: vec![0; n_rows + 1],
        }
    }

    /// Assemble from raw CSR arrays, validating every invariant.
    pub fn try_from_parts(
        n_rows: usize,
        n_cols: usize,
        data: Vec<f64>,
        indices: Vec<usize>,
        indptr: Vec<usize>,
    ) -> Result<Self, HypergraphError> {
        let m = Self {
            n_rows,
            n_cols,
            data,
            indices,
            indptr,
        };
        m.validate_invariants()?;
        Ok(m)
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    #[inline]
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    /// Column indices and values of row `r`; empty for rows out of range.
    pub fn row(&self, r: usize) -> (&[usize], &[f64]) {
        if r >= self.n_rows {
            return (&[], &[]);
        }
        let (lo, hi) = (self.indptr[r], self.indptr[r + 1]);
        (&self.indices[lo..hi], &self.data[lo..hi])
    }

    /// All nonzeros as `(row, col, value)` in storage order.
    pub fn triples(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.n_rows).flat_map(move |r| {
            let (cols, vals) = self.row(r);
            cols.iter().zip(vals).map(move |(&c, &v)| (r, c, v))
        })
    }

    /// Decompose into `(data, indices, indptr)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<usize>, Vec<usize>) {
        (self.data, self.indices, self.indptr)
    }
}

impl DebugInvariants for CsrMatrix {
    const NAME: &'static str = "CsrMatrix";

    fn validate_invariants(&self) -> Result<(), HypergraphError> {
        if self.indptr.len() != self.n_rows + 1 {
            return Err(HypergraphError::InvalidCsr(format!(
                "indptr has length {}, expected n_rows + 1 = {}",
                self.indptr.len(),
                self.n_rows + 1
            )));
        }
        if self.indptr[0] != 0 {
            return Err(HypergraphError::InvalidCsr(format!(
                "indptr[0] = {}, expected 0",
                self.indptr[0]
            )));
        }
        if let Some(r) = self.indptr.windows(2).position(|w| w[0] > w[1]) {
            return Err(HypergraphError::InvalidCsr(format!(
                "indptr decreases at row {r}: {} > {}",
                self.indptr[r],
                self.indptr[r + 1]
            )));
        }
        let nnz = self.indptr[self.n_rows];
        if nnz != self.indices.len() || nnz != self.data.len() {
            return Err(HypergraphError::InvalidCsr(format!(
                "indptr[n_rows] = {nnz}, but {} indices and {} values",
                self.indices.len(),
                self.data.len()
            )));
        }
        if let Some((pos, &c)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &c)| c >= self.n_cols)
        {
            return Err(HypergraphError::InvalidCsr(format!(
                "column index {c} at position {pos} out of range for {} columns",
                self.n_cols
            )));
        }
        Ok(())
    }
}

/// Coordinate-form accumulator for a [`CsrMatrix`].
#[derive(Clone, Debug, Default)]
pub struct CooBuilder {
    n_rows: usize,
    n_cols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    vals: Vec<f64>,
}

impl CooBuilder {
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self::with_capacity(n_rows, n_cols, 0)
    }

    pub fn with_capacity(n_rows: usize, n_cols: usize, capacity: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            rows: Vec::with_capacity(capacity),
            cols: Vec::with_capacity(capacity),
            vals: Vec::with_capacity(capacity),
        }
    }

    /// Record one entry. Out-of-shape coordinates are rejected.
    pub fn push(&mut self, row: usize, col: usize, val: f64) -> Result<(), HypergraphError> {
        if row >= self.n_rows || col >= self.n_cols {
            return Err(HypergraphError::InvalidCsr(format!(
                "entry ({row}, {col}) outside shape ({}, {})",
                self.n_rows, self.n_cols
            )));
        }
        self.rows.push(row);
        self.cols.push(col);
        self.vals.push(val);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    /// Sort-and-compress into CSR, rows ascending, insertion order within rows.
    pub fn into_csr(self, duplicates: DuplicateHandling) -> Result<CsrMatrix, HypergraphError> {
        let n = self.n_rows;
        let m = self.vals.len();

        // 1) row counts → prefix sums
        let mut indptr = vec![0usize; n + 1];
        for &r in &self.rows {
            indptr[r + 1] += 1;
        }
        for i in 0..n {
            indptr[i + 1] += indptr[i];
        }

        // 2) stable scatter
        let mut indices = vec![0usize; m];
        let mut data = vec![0.0f64; m];
        let mut cursor = indptr.clone();
        for k in 0..m {
            let r = self.rows[k];
            let pos = cursor[r];
            indices[pos] = self.cols[k];
            data[pos] = self.vals[k];
            cursor[r] += 1;
        }

        let (data, indices, indptr) = match duplicates {
            DuplicateHandling::Keep => (data, indices, indptr),
            DuplicateHandling::Sum => sum_duplicates(n, data, indices, &indptr),
        };

        let csr = CsrMatrix {
            n_rows: n,
            n_cols: self.n_cols,
            data,
            indices,
            indptr,
        };
        csr.debug_assert_invariants();
        Ok(csr)
    }
}

fn sum_duplicates(
    n_rows: usize,
    data: Vec<f64>,
    indices: Vec<usize>,
    indptr: &[usize],
) -> (Vec<f64>, Vec<usize>, Vec<usize>) {
    let mut out_data = Vec::with_capacity(data.len());
    let mut out_indices = Vec::with_capacity(indices.len());
    let mut out_indptr = Vec::with_capacity(n_rows + 1);
    out_indptr.push(0);
    let mut seen: HashMap<usize, usize> = HashMap::new();
    for r in 0..n_rows {
        seen.clear();
        for k in indptr[r]..indptr[r + 1] {
            match seen.get(&indices[k]) {
                Some(&pos) => out_data[pos] += data[k],
                None => {
                    seen.insert(indices[k], out_data.len());
                    out_indices.push(indices[k]);
                    out_data.push(data[k]);
                }
            }
        }
        out_indptr.push(out_data.len());
    }
    (out_data, out_indices, out_indptr)
}
