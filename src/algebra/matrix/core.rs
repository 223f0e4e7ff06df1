#![allow(non_snake_case)]

use crate::algebra::{Context, MatrixError, Scalar, ScalarOps, Span, SparseStore};

/// Sparse matrix bound to one arithmetic [`Context`].
///
/// Entries live in a [`SparseStore`] keyed by `(row, col)`.  Entries not in
/// the store are the context's zero.
///
/// __Example usage__ : To construct the 2 x 3 matrix
/// ```text
/// A = [1.  2.  3.]
///     [4.  0.  6.]
/// ```
///
/// ```
/// use mpmatrix::algebra::{Context, Matrix};
///
/// let A = Matrix::from_rows(Context::Exact, &[[1, 2, 3], [4, 0, 6]]).unwrap();
/// assert_eq!(A.size(), (2, 3));
/// assert_eq!(A.nnz(), 5);
/// ```
///
/// The dimensions define an addressable window over the store.  Shrinking
/// them with [`set_rows`](Matrix::set_rows) or [`set_cols`](Matrix::set_cols)
/// hides entries outside the window without deleting them, so growing the
/// window again reveals them.  Use [`compact`](Matrix::compact) to drop
/// hidden entries for good.
///
/// # Panics
///
/// The arithmetic operators `+`, `-`, `*` and `/` panic whenever the checked
/// method they forward to ([`add_matrix`](Matrix::add_matrix),
/// [`matmul`](Matrix::matmul), [`div_scalar`](Matrix::div_scalar), ...)
/// would return an error.
#[derive(Debug, Clone)]
pub struct Matrix {
    pub(crate) ctx: Context,
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) store: SparseStore,
}

impl Matrix {
    /// All-zero `rows x cols` matrix.
    pub fn new(ctx: Context, rows: usize, cols: usize) -> Self {
        Self {
            ctx,
            rows,
            cols,
            store: SparseStore::new(),
        }
    }

    /// All-zero `n x n` matrix.
    pub fn square(ctx: Context, n: usize) -> Self {
        Self::new(ctx, n, n)
    }

    /// Build a matrix from a row-major nested sequence.
    ///
    /// Values are converted into `ctx` as they are inserted, and zeros are
    /// not stored.  Rows of unequal length give
    /// [`ShapeMismatch`](MatrixError::ShapeMismatch).
    pub fn from_rows<S, R>(ctx: Context, data: &[R]) -> Result<Self, MatrixError>
    where
        S: Into<Scalar> + Clone,
        R: AsRef<[S]>,
    {
        let rows = data.len();
        let cols = data.first().map_or(0, |r| r.as_ref().len());
        let ops = ctx.ops();
        let mut A = Self::new(ctx, rows, cols);

        for (i, row) in data.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MatrixError::ShapeMismatch {
                    left: (i, cols),
                    right: (i, row.len()),
                });
            }
            for (j, v) in row.iter().enumerate() {
                A.store.set(i, j, ops.convert(&v.clone().into())?);
            }
        }
        Ok(A)
    }

    /// Build a column vector.
    pub fn from_vec<S>(ctx: Context, data: &[S]) -> Result<Self, MatrixError>
    where
        S: Into<Scalar> + Clone,
    {
        let ops = ctx.ops();
        let mut A = Self::new(ctx, data.len(), 1);
        for (i, v) in data.iter().enumerate() {
            A.store.set(i, 0, ops.convert(&v.clone().into())?);
        }
        Ok(A)
    }

    /// Copy of this matrix with every entry converted into `ctx`.
    pub fn to_context(&self, ctx: Context) -> Result<Self, MatrixError> {
        self.convert_with(ctx.ops())
    }

    pub(crate) fn convert_with(&self, ops: ScalarOps) -> Result<Self, MatrixError> {
        let mut B = Self::new(ops.context(), self.rows, self.cols);
        for ((i, j), v) in self.store.iter_window(self.rows, self.cols) {
            B.store.set(i, j, ops.convert(v)?);
        }
        Ok(B)
    }

    pub fn context(&self) -> Context {
        self.ctx
    }

    /// number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// matrix dimensions as a `(rows, cols)` pair
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }

    /// Re-bound the row window.  Stored entries are not touched.
    pub fn set_rows(&mut self, rows: usize) {
        self.rows = rows;
    }

    /// Re-bound the column window.  Stored entries are not touched.
    pub fn set_cols(&mut self, cols: usize) {
        self.cols = cols;
    }

    /// Delete stored entries hidden outside the current window.
    pub fn compact(&mut self) {
        self.store.retain_window(self.rows, self.cols);
    }

    /// number of explicit entries inside the window
    pub fn nnz(&self) -> usize {
        self.store.iter_window(self.rows, self.cols).count()
    }

    /// number of stored entries, including hidden ones
    pub fn stored_len(&self) -> usize {
        self.store.count()
    }

    /// Length of a vector, i.e. `cols` for a single row and `rows` otherwise.
    pub fn len(&self) -> usize {
        if self.rows == 1 {
            self.cols
        } else {
            self.rows
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    fn check_index(&self, i: usize, j: usize) -> Result<(), MatrixError> {
        if i >= self.rows {
            return Err(MatrixError::IndexOutOfRange {
                index: i as isize,
                dim: self.rows,
            });
        }
        if j >= self.cols {
            return Err(MatrixError::IndexOutOfRange {
                index: j as isize,
                dim: self.cols,
            });
        }
        Ok(())
    }

    // entry lookup without bounds checks
    pub(crate) fn entry(&self, i: usize, j: usize) -> Scalar {
        match self.store.get(i, j) {
            Some(v) => v.clone(),
            None => self.ctx.zero(),
        }
    }

    /// Entry `(i, j)`.  See [`at`](Matrix::at) for indices counted from
    /// the end.
    pub fn get(&self, i: usize, j: usize) -> Result<Scalar, MatrixError> {
        self.check_index(i, j)?;
        Ok(self.entry(i, j))
    }

    /// Entry at signed indices, where `-1` is the last row or column.
    pub fn at(&self, i: isize, j: isize) -> Result<Scalar, MatrixError> {
        let i = Span::Index(i).resolve(self.rows)?.start;
        let j = Span::Index(j).resolve(self.cols)?.start;
        Ok(self.entry(i, j))
    }

    /// Write `v` at signed indices, where `-1` is the last row or column.
    pub fn set_at(
        &mut self,
        i: isize,
        j: isize,
        v: impl Into<Scalar>,
    ) -> Result<(), MatrixError> {
        let i = Span::Index(i).resolve(self.rows)?.start;
        let j = Span::Index(j).resolve(self.cols)?.start;
        self.set(i, j, v)
    }

    /// Write `v` at `(i, j)` after converting it into this matrix's context.
    pub fn set(&mut self, i: usize, j: usize, v: impl Into<Scalar>) -> Result<(), MatrixError> {
        self.check_index(i, j)?;
        let v = self.ctx.convert(&v.into())?;
        self.store.set(i, j, v);
        Ok(())
    }

    fn vector_index(&self, k: usize) -> Result<(usize, usize), MatrixError> {
        match (self.rows, self.cols) {
            (1, _) => Ok((0, k)),
            (_, 1) => Ok((k, 0)),
            _ => Err(MatrixError::NotAVector),
        }
    }

    /// Single-index read on a row or column vector.
    pub fn get_vec(&self, k: usize) -> Result<Scalar, MatrixError> {
        let (i, j) = self.vector_index(k)?;
        self.get(i, j)
    }

    /// Single-index write on a row or column vector.
    pub fn set_vec(&mut self, k: usize, v: impl Into<Scalar>) -> Result<(), MatrixError> {
        let (i, j) = self.vector_index(k)?;
        self.set(i, j, v)
    }

    /// Row-major iterator over every entry, implicit zeros included.
    pub fn iter(&self) -> impl Iterator<Item = Scalar> + '_ {
        (0..self.rows).flat_map(move |i| (0..self.cols).map(move |j| self.entry(i, j)))
    }

    /// Nested rows with every entry materialized.
    pub fn to_list(&self) -> Vec<Vec<Scalar>> {
        (0..self.rows)
            .map(|i| (0..self.cols).map(|j| self.entry(i, j)).collect())
            .collect()
    }

    /// Sum of all entries.
    pub fn sum(&self) -> Result<Scalar, MatrixError> {
        let entries = self.store.sorted_window(self.rows, self.cols);
        Ok(self.ctx.ops().sum(entries.into_iter().map(|(_, v)| v))?)
    }

    /// transpose
    pub fn t(&self) -> Self {
        self.transpose()
    }

    pub fn transpose(&self) -> Self {
        let mut B = Self::new(self.ctx, self.cols, self.rows);
        for ((i, j), v) in self.store.iter_window(self.rows, self.cols) {
            B.store.set(j, i, v.clone());
        }
        B
    }

    /// Complex conjugate of every entry.
    pub fn conjugate(&self) -> Self {
        let mut B = Self::new(self.ctx, self.rows, self.cols);
        for ((i, j), v) in self.store.iter_window(self.rows, self.cols) {
            B.store.set(i, j, v.conj());
        }
        B
    }

    /// Conjugate transpose.
    pub fn transpose_conj(&self) -> Self {
        self.conjugate().transpose()
    }

    /// conjugate transpose
    pub fn h(&self) -> Self {
        self.transpose_conj()
    }
}

/// Matrices are equal when their shapes agree and every entry, implicit
/// zeros included, compares equal after promotion to a common context.
impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        if self.size() != other.size() {
            return false;
        }
        let ops = self.ctx.promote(other.ctx).ops();
        let zero_a = self.ctx.zero();
        let zero_b = other.ctx.zero();

        let a = self.store.iter_window(self.rows, self.cols);
        let b = other.store.iter_window(other.rows, other.cols);

        a.map(|((i, j), v)| (v, other.store.get(i, j).unwrap_or(&zero_b)))
            .chain(b.filter_map(|((i, j), w)| match self.store.get(i, j) {
                // already compared above
                Some(_) => None,
                None => Some((&zero_a, w)),
            }))
            .all(|(v, w)| ops.equals(v, w))
    }
}
