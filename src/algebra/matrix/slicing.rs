#![allow(non_snake_case)]

use crate::algebra::{BigFloat, Interval, Matrix, MatrixError, Scalar};
use num_complex::Complex64;
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

/// Selection along one axis of a matrix.
///
/// Built from an index or any half-open range: `1`, `1..3`, `..2`, `1..`
/// and `..`.  Negative values count from the end of the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    Index(isize),
    Range {
        start: Option<isize>,
        stop: Option<isize>,
    },
}

impl Span {
    /// Resolve against an axis of length `dim`.
    ///
    /// Fails when the selection reaches outside the axis or selects nothing.
    pub fn resolve(self, dim: usize) -> Result<Range<usize>, MatrixError> {
        let n = dim as isize;
        let wrap = |k: isize| if k < 0 { k + n } else { k };
        let out_of_range = |index: isize| MatrixError::IndexOutOfRange { index, dim };

        let (start, stop) = match self {
            Span::Index(i) => {
                let k = wrap(i);
                if k < 0 || k >= n {
                    return Err(out_of_range(i));
                }
                (k, k + 1)
            }
            Span::Range { start, stop } => {
                let start = start.map_or(0, wrap);
                let stop = stop.map_or(n, wrap);
                if start < 0 {
                    return Err(out_of_range(start));
                }
                if stop > n {
                    return Err(out_of_range(stop - 1));
                }
                (start, stop)
            }
        };
        if start >= stop {
            return Err(MatrixError::EmptySelection);
        }
        Ok(start as usize..stop as usize)
    }
}

macro_rules! impl_span_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Span {
                fn from(i: $ty) -> Self {
                    Span::Index(i as isize)
                }
            }

            impl From<Range<$ty>> for Span {
                fn from(r: Range<$ty>) -> Self {
                    Span::Range {
                        start: Some(r.start as isize),
                        stop: Some(r.end as isize),
                    }
                }
            }

            impl From<RangeFrom<$ty>> for Span {
                fn from(r: RangeFrom<$ty>) -> Self {
                    Span::Range {
                        start: Some(r.start as isize),
                        stop: None,
                    }
                }
            }

            impl From<RangeTo<$ty>> for Span {
                fn from(r: RangeTo<$ty>) -> Self {
                    Span::Range {
                        start: None,
                        stop: Some(r.end as isize),
                    }
                }
            }
        )*
    };
}
impl_span_from!(usize, isize, i32);

impl From<RangeFull> for Span {
    fn from(_: RangeFull) -> Self {
        Span::Range {
            start: None,
            stop: None,
        }
    }
}

/// Right hand side of a slice assignment.
#[derive(Debug, Clone)]
pub enum SliceValue {
    /// broadcast to every selected cell
    Scalar(Scalar),
    /// must match the selected block's shape exactly
    Matrix(Matrix),
}

impl From<Matrix> for SliceValue {
    fn from(m: Matrix) -> Self {
        SliceValue::Matrix(m)
    }
}

impl From<&Matrix> for SliceValue {
    fn from(m: &Matrix) -> Self {
        SliceValue::Matrix(m.clone())
    }
}

macro_rules! impl_slice_value_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SliceValue {
                fn from(v: $ty) -> Self {
                    SliceValue::Scalar(Scalar::from(v))
                }
            }
        )*
    };
}
impl_slice_value_from_scalar!(Scalar, i32, i64, usize, f64, Complex64, BigFloat, Interval);

impl Matrix {
    /// Copy of the sub-block selected by `rows` and `cols`.
    ///
    /// ```
    /// use mpmatrix::algebra::{Context, Matrix};
    ///
    /// let A = Matrix::from_rows(Context::Exact, &[[1, 2, 3], [4, 5, 6], [7, 8, 9]]).unwrap();
    /// let B = A.slice(1..3, 1..).unwrap();
    /// assert_eq!(B, Matrix::from_rows(Context::Exact, &[[5, 6], [8, 9]]).unwrap());
    /// ```
    pub fn slice(&self, rows: impl Into<Span>, cols: impl Into<Span>) -> Result<Matrix, MatrixError> {
        let rr = rows.into().resolve(self.rows)?;
        let cr = cols.into().resolve(self.cols)?;

        let mut B = Matrix::new(self.ctx, rr.len(), cr.len());
        for ((i, j), v) in self.store.iter_window(self.rows, self.cols) {
            if rr.contains(&i) && cr.contains(&j) {
                B.store.set(i - rr.start, j - cr.start, v.clone());
            }
        }
        Ok(B)
    }

    /// Slice of a row or column vector.
    pub fn slice_vec(&self, span: impl Into<Span>) -> Result<Matrix, MatrixError> {
        match (self.rows, self.cols) {
            (1, _) => self.slice(0, span),
            (_, 1) => self.slice(span, 0),
            _ => Err(MatrixError::NotAVector),
        }
    }

    /// Write a scalar or a matrix into the sub-block selected by `rows` and
    /// `cols`.
    ///
    /// Bounds and shape are checked and every value is converted into this
    /// matrix's context before the first write, so a failing assignment
    /// leaves the matrix untouched.
    pub fn assign(
        &mut self,
        rows: impl Into<Span>,
        cols: impl Into<Span>,
        value: impl Into<SliceValue>,
    ) -> Result<(), MatrixError> {
        let rr = rows.into().resolve(self.rows)?;
        let cr = cols.into().resolve(self.cols)?;
        let ops = self.ctx.ops();

        let mut values = Vec::with_capacity(rr.len() * cr.len());
        match value.into() {
            SliceValue::Scalar(s) => {
                let s = ops.convert(&s)?;
                for i in rr.clone() {
                    for j in cr.clone() {
                        values.push(((i, j), s.clone()));
                    }
                }
            }
            SliceValue::Matrix(M) => {
                if M.size() != (rr.len(), cr.len()) {
                    return Err(MatrixError::ShapeMismatch {
                        left: (rr.len(), cr.len()),
                        right: M.size(),
                    });
                }
                for i in rr.clone() {
                    for j in cr.clone() {
                        let v = ops.convert(&M.entry(i - rr.start, j - cr.start))?;
                        values.push(((i, j), v));
                    }
                }
            }
        }

        for ((i, j), v) in values {
            self.store.set(i, j, v);
        }
        Ok(())
    }

    /// Slice assignment on a row or column vector.
    pub fn assign_vec(
        &mut self,
        span: impl Into<Span>,
        value: impl Into<SliceValue>,
    ) -> Result<(), MatrixError> {
        match (self.rows, self.cols) {
            (1, _) => self.assign(0, span, value),
            (_, 1) => self.assign(span, 0, value),
            _ => Err(MatrixError::NotAVector),
        }
    }
}
