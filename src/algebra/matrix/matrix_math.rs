#![allow(non_snake_case)]

use crate::algebra::{LuSolver, Matrix, MatrixError, Scalar, ScalarOps, ScalarValue};
use crate::settings::{settings, PrecisionSettings};
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

impl Matrix {
    fn check_same_size(&self, B: &Matrix) -> Result<(), MatrixError> {
        if self.size() != B.size() {
            return Err(MatrixError::ShapeMismatch {
                left: self.size(),
                right: B.size(),
            });
        }
        Ok(())
    }

    // elementwise combination over the union of both sparsity patterns
    fn zip_with(
        &self,
        B: &Matrix,
        f: impl Fn(&ScalarOps, &Scalar, &Scalar) -> Result<Scalar, MatrixError>,
    ) -> Result<Matrix, MatrixError> {
        self.check_same_size(B)?;
        let ops = self.ctx.promote(B.ctx).ops();
        let zero = ops.zero();

        let keys = self
            .store
            .iter_window(self.rows, self.cols)
            .chain(B.store.iter_window(B.rows, B.cols))
            .map(|(k, _)| k)
            .unique();

        let mut C = Matrix::new(ops.context(), self.rows, self.cols);
        for (i, j) in keys {
            let a = self.store.get(i, j).unwrap_or(&zero);
            let b = B.store.get(i, j).unwrap_or(&zero);
            C.store.set(i, j, f(&ops, a, b)?);
        }
        Ok(C)
    }

    // applies f to every cell, implicit zeros included
    fn map_dense(
        &self,
        ops: ScalarOps,
        f: impl Fn(&Scalar) -> Result<Scalar, MatrixError>,
    ) -> Result<Matrix, MatrixError> {
        let zero = self.ctx.zero();
        let mut C = Matrix::new(ops.context(), self.rows, self.cols);
        for i in 0..self.rows {
            for j in 0..self.cols {
                let a = self.store.get(i, j).unwrap_or(&zero);
                C.store.set(i, j, f(a)?);
            }
        }
        Ok(C)
    }

    // applies f to stored entries only, for maps that fix zero
    fn map_sparse(
        &self,
        ops: ScalarOps,
        f: impl Fn(&Scalar) -> Result<Scalar, MatrixError>,
    ) -> Result<Matrix, MatrixError> {
        let mut C = Matrix::new(ops.context(), self.rows, self.cols);
        for ((i, j), a) in self.store.iter_window(self.rows, self.cols) {
            C.store.set(i, j, f(a)?);
        }
        Ok(C)
    }

    /// Elementwise sum `A + B`.
    pub fn add_matrix(&self, B: &Matrix) -> Result<Matrix, MatrixError> {
        self.zip_with(B, |ops, a, b| Ok(ops.add(a, b)?))
    }

    /// Elementwise difference `A - B`.
    pub fn sub_matrix(&self, B: &Matrix) -> Result<Matrix, MatrixError> {
        self.zip_with(B, |ops, a, b| Ok(ops.sub(a, b)?))
    }

    /// `A + s` added to every cell.
    pub fn add_scalar(&self, s: impl Into<Scalar>) -> Result<Matrix, MatrixError> {
        let s = s.into();
        let ops = self.ctx.promote(s.context()).ops();
        self.map_dense(ops, |a| Ok(ops.add(a, &s)?))
    }

    /// `A - s` taken at every cell.
    pub fn sub_scalar(&self, s: impl Into<Scalar>) -> Result<Matrix, MatrixError> {
        let s = s.into();
        let ops = self.ctx.promote(s.context()).ops();
        self.map_dense(ops, |a| Ok(ops.sub(a, &s)?))
    }

    /// `s - A` taken at every cell.
    pub fn rsub_scalar(&self, s: impl Into<Scalar>) -> Result<Matrix, MatrixError> {
        let s = s.into();
        let ops = self.ctx.promote(s.context()).ops();
        self.map_dense(ops, |a| Ok(ops.sub(&s, a)?))
    }

    /// Scalar multiple `s * A`.
    pub fn scale(&self, s: impl Into<Scalar>) -> Result<Matrix, MatrixError> {
        let s = s.into();
        let ops = self.ctx.promote(s.context()).ops();
        self.map_sparse(ops, |a| Ok(ops.mul(&s, a)?))
    }

    /// `A / s`.  Fails if `s` is zero, or an interval containing zero.
    pub fn div_scalar(&self, s: impl Into<Scalar>) -> Result<Matrix, MatrixError> {
        let s = s.into();
        if s.straddles_zero() {
            return Err(crate::algebra::ScalarError::DivisionByZero.into());
        }
        let ops = self.ctx.promote(s.context()).ops();
        self.map_sparse(ops, |a| Ok(ops.div(a, &s)?))
    }

    pub fn neg(&self) -> Matrix {
        let mut C = Matrix::new(self.ctx, self.rows, self.cols);
        for ((i, j), a) in self.store.iter_window(self.rows, self.cols) {
            C.store.set(i, j, a.neg());
        }
        C
    }

    /// Matrix product `A * B`.
    ///
    /// Both operands are promoted to their common context.  Products are
    /// accumulated in a fixed order, so results are reproducible.  Fails
    /// when the inner dimensions differ or either operand is empty.
    pub fn matmul(&self, B: &Matrix) -> Result<Matrix, MatrixError> {
        self.matmul_in(B, &settings())
    }

    fn matmul_in(&self, B: &Matrix, cfg: &PrecisionSettings) -> Result<Matrix, MatrixError> {
        if self.cols != B.rows || self.is_empty() || B.is_empty() {
            return Err(MatrixError::ShapeMismatch {
                left: self.size(),
                right: B.size(),
            });
        }
        let ops = self.ctx.promote(B.ctx).ops_in(cfg);
        trace!(
            "matmul {:?} x {:?} in {} context",
            self.size(),
            B.size(),
            ops.context()
        );

        let A = self.convert_with(ops)?;
        let B = B.convert_with(ops)?;

        // rows of B indexed by row number
        let mut brows: HashMap<usize, Vec<(usize, &Scalar)>> = HashMap::new();
        for ((k, j), b) in B.store.sorted_window(B.rows, B.cols) {
            brows.entry(k).or_default().push((j, b));
        }

        let mut acc: BTreeMap<(usize, usize), Scalar> = BTreeMap::new();
        for ((i, k), a) in A.store.sorted_window(A.rows, A.cols) {
            let Some(row) = brows.get(&k) else {
                continue;
            };
            for &(j, b) in row {
                let p = ops.mul(a, b)?;
                let sum = match acc.remove(&(i, j)) {
                    Some(s) => ops.add(&s, &p)?,
                    None => p,
                };
                acc.insert((i, j), sum);
            }
        }

        let mut C = Matrix::new(ops.context(), A.rows, B.cols);
        for ((i, j), v) in acc {
            C.store.set(i, j, v);
        }
        Ok(C)
    }

    /// Integer matrix power.
    ///
    /// `A^0` is the identity and negative powers invert first.
    pub fn pow(&self, n: i32) -> Result<Matrix, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare(self.size()));
        }
        trace!("matrix power {} of {:?}", n, self.size());

        let cfg = settings();
        let mut base = if n < 0 {
            let I = crate::algebra::eye(self.ctx, self.rows);
            LuSolver::new().solve_in(self, &I, &cfg)?
        } else {
            self.clone()
        };
        let mut k = n.unsigned_abs();
        let mut result: Option<Matrix> = None;

        while k > 0 {
            if k & 1 == 1 {
                result = Some(match result {
                    Some(R) => R.matmul_in(&base, &cfg)?,
                    None => base.clone(),
                });
            }
            k >>= 1;
            if k > 0 {
                base = base.matmul_in(&base, &cfg)?;
            }
        }
        Ok(result.unwrap_or_else(|| crate::algebra::eye(self.ctx, self.rows)))
    }
}
