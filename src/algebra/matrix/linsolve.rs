#![allow(non_snake_case)]
use super::norms::mnorm_in;
use crate::algebra::{eye, Matrix, MatrixError, MatrixNorm, Scalar, ScalarValue};
use crate::settings::{settings, PrecisionSettings};
use tracing::debug;

/// Solver for square linear systems `A X = B`.
pub trait LinearSolver {
    fn solve(&self, A: &Matrix, B: &Matrix) -> Result<Matrix, MatrixError>;
}

/// Gaussian elimination with partial pivoting.
///
/// Elimination runs in the operands' common context with extra guard bits
/// of working precision, and the solution is rounded back to the context
/// precision at the end.  A pivot that is zero, contains zero, or falls
/// below `‖A‖₁ · 2^(1-prec)` in magnitude makes the system
/// [`Singular`](MatrixError::Singular).
#[derive(Debug, Clone, Copy, Default)]
pub struct LuSolver {
    guard_bits: Option<u32>,
}

impl LuSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the guard bits taken from the global settings.
    pub fn with_guard_bits(bits: u32) -> Self {
        Self {
            guard_bits: Some(bits),
        }
    }
}

impl LinearSolver for LuSolver {
    fn solve(&self, A: &Matrix, B: &Matrix) -> Result<Matrix, MatrixError> {
        self.solve_in(A, B, &settings())
    }
}

impl LuSolver {
    // solve with every precision taken from `cfg`
    pub(crate) fn solve_in(
        &self,
        A: &Matrix,
        B: &Matrix,
        cfg: &PrecisionSettings,
    ) -> Result<Matrix, MatrixError> {
        if !A.is_square() {
            return Err(MatrixError::NotSquare(A.size()));
        }
        if A.rows != B.rows {
            return Err(MatrixError::ShapeMismatch {
                left: A.size(),
                right: B.size(),
            });
        }

        let ops = A.ctx.promote(B.ctx).ops_in(cfg);
        let wide = ops.with_guard_bits(self.guard_bits.unwrap_or(cfg.guard_bits));
        let (n, m) = (A.rows, B.cols);

        let dense = |M: &Matrix| -> Result<Vec<Vec<Scalar>>, MatrixError> {
            let M = M.convert_with(wide)?;
            Ok(M.to_list())
        };
        let mut a = dense(A)?;
        let mut b = dense(B)?;

        let norm1 = mnorm_in(A, MatrixNorm::One, &ops, &wide)?.to_f64();
        let tol = norm1 * 2f64.powi(1 - ops.precision() as i32);

        for k in 0..n {
            let (p, mag) = (k..n)
                .map(|i| (i, a[i][k].magnitude()))
                .fold((k, f64::NEG_INFINITY), |best, c| {
                    if c.1 > best.1 {
                        c
                    } else {
                        best
                    }
                });

            if a[p][k].straddles_zero() || mag.is_nan() || mag <= tol {
                debug!("singular pivot at column {}: magnitude {:e}, tolerance {:e}", k, mag, tol);
                return Err(MatrixError::Singular);
            }
            if p != k {
                debug!("pivoting rows {} and {}", k, p);
                a.swap(p, k);
                b.swap(p, k);
            }

            for i in (k + 1)..n {
                if a[i][k].is_zero() {
                    continue;
                }
                let f = wide.div(&a[i][k], &a[k][k])?;
                for j in (k + 1)..n {
                    a[i][j] = wide.sub(&a[i][j], &wide.mul(&f, &a[k][j])?)?;
                }
                for j in 0..m {
                    b[i][j] = wide.sub(&b[i][j], &wide.mul(&f, &b[k][j])?)?;
                }
                a[i][k] = wide.zero();
            }
        }

        // back substitution, overwriting b with the solution
        for i in (0..n).rev() {
            for j in 0..m {
                let mut s = b[i][j].clone();
                for k in (i + 1)..n {
                    s = wide.sub(&s, &wide.mul(&a[i][k], &b[k][j])?)?;
                }
                b[i][j] = wide.div(&s, &a[i][i])?;
            }
        }

        let mut X = Matrix::new(ops.context(), n, m);
        for (i, row) in b.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                X.store.set(i, j, ops.convert(v)?);
            }
        }
        Ok(X)
    }
}

/// Inverse of a square matrix.
pub fn inverse(A: &Matrix) -> Result<Matrix, MatrixError> {
    A.inverse()
}

impl Matrix {
    /// Inverse computed with the default [`LuSolver`].
    pub fn inverse(&self) -> Result<Matrix, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare(self.size()));
        }
        LuSolver::new().solve(self, &eye(self.ctx, self.rows))
    }

    /// Solve `self * X = B` with the default [`LuSolver`].
    pub fn solve(&self, B: &Matrix) -> Result<Matrix, MatrixError> {
        LuSolver::new().solve(self, B)
    }
}
