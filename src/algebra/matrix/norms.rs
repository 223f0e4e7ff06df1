#![allow(non_snake_case)]
use crate::algebra::{Context, Matrix, MatrixError, Scalar, ScalarError, ScalarOps};
use crate::settings::settings;

/// Exponent of a vector norm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Norm {
    /// `(Σ|xᵢ|^k)^(1/k)` for an integer `k ≥ 1`
    P(u32),
    /// `max |xᵢ|`
    Inf,
}

/// Kind of matrix norm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixNorm {
    /// maximum absolute column sum
    One,
    /// maximum absolute row sum
    Inf,
    /// square root of the sum of squared absolute values
    Frobenius,
}

// context ops at working precision, and the same with guard bits,
// both taken from one settings snapshot
pub(crate) fn norm_ops(ctx: Context) -> (ScalarOps, ScalarOps) {
    let cfg = settings();
    let ops = ctx.ops_in(&cfg);
    (ops, ops.with_guard_bits(cfg.guard_bits))
}

fn max_of(
    ops: &ScalarOps,
    values: impl IntoIterator<Item = Scalar>,
) -> Result<Scalar, ScalarError> {
    values
        .into_iter()
        .try_fold(ops.zero(), |m, v| ops.max(&m, &v))
}

/// Vector norm of the entries of `x`, treated as a flat sequence.
///
/// Sums are accumulated with guard bits and the final root is rounded
/// once to the context precision.
pub fn norm(x: &Matrix, p: Norm) -> Result<Scalar, MatrixError> {
    let (ops, wide) = norm_ops(x.ctx);
    norm_in(x, p, &ops, &wide)
}

fn norm_in(x: &Matrix, p: Norm, ops: &ScalarOps, wide: &ScalarOps) -> Result<Scalar, MatrixError> {
    let entries = x.store.sorted_window(x.rows, x.cols);

    let r = match p {
        Norm::Inf => max_of(
            ops,
            entries
                .iter()
                .map(|(_, v)| ops.abs(v))
                .collect::<Result<Vec<_>, _>>()?,
        )?,
        Norm::P(0) => return Err(ScalarError::Domain.into()),
        Norm::P(1) => {
            let terms = entries
                .iter()
                .map(|(_, v)| wide.abs(v))
                .collect::<Result<Vec<_>, _>>()?;
            ops.convert(&wide.sum(&terms)?)?
        }
        Norm::P(2) => {
            let terms = entries
                .iter()
                .map(|(_, v)| wide.abs_sq(v))
                .collect::<Result<Vec<_>, _>>()?;
            ops.sqrt(&wide.sum(&terms)?)?
        }
        Norm::P(k) => {
            let terms = entries
                .iter()
                .map(|(_, v)| wide.powi(&wide.abs(v)?, k))
                .collect::<Result<Vec<_>, _>>()?;
            ops.root(&wide.sum(&terms)?, k)?
        }
    };
    Ok(r)
}

/// Matrix norm of `A`.
///
/// ```
/// use mpmatrix::algebra::{mnorm, Context, Matrix, MatrixNorm, Scalar};
///
/// let A = Matrix::from_rows(Context::Exact, &[[1, -2], [-3, -1], [2, 1]]).unwrap();
/// assert_eq!(mnorm(&A, MatrixNorm::One).unwrap(), Scalar::from(6));
/// assert_eq!(mnorm(&A, MatrixNorm::Inf).unwrap(), Scalar::from(4));
/// ```
pub fn mnorm(A: &Matrix, p: MatrixNorm) -> Result<Scalar, MatrixError> {
    let (ops, wide) = norm_ops(A.ctx);
    mnorm_in(A, p, &ops, &wide)
}

/// As [`mnorm`], with the working and accumulation precisions supplied
/// by the caller.
pub(crate) fn mnorm_in(
    A: &Matrix,
    p: MatrixNorm,
    ops: &ScalarOps,
    wide: &ScalarOps,
) -> Result<Scalar, MatrixError> {
    match p {
        MatrixNorm::One | MatrixNorm::Inf => {
            let n = if p == MatrixNorm::One { A.cols } else { A.rows };
            let mut lines: Vec<Vec<Scalar>> = vec![Vec::new(); n];
            for ((i, j), v) in A.store.sorted_window(A.rows, A.cols) {
                let k = if p == MatrixNorm::One { j } else { i };
                lines[k].push(wide.abs(v)?);
            }
            let sums = lines
                .iter()
                .map(|line| wide.sum(line))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ops.convert(&max_of(wide, sums)?)?)
        }
        MatrixNorm::Frobenius => norm_in(A, Norm::P(2), ops, wide),
    }
}
