#![allow(non_snake_case)]
use crate::algebra::{Matrix, MatrixError};

/// Kronecker product of two matrices.
///
/// The result has size `(A.rows * B.rows, A.cols * B.cols)` and its block
/// `(i, j)` is `A[i, j] * B`.  Both operands are promoted to their common
/// context.  Only products of stored entries are formed.
pub fn kron(A: &Matrix, B: &Matrix) -> Result<Matrix, MatrixError> {
    let ops = A.ctx.promote(B.ctx).ops();
    let (pp, qq) = A.size();
    let (rr, ss) = B.size();

    let mut K = Matrix::new(ops.context(), pp * rr, qq * ss);
    let bentries = B.store.sorted_window(rr, ss);

    for ((p, q), a) in A.store.sorted_window(pp, qq) {
        for &((r, s), b) in &bentries {
            K.store.set(p * rr + r, q * ss + s, ops.mul(a, b)?);
        }
    }
    Ok(K)
}

/// Kronecker product of any number of matrices, folded left to right.
///
/// A single operand is returned unchanged.
///
/// ```
/// use mpmatrix::algebra::{eye, kron_all, Context};
///
/// let I = eye(Context::Native, 2);
/// assert_eq!(kron_all(&[&I, &I, &I]).unwrap(), eye(Context::Native, 8));
/// ```
pub fn kron_all(factors: &[&Matrix]) -> Result<Matrix, MatrixError> {
    let (first, rest) = factors.split_first().ok_or(MatrixError::NoOperands)?;
    rest.iter()
        .try_fold((*first).clone(), |K, &M| kron(&K, M))
}

#[test]
fn test_kron_blocks() {
    use crate::algebra::Context;

    let A = Matrix::from_rows(Context::Native, &[[1, 0], [0, 2]]).unwrap();
    let B = Matrix::from_rows(Context::Native, &[[1, 2]]).unwrap();
    let K = kron(&A, &B).unwrap();
    assert_eq!(
        K,
        Matrix::from_rows(Context::Native, &[[1, 2, 0, 0], [0, 0, 2, 4]]).unwrap()
    );
    assert_eq!(K.nnz(), 4);

    assert_eq!(kron_all(&[]).unwrap_err(), MatrixError::NoOperands);
    assert_eq!(kron_all(&[&A]).unwrap(), A);
}
