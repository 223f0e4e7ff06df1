#![allow(non_snake_case)]
use crate::algebra::{Context, Matrix, MatrixError, Scalar};
use cfg_if::cfg_if;

/// All-zero `rows x cols` matrix.
pub fn zeros(ctx: Context, rows: usize, cols: usize) -> Matrix {
    Matrix::new(ctx, rows, cols)
}

/// `rows x cols` matrix of ones.
pub fn ones(ctx: Context, rows: usize, cols: usize) -> Matrix {
    let one = ctx.one();
    let mut A = Matrix::new(ctx, rows, cols);
    for i in 0..rows {
        for j in 0..cols {
            A.store.set(i, j, one.clone());
        }
    }
    A
}

/// Identity matrix of size `n`
pub fn eye(ctx: Context, n: usize) -> Matrix {
    let one = ctx.one();
    let mut A = Matrix::square(ctx, n);
    for i in 0..n {
        A.store.set(i, i, one.clone());
    }
    A
}

/// Square matrix with `values` on the diagonal.
pub fn diag<S>(ctx: Context, values: &[S]) -> Result<Matrix, MatrixError>
where
    S: Into<Scalar> + Clone,
{
    let ops = ctx.ops();
    let mut A = Matrix::square(ctx, values.len());
    for (i, v) in values.iter().enumerate() {
        A.store.set(i, i, ops.convert(&v.clone().into())?);
    }
    Ok(A)
}

/// Hilbert matrix `H[i, j] = 1 / (i + j + 1)` of size `n`.
///
/// Entries are computed directly in `ctx`, so in the interval context each
/// entry encloses the exact fraction.
pub fn hilbert(ctx: Context, n: usize) -> Result<Matrix, MatrixError> {
    let ops = ctx.ops();
    let one = ops.one();
    let mut A = Matrix::square(ctx, n);
    for i in 0..n {
        for j in 0..n {
            A.store.set(i, j, ops.div(&one, &ops.from_usize(i + j + 1))?);
        }
    }
    Ok(A)
}

cfg_if! {
    if #[cfg(feature = "rand")] {
        use rand::Rng;

        /// `rows x cols` matrix of uniform samples from `[0, 1)`.
        pub fn randmatrix(ctx: Context, rows: usize, cols: usize) -> Result<Matrix, MatrixError> {
            randmatrix_with(ctx, rows, cols, &mut rand::thread_rng())
        }

        /// As [`randmatrix`], drawing from a caller supplied generator.
        pub fn randmatrix_with<G: Rng + ?Sized>(
            ctx: Context,
            rows: usize,
            cols: usize,
            rng: &mut G,
        ) -> Result<Matrix, MatrixError> {
            let ops = ctx.ops();
            let mut A = Matrix::new(ctx, rows, cols);
            for i in 0..rows {
                for j in 0..cols {
                    let x: f64 = rng.gen();
                    A.store.set(i, j, ops.convert(&Scalar::from(x))?);
                }
            }
            Ok(A)
        }
    }
}

/// Swap two rows in place.
pub trait SwapRow {
    fn swap_row(&mut self, i: usize, j: usize) -> Result<(), MatrixError>;
}

impl SwapRow for Matrix {
    fn swap_row(&mut self, i: usize, j: usize) -> Result<(), MatrixError> {
        for k in [i, j] {
            if k >= self.rows {
                return Err(MatrixError::IndexOutOfRange {
                    index: k as isize,
                    dim: self.rows,
                });
            }
        }
        if i != j {
            self.store.remap(|r, c| match r {
                r if r == i => (j, c),
                r if r == j => (i, c),
                _ => (r, c),
            });
        }
        Ok(())
    }
}

impl<T> SwapRow for [T] {
    fn swap_row(&mut self, i: usize, j: usize) -> Result<(), MatrixError> {
        for k in [i, j] {
            if k >= self.len() {
                return Err(MatrixError::IndexOutOfRange {
                    index: k as isize,
                    dim: self.len(),
                });
            }
        }
        self.swap(i, j);
        Ok(())
    }
}

/// Swap rows `i` and `j` of a matrix or of a plain sequence.
///
/// ```
/// use mpmatrix::algebra::swap_row;
///
/// let mut v = vec![1, 2];
/// swap_row(v.as_mut_slice(), 0, 1).unwrap();
/// assert_eq!(v, [2, 1]);
/// ```
pub fn swap_row<M: SwapRow + ?Sized>(m: &mut M, i: usize, j: usize) -> Result<(), MatrixError> {
    m.swap_row(i, j)
}

/// Copy of `A` with `column` appended as a new last column.
pub fn extend<S>(A: &Matrix, column: &[S]) -> Result<Matrix, MatrixError>
where
    S: Into<Scalar> + Clone,
{
    if column.len() != A.rows {
        return Err(MatrixError::ShapeMismatch {
            left: A.size(),
            right: (column.len(), 1),
        });
    }
    let ops = A.ctx.ops();
    let values = column
        .iter()
        .map(|v| ops.convert(&v.clone().into()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut B = A.clone();
    B.compact();
    B.cols += 1;
    for (i, v) in values.into_iter().enumerate() {
        B.store.set(i, A.cols, v);
    }
    Ok(B)
}
