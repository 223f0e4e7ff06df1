// Operator overloads for `Matrix`.
//
// Operators forward to the checked methods and panic on error, the same
// way slice indexing panics on an out of range index.  Use the checked
// methods (`add_matrix`, `matmul`, `pow`, ...) to handle failures.

#![allow(non_snake_case)]

use crate::algebra::{BigFloat, Interval, Matrix, Scalar};
use num_complex::Complex64;
use std::ops::{Add, Div, Mul, Neg, Sub};

fn unwrap_op<T>(r: Result<T, crate::algebra::MatrixError>) -> T {
    r.unwrap_or_else(|e| panic!("{e}"))
}

macro_rules! impl_matrix_binop {
    ($Trait:ident, $fn:ident, $method:ident) => {
        impl $Trait<&Matrix> for &Matrix {
            type Output = Matrix;
            fn $fn(self, rhs: &Matrix) -> Matrix {
                unwrap_op(self.$method(rhs))
            }
        }
        impl $Trait<Matrix> for Matrix {
            type Output = Matrix;
            fn $fn(self, rhs: Matrix) -> Matrix {
                unwrap_op(self.$method(&rhs))
            }
        }
        impl $Trait<&Matrix> for Matrix {
            type Output = Matrix;
            fn $fn(self, rhs: &Matrix) -> Matrix {
                unwrap_op(self.$method(rhs))
            }
        }
        impl $Trait<Matrix> for &Matrix {
            type Output = Matrix;
            fn $fn(self, rhs: Matrix) -> Matrix {
                unwrap_op(self.$method(&rhs))
            }
        }
    };
}

impl_matrix_binop!(Add, add, add_matrix);
impl_matrix_binop!(Sub, sub, sub_matrix);
impl_matrix_binop!(Mul, mul, matmul);

// matrix ∘ scalar and scalar ∘ matrix for every scalar-like type
macro_rules! impl_scalar_binops {
    ($($ty:ty),*) => {
        $(
            impl Mul<$ty> for &Matrix {
                type Output = Matrix;
                fn mul(self, s: $ty) -> Matrix {
                    unwrap_op(self.scale(s))
                }
            }
            impl Mul<$ty> for Matrix {
                type Output = Matrix;
                fn mul(self, s: $ty) -> Matrix {
                    unwrap_op(self.scale(s))
                }
            }
            impl Mul<&Matrix> for $ty {
                type Output = Matrix;
                fn mul(self, A: &Matrix) -> Matrix {
                    unwrap_op(A.scale(self))
                }
            }
            impl Mul<Matrix> for $ty {
                type Output = Matrix;
                fn mul(self, A: Matrix) -> Matrix {
                    unwrap_op(A.scale(self))
                }
            }
            impl Div<$ty> for &Matrix {
                type Output = Matrix;
                fn div(self, s: $ty) -> Matrix {
                    unwrap_op(self.div_scalar(s))
                }
            }
            impl Div<$ty> for Matrix {
                type Output = Matrix;
                fn div(self, s: $ty) -> Matrix {
                    unwrap_op(self.div_scalar(s))
                }
            }
            impl Add<$ty> for &Matrix {
                type Output = Matrix;
                fn add(self, s: $ty) -> Matrix {
                    unwrap_op(self.add_scalar(s))
                }
            }
            impl Add<$ty> for Matrix {
                type Output = Matrix;
                fn add(self, s: $ty) -> Matrix {
                    unwrap_op(self.add_scalar(s))
                }
            }
            impl Add<&Matrix> for $ty {
                type Output = Matrix;
                fn add(self, A: &Matrix) -> Matrix {
                    unwrap_op(A.add_scalar(self))
                }
            }
            impl Add<Matrix> for $ty {
                type Output = Matrix;
                fn add(self, A: Matrix) -> Matrix {
                    unwrap_op(A.add_scalar(self))
                }
            }
            impl Sub<$ty> for &Matrix {
                type Output = Matrix;
                fn sub(self, s: $ty) -> Matrix {
                    unwrap_op(self.sub_scalar(s))
                }
            }
            impl Sub<$ty> for Matrix {
                type Output = Matrix;
                fn sub(self, s: $ty) -> Matrix {
                    unwrap_op(self.sub_scalar(s))
                }
            }
            impl Sub<&Matrix> for $ty {
                type Output = Matrix;
                fn sub(self, A: &Matrix) -> Matrix {
                    unwrap_op(A.rsub_scalar(self))
                }
            }
            impl Sub<Matrix> for $ty {
                type Output = Matrix;
                fn sub(self, A: Matrix) -> Matrix {
                    unwrap_op(A.rsub_scalar(self))
                }
            }
        )*
    };
}

impl_scalar_binops!(i32, i64, f64, Complex64, BigFloat, Interval, Scalar);

impl Neg for &Matrix {
    type Output = Matrix;
    fn neg(self) -> Matrix {
        Matrix::neg(self)
    }
}

impl Neg for Matrix {
    type Output = Matrix;
    fn neg(self) -> Matrix {
        Matrix::neg(&self)
    }
}
