#![allow(non_snake_case)]

use mpmatrix::algebra::*;

fn mat<R: AsRef<[i32]>>(rows: &[R]) -> Matrix {
    Matrix::from_rows(Context::Exact, rows).unwrap()
}

#[test]
fn test_matrix_basic() {
    let mut A1 = Matrix::square(Context::Exact, 3);
    for i in 0..3 {
        A1.set(i, i, 1).unwrap();
    }
    assert_eq!(A1, eye(Context::Exact, 3));
    assert_eq!(A1, A1.clone());

    let A2 = Matrix::new(Context::Exact, 3, 2);
    assert_eq!(A2.nnz(), 0);
    assert_eq!(A2.rows(), 3);
    assert_eq!(A2.cols(), 2);

    let mut A3 = mat(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
    let listed: Vec<Scalar> = A3.iter().collect();
    let expected: Vec<Scalar> = (1..10i32).map(Scalar::from).collect();
    assert_eq!(listed, expected);
    A3.set(1, 1, 0).unwrap();
    assert_eq!(A3.nnz(), 8);

    let A4 = mat(&[[1, 2, 3], [4, 5, 6]]);
    let A5 = mat(&[[6, -1], [3, 2], [0, -3]]);
    assert_eq!(&A4 * &A5, mat(&[[12, -6], [39, -12]]));
    assert_eq!(&A1 * &A3, A3);
    assert_eq!(&A3 * &A1, A3);
    assert!(matches!(
        A2.matmul(&A2),
        Err(MatrixError::ShapeMismatch { .. })
    ));

    let l = [[10, 20, 30], [40, 0, 60], [70, 80, 90]];
    let A6 = mat(&l);
    let as_scalars: Vec<Vec<Scalar>> = l
        .iter()
        .map(|row| row.iter().copied().map(Scalar::from).collect())
        .collect();
    assert_eq!(A6.to_list(), as_scalars);

    let A3 = mat(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
    let mut A6 = mat(&l);
    A6.set(1, 1, 50).unwrap();
    assert_eq!(&A3 * 10i32, A6);
    assert_eq!(10i32 * &A3, A6);

    // the window shrinks without touching hidden entries
    let mut A3 = A3;
    A3.set_rows(2);
    A3.set_cols(2);
    assert_eq!(A3.nnz(), 4);
    A3.set(1, 1, 0).unwrap();
    assert_eq!(A3.nnz(), 3);

    assert_eq!(&A4 + &A4, 2i32 * &A4);
    assert_eq!(A4.add_matrix(&A2).unwrap_err().kind(), ErrorKind::Shape);
    assert_eq!((&A1 - &A1).sum().unwrap(), Scalar::from(0));

    let A7 = mat(&[[1, 2], [3, 4], [5, 6], [7, 8]]);
    let x = Matrix::from_vec(Context::Exact, &[10, -10]).unwrap();
    assert_eq!(
        &A7 * &x,
        Matrix::from_vec(Context::Exact, &[-10, -10, -10, -10]).unwrap()
    );

    let A8 = ones(Context::Exact, 5, 5);
    let Z = zeros(Context::Exact, 5, 5);
    assert_eq!(((&A8 + 1i32) - (2i32 - &Z)).sum().unwrap(), Scalar::from(0));
    assert_eq!(
        (1i32 + ones(Context::Exact, 4, 4)) / 2i32 - 1i32,
        zeros(Context::Exact, 4, 4)
    );
    assert_eq!(eye(Context::Exact, 3).pow(10).unwrap(), eye(Context::Exact, 3));
    assert_eq!(A7.pow(2).unwrap_err(), MatrixError::NotSquare((4, 2)));

    let z = zeros(Context::Exact, 1, 1);
    assert_eq!(z.slice(.., 1).unwrap_err().kind(), ErrorKind::Index);
    assert_eq!(z.slice(1, ..).unwrap_err().kind(), ErrorKind::Index);
}

#[cfg(feature = "rand")]
#[test]
fn test_random_matrix_copy() {
    let mut A9 = randmatrix(Context::Exact, 3, 3).unwrap();
    let A10 = A9.clone();
    A9.set(0, 0, -100).unwrap();
    assert_ne!(A9, A10);
    assert!(!nstr(&A9, 15).is_empty());

    let R1 = randmatrix(Context::Exact, 10, 10).unwrap();
    let R2 = randmatrix(Context::Exact, 10, 10).unwrap();
    assert_ne!(R1, R2);
}

#[test]
fn test_matrix_power() {
    let A = mat(&[[1, 2], [3, 4]]);
    assert_eq!(A.pow(2).unwrap(), &A * &A);
    assert_eq!(A.pow(3).unwrap(), &(&A * &A) * &A);
    assert_eq!(A.pow(-1).unwrap(), inverse(&A).unwrap());
    assert_eq!(A.pow(-2).unwrap(), inverse(&(&A * &A)).unwrap());
}

#[test]
fn test_matrix_transform() {
    let mut A = mat(&[[1, 2], [3, 4], [5, 6]]);
    assert_eq!(A.t(), A.transpose());
    assert_eq!(A.t(), mat(&[[1, 3, 5], [2, 4, 6]]));

    swap_row(&mut A, 1, 2).unwrap();
    assert_eq!(A, mat(&[[1, 2], [5, 6], [3, 4]]));

    let mut l = vec![1, 2];
    swap_row(l.as_mut_slice(), 0, 1).unwrap();
    assert_eq!(l, [2, 1]);

    assert_eq!(
        extend(&eye(Context::Exact, 3), &[1, 2, 3]).unwrap(),
        mat(&[[1, 0, 0, 1], [0, 1, 0, 2], [0, 0, 1, 3]])
    );
}

#[test]
fn test_matrix_conjugate() {
    use num_complex::Complex64;
    let c = Complex64::new;

    let A = Matrix::from_rows(
        Context::Exact,
        &[[c(1., 1.), c(0., 0.)], [c(2., 0.), c(0., 1.)]],
    )
    .unwrap();

    let Ac = Matrix::from_rows(
        Context::Exact,
        &[[c(1., -1.), c(0., 0.)], [c(2., 0.), c(0., -1.)]],
    )
    .unwrap();
    assert_eq!(A.conjugate(), Ac);

    let Ah = Matrix::from_rows(
        Context::Exact,
        &[[c(1., -1.), c(2., 0.)], [c(0., 0.), c(0., -1.)]],
    )
    .unwrap();
    assert_eq!(A.transpose_conj(), Ah);
    assert_eq!(A.h(), Ah);
}

#[test]
fn test_matrix_creation() {
    assert_eq!(
        diag(Context::Exact, &[1, 2, 3]).unwrap(),
        mat(&[[1, 0, 0], [0, 2, 0], [0, 0, 3]])
    );

    let A1 = ones(Context::Exact, 2, 3);
    assert_eq!(A1.size(), (2, 3));
    assert!(A1.iter().all(|a| a == Scalar::from(1)));

    let A2 = zeros(Context::Exact, 3, 2);
    assert_eq!(A2.size(), (3, 2));
    assert!(A2.iter().all(|a| a == Scalar::from(0)));

    let ops = Context::Exact.ops();
    let frac = |k: usize| ops.div(&ops.one(), &ops.from_usize(k)).unwrap();
    let H = Matrix::from_rows(
        Context::Exact,
        &[
            [frac(1), frac(2), frac(3)],
            [frac(2), frac(3), frac(4)],
            [frac(3), frac(4), frac(5)],
        ],
    )
    .unwrap();
    assert_eq!(hilbert(Context::Exact, 3).unwrap(), H);
}

#[test]
fn test_vector() {
    let mut x = Matrix::from_vec(Context::Exact, &[0, 1, 2, 3, 4]).unwrap();
    assert_eq!(x, mat(&[[0], [1], [2], [3], [4]]));
    assert_eq!(x.get_vec(3).unwrap(), Scalar::from(3));
    assert_eq!(x.nnz(), 4);
    let listed: Vec<Scalar> = x.iter().collect();
    assert_eq!(listed, (0..5i32).map(Scalar::from).collect::<Vec<_>>());

    x.set_vec(0, -10).unwrap();
    x.set_vec(4, 0).unwrap();
    assert_eq!(x.get_vec(0).unwrap(), Scalar::from(-10));
    assert_eq!(x.len(), 5);
    assert_eq!(x.t().len(), 5);
    assert_eq!(&x.t() * &x, mat(&[[114]]));
}

#[test]
fn test_matrix_copy() {
    let A = ones(Context::Exact, 6, 6);
    let mut B = A.clone();
    let mut C = A.clone();
    assert_eq!(A, B);
    assert_eq!(A, C);
    B.set(0, 0, 0).unwrap();
    assert_ne!(A, B);
    C.set(0, 0, 42).unwrap();
    assert_ne!(A, C);
}

#[test]
fn test_display() {
    let A = mat(&[[1, -2], [30, 4]]);
    assert_eq!(nstr(&A, 15), "[ 1.0  -2.0]\n[30.0   4.0]");
}
