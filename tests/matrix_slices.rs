#![allow(non_snake_case)]

use mpmatrix::algebra::*;

fn mat<R: AsRef<[i32]>>(rows: &[R]) -> Matrix {
    Matrix::from_rows(Context::Exact, rows).unwrap()
}

fn vector(v: &[i32]) -> Matrix {
    Matrix::from_vec(Context::Exact, v).unwrap()
}

#[test]
fn test_get_slice() {
    let A = mat(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
    let V = vector(&[1, 2, 3, 4, 5]);

    assert_eq!(A.slice(.., ..).unwrap(), A);
    assert_eq!(A.slice(.., 1).unwrap(), mat(&[[2], [5], [8]]));
    assert_eq!(A.slice(2, ..).unwrap(), mat(&[[7, 8, 9]]));
    assert_eq!(A.slice(1..3, 1..3).unwrap(), mat(&[[5, 6], [8, 9]]));
    assert_eq!(A.slice(0..2, 0..2).unwrap(), mat(&[[1, 2], [4, 5]]));
    assert_eq!(A.slice(..2, ..2).unwrap(), mat(&[[1, 2], [4, 5]]));
    assert_eq!(V.slice_vec(2..4).unwrap(), vector(&[3, 4]));

    assert!(matches!(
        A.slice(.., 1..6),
        Err(MatrixError::IndexOutOfRange { .. })
    ));
}

#[test]
fn test_negative_and_empty_slices() {
    let A = mat(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
    assert_eq!(A.slice(-1, ..).unwrap(), mat(&[[7, 8, 9]]));
    assert_eq!(A.slice(.., -2..).unwrap(), mat(&[[2, 3], [5, 6], [8, 9]]));
    assert_eq!(A.slice(2..2, ..).unwrap_err(), MatrixError::EmptySelection);
    assert_eq!(A.slice(-4, 0).unwrap_err().kind(), ErrorKind::Index);
}

#[test]
fn test_assign_slice() {
    let A = mat(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
    let mut V = vector(&[1, 2, 3, 4, 5]);

    let mut A1 = Matrix::square(Context::Exact, 3);
    A1.assign(.., .., &A).unwrap();
    assert_eq!(A1.slice(.., ..).unwrap(), A);

    A1.assign(0, .., mat(&[[10, 11, 12]])).unwrap();
    assert_eq!(A1, mat(&[[10, 11, 12], [4, 5, 6], [7, 8, 9]]));

    A1.assign(.., 2, mat(&[[13], [14], [15]])).unwrap();
    assert_eq!(A1, mat(&[[10, 11, 13], [4, 5, 14], [7, 8, 15]]));

    A1.assign(..2, ..2, mat(&[[16, 17], [18, 19]])).unwrap();
    assert_eq!(A1, mat(&[[16, 17, 13], [18, 19, 14], [7, 8, 15]]));

    V.assign_vec(1..3, 10).unwrap();
    assert_eq!(V, vector(&[1, 10, 10, 4, 5]));

    // shape and bounds failures leave the target untouched
    let before = A1.clone();
    assert!(matches!(
        A1.assign(2, .., A.slice(.., 1).unwrap()),
        Err(MatrixError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        A1.assign(2, 1..20, A.slice(.., ..).unwrap()),
        Err(MatrixError::IndexOutOfRange { .. })
    ));
    assert_eq!(A1, before);

    A1.assign(.., 2, 10).unwrap();
    assert_eq!(A1, mat(&[[16, 17, 10], [18, 19, 10], [7, 8, 10]]));

    A1.assign(.., .., 40).unwrap();
    assert!(A1.iter().all(|x| x == Scalar::from(40)));
}

#[test]
fn test_assign_converts_context() {
    let mut A = zeros(Context::Interval, 2, 2);
    A.assign(0, .., ones(Context::Native, 1, 2)).unwrap();
    assert_eq!(A.get(0, 1).unwrap().context(), Context::Interval);
    assert_eq!(A, Matrix::from_rows(Context::Exact, &[[1, 1], [0, 0]]).unwrap());
}
