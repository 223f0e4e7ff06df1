#![allow(non_snake_case)]

use mpmatrix::algebra::*;

fn mat<R: AsRef<[i32]>>(rows: &[R]) -> Matrix {
    Matrix::from_rows(Context::Exact, rows).unwrap()
}

fn vector(v: &[i32]) -> Matrix {
    Matrix::from_vec(Context::Exact, v).unwrap()
}

#[test]
fn test_matrix_kron() {
    let a = mat(&[[1, 2], [3, 4]]);
    let b = mat(&[[5, 6], [7, 8]]);
    let c = mat(&[[9, 10], [11, 12]]);
    let d = vector(&[1, 10, 100]);
    let e = vector(&[5, 6, 7]);

    let axb = mat(&[
        [5, 6, 10, 12],
        [7, 8, 14, 16],
        [15, 18, 20, 24],
        [21, 24, 28, 32],
    ]);
    let bxc = mat(&[
        [45, 50, 54, 60],
        [55, 60, 66, 72],
        [63, 70, 72, 80],
        [77, 84, 88, 96],
    ]);
    let axbxc = mat(&[
        [45, 50, 54, 60, 90, 100, 108, 120],
        [55, 60, 66, 72, 110, 120, 132, 144],
        [63, 70, 72, 80, 126, 140, 144, 160],
        [77, 84, 88, 96, 154, 168, 176, 192],
        [135, 150, 162, 180, 180, 200, 216, 240],
        [165, 180, 198, 216, 220, 240, 264, 288],
        [189, 210, 216, 240, 252, 280, 288, 320],
        [231, 252, 264, 288, 308, 336, 352, 384],
    ]);
    let dxe = vector(&[5, 6, 7, 50, 60, 70, 500, 600, 700]);

    for m in [&a, &b, &c, &d, &e] {
        assert_eq!(&kron_all(&[m]).unwrap(), m);
    }

    let folded = [&b, &c, &d, &e]
        .iter()
        .try_fold(a.clone(), |K, M| kron(&K, M))
        .unwrap();
    assert_eq!(kron_all(&[&a, &b, &c, &d, &e]).unwrap(), folded);

    assert_eq!(kron(&a, &b).unwrap(), axb);
    assert_eq!(kron(&b, &c).unwrap(), bxc);
    assert_eq!(kron_all(&[&a, &b, &c]).unwrap(), axbxc);
    assert_eq!(kron(&kron(&a, &b).unwrap(), &c).unwrap(), axbxc);
    assert_eq!(kron(&a, &kron(&b, &c).unwrap()).unwrap(), axbxc);
    assert_eq!(kron(&d, &e).unwrap(), dxe);

    assert_eq!(
        kron(&ones(Context::Exact, 10, 9), &ones(Context::Exact, 8, 7)).unwrap(),
        ones(Context::Exact, 10 * 8, 9 * 7)
    );
    let I = eye(Context::Exact, 4);
    assert_eq!(
        kron_all(&[&I, &I, &I]).unwrap(),
        eye(Context::Exact, 4 * 4 * 4)
    );
    assert_eq!(
        kron(&zeros(Context::Exact, 5, 5), &d).unwrap(),
        zeros(Context::Exact, 15, 5)
    );
}

#[test]
fn test_kron_promotes() {
    let A = eye(Context::Native, 2);
    let B = ones(Context::Interval, 1, 2);
    let K = kron(&A, &B).unwrap();
    assert_eq!(K.context(), Context::Interval);
    assert_eq!(K.size(), (2, 4));
    assert_eq!(K.nnz(), 4);
}
