use lanekit::dispatch;
use lanekit::view::{gemm_with, MatrixMut, MatrixRef};
use lanekit::{matmul, LanekitError, Matrix};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_matrix(rows: usize, cols: usize, rng: &mut StdRng) -> Matrix {
    let data = (0..rows * cols).map(|_| rng.random_range(-1.0..1.0)).collect();
    Matrix::new(rows, cols, Some(data)).unwrap()
}

#[test]
fn test_identity_times_matrix() {
    let identity = Matrix::new(2, 2, Some(vec![1.0, 0.0, 0.0, 1.0])).unwrap();
    let n = Matrix::new(2, 2, Some(vec![1.0, 2.0, 3.0, 4.0])).unwrap();
    let mut out = Matrix::zeros(2, 2).unwrap();

    matmul(&mut out, &identity, &n).unwrap();

    assert_eq!(out.data(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_non_square() {
    let m = Matrix::new(1, 3, Some(vec![2.0, 0.0, 1.0])).unwrap();
    let n = Matrix::new(3, 2, Some(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])).unwrap();
    let mut out = Matrix::zeros(1, 2).unwrap();

    matmul(&mut out, &m, &n).unwrap();

    assert_eq!(out.data(), &[7.0, 10.0]);
}

#[test]
fn test_output_accumulates() {
    let m = Matrix::new(2, 2, Some(vec![1.0, 2.0, 3.0, 4.0])).unwrap();
    let n = Matrix::new(2, 2, Some(vec![5.0, 6.0, 7.0, 8.0])).unwrap();
    let mut out = Matrix::zeros(2, 2).unwrap();

    matmul(&mut out, &m, &n).unwrap();
    assert_eq!(out.data(), &[19.0, 22.0, 43.0, 50.0]);

    matmul(&mut out, &m, &n).unwrap();
    assert_eq!(out.data(), &[38.0, 44.0, 86.0, 100.0]);

    out.zero();
    matmul(&mut out, &m, &n).unwrap();
    assert_eq!(out.data(), &[19.0, 22.0, 43.0, 50.0]);
}

#[test]
fn test_prefilled_output_is_offset() {
    let m = Matrix::new(1, 3, Some(vec![2.0, 0.0, 1.0])).unwrap();
    let n = Matrix::new(3, 2, Some(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])).unwrap();
    let mut out = Matrix::filled(1, 2, 1.0).unwrap();

    matmul(&mut out, &m, &n).unwrap();

    assert_eq!(out.data(), &[8.0, 11.0]);
}

#[test]
fn test_against_ndarray() {
    let mut rng = StdRng::seed_from_u64(42);

    for (mr, k, nc) in [(1, 1, 1), (3, 5, 7), (16, 8, 9), (33, 17, 65), (64, 64, 64)] {
        let m = random_matrix(mr, k, &mut rng);
        let n = random_matrix(k, nc, &mut rng);
        let mut out = Matrix::zeros(mr, nc).unwrap();

        matmul(&mut out, &m, &n).unwrap();

        let expected = m.to_array().dot(&n.to_array());
        for ((i, j), &e) in expected.indexed_iter() {
            let actual = out.get(i, j).unwrap();
            assert!(
                (actual - e).abs() < 1e-3,
                "{mr}x{k}x{nc} at ({i}, {j}): {actual} != {e}"
            );
        }
    }
}

#[test]
fn test_every_kernel_agrees() {
    let mut rng = StdRng::seed_from_u64(3);
    let (mr, k, nc) = (7, 11, 21);
    let m = random_matrix(mr, k, &mut rng);
    let n = random_matrix(k, nc, &mut rng);

    let outputs: Vec<Vec<f32>> = dispatch::available()
        .into_iter()
        .filter_map(dispatch::select)
        .map(|kernel| {
            let mut out = vec![0.0f32; mr * nc];
            gemm_with(
                kernel,
                &mut MatrixMut::new(&mut out, mr, nc),
                MatrixRef::new(m.data(), mr, k),
                MatrixRef::new(n.data(), k, nc),
            );
            out
        })
        .collect();

    for out in &outputs[1..] {
        assert!(out
            .iter()
            .zip(&outputs[0])
            .all(|(a, b)| a.to_bits() == b.to_bits()));
    }
}

#[test]
fn test_dot_allocates_fresh_output() {
    let m = Matrix::new(2, 3, Some(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])).unwrap();
    let n = Matrix::new(3, 1, Some(vec![1.0, 1.0, 1.0])).unwrap();

    let out = m.dot(&n).unwrap();

    assert_eq!(out.shape(), (2, 1));
    assert_eq!(out.data(), &[6.0, 15.0]);
}

#[test]
fn test_incompatible_operands() {
    let m = Matrix::zeros(2, 3).unwrap();
    let n = Matrix::zeros(2, 3).unwrap();
    let mut out = Matrix::zeros(2, 3).unwrap();

    let err = matmul(&mut out, &m, &n).unwrap_err();

    assert!(matches!(
        err,
        LanekitError::Incompatible {
            left: (2, 3),
            right: (2, 3),
            ..
        }
    ));
}

#[test]
fn test_wrong_output_shape() {
    let m = Matrix::zeros(2, 3).unwrap();
    let n = Matrix::zeros(3, 4).unwrap();
    let mut out = Matrix::filled(4, 2, 9.0).unwrap();

    let err = matmul(&mut out, &m, &n).unwrap_err();

    assert!(matches!(
        err,
        LanekitError::Shape {
            expected: (2, 4),
            actual: (4, 2),
            ..
        }
    ));
    // rejected before any write
    assert!(out.data().iter().all(|&v| v == 9.0));
}

#[test]
fn test_ndarray_round_trip_through_matmul() {
    let a = Array2::from_shape_vec((2, 2), vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
    let m = Matrix::try_from(&a).unwrap();
    let mut out = Matrix::zeros(2, 2).unwrap();

    matmul(&mut out, &m, &m).unwrap();

    assert_eq!(Array2::from(&out), a.dot(&a));
}

#[test]
fn test_ffi_matrix_multiply() {
    let m = [1.0f32, 2.0, 3.0, 4.0];
    let n = [5.0f32, 6.0, 7.0, 8.0];
    let mut out = [1.0f32; 4];

    unsafe {
        lanekit::ffi::matrix_multiply(out.as_mut_ptr(), m.as_ptr(), n.as_ptr(), 2, 2, 2, 2)
    };

    assert_eq!(out, [20.0, 23.0, 44.0, 51.0]);
}
