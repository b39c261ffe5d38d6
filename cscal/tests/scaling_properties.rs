//! Property tests for complex scaling
//!
//! These check the algebraic behavior of the routine across entry points and
//! access patterns, using seeded random data.

use approx::assert_relative_eq;
use cscal::{
    Complex32, CscalError, DataType, Memory, MemoryConfig, Module, cscal, cscal_ndarray,
    scale_view,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random integers in [-10, 10] as floats, so products stay exact
fn random_interleaved(rng: &mut StdRng, n_floats: usize) -> Vec<f32> {
    (0..n_floats)
        .map(|_| rng.random_range(-10i32..=10) as f32)
        .collect()
}

fn random_scalar(rng: &mut StdRng) -> Complex32 {
    Complex32::new(
        rng.random_range(-10i32..=10) as f32,
        rng.random_range(-10i32..=10) as f32,
    )
}

#[test]
fn test_pointer_and_direct_forms_agree() {
    let mut rng = StdRng::seed_from_u64(42);
    for &(n, stride, offset) in &[(5usize, 1isize, 0usize), (3, 2, 1), (4, -1, 3), (6, 0, 2)] {
        let capacity = 8;
        let data = random_interleaved(&mut rng, capacity * 2);
        let alpha = random_scalar(&mut rng);

        let mut direct = data.clone();
        cscal_ndarray(n, alpha, &mut direct, stride, offset).unwrap();

        let mut module = Module::new(Memory::new(MemoryConfig::default()).unwrap());
        module.initialize().unwrap();
        let x_ptr = 0;
        let z_ptr = DataType::Complex64.byte_offset(capacity);
        module.memory_mut().write_f32s(x_ptr, &data).unwrap();
        module
            .memory_mut()
            .write_f32s(z_ptr, &[alpha.re, alpha.im])
            .unwrap();
        module.ndarray(n, z_ptr, x_ptr, stride, offset).unwrap();

        assert_eq!(
            module.memory().read_f32s(x_ptr, capacity * 2).unwrap(),
            direct,
            "n={n} stride={stride} offset={offset}"
        );
    }
}

#[test]
fn test_only_addressed_elements_change() {
    let mut rng = StdRng::seed_from_u64(7);
    let original = random_interleaved(&mut rng, 10);
    let mut x = original.clone();
    cscal_ndarray(3, Complex32::new(0.0, 0.0), &mut x, 2, 0).unwrap();

    for element in 0..5 {
        let pair = &x[2 * element..2 * element + 2];
        if element % 2 == 0 {
            assert_eq!(pair, &[0.0, 0.0]);
        } else {
            assert_eq!(pair, &original[2 * element..2 * element + 2]);
        }
    }
}

#[test]
fn test_scaling_twice_matches_product_scalar() {
    let mut rng = StdRng::seed_from_u64(1234);
    let start: Vec<f32> = (0..64).map(|_| rng.random_range(-1.0f32..1.0)).collect();
    let z1 = Complex32::new(rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0));
    let z2 = Complex32::new(rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0));

    let mut twice = start.clone();
    cscal(32, z1, &mut twice, 1).unwrap();
    cscal(32, z2, &mut twice, 1).unwrap();

    let mut once = start;
    cscal(32, z1 * z2, &mut once, 1).unwrap();

    for (a, b) in twice.iter().zip(&once) {
        assert_relative_eq!(*a, *b, epsilon = 1e-5, max_relative = 1e-4);
    }
}

#[test]
fn test_stride_zero_equals_power_of_scalar() {
    let alpha = Complex32::new(1.0, -1.0);
    let mut x = vec![3.0f32, -2.0];
    cscal_ndarray(4, alpha, &mut x, 0, 0).unwrap();
    // (1 - i)^4 = -4
    let expected = Complex32::new(-4.0, 0.0) * Complex32::new(3.0, -2.0);
    assert_eq!(x, vec![expected.re, expected.im]);
}

#[test]
fn test_view_and_slice_forms_agree() {
    use ndarray::{Array1, s};

    let mut rng = StdRng::seed_from_u64(99);
    let data = random_interleaved(&mut rng, 12);
    let alpha = random_scalar(&mut rng);

    let mut sliced = data.clone();
    cscal_ndarray(3, alpha, &mut sliced, -2, 4).unwrap();

    let mut arr: Array1<Complex32> = data
        .chunks_exact(2)
        .map(|p| Complex32::new(p[0], p[1]))
        .collect();
    scale_view(alpha, arr.slice_mut(s![..5;-2])).unwrap();

    let flattened: Vec<f32> = arr.iter().flat_map(|c| [c.re, c.im]).collect();
    assert_eq!(flattened, sliced);
}

#[test]
fn test_rejected_calls_do_not_write() {
    let mut x = vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
    let before = x.clone();

    let err = cscal(4, Complex32::new(2.0, 0.0), &mut x, 1).unwrap_err();
    assert!(matches!(err, CscalError::OutOfBounds { index: 3, len: 3 }));
    assert_eq!(x, before);

    let mut odd = vec![1.0f32, 2.0, 3.0];
    let err = cscal(1, Complex32::new(2.0, 0.0), &mut odd, 1).unwrap_err();
    assert_eq!(err, CscalError::Misaligned { len: 3 });
}
