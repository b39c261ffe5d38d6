//! Storage abstraction for interleaved complex vectors.
//!
//! Every entry point of the crate ends up in [`crate::kernel::scale_strided`],
//! which only needs to load and store whole complex elements by physical index.
//! Plain slices, `ndarray` views and little-endian views over linear memory all
//! provide that through [`ComplexBuffer`].

use crate::error::{CscalError, Result};
use ndarray::ArrayViewMut1;
use num_complex::Complex32;

/// Mutable storage addressed in complex-element units
///
/// `load` and `store` are only called with indices below `complex_len`; the
/// kernel validates the whole access pattern before the first call.
pub trait ComplexBuffer {
    /// Capacity in complex elements
    fn complex_len(&self) -> usize;
    fn load(&self, index: usize) -> Complex32;
    fn store(&mut self, index: usize, value: Complex32);
}

impl ComplexBuffer for [Complex32] {
    #[inline]
    fn complex_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn load(&self, index: usize) -> Complex32 {
        self[index]
    }

    #[inline]
    fn store(&mut self, index: usize, value: Complex32) {
        self[index] = value;
    }
}

impl ComplexBuffer for ArrayViewMut1<'_, Complex32> {
    #[inline]
    fn complex_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn load(&self, index: usize) -> Complex32 {
        self[index]
    }

    #[inline]
    fn store(&mut self, index: usize, value: Complex32) {
        self[index] = value;
    }
}

/// Reinterpret an interleaved `f32` buffer as complex elements without copying
///
/// # Errors
/// Returns `CscalError::Misaligned` if the buffer holds an odd number of floats
pub fn as_complex_mut(x: &mut [f32]) -> Result<&mut [Complex32]> {
    let len = x.len();
    bytemuck::try_cast_slice_mut(x).map_err(|_| CscalError::Misaligned { len })
}

/// Read-only counterpart of [`as_complex_mut`]
///
/// # Errors
/// Returns `CscalError::Misaligned` if the buffer holds an odd number of floats
pub fn as_complex(x: &[f32]) -> Result<&[Complex32]> {
    let len = x.len();
    bytemuck::try_cast_slice(x).map_err(|_| CscalError::Misaligned { len })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleaved_cast_pairs_floats() {
        let mut data = vec![1.0f32, 2.0, 3.0, 4.0];
        let complex = as_complex_mut(&mut data).unwrap();
        assert_eq!(complex.len(), 2);
        assert_eq!(complex[1], Complex32::new(3.0, 4.0));

        complex[0] = Complex32::new(-1.0, -2.0);
        assert_eq!(data, vec![-1.0, -2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_odd_length_is_rejected() {
        let mut data = vec![1.0f32, 2.0, 3.0];
        let err = as_complex_mut(&mut data).unwrap_err();
        assert_eq!(err, CscalError::Misaligned { len: 3 });
        assert!(as_complex(&data).is_err());
    }

    #[test]
    fn test_empty_buffer_casts() {
        let mut data: Vec<f32> = Vec::new();
        assert!(as_complex_mut(&mut data).unwrap().is_empty());
    }

    #[test]
    fn test_array_view_follows_its_own_strides() {
        use ndarray::{Array1, s};

        let mut arr = Array1::from_vec(vec![
            Complex32::new(0.0, 0.0),
            Complex32::new(1.0, 0.0),
            Complex32::new(2.0, 0.0),
            Complex32::new(3.0, 0.0),
        ]);
        let mut view = arr.slice_mut(s![..;-2]);
        assert_eq!(view.complex_len(), 2);
        assert_eq!(view.load(0), Complex32::new(3.0, 0.0));
        view.store(1, Complex32::new(9.0, 9.0));
        assert_eq!(arr[1], Complex32::new(9.0, 9.0));
    }
}
