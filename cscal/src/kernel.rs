//! Complex single-precision vector scaling
//!
//! Computes `x[i] <- alpha * x[i]` for `N` logical elements of an interleaved
//! complex vector, in place:
//! (a_re + i*a_im) * (x_re + i*x_im) = (a_re*x_re - a_im*x_im) + i*(a_re*x_im + a_im*x_re)
//!
//! Element `i` lives at physical complex index `offset + i * stride`. The stride
//! may be negative, and may be zero, in which case the single addressed slot is
//! scaled `N` times in sequence.

use crate::buffer::{ComplexBuffer, as_complex_mut};
use crate::error::{CscalError, Result};
use ndarray::ArrayViewMut1;
use num_complex::Complex32;
use tracing::trace;

/// Scale `n` complex elements of `x` by `alpha` (generic core)
///
/// All other entry points route here. The complete access pattern is
/// validated before the first write, so on error `x` is left untouched.
///
/// # Arguments
/// * `n` - Number of logical elements to scale; `0` is a no-op
/// * `alpha` - Complex scalar
/// * `x` - Interleaved complex storage
/// * `stride` - Step between logical elements, in complex elements
/// * `offset` - Physical index of the first logical element
///
/// # Errors
/// `OutOfBounds` if any addressed element lies outside `x`, `InvalidArgument`
/// if the index arithmetic overflows
pub fn scale_strided<B>(
    n: usize,
    alpha: Complex32,
    x: &mut B,
    stride: isize,
    offset: usize,
) -> Result<()>
where
    B: ComplexBuffer + ?Sized,
{
    if n == 0 {
        return Ok(());
    }
    check_access(n, stride, offset, x.complex_len())?;
    trace!(n, stride, offset, "cscal");

    let (zr, zi) = (alpha.re, alpha.im);
    let mut ix = offset as isize;
    for _ in 0..n {
        let v = x.load(ix as usize);
        x.store(
            ix as usize,
            Complex32::new(zr * v.re - zi * v.im, zr * v.im + zi * v.re),
        );
        ix = ix.wrapping_add(stride);
    }
    Ok(())
}

/// Scale an interleaved `f32` buffer with an explicit starting offset
///
/// `x` holds `re0, im0, re1, im1, ...`; `stride` and `offset` count complex
/// elements, not floats.
///
/// # Errors
/// `Misaligned` for an odd-length buffer, plus the errors of [`scale_strided`]
pub fn cscal_ndarray(
    n: usize,
    alpha: Complex32,
    x: &mut [f32],
    stride: isize,
    offset: usize,
) -> Result<()> {
    let x = as_complex_mut(x)?;
    scale_strided(n, alpha, x, stride, offset)
}

/// Scale an interleaved `f32` buffer with the offset implied by the stride
///
/// A non-negative stride starts at element 0. A negative stride starts at
/// element `(n - 1) * |stride|` and walks backwards to element 0.
///
/// # Errors
/// Same as [`cscal_ndarray`]
pub fn cscal(n: usize, alpha: Complex32, x: &mut [f32], stride: isize) -> Result<()> {
    let offset = stride_offset(n, stride)?;
    cscal_ndarray(n, alpha, x, stride, offset)
}

/// Scale a typed complex slice
pub fn scale_complex(
    n: usize,
    alpha: Complex32,
    x: &mut [Complex32],
    stride: isize,
    offset: usize,
) -> Result<()> {
    scale_strided(n, alpha, x, stride, offset)
}

/// Scale every element of a 1-D `ndarray` view
///
/// The view carries its own layout, so any slicing (reversed, stepped) is
/// honoured.
pub fn scale_view(alpha: Complex32, mut x: ArrayViewMut1<'_, Complex32>) -> Result<()> {
    let n = x.len();
    scale_strided(n, alpha, &mut x, 1, 0)
}

/// Starting offset implied by a stride
///
/// `0` for non-negative strides, `(1 - n) * stride` otherwise.
///
/// # Errors
/// `InvalidArgument` if the offset does not fit in `usize`
pub fn stride_offset(n: usize, stride: isize) -> Result<usize> {
    if stride >= 0 || n == 0 {
        return Ok(0);
    }
    (n - 1)
        .checked_mul(stride.unsigned_abs())
        .ok_or_else(|| {
            CscalError::invalid_argument(format!(
                "offset for n={n} and stride={stride} overflows"
            ))
        })
}

/// Verify that `offset + i * stride` is inside `[0, len)` for every `i < n`
///
/// Indices are linear in `i`, so checking the first and the last is enough.
fn check_access(n: usize, stride: isize, offset: usize, len: usize) -> Result<()> {
    let overflow = || {
        CscalError::invalid_argument(format!(
            "index arithmetic overflows for n={n}, stride={stride}, offset={offset}"
        ))
    };
    let first = i64::try_from(offset).map_err(|_| overflow())?;
    let steps = i64::try_from(n - 1).map_err(|_| overflow())?;
    let last = steps
        .checked_mul(stride as i64)
        .and_then(|d| first.checked_add(d))
        .ok_or_else(overflow)?;

    for index in [first, last] {
        if index < 0 || index as u64 >= len as u64 {
            return Err(CscalError::out_of_bounds(index, len));
        }
    }
    Ok(())
}
