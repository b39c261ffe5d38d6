//! Little-endian `f32` views over raw bytes
//!
//! Linear memory stores every float in little-endian order regardless of the
//! host, and pointers carry no alignment guarantee. The views below decode and
//! encode through `byteorder`, so they work on any byte offset and any host.

use crate::buffer::ComplexBuffer;
use crate::error::{CscalError, Result};
use byteorder::{ByteOrder, LittleEndian as LE};
use num_complex::Complex32;
use std::fmt;

const F32_BYTES: usize = 4;

/// Resolve `len` floats starting at `byte_offset` to a byte range of `buffer_len`
fn byte_range(buffer_len: usize, byte_offset: usize, len: usize) -> Result<std::ops::Range<usize>> {
    let end = len
        .checked_mul(F32_BYTES)
        .and_then(|n| n.checked_add(byte_offset))
        .ok_or_else(|| CscalError::invalid_argument(format!("view of {len} floats overflows")))?;
    if end > buffer_len {
        return Err(CscalError::out_of_bounds(end as i64, buffer_len));
    }
    Ok(byte_offset..end)
}

/// Read-only view of `len` little-endian `f32` values
#[derive(Debug, Clone, Copy)]
pub struct Float32ArrayLE<'a> {
    bytes: &'a [u8],
}

impl<'a> Float32ArrayLE<'a> {
    /// Create a view of `len` floats starting at `byte_offset`
    ///
    /// # Errors
    /// `OutOfBounds` if the view does not fit inside `buffer`
    pub fn new(buffer: &'a [u8], byte_offset: usize, len: usize) -> Result<Self> {
        let range = byte_range(buffer.len(), byte_offset, len)?;
        Ok(Self {
            bytes: &buffer[range],
        })
    }

    /// Number of floats in the view
    pub fn len(&self) -> usize {
        self.bytes.len() / F32_BYTES
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        let start = index.checked_mul(F32_BYTES)?;
        let end = start.checked_add(F32_BYTES)?;
        self.bytes.get(start..end).map(LE::read_f32)
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.bytes.chunks_exact(F32_BYTES).map(LE::read_f32)
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.iter().collect()
    }
}

impl fmt::Display for Float32ArrayLE<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Mutable view of `len` little-endian `f32` values
#[derive(Debug)]
pub struct Float32ArrayLEMut<'a> {
    bytes: &'a mut [u8],
}

impl<'a> Float32ArrayLEMut<'a> {
    /// Create a mutable view of `len` floats starting at `byte_offset`
    ///
    /// # Errors
    /// `OutOfBounds` if the view does not fit inside `buffer`
    pub fn new(buffer: &'a mut [u8], byte_offset: usize, len: usize) -> Result<Self> {
        let range = byte_range(buffer.len(), byte_offset, len)?;
        Ok(Self {
            bytes: &mut buffer[range],
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len() / F32_BYTES
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.as_view().get(index)
    }

    /// Write `value` at `index`
    ///
    /// # Errors
    /// `OutOfBounds` if `index` is past the end of the view
    pub fn set(&mut self, index: usize, value: f32) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(CscalError::out_of_bounds(index as i64, len));
        }
        self.write_at(index, value);
        Ok(())
    }

    /// Fill every element with successive values produced by `f`
    pub fn fill_with(&mut self, mut f: impl FnMut() -> f32) {
        for chunk in self.bytes.chunks_exact_mut(F32_BYTES) {
            LE::write_f32(chunk, f());
        }
    }

    /// Reborrow as a read-only view
    pub fn as_view(&self) -> Float32ArrayLE<'_> {
        Float32ArrayLE { bytes: &*self.bytes }
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.as_view().to_vec()
    }

    #[inline]
    fn read_at(&self, index: usize) -> f32 {
        let start = index * F32_BYTES;
        LE::read_f32(&self.bytes[start..start + F32_BYTES])
    }

    #[inline]
    fn write_at(&mut self, index: usize, value: f32) {
        let start = index * F32_BYTES;
        LE::write_f32(&mut self.bytes[start..start + F32_BYTES], value);
    }
}

impl ComplexBuffer for Float32ArrayLEMut<'_> {
    fn complex_len(&self) -> usize {
        self.len() / 2
    }

    fn load(&self, index: usize) -> Complex32 {
        Complex32::new(self.read_at(2 * index), self.read_at(2 * index + 1))
    }

    fn store(&mut self, index: usize, value: Complex32) {
        self.write_at(2 * index, value.re);
        self.write_at(2 * index + 1, value.im);
    }
}
