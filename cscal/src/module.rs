//! Pointer-addressed scaling routine over a shared linear memory
//!
//! `Module` owns a [`Memory`] and exposes the scaling routine through byte
//! pointers instead of slices. The scalar is loaded once from its pointer, the
//! vector region is viewed in place, and both entry points route through
//! [`crate::kernel::scale_strided`].

use crate::error::{CscalError, Result};
use crate::kernel::{scale_strided, stride_offset};
use crate::memory::Memory;
use crate::views::Float32ArrayLEMut;
use num_complex::Complex32;
use tracing::{debug, trace};

/// Scaling routine bound to a linear memory
#[derive(Debug, Clone)]
pub struct Module {
    memory: Memory,
    initialized: bool,
}

impl Module {
    pub fn new(memory: Memory) -> Self {
        Self {
            memory,
            initialized: false,
        }
    }

    /// Prepare the routine for use. Calling it again is a no-op.
    pub fn initialize(&mut self) -> Result<()> {
        if !self.initialized {
            debug!(
                pages = self.memory.pages(),
                "initializing complex scaling routine"
            );
            self.initialized = true;
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Release the memory back to the caller
    pub fn into_memory(self) -> Memory {
        self.memory
    }

    /// Scale `n` complex elements at `x_ptr` by the scalar at `alpha_ptr`,
    /// starting at element `offset`
    ///
    /// # Arguments
    /// * `n` - Number of logical elements; `0` is a no-op
    /// * `alpha_ptr` - Byte pointer to the scalar (two little-endian `f32`)
    /// * `x_ptr` - Byte pointer to the first complex element of the vector region
    /// * `stride` - Step between logical elements, in complex elements
    /// * `offset` - Index of the first logical element, in complex elements
    ///
    /// # Errors
    /// `NotInitialized` before [`Module::initialize`], `OutOfBounds` if the
    /// scalar or any addressed element lies outside the memory
    pub fn ndarray(
        &mut self,
        n: usize,
        alpha_ptr: usize,
        x_ptr: usize,
        stride: isize,
        offset: usize,
    ) -> Result<()> {
        self.ensure_initialized()?;
        if n == 0 {
            return Ok(());
        }
        let alpha = self.load_complex(alpha_ptr)?;
        trace!(n, alpha_ptr, x_ptr, stride, offset, "cscal ndarray");

        let byte_length = self.memory.byte_length();
        let available = byte_length
            .checked_sub(x_ptr)
            .ok_or_else(|| CscalError::out_of_bounds(x_ptr as i64, byte_length))?
            / 4;
        let mut x = Float32ArrayLEMut::new(self.memory.buffer_mut(), x_ptr, available)?;
        scale_strided(n, alpha, &mut x, stride, offset)
    }

    /// Stride-only form: the offset is implied by the stride (see [`stride_offset`])
    ///
    /// # Errors
    /// Same as [`Module::ndarray`]
    pub fn main(&mut self, n: usize, alpha_ptr: usize, x_ptr: usize, stride: isize) -> Result<()> {
        let offset = stride_offset(n, stride)?;
        self.ndarray(n, alpha_ptr, x_ptr, stride, offset)
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(CscalError::NotInitialized)
        }
    }

    fn load_complex(&self, ptr: usize) -> Result<Complex32> {
        let re = self.memory.read_f32(ptr)?;
        let im = self.memory.read_f32(ptr.saturating_add(4))?;
        Ok(Complex32::new(re, im))
    }
}
