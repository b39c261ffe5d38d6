//! Page-granular linear memory
//!
//! A flat, zero-initialized byte buffer sized in 64 KiB pages that can grow up to
//! an optional maximum but never shrinks. Pointers handed to
//! [`crate::Module`] are byte offsets into this buffer.

use crate::error::{CscalError, Result};
use crate::views::{Float32ArrayLE, Float32ArrayLEMut};
use byteorder::{ByteOrder, LittleEndian as LE};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Size of one page in bytes
pub const PAGE_SIZE: usize = 65_536;

/// Hard upper bound on the number of pages (4 GiB of 32-bit address space)
pub const MAX_PAGES: u32 = 65_536;

/// Page limits for a [`Memory`]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Builder)]
#[builder(setter(into))]
pub struct MemoryConfig {
    /// Pages allocated up front
    #[builder(default = "1")]
    pub initial: u32,
    /// Upper bound for `grow`; `None` means `MAX_PAGES`
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    pub maximum: Option<u32>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            initial: 1,
            maximum: None,
        }
    }
}

impl MemoryConfig {
    /// Check the page limits against each other and against `MAX_PAGES`
    ///
    /// # Errors
    /// `InvalidMemoryConfig` describing the first violated limit
    pub fn validate(&self) -> Result<()> {
        if self.initial > MAX_PAGES {
            return Err(CscalError::invalid_memory_config(format!(
                "initial size {} exceeds {MAX_PAGES} pages",
                self.initial
            )));
        }
        if let Some(maximum) = self.maximum {
            if maximum > MAX_PAGES {
                return Err(CscalError::invalid_memory_config(format!(
                    "maximum size {maximum} exceeds {MAX_PAGES} pages"
                )));
            }
            if self.initial > maximum {
                return Err(CscalError::invalid_memory_config(format!(
                    "initial size {} is larger than maximum size {maximum}",
                    self.initial
                )));
            }
        }
        Ok(())
    }
}

/// Growable linear memory
#[derive(Debug, Clone, PartialEq)]
pub struct Memory {
    bytes: Vec<u8>,
    maximum: Option<u32>,
}

impl Memory {
    /// Allocate `config.initial` zeroed pages
    ///
    /// # Errors
    /// `InvalidMemoryConfig` if the page limits are inconsistent
    pub fn new(config: MemoryConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            initial = config.initial,
            maximum = ?config.maximum,
            "allocating linear memory"
        );
        Ok(Self {
            bytes: vec![0; config.initial as usize * PAGE_SIZE],
            maximum: config.maximum,
        })
    }

    /// Current size in pages
    pub fn pages(&self) -> u32 {
        (self.bytes.len() / PAGE_SIZE) as u32
    }

    pub fn maximum(&self) -> Option<u32> {
        self.maximum
    }

    /// Current size in bytes
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Grow by `delta` zeroed pages and return the previous size in pages
    ///
    /// # Errors
    /// `MemoryLimitExceeded` if the new size would pass the maximum
    pub fn grow(&mut self, delta: u32) -> Result<u32> {
        let previous = self.pages();
        let requested = u64::from(previous) + u64::from(delta);
        let limit = self.maximum.unwrap_or(MAX_PAGES);
        if requested > u64::from(limit) {
            return Err(CscalError::MemoryLimitExceeded {
                requested,
                maximum: limit,
            });
        }
        if delta > 0 {
            self.bytes.resize(requested as usize * PAGE_SIZE, 0);
            debug!(previous, pages = requested, "grew linear memory");
        }
        Ok(previous)
    }

    pub fn buffer(&self) -> &[u8] {
        &self.bytes
    }

    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Read-only `f32` view of `len` floats at byte pointer `ptr`
    ///
    /// # Errors
    /// `OutOfBounds` if the view does not fit in the memory
    pub fn view(&self, ptr: usize, len: usize) -> Result<Float32ArrayLE<'_>> {
        Float32ArrayLE::new(&self.bytes, ptr, len)
    }

    /// Mutable `f32` view of `len` floats at byte pointer `ptr`
    ///
    /// # Errors
    /// `OutOfBounds` if the view does not fit in the memory
    pub fn view_mut(&mut self, ptr: usize, len: usize) -> Result<Float32ArrayLEMut<'_>> {
        Float32ArrayLEMut::new(&mut self.bytes, ptr, len)
    }

    /// Copy `values` into memory at byte pointer `ptr`
    ///
    /// # Errors
    /// `OutOfBounds` if the values do not fit
    pub fn write_f32s(&mut self, ptr: usize, values: &[f32]) -> Result<()> {
        let mut view = self.view_mut(ptr, values.len())?;
        let mut values = values.iter();
        view.fill_with(|| values.next().copied().unwrap_or_default());
        Ok(())
    }

    /// Copy `len` floats out of memory starting at byte pointer `ptr`
    ///
    /// # Errors
    /// `OutOfBounds` if the range does not fit
    pub fn read_f32s(&self, ptr: usize, len: usize) -> Result<Vec<f32>> {
        Ok(self.view(ptr, len)?.to_vec())
    }

    /// Read a single `f32` at byte pointer `ptr`
    ///
    /// # Errors
    /// `OutOfBounds` if the four bytes do not fit
    pub fn read_f32(&self, ptr: usize) -> Result<f32> {
        let end = ptr.checked_add(4).filter(|&end| end <= self.bytes.len());
        match end {
            Some(end) => Ok(LE::read_f32(&self.bytes[ptr..end])),
            None => Err(CscalError::out_of_bounds(
                ptr.saturating_add(4) as i64,
                self.bytes.len(),
            )),
        }
    }
}
