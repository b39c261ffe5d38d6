//! # cscal
//!
//! Single-precision complex vector scaling, the BLAS `CSCAL` routine:
//! `x[i] <- alpha * x[i]` for `N` elements of an interleaved `re, im` buffer,
//! in place, with a stride and a starting offset measured in complex elements.
//!
//! ## Overview
//!
//! - **Direct calls** on slices: [`cscal`] (offset implied by the stride),
//!   [`cscal_ndarray`] (explicit offset), [`scale_complex`] and [`scale_view`]
//! - **Pointer calls** through a [`Module`] bound to a little-endian linear
//!   [`Memory`], for callers that lay data out by byte offset
//! - One numeric core, [`kernel::scale_strided`], behind every entry point
//!
//! Arguments are validated against the buffer before anything is written. A
//! request that would step outside the buffer returns [`CscalError`] and leaves
//! the data untouched.
//!
//! ## Quick Start
//!
//! ```rust
//! use cscal::{Complex32, cscal_ndarray};
//!
//! // x = [(1, 0), (0, 1)]
//! let mut x = vec![1.0f32, 0.0, 0.0, 1.0];
//! cscal_ndarray(2, Complex32::new(2.0, 3.0), &mut x, 1, 0)?;
//! assert_eq!(x, vec![2.0, 3.0, -3.0, 2.0]);
//! # Ok::<(), cscal::CscalError>(())
//! ```
//!
//! ## Linear memory
//!
//! ```rust
//! use cscal::{DataType, Memory, MemoryConfigBuilder, Module};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MemoryConfigBuilder::default()
//!     .initial(10u32)
//!     .maximum(100u32)
//!     .build()?;
//! let mut module = Module::new(Memory::new(config)?);
//! module.initialize()?;
//!
//! let n = 3;
//! let x_ptr = 0;
//! let z_ptr = DataType::Complex64.byte_offset(n);
//! module.memory_mut().write_f32s(x_ptr, &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0])?;
//! module.memory_mut().write_f32s(z_ptr, &[0.0, 1.0])?;
//!
//! module.ndarray(n, z_ptr, x_ptr, 1, 0)?;
//! println!("x[:] = [{}]", module.memory().view(x_ptr, n * 2)?);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub use buffer::{ComplexBuffer, as_complex, as_complex_mut};
pub use dtype::DataType;
pub use error::{CscalError, Result};
pub use kernel::{cscal, cscal_ndarray, scale_complex, scale_strided, scale_view, stride_offset};
pub use memory::{MAX_PAGES, Memory, MemoryConfig, MemoryConfigBuilder, PAGE_SIZE};
pub use module::Module;
pub use num_complex::Complex32;
pub use views::{Float32ArrayLE, Float32ArrayLEMut};

pub mod buffer;
pub mod dtype;
pub mod error;
pub mod kernel;
pub mod memory;
pub mod module;
pub mod views;
