//! In-place FFTW3 transforms bound to complex buffers.
//!
//! A [`Plan`] borrows a buffer (a `Vec`, slice, array, [`AlignedVec`]
//! or `ndarray` array of `Complex<f32>` or `Complex<f64>`), builds the
//! native plan straight away and executes it on demand. Backward plans
//! normalize their output, so a forward transform followed by a
//! backward one gives back the input. The [`shift`] module moves the
//! zero-frequency bin to and from the centre.
//!
//! Multi-threaded planning (`init_threads`) needs FFTW's threads
//! libraries, which only the `system` feature links.
//!
//! ```rust,no_run
//! use efftw::{F2, I2, shift};
//! use ndarray::Array2;
//! use num::complex::Complex64;
//!
//! let mut m = Array2::from_elem((64, 64), Complex64::new(1.0, 0.0));
//! F2::new(&mut m)?.execute();
//! shift::shift_2d(&mut m)?;
//! shift::inv_shift_2d(&mut m)?;
//! I2::new(&mut m)?.execute();
//! # Ok::<(), efftw::Error>(())
//! ```

pub use buffer::{Buffer, Vector};
pub use error::{Error, Result};
pub use mem::AlignedVec;
pub use plan::{Backward, Direction, Forward, OneD, Plan, PlanPair, Planner, Rank, RawPlan,
               Rigor, Sign, TwoD, F1, F2, I1, I2};
pub use traits::FftwComplex;
#[cfg(feature = "system")]
pub use threads::init_threads;

mod buffer;
mod error;
mod mem;
mod plan;
#[cfg(feature = "system")]
mod threads;

pub mod lock;
pub mod shift;
pub mod traits;
pub mod wisdom;
