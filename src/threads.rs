//! Process-wide thread count for FFTW's planner.
//!
//! The threads libraries (`fftw3_threads`, `fftw3f_threads`) are linked
//! by `build.rs`; the FFTW built from source by `fftw-src` does not ship
//! them, so this module only exists with the `system` feature.

use std::convert::TryFrom;

use libc::c_int;
use log::debug;
use num::complex::{Complex32, Complex64};

use crate::error::{Error, Result};
use crate::lock;
use crate::traits::FftwComplex;

/// Let FFTW use `n` threads for every plan created from now on.
///
/// Sets up FFTW's threading for both precisions first; that failing is
/// fatal and reported as `Error::ThreadInit`. Plans already built keep
/// the thread count they were created with. `n == 0` means one thread.
///
/// ```rust,no_run
/// use efftw::F2;
/// use ndarray::Array2;
/// use num::complex::Complex64;
///
/// efftw::init_threads(4)?;
/// let mut m = Array2::<Complex64>::zeros((4096, 4096));
/// F2::new(&mut m)?.execute();
/// # Ok::<(), efftw::Error>(())
/// ```
pub fn init_threads(n: usize) -> Result<()> {
    let n = c_int::try_from(n.max(1)).map_err(|_| Error::DimensionTooLarge(n))?;
    lock::run(|| {
        init::<Complex64>(n)?;
        init::<Complex32>(n)
    })?;
    debug!("fftw planning with {} threads", n);
    Ok(())
}

fn init<T: FftwComplex>(n: c_int) -> Result<()> {
    unsafe {
        if T::init_threads() == 0 {
            return Err(Error::ThreadInit);
        }
        T::plan_with_nthreads(n);
    }
    Ok(())
}
