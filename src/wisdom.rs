//! Save and restore FFTW's accumulated planning knowledge ("wisdom").
//!
//! Wisdom is kept separately for each precision, so every function
//! here is generic over the element type whose planner it talks to.

use std::ffi::CString;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::lock;
use crate::traits::FftwComplex;

/// Import and export FFTW wisdom implicitly.
///
/// The destructor will save wisdom to the file from which it was
/// loaded.
///
/// # Example
///
/// ```rust,no_run
/// use efftw::wisdom::WisdomGuard;
/// use num::complex::Complex64;
///
/// {
///     let _guard = WisdomGuard::<Complex64>::import("./wise.fftw");
///     // ... plan with the assistance of that wisdom
/// } // any new wisdom is automatically saved.
/// ```
pub struct WisdomGuard<T: FftwComplex> {
    p: PathBuf,
    _marker: PhantomData<T>,
}
impl<T: FftwComplex> WisdomGuard<T> {
    /// Load wisdom from `p`, and save it automatically on clean-up.
    ///
    /// Failure to load is only logged, so one can supply a wisdom file
    /// that does not exist (yet) and it will be created on drop.
    pub fn import<P: AsRef<Path>>(p: P) -> WisdomGuard<T> {
        let p = p.as_ref();
        if let Err(e) = import_from_file::<T>(p) {
            warn!("{}", e);
        }
        WisdomGuard { p: p.to_path_buf(), _marker: PhantomData }
    }

    /// The file wisdom is exported to on drop.
    pub fn path(&self) -> &Path {
        &self.p
    }
}
impl<T: FftwComplex> Drop for WisdomGuard<T> {
    fn drop(&mut self) {
        if let Err(e) = export_to_file::<T>(&self.p) {
            warn!("{}", e);
        }
    }
}

fn native_file_name(p: &Path) -> Result<CString> {
    let s = p.to_str().ok_or_else(|| Error::InvalidPath(p.to_path_buf()))?;
    CString::new(s).map_err(|_| Error::InvalidPath(p.to_path_buf()))
}

fn check(ok: bool, p: &Path) -> Result<()> {
    if ok {
        debug!("transferred {} wisdom", p.display());
        Ok(())
    } else {
        Err(Error::Wisdom { path: p.to_path_buf() })
    }
}

/// Attempt to load the system's wisdom (`/etc/fftw/wisdom` for double
/// precision, `/etc/fftw/wisdomf` for single).
pub fn import_from_system<T: FftwComplex>() -> Result<()> {
    let ok = lock::run(|| unsafe { T::import_system_wisdom() != 0 });
    check(ok, Path::new(T::SYSTEM_WISDOM))
}

/// Attempt to save wisdom to `p`.
pub fn export_to_file<T: FftwComplex>(p: &Path) -> Result<()> {
    let name = native_file_name(p)?;
    let ok = lock::run(|| unsafe { T::export_wisdom_to_filename(name.as_ptr()) != 0 });
    check(ok, p)
}

/// Attempt to load wisdom from `p`.
pub fn import_from_file<T: FftwComplex>(p: &Path) -> Result<()> {
    let name = native_file_name(p)?;
    let ok = lock::run(|| unsafe { T::import_wisdom_from_filename(name.as_ptr()) != 0 });
    check(ok, p)
}
