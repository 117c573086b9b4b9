//! Memory backing.

use std::alloc::{handle_alloc_error, Layout};
use std::ptr::{self, NonNull};
use std::{fmt, mem, ops, slice};

use fftw_sys as ffi;
use libc::{c_void, size_t};

use crate::buffer::Buffer;
use crate::traits::FftwComplex;

/// A non-resizable, zero-initialised buffer allocated using FFTW's
/// allocator, so that it has the alignment FFTW wants for SIMD.
///
/// This implements `Deref<Target = [T]>` and `DerefMut` and so can be
/// used nearly-interchangeably with slices. It also remembers a
/// `rows x cols` shape, which 2-D plans and shifts use.
///
/// `AlignedVec` is a [`Buffer`] but not a [`Vector`](crate::Vector),
/// since its shape may have several columns. 1-D plans and shifts take
/// the storage through deref instead:
///
/// ```rust,no_run
/// use efftw::{shift, AlignedVec, F1};
/// use num::complex::Complex64;
///
/// let mut v = AlignedVec::<Complex64>::zeros(64);
/// F1::new(&mut *v)?.execute();
/// shift::shift_1d(&mut *v)?;
/// # Ok::<(), efftw::Error>(())
/// ```
pub struct AlignedVec<T: FftwComplex> {
    dat: NonNull<T>,
    rows: usize,
    cols: usize,
}

unsafe impl<T: FftwComplex> Send for AlignedVec<T> {}
unsafe impl<T: FftwComplex> Sync for AlignedVec<T> {}

impl<T: FftwComplex> AlignedVec<T> {
    /// Allocate a column of `n` zeros.
    pub fn zeros(n: usize) -> AlignedVec<T> {
        AlignedVec::zeros_2d(n, 1)
    }

    /// Allocate a `rows x cols` block of zeros.
    ///
    /// # Panics
    /// If the byte size overflows `usize`. Aborts via
    /// `handle_alloc_error` if `fftw_malloc` fails.
    pub fn zeros_2d(rows: usize, cols: usize) -> AlignedVec<T> {
        let len = rows.checked_mul(cols).expect("AlignedVec::zeros_2d: size overflow");
        if len == 0 {
            return AlignedVec { dat: NonNull::dangling(), rows: rows, cols: cols };
        }
        let size = len.checked_mul(mem::size_of::<T>())
                      .expect("AlignedVec::zeros_2d: size overflow");

        let raw = unsafe { ffi::fftw_malloc(size as size_t) } as *mut T;
        let dat = match NonNull::new(raw) {
            Some(p) => p,
            None => handle_alloc_error(Layout::array::<T>(len)
                                           .unwrap_or_else(|_| Layout::new::<T>())),
        };
        for i in 0..len {
            unsafe { ptr::write(dat.as_ptr().add(i), T::zero()) }
        }

        AlignedVec { dat: dat, rows: rows, cols: cols }
    }

    /// Copy `data` into a freshly allocated column.
    pub fn from_slice(data: &[T]) -> AlignedVec<T> {
        let mut v = AlignedVec::zeros(data.len());
        v.copy_from_slice(data);
        v
    }

    /// `(rows, cols)`.
    pub fn dim(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Reinterpret the storage as `rows x cols`.
    ///
    /// Returns `None` if the element count would change.
    pub fn into_shape(self, rows: usize, cols: usize) -> Option<AlignedVec<T>> {
        if rows.checked_mul(cols) != Some(self.rows * self.cols) {
            return None;
        }
        let mut v = self;
        v.rows = rows;
        v.cols = cols;
        Some(v)
    }
}

impl<T: FftwComplex> ops::Deref for AlignedVec<T> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.dat.as_ptr(), self.rows * self.cols) }
    }
}
impl<T: FftwComplex> ops::DerefMut for AlignedVec<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.dat.as_ptr(), self.rows * self.cols) }
    }
}

impl<T: FftwComplex> Drop for AlignedVec<T> {
    fn drop(&mut self) {
        if self.rows * self.cols != 0 {
            unsafe { ffi::fftw_free(self.dat.as_ptr() as *mut c_void) }
        }
    }
}

impl<T: FftwComplex> Clone for AlignedVec<T> {
    fn clone(&self) -> AlignedVec<T> {
        let mut v = AlignedVec::zeros_2d(self.rows, self.cols);
        v.copy_from_slice(self);
        v
    }
}

impl<T: FftwComplex> fmt::Debug for AlignedVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AlignedVec")
         .field("rows", &self.rows)
         .field("cols", &self.cols)
         .field("data", &&**self)
         .finish()
    }
}

impl<T: FftwComplex> Buffer for AlignedVec<T> {
    type Elem = T;

    fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
    fn as_contiguous(&self) -> Option<&[T]> {
        Some(&**self)
    }
    fn as_contiguous_mut(&mut self) -> Option<&mut [T]> {
        Some(&mut **self)
    }
}
