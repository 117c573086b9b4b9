//! Element types FFTW can transform in place.

use std::fmt::Debug;

use fftw_sys as ffi;
use libc::{c_char, c_int, c_uint};
use num::{Complex, Float};

/// Stops `FftwComplex` from being implemented outside this crate,
/// because the raw pointers handed to FFTW must match its ABI exactly.
#[doc(hidden)]
pub struct Secret(());

/// A complex element with a matching family of FFTW entry points.
///
/// `Complex<f64>` (16 bytes) dispatches to the `fftw_*` functions and
/// `Complex<f32>` (8 bytes) to the `fftwf_*` ones. `num::Complex` is
/// `repr(C)`, so a `[Complex<T>]` is exactly FFTW's interleaved
/// `[re, im]` layout.
pub trait FftwComplex: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// The floating point type of each component.
    type Real: Float + Debug;
    /// The native plan handle for this precision.
    #[doc(hidden)]
    type Handle: Copy;

    /// Name used in log messages.
    const PRECISION: &'static str;
    /// Where `fftw_import_system_wisdom` reads from for this precision.
    const SYSTEM_WISDOM: &'static str;

    /// The additive identity.
    fn zero() -> Self;

    /// Divide by an element count.
    fn normalized(self, count: usize) -> Self;

    #[doc(hidden)]
    unsafe fn plan_1d(n: c_int, data: *mut Self, sign: c_int, flags: c_uint) -> Self::Handle;
    #[doc(hidden)]
    unsafe fn plan_2d(n0: c_int, n1: c_int, data: *mut Self, sign: c_int, flags: c_uint)
                      -> Self::Handle;
    #[doc(hidden)]
    fn is_null(plan: Self::Handle) -> bool;
    #[doc(hidden)]
    unsafe fn execute(plan: Self::Handle);
    #[doc(hidden)]
    unsafe fn destroy(plan: Self::Handle);
    #[doc(hidden)]
    unsafe fn print(plan: Self::Handle);

    #[cfg(feature = "system")]
    #[doc(hidden)]
    unsafe fn init_threads() -> c_int;
    #[cfg(feature = "system")]
    #[doc(hidden)]
    unsafe fn plan_with_nthreads(n: c_int);

    #[doc(hidden)]
    unsafe fn import_system_wisdom() -> c_int;
    #[doc(hidden)]
    unsafe fn import_wisdom_from_filename(path: *const c_char) -> c_int;
    #[doc(hidden)]
    unsafe fn export_wisdom_to_filename(path: *const c_char) -> c_int;

    #[doc(hidden)]
    fn secret() -> Secret;
}

macro_rules! impls {
    ($($real: ty, $name: expr, $wisdom: expr => $handle: ty {
        $plan_1d: ident, $plan_2d: ident, $execute: ident, $destroy: ident, $print: ident,
        $init_threads: ident, $nthreads: ident,
        $system_wisdom: ident, $import: ident, $export: ident
    });*) => {
        $(impl FftwComplex for Complex<$real> {
            type Real = $real;
            type Handle = $handle;

            const PRECISION: &'static str = $name;
            const SYSTEM_WISDOM: &'static str = $wisdom;

            #[inline]
            fn zero() -> Self {
                Complex::new(0.0, 0.0)
            }

            #[inline]
            fn normalized(self, count: usize) -> Self {
                Complex::unscale(&self, count as $real)
            }

            unsafe fn plan_1d(n: c_int, data: *mut Self, sign: c_int, flags: c_uint) -> $handle {
                ffi::$plan_1d(n, data as *mut _, data as *mut _, sign, flags)
            }
            unsafe fn plan_2d(n0: c_int, n1: c_int, data: *mut Self, sign: c_int, flags: c_uint)
                              -> $handle {
                ffi::$plan_2d(n0, n1, data as *mut _, data as *mut _, sign, flags)
            }
            fn is_null(plan: $handle) -> bool {
                plan.is_null()
            }
            unsafe fn execute(plan: $handle) {
                ffi::$execute(plan)
            }
            unsafe fn destroy(plan: $handle) {
                ffi::$destroy(plan)
            }
            unsafe fn print(plan: $handle) {
                ffi::$print(plan)
            }

            #[cfg(feature = "system")]
            unsafe fn init_threads() -> c_int {
                ffi::$init_threads()
            }
            #[cfg(feature = "system")]
            unsafe fn plan_with_nthreads(n: c_int) {
                ffi::$nthreads(n)
            }

            unsafe fn import_system_wisdom() -> c_int {
                ffi::$system_wisdom()
            }
            unsafe fn import_wisdom_from_filename(path: *const c_char) -> c_int {
                ffi::$import(path)
            }
            unsafe fn export_wisdom_to_filename(path: *const c_char) -> c_int {
                ffi::$export(path)
            }

            fn secret() -> Secret { Secret(()) }
        })*
    }
}

impls! {
    f64, "double", "/etc/fftw/wisdom" => ffi::fftw_plan {
        fftw_plan_dft_1d, fftw_plan_dft_2d, fftw_execute, fftw_destroy_plan, fftw_print_plan,
        fftw_init_threads, fftw_plan_with_nthreads,
        fftw_import_system_wisdom, fftw_import_wisdom_from_filename,
        fftw_export_wisdom_to_filename
    };
    f32, "single", "/etc/fftw/wisdomf" => ffi::fftwf_plan {
        fftwf_plan_dft_1d, fftwf_plan_dft_2d, fftwf_execute, fftwf_destroy_plan, fftwf_print_plan,
        fftwf_init_threads, fftwf_plan_with_nthreads,
        fftwf_import_system_wisdom, fftwf_import_wisdom_from_filename,
        fftwf_export_wisdom_to_filename
    }
}
