use std::convert::TryFrom;
use std::fmt;
use std::marker::PhantomData;

use libc::{c_int, c_uint};
use log::{debug, trace};

use crate::buffer::{Buffer, Vector};
use crate::error::{Error, Result};
use crate::lock;
use crate::traits::FftwComplex;

/// A thin wrapper around the native FFTW plan type. Prefer `Plan` if
/// possible.
///
/// Owns the handle: it is destroyed exactly once, when this is dropped.
pub struct RawPlan<T: FftwComplex> {
    plan: T::Handle,
}

// Executing a plan is thread-safe in FFTW, and destruction goes
// through the planner lock.
unsafe impl<T: FftwComplex> Send for RawPlan<T> {}

impl<T: FftwComplex> RawPlan<T> {
    /// Create a `RawPlan` from the output of `f`.
    ///
    /// This executes `f` inside a lock since FFTW plan creation is
    /// not threadsafe. Returns `None` if FFTW produced a null plan.
    pub fn new<F: FnOnce() -> T::Handle>(f: F) -> Option<RawPlan<T>> {
        let plan = lock::run(f);

        if T::is_null(plan) {
            None
        } else {
            Some(RawPlan { plan: plan })
        }
    }

    /// Print information about the plan to stdout.
    pub fn debug_print(&self) {
        unsafe { T::print(self.plan) }
    }

    /// Execute the plan.
    ///
    /// # Safety
    /// The arrays the plan was created with must still be alive, at the
    /// same address and with the same size.
    pub unsafe fn execute(&mut self) {
        T::execute(self.plan)
    }
}

impl<T: FftwComplex> Drop for RawPlan<T> {
    fn drop(&mut self) {
        let plan = self.plan;
        lock::run(|| unsafe { T::destroy(plan) })
    }
}

impl<T: FftwComplex> fmt::Debug for RawPlan<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RawPlan<{}>", T::PRECISION)
    }
}

// Values from fftw3.h.
const FFTW_FORWARD: c_int = -1;
const FFTW_BACKWARD: c_int = 1;
const FFTW_MEASURE: c_uint = 0;
const FFTW_EXHAUSTIVE: c_uint = 1 << 3;
const FFTW_PATIENT: c_uint = 1 << 5;
const FFTW_ESTIMATE: c_uint = 1 << 6;
const FFTW_WISDOM_ONLY: c_uint = 1 << 21;

/// How much effort FFTW should put into computing the best strategy
/// to use.
///
/// Anything above `Estimate` runs trial transforms and so overwrites
/// the buffer while planning: fill it after the plan has been built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum Rigor {
    #[default]
    Estimate,
    Measure,
    Patient,
    Exhaustive,
}
impl Rigor {
    fn flags(self) -> c_uint {
        match self {
            Rigor::Estimate => FFTW_ESTIMATE,
            Rigor::Measure => FFTW_MEASURE,
            Rigor::Patient => FFTW_PATIENT,
            Rigor::Exhaustive => FFTW_EXHAUSTIVE,
        }
    }
}

/// Runtime view of a transform direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Sign {
    Forward,
    Backward,
}
impl Sign {
    fn as_fftw(self) -> c_int {
        match self {
            Sign::Forward => FFTW_FORWARD,
            Sign::Backward => FFTW_BACKWARD,
        }
    }
}

/// Type level transform direction, see [`Forward`] and [`Backward`].
pub trait Direction {
    /// The matching runtime value.
    const SIGN: Sign;
    /// Whether results are divided by the element count after execution.
    const NORMALIZE: bool;
}

/// Frequency analysis. The output is unnormalized.
#[derive(Debug, Clone, Copy)]
pub enum Forward {}
/// Synthesis. The output is divided by the number of elements, so
/// forward followed by backward is the identity.
#[derive(Debug, Clone, Copy)]
pub enum Backward {}

impl Direction for Forward {
    const SIGN: Sign = Sign::Forward;
    const NORMALIZE: bool = false;
}
impl Direction for Backward {
    const SIGN: Sign = Sign::Backward;
    const NORMALIZE: bool = true;
}

/// Type level dimensionality, see [`OneD`] and [`TwoD`].
pub trait Rank {
    #[doc(hidden)]
    unsafe fn plan<T: FftwComplex>(rows: c_int, cols: c_int, data: *mut T,
                                   sign: c_int, flags: c_uint) -> T::Handle;
}

/// Transform a vector of `rows` elements.
#[derive(Debug, Clone, Copy)]
pub enum OneD {}
/// Transform a `rows x cols` row-major matrix.
#[derive(Debug, Clone, Copy)]
pub enum TwoD {}

impl Rank for OneD {
    unsafe fn plan<T: FftwComplex>(rows: c_int, _cols: c_int, data: *mut T,
                                   sign: c_int, flags: c_uint) -> T::Handle {
        T::plan_1d(rows, data, sign, flags)
    }
}
impl Rank for TwoD {
    unsafe fn plan<T: FftwComplex>(rows: c_int, cols: c_int, data: *mut T,
                                   sign: c_int, flags: c_uint) -> T::Handle {
        T::plan_2d(rows, cols, data, sign, flags)
    }
}

/// Control the basic properties of a set of transforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct Planner {
    rigor: Rigor,
    wisdom_restriction: bool,
}

impl Planner {
    /// Construct a new planner with default values.
    ///
    /// This defaults to estimate rigor, with no wisdom restriction.
    pub fn new() -> Planner {
        Planner::default()
    }

    /// Set the rigor to use for this plan.
    pub fn rigor(mut self, r: Rigor) -> Planner {
        self.rigor = r;
        self
    }

    /// Set whether the planner should only be successfully created if
    /// there exists wisdom created with at least the rigor level set.
    pub fn wisdom_restriction(mut self, wisdom_only: bool) -> Planner {
        self.wisdom_restriction = wisdom_only;
        self
    }

    fn flags(&self) -> c_uint {
        self.rigor.flags() | if self.wisdom_restriction {
            FFTW_WISDOM_ONLY
        } else {
            0
        }
    }

    /// Build the native plan for an in-place transform over `data`.
    fn raw<T: FftwComplex, R: Rank>(&self, data: &mut [T], shape: (usize, usize), sign: Sign)
                                    -> Result<RawPlan<T>> {
        if data.is_empty() {
            return Err(Error::EmptyBuffer);
        }
        debug_assert_eq!(data.len(), shape.0 * shape.1);

        let rows = c_int::try_from(shape.0).map_err(|_| Error::DimensionTooLarge(shape.0))?;
        let cols = c_int::try_from(shape.1).map_err(|_| Error::DimensionTooLarge(shape.1))?;
        let ptr = data.as_mut_ptr();
        let flags = self.flags();

        let plan = RawPlan::<T>::new(|| unsafe { R::plan(rows, cols, ptr, sign.as_fftw(), flags) })
            .ok_or(Error::Planning { sign: sign, shape: shape })?;
        debug!("planned {}x{} {:?} {} precision transform ({:?})",
               shape.0, shape.1, sign, T::PRECISION, self.rigor);
        Ok(plan)
    }
}

fn contiguous<B>(buf: &mut B) -> Result<(&mut [B::Elem], (usize, usize))>
    where B: Buffer + ?Sized
{
    let shape = buf.shape();
    let data = buf.as_contiguous_mut().ok_or(Error::NonContiguous)?;
    Ok((data, shape))
}

fn normalize<T: FftwComplex>(data: &mut [T]) {
    let n = data.len();
    for x in data.iter_mut() {
        *x = x.normalized(n);
    }
}

/// An in-place transform bound to a buffer.
///
/// The plan is built eagerly from the buffer's address and shape, and
/// keeps the buffer mutably borrowed for as long as it lives, so the
/// storage cannot be moved or resized under it. Plans are move-only:
/// the native handle has a single owner and is destroyed on drop.
///
/// Use the aliases [`F1`], [`I1`], [`F2`] and [`I2`] to pick the rank
/// and direction.
pub struct Plan<'a, T: FftwComplex, R: Rank, D: Direction> {
    raw: RawPlan<T>,
    data: &'a mut [T],
    shape: (usize, usize),
    _marker: PhantomData<(R, D)>,
}

/// Forward 1-D transform.
pub type F1<'a, T> = Plan<'a, T, OneD, Forward>;
/// Normalized backward 1-D transform.
pub type I1<'a, T> = Plan<'a, T, OneD, Backward>;
/// Forward 2-D transform.
pub type F2<'a, T> = Plan<'a, T, TwoD, Forward>;
/// Normalized backward 2-D transform.
pub type I2<'a, T> = Plan<'a, T, TwoD, Backward>;

impl<'a, T: FftwComplex, D: Direction> Plan<'a, T, OneD, D> {
    /// Plan a 1-D transform over `buf` with the default planner.
    pub fn new<B>(buf: &'a mut B) -> Result<Self>
        where B: Vector<Elem = T> + ?Sized
    {
        Self::with_planner(buf, &Planner::new())
    }

    /// Plan a 1-D transform over `buf`.
    pub fn with_planner<B>(buf: &'a mut B, planner: &Planner) -> Result<Self>
        where B: Vector<Elem = T> + ?Sized
    {
        Self::bind(buf, planner)
    }
}

impl<'a, T: FftwComplex, D: Direction> Plan<'a, T, TwoD, D> {
    /// Plan a 2-D transform over `buf` with the default planner.
    pub fn new<B>(buf: &'a mut B) -> Result<Self>
        where B: Buffer<Elem = T> + ?Sized
    {
        Self::with_planner(buf, &Planner::new())
    }

    /// Plan a 2-D transform over `buf`.
    pub fn with_planner<B>(buf: &'a mut B, planner: &Planner) -> Result<Self>
        where B: Buffer<Elem = T> + ?Sized
    {
        Self::bind(buf, planner)
    }
}

impl<'a, T: FftwComplex, R: Rank, D: Direction> Plan<'a, T, R, D> {
    fn bind<B>(buf: &'a mut B, planner: &Planner) -> Result<Self>
        where B: Buffer<Elem = T> + ?Sized
    {
        let (data, shape) = contiguous(buf)?;
        let raw = planner.raw::<T, R>(data, shape, D::SIGN)?;
        Ok(Plan { raw: raw, data: data, shape: shape, _marker: PhantomData })
    }

    /// Execute the plan on the buffer's current contents, in place.
    ///
    /// Backward plans divide every element by the element count
    /// afterwards. Returns the transformed data.
    pub fn execute(&mut self) -> &mut [T] {
        trace!("executing {:?} transform of shape {:?}", D::SIGN, self.shape);
        unsafe {
            self.raw.execute();
        }
        if D::NORMALIZE {
            normalize(&mut *self.data);
        }
        &mut *self.data
    }

    /// The bound data.
    pub fn data(&self) -> &[T] {
        &*self.data
    }

    /// Mutable access to the bound data, usually to load new input
    /// before [executing](#method.execute) again.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut *self.data
    }

    /// `(rows, cols)` of the bound buffer.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Number of elements transformed.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`: empty buffers cannot be planned.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The direction of this plan.
    pub fn sign(&self) -> Sign {
        D::SIGN
    }

    /// Debug printing of the plan
    pub fn debug_print(&self) {
        self.raw.debug_print()
    }
}

impl<'a, T: FftwComplex, R: Rank, D: Direction> Drop for Plan<'a, T, R, D> {
    fn drop(&mut self) {
        debug!("destroying {:?} plan of shape {:?}", D::SIGN, self.shape);
    }
}

impl<'a, T: FftwComplex, R: Rank, D: Direction> fmt::Debug for Plan<'a, T, R, D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Plan")
         .field("raw", &self.raw)
         .field("sign", &D::SIGN)
         .field("shape", &self.shape)
         .finish()
    }
}

/// A forward and a backward transform bound to the same buffer.
///
/// Separate [`Plan`]s cannot share a buffer because each holds it
/// mutably borrowed; this holds both native plans over one borrow.
pub struct PlanPair<'a, T: FftwComplex, R: Rank> {
    forward: RawPlan<T>,
    backward: RawPlan<T>,
    data: &'a mut [T],
    shape: (usize, usize),
    _marker: PhantomData<R>,
}

impl<'a, T: FftwComplex> PlanPair<'a, T, OneD> {
    /// Plan both 1-D transforms over `buf`.
    pub fn new<B>(buf: &'a mut B, planner: &Planner) -> Result<Self>
        where B: Vector<Elem = T> + ?Sized
    {
        Self::bind(buf, planner)
    }
}

impl<'a, T: FftwComplex> PlanPair<'a, T, TwoD> {
    /// Plan both 2-D transforms over `buf`.
    pub fn new<B>(buf: &'a mut B, planner: &Planner) -> Result<Self>
        where B: Buffer<Elem = T> + ?Sized
    {
        Self::bind(buf, planner)
    }
}

impl<'a, T: FftwComplex, R: Rank> PlanPair<'a, T, R> {
    fn bind<B>(buf: &'a mut B, planner: &Planner) -> Result<Self>
        where B: Buffer<Elem = T> + ?Sized
    {
        let (data, shape) = contiguous(buf)?;
        let forward = planner.raw::<T, R>(data, shape, Sign::Forward)?;
        let backward = planner.raw::<T, R>(data, shape, Sign::Backward)?;
        Ok(PlanPair {
            forward: forward,
            backward: backward,
            data: data,
            shape: shape,
            _marker: PhantomData,
        })
    }

    /// Run the forward transform in place.
    pub fn forward(&mut self) -> &mut [T] {
        trace!("executing forward half of pair, shape {:?}", self.shape);
        unsafe {
            self.forward.execute();
        }
        &mut *self.data
    }

    /// Run the backward transform in place and normalize.
    pub fn backward(&mut self) -> &mut [T] {
        trace!("executing backward half of pair, shape {:?}", self.shape);
        unsafe {
            self.backward.execute();
        }
        normalize(&mut *self.data);
        &mut *self.data
    }

    /// The bound data.
    pub fn data(&self) -> &[T] {
        &*self.data
    }

    /// Mutable access to the bound data.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut *self.data
    }

    /// `(rows, cols)` of the bound buffer.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::complex::Complex64;

    #[test]
    fn default_planner_estimates() {
        let p = Planner::new();
        assert_eq!(p.flags(), 64);
        assert_eq!(p.rigor(Rigor::Measure).flags(), 0);
        let p = p.rigor(Rigor::Patient).wisdom_restriction(true);
        assert_eq!(p.flags(), (1 << 5) | (1 << 21));
    }

    #[test]
    fn signs() {
        assert_eq!(Sign::Forward.as_fftw(), -1);
        assert_eq!(Sign::Backward.as_fftw(), 1);
        assert!(!<Forward as Direction>::NORMALIZE);
        assert!(<Backward as Direction>::NORMALIZE);
    }

    #[test]
    fn normalize_divides_by_len() {
        let mut v = vec![Complex64::new(4.0, 8.0); 4];
        normalize(&mut v);
        assert!(v.iter().all(|x| *x == Complex64::new(1.0, 2.0)));
    }

    #[test]
    fn empty_buffer_is_rejected() {
        let mut v: Vec<Complex64> = vec![];
        assert_eq!(F1::new(&mut v).err(), Some(Error::EmptyBuffer));
    }
}
