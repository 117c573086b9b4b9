use std::path::PathBuf;

use thiserror::Error;

use crate::plan::Sign;

/// All the ways building plans, shifting buffers and handling wisdom
/// can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// `fftw_init_threads` (or its single precision twin) returned zero.
    #[error("fftw_init_threads() failed")]
    ThreadInit,
    /// The library returned a null plan.
    #[error("fftw could not plan a {sign:?} transform of shape {}x{}", .shape.0, .shape.1)]
    Planning { sign: Sign, shape: (usize, usize) },
    /// There is nothing to transform.
    #[error("cannot plan a transform over an empty buffer")]
    EmptyBuffer,
    /// The buffer is not a single contiguous row-major slice.
    #[error("buffer storage is not contiguous in row-major order")]
    NonContiguous,
    /// An extent does not fit into the C `int` the planner takes.
    #[error("dimension {0} is too large for fftw")]
    DimensionTooLarge(usize),
    /// 2-D shifts only work on even extents.
    #[error("2-D shift requires even sized inputs, got {rows}x{cols}")]
    OddShape { rows: usize, cols: usize },
    /// Importing or exporting wisdom failed.
    #[error("fftw wisdom transfer failed for {}", .path.display())]
    Wisdom { path: PathBuf },
    /// The path cannot be handed to the C library.
    #[error("path {} cannot be passed to fftw", .0.display())]
    InvalidPath(PathBuf),
}

/// A `Result` alias for everything in this crate.
pub type Result<T> = std::result::Result<T, Error>;
