//! fftshift / ifftshift: move the zero-frequency bin between the start
//! and the middle of a buffer.

use crate::buffer::{swap_segments, Buffer, Vector};
use crate::error::{Error, Result};

/// Length of the half that moves to the front.
#[inline]
fn split(n: usize) -> usize {
    (n + 1) / 2
}

fn contiguous_mut<B: Buffer + ?Sized>(data: &mut B) -> Result<&mut [B::Elem]> {
    data.as_contiguous_mut().ok_or(Error::NonContiguous)
}

/// Rotate a 1-D buffer so that its trailing `ceil(n/2)` elements come
/// first, followed by the leading `floor(n/2)`.
///
/// `[1, 2, 3, 4, 5]` becomes `[3, 4, 5, 1, 2]`. For even lengths this
/// is its own inverse; [`inv_shift_1d`] undoes it for every length.
pub fn shift_1d<B: Vector + ?Sized>(data: &mut B) -> Result<()> {
    let s = contiguous_mut(data)?;
    let k = split(s.len());
    s.rotate_right(k);
    Ok(())
}

/// Undo [`shift_1d`]: the leading `ceil(n/2)` elements move to the back.
///
/// Identical to `shift_1d` for even lengths.
pub fn inv_shift_1d<B: Vector + ?Sized>(data: &mut B) -> Result<()> {
    let s = contiguous_mut(data)?;
    let k = split(s.len());
    s.rotate_left(k);
    Ok(())
}

fn even_halves<B: Buffer + ?Sized>(data: &B) -> Result<(usize, usize, usize)> {
    let (rows, cols) = data.shape();
    if rows % 2 != 0 || cols % 2 != 0 {
        return Err(Error::OddShape { rows: rows, cols: cols });
    }
    Ok((rows / 2, cols / 2, cols))
}

/// Exchange the `h x w` block at `(r0, c0)` with the one at `(r1, c1)`
/// in a row-major matrix `stride` elements wide.
fn swap_blocks<T>(s: &mut [T], stride: usize, (h, w): (usize, usize),
                  (r0, c0): (usize, usize), (r1, c1): (usize, usize)) {
    for r in 0..h {
        swap_segments(s, (r0 + r) * stride + c0, (r1 + r) * stride + c1, w);
    }
}

/// Swap diagonally opposite quadrants of a 2-D buffer: top-left with
/// bottom-right, then top-right with bottom-left.
///
/// Both extents must be even; otherwise `Error::OddShape` is returned
/// and the buffer is left untouched.
pub fn shift_2d<B: Buffer + ?Sized>(data: &mut B) -> Result<()> {
    let (h, w, stride) = even_halves(data)?;
    let s = contiguous_mut(data)?;
    swap_blocks(s, stride, (h, w), (0, 0), (h, w));
    swap_blocks(s, stride, (h, w), (0, w), (h, 0));
    Ok(())
}

/// The inverse of [`shift_2d`]. The swaps run in the mirrored order,
/// which gives the same result since each swap undoes itself.
pub fn inv_shift_2d<B: Buffer + ?Sized>(data: &mut B) -> Result<()> {
    let (h, w, stride) = even_halves(data)?;
    let s = contiguous_mut(data)?;
    swap_blocks(s, stride, (h, w), (h, w), (0, 0));
    swap_blocks(s, stride, (h, w), (h, 0), (0, w));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array1, Array2, ShapeBuilder};
    use num::complex::Complex64;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn shift_1d_odd() {
        let mut v: Vec<_> = (1..6).map(|x| c(x as f64)).collect();
        shift_1d(&mut v).unwrap();
        let expect: Vec<_> = [3, 4, 5, 1, 2].iter().map(|&x| c(x as f64)).collect();
        assert_eq!(v, expect);
    }

    #[test]
    fn shift_1d_even() {
        let mut v = [0, 1, 2, 3, 4, 5];
        shift_1d(&mut v).unwrap();
        assert_eq!(v, [3, 4, 5, 0, 1, 2]);
        inv_shift_1d(&mut v).unwrap();
        assert_eq!(v, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn even_shift_is_self_inverse() {
        for n in (0..20).step_by(2) {
            let orig: Vec<usize> = (0..n).collect();
            let mut a = orig.clone();
            shift_1d(&mut a).unwrap();
            shift_1d(&mut a).unwrap();
            assert_eq!(a, orig);
        }
    }

    #[test]
    fn round_trip_any_length() {
        for n in 0..17 {
            let orig: Vec<usize> = (0..n).collect();
            let mut a = orig.clone();
            shift_1d(&mut a).unwrap();
            inv_shift_1d(&mut a).unwrap();
            assert_eq!(a, orig, "length {}", n);
        }
    }

    #[test]
    fn odd_inverse_differs() {
        let mut a = vec![1, 2, 3, 4, 5];
        inv_shift_1d(&mut a).unwrap();
        assert_eq!(a, [4, 5, 1, 2, 3]);
    }

    #[test]
    fn empty_is_noop() {
        let mut v: Vec<i32> = vec![];
        shift_1d(&mut v).unwrap();
        inv_shift_1d(&mut v[..]).unwrap();
        let mut m = Array2::<i32>::zeros((0, 0));
        shift_2d(&mut m).unwrap();
        inv_shift_2d(&mut m).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn quadrants_swap() {
        // A B
        // C D
        let mut m = arr2(&[[1, 1, 2, 2],
                           [1, 1, 2, 2],
                           [3, 3, 4, 4],
                           [3, 3, 4, 4]]);
        shift_2d(&mut m).unwrap();
        assert_eq!(m, arr2(&[[4, 4, 3, 3],
                             [4, 4, 3, 3],
                             [2, 2, 1, 1],
                             [2, 2, 1, 1]]));
        inv_shift_2d(&mut m).unwrap();
        assert_eq!(m[[0, 0]], 1);
        assert_eq!(m[[3, 3]], 4);
    }

    #[test]
    fn rectangular_round_trip() {
        let orig = Array2::from_shape_fn((4, 6), |(r, c)| r * 10 + c);
        let mut m = orig.clone();
        shift_2d(&mut m).unwrap();
        assert_eq!(m[[0, 0]], 23);
        assert_eq!(m[[0, 3]], 20);
        assert_eq!(m[[2, 0]], 3);
        inv_shift_2d(&mut m).unwrap();
        assert_eq!(m, orig);
    }

    #[test]
    fn odd_2d_is_rejected_untouched() {
        for &(r, c) in &[(3, 4), (4, 3), (5, 5)] {
            let orig = Array2::from_shape_fn((r, c), |(i, j)| i * c + j);
            let mut m = orig.clone();
            assert_eq!(shift_2d(&mut m), Err(Error::OddShape { rows: r, cols: c }));
            assert_eq!(inv_shift_2d(&mut m), Err(Error::OddShape { rows: r, cols: c }));
            assert_eq!(m, orig);
        }
        // vectors are a single column
        let mut v = vec![0; 4];
        assert_eq!(shift_2d(&mut v), Err(Error::OddShape { rows: 4, cols: 1 }));
    }

    #[test]
    fn non_contiguous() {
        let mut m = Array2::<i32>::zeros((4, 4).f());
        assert_eq!(shift_2d(&mut m), Err(Error::NonContiguous));
        let mut base = Array1::from(vec![1, 2, 3, 4, 5, 6]);
        let mut strided = base.slice_mut(ndarray::s![..;2]);
        assert_eq!(shift_1d(&mut strided), Err(Error::NonContiguous));
    }
}
