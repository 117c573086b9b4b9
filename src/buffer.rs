//! What a plan or a shift needs to know about the storage it works on.

use ndarray::{ArrayBase, DataMut, Ix1, Ix2};

use crate::error::{Error, Result};

/// A block of elements laid out as `rows x cols` in row-major order.
///
/// Plans bind to the slice returned by
/// [`as_contiguous_mut`](#tymethod.as_contiguous_mut), so implementors
/// must hand out the same storage for as long as they are borrowed.
pub trait Buffer {
    /// The element type.
    type Elem;

    /// `(rows, cols)`. One dimensional buffers are a single column.
    fn shape(&self) -> (usize, usize);

    /// The contiguous row-major storage, if the buffer has one.
    fn as_contiguous(&self) -> Option<&[Self::Elem]>;

    /// Mutable access to the contiguous row-major storage, if any.
    fn as_contiguous_mut(&mut self) -> Option<&mut [Self::Elem]>;

    /// Total number of elements.
    fn len(&self) -> usize {
        let (rows, cols) = self.shape();
        rows * cols
    }

    /// Whether the buffer holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exchange the `len` elements starting at `a` with the `len`
    /// elements starting at `b`.
    ///
    /// # Panics
    /// If the two ranges overlap or run past the end of the buffer.
    fn swap_segments(&mut self, a: usize, b: usize, len: usize) -> Result<()> {
        let data = self.as_contiguous_mut().ok_or(Error::NonContiguous)?;
        swap_segments(data, a, b, len);
        Ok(())
    }
}

/// A buffer with a single dimension.
pub trait Vector: Buffer {}

/// Swap `data[a..a + len]` with `data[b..b + len]`.
pub(crate) fn swap_segments<T>(data: &mut [T], a: usize, b: usize, len: usize) {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    assert!(lo + len <= hi || len == 0,
            "swap_segments: [{}, {}) overlaps [{}, {})", lo, lo + len, hi, hi + len);
    let (head, tail) = data.split_at_mut(hi);
    head[lo..lo + len].swap_with_slice(&mut tail[..len]);
}

impl<T> Buffer for [T] {
    type Elem = T;

    fn shape(&self) -> (usize, usize) {
        (<[T]>::len(self), 1)
    }
    fn as_contiguous(&self) -> Option<&[T]> {
        Some(self)
    }
    fn as_contiguous_mut(&mut self) -> Option<&mut [T]> {
        Some(self)
    }
}
impl<T> Vector for [T] {}

impl<T> Buffer for Vec<T> {
    type Elem = T;

    fn shape(&self) -> (usize, usize) {
        (Vec::len(self), 1)
    }
    fn as_contiguous(&self) -> Option<&[T]> {
        Some(self.as_slice())
    }
    fn as_contiguous_mut(&mut self) -> Option<&mut [T]> {
        Some(self.as_mut_slice())
    }
}
impl<T> Vector for Vec<T> {}

impl<T, const N: usize> Buffer for [T; N] {
    type Elem = T;

    fn shape(&self) -> (usize, usize) {
        (N, 1)
    }
    fn as_contiguous(&self) -> Option<&[T]> {
        Some(&self[..])
    }
    fn as_contiguous_mut(&mut self) -> Option<&mut [T]> {
        Some(&mut self[..])
    }
}
impl<T, const N: usize> Vector for [T; N] {}

impl<A, S: DataMut<Elem = A>> Buffer for ArrayBase<S, Ix1> {
    type Elem = A;

    fn shape(&self) -> (usize, usize) {
        (self.dim(), 1)
    }
    fn as_contiguous(&self) -> Option<&[A]> {
        self.as_slice()
    }
    fn as_contiguous_mut(&mut self) -> Option<&mut [A]> {
        self.as_slice_mut()
    }
}
impl<A, S: DataMut<Elem = A>> Vector for ArrayBase<S, Ix1> {}

impl<A, S: DataMut<Elem = A>> Buffer for ArrayBase<S, Ix2> {
    type Elem = A;

    fn shape(&self) -> (usize, usize) {
        self.dim()
    }
    fn as_contiguous(&self) -> Option<&[A]> {
        self.as_slice()
    }
    fn as_contiguous_mut(&mut self) -> Option<&mut [A]> {
        self.as_slice_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::Buffer;
    use crate::error::Error;
    use ndarray::{Array1, Array2, ShapeBuilder};

    #[test]
    fn vec_is_a_column() {
        let v = vec![0u8; 7];
        assert_eq!(Buffer::shape(&v), (7, 1));
        assert_eq!(Buffer::len(&v), 7);
        assert!(!Buffer::is_empty(&v));
        assert!(Buffer::is_empty(&Vec::<u8>::new()));
    }

    #[test]
    fn swap_segments_exchanges_ranges() {
        let mut v = vec![0, 1, 2, 3, 4, 5, 6];
        v.swap_segments(5, 1, 2).unwrap();
        assert_eq!(v, [0, 5, 6, 3, 4, 1, 2]);
        v.swap_segments(3, 3, 0).unwrap();
        assert_eq!(v, [0, 5, 6, 3, 4, 1, 2]);
    }

    #[test]
    #[should_panic(expected = "overlaps")]
    fn swap_segments_rejects_overlap() {
        let mut a = [0; 6];
        let _ = a.swap_segments(0, 2, 3);
    }

    #[test]
    fn ndarray_layouts() {
        let a = Array2::<u8>::zeros((3, 4));
        assert_eq!(a.shape(), &[3, 4]);
        assert_eq!(Buffer::shape(&a), (3, 4));
        assert_eq!(a.as_contiguous().map(|s| s.len()), Some(12));

        let mut f = Array2::<u8>::zeros((3, 4).f());
        assert!(f.as_contiguous_mut().is_none());
        assert_eq!(f.swap_segments(0, 4, 2), Err(Error::NonContiguous));

        let mut v = Array1::from(vec![1, 2, 3, 4]);
        assert_eq!(Buffer::shape(&v), (4, 1));
        v.swap_segments(0, 2, 2).unwrap();
        assert_eq!(v.to_vec(), [3, 4, 1, 2]);
    }
}
