extern crate efftw;
extern crate ndarray;
extern crate num;

use efftw::shift::{inv_shift_1d, inv_shift_2d, shift_1d, shift_2d};
use efftw::{AlignedVec, Error, F1, F2};
use ndarray::Array2;
use num::complex::Complex64;

fn c(re: f64) -> Complex64 {
    Complex64::new(re, 0.0)
}

#[test]
fn dc_moves_to_centre_1d() {
    let mut buf = vec![c(1.0); 8];
    F1::new(&mut buf).unwrap().execute();
    shift_1d(&mut buf).unwrap();
    assert!((buf[4] - c(8.0)).norm() < 1e-12);
    inv_shift_1d(&mut buf).unwrap();
    assert!((buf[0] - c(8.0)).norm() < 1e-12);
}

#[test]
fn dc_moves_to_centre_2d() {
    let mut m = Array2::from_elem((6, 4), c(1.0));
    F2::new(&mut m).unwrap().execute();
    shift_2d(&mut m).unwrap();
    assert!((m[[3, 2]] - c(24.0)).norm() < 1e-12);
    let peak = m.iter().filter(|x| x.norm() > 1e-9).count();
    assert_eq!(peak, 1);
    inv_shift_2d(&mut m).unwrap();
    assert!((m[[0, 0]] - c(24.0)).norm() < 1e-12);
}

#[test]
fn five_element_scenario() {
    let mut v: Vec<_> = (1..6).map(|x| c(x as f64)).collect();
    shift_1d(&mut v).unwrap();
    let re: Vec<f64> = v.iter().map(|x| x.re).collect();
    assert_eq!(re, [3.0, 4.0, 5.0, 1.0, 2.0]);
    assert!(v.iter().all(|x| x.im == 0.0));
}

#[test]
fn aligned_matrix_quadrants() {
    let mut m = AlignedVec::<Complex64>::zeros_2d(4, 4);
    for r in 0..4 {
        for col in 0..4 {
            m[r * 4 + col] = c((1 + (r / 2) * 2 + col / 2) as f64);
        }
    }
    let orig = m.clone();
    shift_2d(&mut m).unwrap();
    let corners: Vec<f64> = [0, 3, 12, 15].iter().map(|&i| m[i].re).collect();
    assert_eq!(corners, [4.0, 3.0, 2.0, 1.0]);
    inv_shift_2d(&mut m).unwrap();
    assert_eq!(&*m, &*orig);
}

#[test]
fn odd_matrix_rejected() {
    let mut m = AlignedVec::<Complex64>::zeros_2d(3, 4);
    m[0] = c(7.0);
    assert_eq!(shift_2d(&mut m), Err(Error::OddShape { rows: 3, cols: 4 }));
    assert_eq!(m[0], c(7.0));
}
