// tests/state_guard.rs
//! Access protocol of `FlowField`: state guard, bounds, element round-trips.

mod common;

use common::{channel, EmbedTransform};
use flowfield::{Axis, Complex, FieldError, FieldState, FlowField};
use proptest::prelude::*;

#[test]
fn matching_accessor_succeeds_everywhere_and_mismatched_one_fails() {
    let g = channel(4, 3, 2, 3);
    for state in [FieldState::Physical, FieldState::Spectral] {
        let f = FlowField::with_state(g, state);
        for nx in 0..4 {
            for ny in 0..3 {
                for nz in 0..2 {
                    for i in 0..3 {
                        let idx = [nx, ny, nz, i];
                        match state {
                            FieldState::Physical => {
                                assert!(f.get_real(idx).is_ok());
                                let err = f.get_complex(idx).unwrap_err();
                                assert!(matches!(err, FieldError::State { .. }));
                            }
                            FieldState::Spectral => {
                                assert!(f.get_complex(idx).is_ok());
                                assert!(matches!(f.get_real(idx), Err(FieldError::State { .. })));
                            }
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn views_are_refused_in_the_wrong_state() {
    let mut f = FlowField::new(channel(4, 3, 2, 3));
    assert!(f.spectral().is_err());
    assert!(f.spectral_mut().is_err());
    f.make_spectral(&EmbedTransform);
    assert!(f.physical().is_err());
    assert!(f.physical_mut().is_err());
    assert!(f.spectral().is_ok());
}

#[test]
fn complex_round_trip_for_representative_values() {
    let mut f = FlowField::with_state(channel(4, 3, 2, 3), FieldState::Spectral);
    let values = [
        Complex::new(0.0, 0.0),
        Complex::new(3.25, 0.0),
        Complex::new(0.0, -7.5),
        Complex::new(-1.0e-300, 2.0e300),
    ];
    for (n, v) in values.iter().enumerate() {
        let idx = [n as isize % 4, 1, 1, 2];
        f.set_complex(idx, *v).unwrap();
        assert_eq!(f.get_complex(idx).unwrap(), *v);
    }
}

#[test]
fn every_boundary_on_every_axis_is_an_index_error() {
    let extents = [4isize, 3, 2, 3];
    let mut f = FlowField::with_state(channel(4, 3, 2, 3), FieldState::Spectral);
    let snapshot = f.clone();
    for (axis_pos, axis) in Axis::ALL.iter().enumerate() {
        for bad in [-1, extents[axis_pos]] {
            let mut idx = [0isize; 4];
            idx[axis_pos] = bad;
            let err = f.get_complex(idx).unwrap_err();
            assert!(
                matches!(err, FieldError::Index { axis: a, index, .. }
                    if a == *axis && index == bad),
                "{err}"
            );
            assert!(f.set_complex(idx, Complex::new(1.0, 1.0)).is_err());
        }
    }
    assert_eq!(f, snapshot);
}

#[test]
fn state_is_checked_before_bounds() {
    let f = FlowField::new(channel(4, 3, 2, 3));
    assert!(matches!(f.get_complex([99, 0, 0, 0]), Err(FieldError::State { .. })));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn set_then_get_returns_exact_value(
        nx in 0isize..5, ny in 0isize..4, nz in 0isize..3, i in 0isize..3,
        re in -1.0e6f64..1.0e6, im in -1.0e6f64..1.0e6,
    ) {
        let mut f = FlowField::with_state(channel(5, 4, 3, 3), FieldState::Spectral);
        let v = Complex::new(re, im);
        f.set_complex([nx, ny, nz, i], v).unwrap();
        prop_assert_eq!(f.get_complex([nx, ny, nz, i]).unwrap(), v);
    }

    #[test]
    fn real_set_then_get_returns_exact_value(
        nx in 0isize..5, ny in 0isize..4, nz in 0isize..3, i in 0isize..3,
        x in proptest::num::f64::NORMAL,
    ) {
        let mut f = FlowField::new(channel(5, 4, 3, 3));
        f.set_real([nx, ny, nz, i], x).unwrap();
        prop_assert_eq!(f.get_real([nx, ny, nz, i]).unwrap(), x);
    }

    #[test]
    fn out_of_range_indices_never_mutate(
        axis in 0usize..4, offset in 0isize..4, below in any::<bool>(),
    ) {
        let extents = [5isize, 4, 3, 3];
        let mut idx = [0isize; 4];
        idx[axis] = if below { -1 - offset } else { extents[axis] + offset };

        let mut f = FlowField::with_state(channel(5, 4, 3, 3), FieldState::Spectral);
        let before = f.clone();
        let is_index_error = matches!(
            f.set_complex(idx, Complex::new(1.0, 2.0)),
            Err(FieldError::Index { .. })
        );
        prop_assert!(is_index_error);
        prop_assert_eq!(f, before);
    }
}
