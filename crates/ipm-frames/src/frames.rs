//! Three-phase / two-phase / rotating reference frames and the Clarke and
//! Park transforms between them.
//!
//! Conventions match the plant model: phase `a` is aligned with the alpha
//! axis, phases `b`/`c` sit at ±120°, and all angles are in electrical
//! degrees (converted to radians internally). With those conventions the
//! transforms round-trip: `inverse(forward(x)) == x` to floating-point
//! tolerance for balanced inputs.

use serde::{Deserialize, Serialize};

use crate::numeric::Real;

const SQRT_3: Real = 1.732_050_807_568_877_2;

/// Three-phase stationary quantities (volts or amps).
///
/// For balanced sets `a + b + c == 0` and the third phase is redundant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreePhase {
    pub a: Real,
    pub b: Real,
    pub c: Real,
}

/// Two-phase stationary orthogonal quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlphaBeta {
    pub alpha: Real,
    pub beta: Real,
}

/// Rotating-frame quantities, aligned with the rotor flux axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dq {
    pub d: Real,
    pub q: Real,
}

/// Clarke transform of a balanced three-phase set.
///
/// Only the first two phases are needed; the third is implied by
/// `a + b + c == 0`.
pub fn clarke(a: Real, b: Real) -> AlphaBeta {
    AlphaBeta {
        alpha: a,
        beta: (a + 2.0 * b) / SQRT_3,
    }
}

/// Inverse Clarke transform.
pub fn inverse_clarke(ab: AlphaBeta) -> ThreePhase {
    ThreePhase {
        a: ab.alpha,
        b: (-ab.alpha + SQRT_3 * ab.beta) / 2.0,
        c: (-ab.alpha - SQRT_3 * ab.beta) / 2.0,
    }
}

/// Park transform: rotate stationary alpha-beta into the dq frame at the
/// given electrical angle (degrees).
pub fn park(angle_deg: Real, ab: AlphaBeta) -> Dq {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    Dq {
        d: ab.alpha * cos + ab.beta * sin,
        q: -ab.alpha * sin + ab.beta * cos,
    }
}

/// Inverse Park transform: rotate dq quantities back into the stationary
/// frame at the given electrical angle (degrees).
pub fn inverse_park(angle_deg: Real, dq: Dq) -> AlphaBeta {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    AlphaBeta {
        alpha: dq.d * cos - dq.q * sin,
        beta: dq.d * sin + dq.q * cos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{nearly_equal, Tolerances};

    #[track_caller]
    fn clarke_round_trip(a: Real, b: Real) {
        let tol = Tolerances::default();
        let two_phase = clarke(a, b);
        let result = inverse_clarke(two_phase);
        assert!(nearly_equal(result.a, a, tol));
        assert!(nearly_equal(result.b, b, tol));
        // Balanced set: the recovered third phase closes the sum.
        assert!((result.a + result.b + result.c).abs() < 1e-9);
    }

    #[test]
    fn clarke_round_trip_zero() {
        clarke_round_trip(0.0, 0.0);
    }

    #[test]
    fn clarke_round_trip_two_inputs() {
        clarke_round_trip(0.0, 1.0);
        clarke_round_trip(1.0, 0.0);
        clarke_round_trip(-0.5, -0.5);
        clarke_round_trip(-0.1, -0.2);
        clarke_round_trip(13.0, 21.0);
    }

    #[test]
    fn park_round_trip() {
        let angle_deg = 47.0;
        let input = AlphaBeta {
            alpha: 2.0,
            beta: 3.0,
        };
        let rotating = park(angle_deg, input);
        let result = inverse_park(angle_deg, rotating);
        let tol = Tolerances::default();
        assert!(nearly_equal(result.alpha, input.alpha, tol));
        assert!(nearly_equal(result.beta, input.beta, tol));
    }

    #[test]
    fn park_at_zero_angle_is_identity() {
        let dq = park(
            0.0,
            AlphaBeta {
                alpha: 1.5,
                beta: -0.25,
            },
        );
        assert!((dq.d - 1.5).abs() < 1e-12);
        assert!((dq.q + 0.25).abs() < 1e-12);
    }

    #[test]
    fn park_at_ninety_degrees_swaps_axes() {
        let dq = park(
            90.0,
            AlphaBeta {
                alpha: 1.0,
                beta: 0.0,
            },
        );
        // Alpha-aligned vector seen from a rotor at 90° lies on the -q axis.
        assert!(dq.d.abs() < 1e-12);
        assert!((dq.q + 1.0).abs() < 1e-12);
    }

    #[test]
    fn symmetric_voltage_command_has_zero_beta() {
        // (10, -5, -5) is the classic a-axis-aligned command.
        let ab = clarke(10.0, -5.0);
        assert!((ab.alpha - 10.0).abs() < 1e-12);
        assert!(ab.beta.abs() < 1e-12);
    }
}
