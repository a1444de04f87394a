//! Cyclic position arithmetic.
//!
//! Electrical position is defined over `[0, 360 * pole_pairs)` degrees and
//! advances (or retreats) by small deltas each timestep, so wrapping is done
//! by repeated add/subtract of the span rather than a modulo divide.

use crate::numeric::Real;

/// Wrap `value` into `[0, span)` by repeated add/subtract of `span`.
///
/// Intended for cyclic quantities that overshoot the range by a small number
/// of spans per update. `span` must be positive. Non-finite values pass
/// through untouched so numeric corruption propagates instead of hanging the
/// loop.
pub fn wrap_angle(mut value: Real, span: Real) -> Real {
    if !value.is_finite() {
        return value;
    }
    while value >= span {
        value -= span;
    }
    while value < 0.0 {
        value += span;
    }
    value
}

/// Linear interpolation between two positions on the same (unwrapped) axis.
///
/// `frac = 0` returns `from`, `frac = 1` returns `to`. Callers interpolating
/// across a wrap boundary must pass unwrapped values.
pub fn lerp_position(from: Real, to: Real, frac: Real) -> Real {
    from * (1.0 - frac) + to * frac
}
