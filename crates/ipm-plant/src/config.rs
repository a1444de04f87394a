//! Static motor and vehicle configuration.

use ipm_frames::Real;
use serde::{Deserialize, Serialize};

use crate::error::{PlantError, PlantResult};

/// Static plant parameters.
///
/// All fields may be changed between ticks via the setters on
/// [`crate::MotorModel`]; changes take effect from the next `step`.
/// Validation happens once at construction; live edits are unchecked, and
/// non-physical values (zero inductance, zero mass, zero timestep) produce
/// IEEE Inf/NaN that propagate through subsequent state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorParams {
    /// Driven wheel radius (m).
    pub wheel_radius: Real,
    /// Gearbox ratio (motor turns per wheel turn).
    pub gear_ratio: Real,
    /// Road gradient as a fraction (rise over run). Positive is uphill.
    pub road_gradient: Real,
    /// Lumped vehicle mass (kg).
    pub vehicle_mass: Real,
    /// q-axis inductance (H).
    pub lq: Real,
    /// d-axis inductance (H).
    pub ld: Real,
    /// Stator resistance (Ω).
    pub rs: Real,
    /// Pole-pair count. A positive real number; fractional values are allowed
    /// for experimentation.
    pub pole_pairs: Real,
    /// Rotor flux linkage (Wb).
    pub flux_linkage: Real,
    /// Integration timestep (s).
    pub dt: Real,
    /// Encoder/controller synchronization delay (s). The reported rotor
    /// position lags the true plant position by this much.
    pub sync_delay: Real,
    /// Fractional ADC sampling instant within a period: 0 = start, 1 = end.
    pub sampling_point: Real,
}

impl MotorParams {
    /// Check that the parameter set is physically sane.
    pub fn validate(&self) -> PlantResult<()> {
        if self.dt <= 0.0 {
            return Err(PlantError::InvalidArg {
                what: "timestep must be positive",
            });
        }
        if self.lq <= 0.0 || self.ld <= 0.0 {
            return Err(PlantError::InvalidArg {
                what: "inductances must be positive",
            });
        }
        if self.vehicle_mass <= 0.0 {
            return Err(PlantError::InvalidArg {
                what: "vehicle mass must be positive",
            });
        }
        if self.wheel_radius <= 0.0 {
            return Err(PlantError::InvalidArg {
                what: "wheel radius must be positive",
            });
        }
        if self.pole_pairs <= 0.0 {
            return Err(PlantError::InvalidArg {
                what: "pole-pair count must be positive",
            });
        }
        if !(0.0..=1.0).contains(&self.sampling_point) {
            return Err(PlantError::InvalidArg {
                what: "sampling point must be in [0, 1]",
            });
        }
        Ok(())
    }
}
