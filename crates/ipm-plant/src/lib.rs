//! ipm-plant: discrete-time IPM motor plant model.
//!
//! Owns the electrical and mechanical state of a permanent-magnet synchronous
//! motor plus a lumped vehicle load, and advances it one fixed timestep per
//! [`MotorModel::step`] call. An external controller harness reads rotor
//! position and phase-current samples, runs its own FOC/PWM algorithm, and
//! feeds the resulting three-phase voltage commands back in.
//!
//! Contains:
//! - config (static motor/vehicle parameters + validation)
//! - model (the plant state and integration loop)
//! - error (shared error types)

pub mod config;
pub mod error;
pub mod model;

pub use config::MotorParams;
pub use error::{PlantError, PlantResult};
pub use model::{command_from_dq, DqVoltages, MotorModel};
