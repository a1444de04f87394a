//! The motor plant state and its integration loop.

use std::f64::consts::TAU;

use ipm_frames::{clarke, inverse_clarke, inverse_park, lerp_position, park, wrap_angle};
use ipm_frames::{AlphaBeta, Dq, Real, ThreePhase};

use crate::config::MotorParams;
use crate::error::PlantResult;

const GRAVITY: Real = 9.81;

/// dq-frame voltage components computed during the last `step`.
///
/// Diagnostic read-back only; the integration recurrence does not read these
/// back.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DqVoltages {
    /// Terminal voltage, d axis (V).
    pub vd: Real,
    /// Terminal voltage, q axis (V).
    pub vq: Real,
    /// Back-EMF from the rotor flux linkage (V, q axis).
    pub vq_bemf: Real,
    /// Cross-coupling voltage induced on the q axis by d-axis current (V).
    pub vq_due_to_id: Real,
    /// Cross-coupling voltage induced on the d axis by q-axis current (V).
    pub vd_due_to_iq: Real,
    /// Resistive drop on the d axis (V).
    pub vd_due_to_rd: Real,
    /// Resistive drop on the q axis (V).
    pub vq_due_to_rq: Real,
    /// Net voltage across the d-axis inductance (V).
    pub vld: Real,
    /// Net voltage across the q-axis inductance (V).
    pub vlq: Real,
}

/// Discrete-time IPM motor plant.
///
/// ## Model
///
/// Electrical: dq-frame IPM equations integrated by forward Euler,
///
/// ```text
/// Ld * dId/dt = Vd - Rs*Id + ωe*Lq*Iq
/// Lq * dIq/dt = Vq - Rs*Iq - ωe*ψ - ωe*Ld*Id       ωe = 2π * poles * f
/// ```
///
/// Torque includes the reluctance term,
///
/// ```text
/// T = 1.5 * poles * (ψ*Iq + (Ld - Lq)*Id*Iq)
/// ```
///
/// Mechanical: the load is a lumped vehicle mass on a graded road behind a
/// fixed gear ratio; linear speed maps back to electrical frequency.
///
/// ## Timing conventions
///
/// Commanded voltages are resolved against the electrical angle from *before*
/// the position update, in both the Park of the command and the inverse
/// transforms of the end-of-period currents: one step of latency, matching a
/// discrete physical system.
///
/// Two parallel current tracks are kept: the authoritative end-of-period
/// state that feeds the next step, and a mid-period sampled view (partial
/// Euler step at the configured sampling-point fraction, phase currents
/// reconstructed at the interpolated angle) that mimics what a real
/// controller's ADC would capture. The sampled view never feeds back into the
/// integration.
///
/// `step` is deterministic, allocation-free and has no failure modes; NaN/Inf
/// inputs propagate silently.
#[derive(Debug, Clone)]
pub struct MotorModel {
    params: MotorParams,
    /// Electrical position (deg), normalized to `[0, 360 * pole_pairs)`
    /// after every step.
    position: Real,
    /// Electrical frequency (Hz).
    frequency: Real,
    /// Vehicle linear speed (m/s).
    speed: Real,
    id: Real,
    iq: Real,
    /// Phase currents at the end of the last period.
    phase_currents: ThreePhase,
    /// Phase currents at the configured mid-period sampling instant.
    sampled_phase_currents: ThreePhase,
    voltages: DqVoltages,
    /// Shaft torque (N·m).
    torque: Real,
    /// Shaft power (W).
    power: Real,
}

impl MotorModel {
    /// Create a plant from a validated parameter set, starting from zeroed
    /// dynamic state.
    pub fn new(params: MotorParams) -> PlantResult<Self> {
        params.validate()?;
        let mut model = Self {
            params,
            position: 0.0,
            frequency: 0.0,
            speed: 0.0,
            id: 0.0,
            iq: 0.0,
            phase_currents: ThreePhase {
                a: 0.0,
                b: 0.0,
                c: 0.0,
            },
            sampled_phase_currents: ThreePhase {
                a: 0.0,
                b: 0.0,
                c: 0.0,
            },
            voltages: DqVoltages::default(),
            torque: 0.0,
            power: 0.0,
        };
        model.restart();
        Ok(model)
    }

    /// Zero all dynamic state. Static configuration is untouched, so this
    /// reinitializes between runs without reconstructing the plant.
    pub fn restart(&mut self) {
        self.position = 0.0;
        self.frequency = 0.0;
        self.speed = 0.0;
        self.id = 0.0;
        self.iq = 0.0;
        self.phase_currents = ThreePhase {
            a: 0.0,
            b: 0.0,
            c: 0.0,
        };
        self.sampled_phase_currents = ThreePhase {
            a: 0.0,
            b: 0.0,
            c: 0.0,
        };
        self.voltages = DqVoltages::default();
        self.torque = 0.0;
        self.power = 0.0;
        tracing::debug!("plant state zeroed");
    }

    /// Advance the plant one timestep under the given three-phase voltage
    /// command (V). The third phase is redundant for balanced commands.
    pub fn step(&mut self, v: ThreePhase) {
        let p = self.params;

        let v_ab = clarke(v.a, v.b);

        // Electrical angle before this step's position update.
        let elec_angle = self.position % 360.0;
        let vdq = park(elec_angle, v_ab);

        // Rotational EMF terms at the present electrical frequency.
        let omega_e = p.pole_pairs * self.frequency * TAU;
        let vq_bemf = p.flux_linkage * omega_e;
        let vq_due_to_id = omega_e * p.ld * self.id;
        let vd_due_to_iq = omega_e * p.lq * self.iq;
        let vd_due_to_rd = p.rs * self.id;
        let vq_due_to_rq = p.rs * self.iq;

        // Net voltage left across each axis inductance.
        let vld = vdq.d - vd_due_to_rd + vd_due_to_iq;
        let vlq = vdq.q - vq_due_to_rq - vq_bemf - vq_due_to_id;

        // Mid-period ADC view: partial Euler step at the sampling-point
        // fraction. Kept out of the integration recurrence.
        let id_samp = self.id + (vld * p.dt * p.sampling_point) / p.ld;
        let iq_samp = self.iq + (vlq * p.dt * p.sampling_point) / p.lq;
        let old_position = self.position;

        // Full-period Euler update.
        self.id += (vld * p.dt) / p.ld;
        self.iq += (vlq * p.dt) / p.lq;

        let i_ab = inverse_park(
            elec_angle,
            Dq {
                d: self.id,
                q: self.iq,
            },
        );
        self.phase_currents = inverse_clarke(i_ab);

        self.torque = 1.5
            * p.pole_pairs
            * (p.flux_linkage * self.iq + (p.ld - p.lq) * self.id * self.iq);

        // Lumped vehicle mechanics: tractive force at the wheel against the
        // gravity component of the road grade.
        let wheel_force = self.torque * p.gear_ratio / p.wheel_radius;
        let grade_force = -p.road_gradient.atan().sin() * p.vehicle_mass * GRAVITY;
        let accel = (wheel_force + grade_force) / p.vehicle_mass;
        self.speed += accel * p.dt;
        self.frequency = (self.speed / (TAU * p.wheel_radius)) * p.gear_ratio;
        self.power = TAU * self.frequency * self.torque;

        let span = 360.0 * p.pole_pairs;
        self.position += self.frequency * p.dt * span;

        // Sampled phase currents at the interpolated angle. Interpolation
        // runs on the unwrapped position so the average cannot straddle the
        // wrap discontinuity.
        let samp_position = lerp_position(old_position, self.position, p.sampling_point);
        let i_ab_samp = inverse_park(
            samp_position % 360.0,
            Dq {
                d: id_samp,
                q: iq_samp,
            },
        );
        self.sampled_phase_currents = inverse_clarke(i_ab_samp);

        // Wrapping is left until last for the interpolation above.
        self.position = wrap_angle(self.position, span);

        self.voltages = DqVoltages {
            vd: vdq.d,
            vq: vdq.q,
            vq_bemf,
            vq_due_to_id,
            vd_due_to_iq,
            vd_due_to_rd,
            vq_due_to_rq,
            vld,
            vlq,
        };
    }

    /// Electrical position as seen by the controller, lagged by the
    /// configured synchronization delay and wrapped back into range.
    fn reported_position(&self) -> Real {
        let span = 360.0 * self.params.pole_pairs;
        wrap_angle(
            self.position - self.params.sync_delay * span * self.frequency,
            span,
        )
    }

    /// Mechanical rotor position (deg).
    pub fn motor_position(&self) -> Real {
        self.reported_position() / self.params.pole_pairs
    }

    /// Electrical rotor position (deg, mod 360).
    pub fn elec_position(&self) -> Real {
        self.reported_position() % 360.0
    }

    /// Electrical frequency (Hz).
    pub fn motor_freq(&self) -> Real {
        self.frequency
    }

    /// `true` while the vehicle is moving forward (or at rest).
    pub fn direction(&self) -> bool {
        self.speed >= 0.0
    }

    /// Vehicle linear speed (m/s).
    pub fn speed(&self) -> Real {
        self.speed
    }

    /// Phase currents at the end of the last period, the ideal controller
    /// sampling point.
    pub fn phase_currents(&self) -> ThreePhase {
        self.phase_currents
    }

    /// Phase currents at the configured mid-period sampling instant, the
    /// real controller sampling point.
    pub fn sampled_phase_currents(&self) -> ThreePhase {
        self.sampled_phase_currents
    }

    /// d-axis current (A).
    pub fn id(&self) -> Real {
        self.id
    }

    /// q-axis current (A).
    pub fn iq(&self) -> Real {
        self.iq
    }

    /// dq-frame voltage breakdown from the last step.
    pub fn dq_voltages(&self) -> DqVoltages {
        self.voltages
    }

    /// Shaft torque (N·m).
    pub fn torque(&self) -> Real {
        self.torque
    }

    /// Shaft power (W).
    pub fn power(&self) -> Real {
        self.power
    }

    /// Current parameter set.
    pub fn params(&self) -> &MotorParams {
        &self.params
    }

    // Live reconfiguration. Setters are unchecked and take effect from the
    // next step.

    pub fn set_wheel_radius(&mut self, val: Real) {
        self.params.wheel_radius = val;
    }

    pub fn set_gear_ratio(&mut self, val: Real) {
        self.params.gear_ratio = val;
    }

    pub fn set_road_gradient(&mut self, val: Real) {
        self.params.road_gradient = val;
    }

    pub fn set_vehicle_mass(&mut self, val: Real) {
        self.params.vehicle_mass = val;
    }

    pub fn set_lq(&mut self, val: Real) {
        self.params.lq = val;
    }

    pub fn set_ld(&mut self, val: Real) {
        self.params.ld = val;
    }

    pub fn set_rs(&mut self, val: Real) {
        self.params.rs = val;
    }

    pub fn set_pole_pairs(&mut self, val: Real) {
        self.params.pole_pairs = val;
    }

    pub fn set_flux_linkage(&mut self, val: Real) {
        self.params.flux_linkage = val;
    }

    pub fn set_timestep(&mut self, val: Real) {
        self.params.dt = val;
    }

    pub fn set_sync_delay(&mut self, val: Real) {
        self.params.sync_delay = val;
    }

    pub fn set_sampling_point(&mut self, val: Real) {
        self.params.sampling_point = val;
    }

    /// Place the rotor at a mechanical position (deg).
    pub fn set_position(&mut self, mech_deg: Real) {
        self.position = mech_deg * self.params.pole_pairs;
    }
}

/// Build the balanced three-phase command that produces the given dq voltages
/// at an electrical angle (deg). Convenience for harness-style callers.
pub fn command_from_dq(angle_deg: Real, dq: Dq) -> ThreePhase {
    let ab: AlphaBeta = inverse_park(angle_deg, dq);
    inverse_clarke(ab)
}
