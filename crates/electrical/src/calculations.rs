//! d-q frame machine formulas and unit conversions
//!
//! Flux linkages are derived from the steady-state voltage equations
//! `u = R i + dψ/dt`, so they are only defined at non-zero electrical speed.
//!
//! Record processing uses the flux-based forms. The inverse conversions,
//! the expanded torque equation and the voltage-based inductances are
//! public for callers cross-checking measurements against a motor model.

use std::f64::consts::{PI, SQRT_2};

/// Convert mechanical speed in rpm to rad/s
pub fn rpm_to_rads(rpm: f64) -> f64 {
    rpm * (2.0 * PI / 60.0)
}

/// Convert mechanical speed in rad/s to rpm
pub fn rads_to_rpm(rads: f64) -> f64 {
    rads * (60.0 / (2.0 * PI))
}

/// Peak value of a sinusoid to its RMS value
pub fn peak_to_rms(peak: f64) -> f64 {
    peak / SQRT_2
}

/// RMS value of a sinusoid to its peak value
pub fn rms_to_peak(rms: f64) -> f64 {
    rms * SQRT_2
}

/// Electrical angular frequency (rad/s) for a mechanical speed in rpm.
///
/// Direction is discarded: `|rpm| * p * 2π / 60`.
pub fn electrical_frequency(speed_rpm: f64, pole_pairs: u32) -> f64 {
    rpm_to_rads(speed_rpm.abs()) * pole_pairs as f64
}

/// Back-EMF constant (V_rms,LL / krpm) to permanent magnet flux linkage (Wb-turns).
///
/// `ψ_pm = K_e √6 / (100 π p)`, zero for zero pole pairs.
pub fn ke_to_psi(ke_v_krpm: f64, pole_pairs: u32) -> f64 {
    if pole_pairs == 0 {
        return 0.0;
    }
    ke_v_krpm * 6.0f64.sqrt() / (100.0 * PI * pole_pairs as f64)
}

/// Permanent magnet flux linkage (Wb-turns) to back-EMF constant (V_rms,LL / krpm)
pub fn psi_to_ke(psi_pm: f64, pole_pairs: u32) -> f64 {
    if pole_pairs == 0 {
        return 0.0;
    }
    psi_pm * 100.0 * PI * pole_pairs as f64 / 6.0f64.sqrt()
}

/// d-axis flux linkage from the q-axis voltage equation: `ψd = -((Rs iq) - uq) / ωe`
pub fn flux_linkage_d_voltage(u_q: f64, i_q: f64, omega_e: f64, rs: f64) -> f64 {
    -((rs * i_q) - u_q) / omega_e
}

/// q-axis flux linkage from the d-axis voltage equation: `ψq = ((Rs id) - ud) / ωe`
pub fn flux_linkage_q_voltage(u_d: f64, i_d: f64, omega_e: f64, rs: f64) -> f64 {
    ((rs * i_d) - u_d) / omega_e
}

/// Electromagnetic torque from flux linkage: `T = 3/2 p (ψd iq - ψq id)`
pub fn torque_flux(psi_d: f64, psi_q: f64, i_q: f64, i_d: f64, pole_pairs: u32) -> f64 {
    1.5 * pole_pairs as f64 * (psi_d * i_q - psi_q * i_d)
}

/// Electromagnetic torque from the expanded PMAC equation:
/// `T = 3/2 p (ψpm iq + (Ld - Lq) id iq)`
pub fn torque_idq(pole_pairs: u32, psi_pm: f64, ld: f64, lq: f64, i_d: f64, i_q: f64) -> f64 {
    1.5 * pole_pairs as f64 * (psi_pm * i_q + (ld - lq) * i_d * i_q)
}

/// d-axis inductance from flux: `Ld = (ψd - ψpm) / id`, zero at `id = 0`
pub fn inductance_d(psi_d: f64, i_d: f64, psi_pm: f64) -> f64 {
    if i_d == 0.0 {
        return 0.0;
    }
    (psi_d - psi_pm) / i_d
}

/// q-axis inductance from flux: `Lq = ψq / iq`, zero at `iq = 0`
pub fn inductance_q(psi_q: f64, i_q: f64) -> f64 {
    if i_q == 0.0 {
        return 0.0;
    }
    psi_q / i_q
}

/// d-axis inductance from voltages: `Ld = (uq - Rs iq - ωe ψpm) / (ωe id)`
pub fn inductance_d_voltage(u_q: f64, i_q: f64, omega_e: f64, rs: f64, psi_pm: f64, i_d: f64) -> f64 {
    let denominator = omega_e * i_d;
    if denominator == 0.0 {
        return 0.0;
    }
    (u_q - rs * i_q - omega_e * psi_pm) / denominator
}

/// q-axis inductance from voltages: `Lq = (Rs id - ud) / (ωe iq)`
pub fn inductance_q_voltage(u_d: f64, i_d: f64, omega_e: f64, rs: f64, i_q: f64) -> f64 {
    let denominator = omega_e * i_q;
    if denominator == 0.0 {
        return 0.0;
    }
    (rs * i_d - u_d) / denominator
}
