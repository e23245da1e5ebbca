//! Explicit timestep selection.

use crate::material::MaterialParameters;

/// Time stepping parameters, derived once at startup.
///
/// Only `tout` changes afterwards, advancing by `dtout` after every
/// output event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeControl {
    pub t0: f64,
    pub tend: f64,
    pub dt: f64,
    pub factor: f64,
    pub nend: usize,
    pub tout: f64,
    pub dtout: f64,
}

/// Result of the timestep policy: mesh resolution plus time control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discretization {
    /// Number of control volumes per axis.
    pub cells: usize,
    /// Characteristic spacing, `1 / m_requested`.
    pub dx: f64,
    pub dy: f64,
    pub time: TimeControl,
}

/// Number of control volumes for a requested resolution.
/// Multiplied in floating point, then truncated toward zero.
pub fn control_volumes(m_requested: usize, domain_length: f64) -> usize {
    let m = m_requested as f64 * domain_length;
    m as usize
}

/// `dx^2 rho Cmin / (4 kmax)`, the stable explicit step for diffusion.
pub fn explicit_stability_bound(
    dx: f64,
    materials: &MaterialParameters,
) -> f64 {
    dx * dx * materials.rho * materials.c_min() / (4. * materials.k_max())
}

/// Number of steps needed to pass `tend`.
pub fn step_count(t0: f64, tend: f64, dt: f64) -> usize {
    ((tend - t0) / dt) as usize + 1
}

/// Derive mesh resolution and time control.
///
/// `factor` is the fraction of the stability bound to use. It should lie
/// in `(0, 1]`. Larger values are accepted unchanged and only produce a
/// warning, the run will likely be unstable.
pub fn discretize(
    factor: f64,
    tend: f64,
    dtout: f64,
    m_requested: usize,
    domain_length: f64,
    materials: &MaterialParameters,
) -> Discretization {
    let cells = control_volumes(m_requested, domain_length);
    let dx = 1. / m_requested as f64;
    let dy = 1. / m_requested as f64;

    if factor > 1.0 {
        log::warn!(
            "factor = {factor} exceeds the explicit stability bound, \
             results may be non-physical"
        );
    }

    let t0 = 0.0;
    let dt = factor * explicit_stability_bound(dx, materials);
    let nend = step_count(t0, tend, dt);
    let tout = dtout.max(dt);

    Discretization {
        cells,
        dx,
        dy,
        time: TimeControl {
            t0,
            tend,
            dt,
            factor,
            nend,
            tout,
            dtout,
        },
    }
}

impl TimeControl {
    /// Time at step `n`, `n * dt`. Never accumulated.
    #[inline]
    pub fn time_at(&self, nsteps: usize) -> f64 {
        nsteps as f64 * self.dt
    }

    /// Schedule the next output event.
    #[inline]
    pub fn advance_output(&mut self) {
        self.tout += self.dtout;
    }
}
