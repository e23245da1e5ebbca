//! Equation of state: energy to temperature and liquid fraction.
//!
//! The energy reference is solid at the melting point, so
//! `E < 0` is solid, `0 <= E <= rho L` is the mushy band at `T = Tm`,
//! and anything above is liquid.

use crate::material::MaterialParameters;
use crate::par_slice;
use crate::state::{is_boundary_node, touches_far_edge, SolutionState};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Solid,
    Mushy,
    Liquid,
}

/// Phase of a cell with volumetric energy `e`.
pub fn phase_of(e: f64, materials: &MaterialParameters) -> Phase {
    if e < 0.0 {
        Phase::Solid
    } else if e <= materials.melt_energy() {
        Phase::Mushy
    } else {
        Phase::Liquid
    }
}

/// Temperature and liquid fraction for volumetric energy `e`.
#[inline]
pub fn temperature_and_fraction(
    e: f64,
    materials: &MaterialParameters,
) -> (f64, f64) {
    let em = materials.melt_energy();
    match phase_of(e, materials) {
        Phase::Solid => {
            (materials.t_melt + e / (materials.rho * materials.c_solid), 0.0)
        }
        Phase::Mushy => (materials.t_melt, e / em),
        Phase::Liquid => (
            materials.t_melt + (e - em) / (materials.rho * materials.c_liquid),
            1.0,
        ),
    }
}

/// Inverse of the temperature branch. At `T = Tm` the cell is taken to be
/// fully solid.
pub fn energy_from_temperature(t: f64, materials: &MaterialParameters) -> f64 {
    if t <= materials.t_melt {
        materials.rho * materials.c_solid * (t - materials.t_melt)
    } else {
        materials.melt_energy()
            + materials.rho * materials.c_liquid * (t - materials.t_melt)
    }
}

/// What the state update observed.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct EosReport {
    /// Melt reached a cell next to the side or bottom boundary.
    pub maxwidth: bool,
    /// Some interior energy was NaN or infinite.
    pub non_finite: bool,
}

impl EosReport {
    fn merge(self, other: Self) -> Self {
        EosReport {
            maxwidth: self.maxwidth || other.maxwidth,
            non_finite: self.non_finite || other.non_finite,
        }
    }
}

/// Recover `T` and `p` on every interior cell from `E`.
/// Boundary nodes keep their fixed values.
pub fn equation_of_state(
    state: &mut SolutionState,
    materials: &MaterialParameters,
    chunk_size: usize,
) -> EosReport {
    profiling::scope!("eos");
    let cells = state.cells();
    let e = &state.e;
    par_slice::par_zip_map_reduce(
        &mut state.t,
        &mut state.p,
        chunk_size,
        |i, j, t_mut, p_mut| {
            if is_boundary_node(cells, i, j) {
                return EosReport::default();
            }
            let energy = e[(i, j)];
            let (t, p) = temperature_and_fraction(energy, materials);
            *t_mut = t;
            *p_mut = p;
            EosReport {
                maxwidth: p > 0.0 && touches_far_edge(cells, i, j),
                non_finite: !energy.is_finite(),
            }
        },
        EosReport::default(),
        EosReport::merge,
    )
}
