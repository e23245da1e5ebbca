//! Heat input on the surface row.
//!
//! The source deposits a flux `F0[i]` into each surface-adjacent cell
//! `i = 1..=M`, stored zero based.

use crate::mesh::Mesh;
use serde::Deserialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FluxProfile {
    /// Constant `q0` inside the beam radius, zero outside.
    Uniform,
    /// `q0 exp(-2 r^2 / radius^2)`
    Gaussian,
}

/// Surface heat source description.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeatSource {
    pub profile: FluxProfile,
    /// Peak flux, W/cm^2
    pub q0: f64,
    /// Beam radius, cm
    pub radius: f64,
    /// Beam center along the surface, defaults to the domain midpoint.
    pub center: Option<f64>,
}

impl Default for HeatSource {
    fn default() -> Self {
        HeatSource {
            profile: FluxProfile::Gaussian,
            q0: 2.0e4,
            radius: 0.1,
            center: None,
        }
    }
}

impl HeatSource {
    /// A source that deposits nothing.
    pub fn off() -> Self {
        HeatSource {
            q0: 0.0,
            ..Default::default()
        }
    }

    /// Flux at surface position `x`.
    pub fn flux_at(&self, x: f64, center: f64) -> f64 {
        let r = x - center;
        match self.profile {
            FluxProfile::Uniform => {
                if r.abs() <= self.radius {
                    self.q0
                } else {
                    0.0
                }
            }
            FluxProfile::Gaussian => {
                self.q0 * (-2.0 * r * r / (self.radius * self.radius)).exp()
            }
        }
    }
}

/// Distribute the source over the `M` surface cells.
pub fn boundary_flux_profile(mesh: &Mesh, source: &HeatSource) -> Vec<f64> {
    let center = source.center.unwrap_or(0.5 * (mesh.a() + mesh.b()));
    (1..=mesh.cells())
        .map(|i| source.flux_at(mesh.x[i], center))
        .collect()
}
