use serde::Deserialize;

/// Two-phase material properties.
///
/// Conductivity and specific heat differ between the solid and the liquid,
/// density is shared. Units are cm, s, g, J and K throughout.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaterialParameters {
    /// Solid conductivity, W/(cm K)
    pub k_solid: f64,
    /// Liquid conductivity, W/(cm K)
    pub k_liquid: f64,
    /// Solid specific heat, J/(g K)
    pub c_solid: f64,
    /// Liquid specific heat, J/(g K)
    pub c_liquid: f64,
    /// Density, g/cm^3
    pub rho: f64,
    /// Melting temperature, K
    pub t_melt: f64,
    /// Latent heat of fusion, J/g
    pub latent_heat: f64,
    /// Uniform starting temperature, K
    pub t_initial: f64,
}

/// Stainless steel.
impl Default for MaterialParameters {
    fn default() -> Self {
        MaterialParameters {
            k_solid: 0.25,
            k_liquid: 0.30,
            c_solid: 0.60,
            c_liquid: 0.80,
            rho: 7.9,
            t_melt: 1700.0,
            latent_heat: 270.0,
            t_initial: 300.0,
        }
    }
}

impl MaterialParameters {
    #[inline]
    pub fn k_max(&self) -> f64 {
        self.k_solid.max(self.k_liquid)
    }

    #[inline]
    pub fn c_min(&self) -> f64 {
        self.c_solid.min(self.c_liquid)
    }

    /// Volumetric latent heat, the width of the mushy energy band.
    #[inline]
    pub fn melt_energy(&self) -> f64 {
        self.rho * self.latent_heat
    }

    /// Conductivity of a cell with liquid fraction `p`.
    #[inline]
    pub fn conductivity(&self, p: f64) -> f64 {
        self.k_solid + p * (self.k_liquid - self.k_solid)
    }

    /// Name and value of every field, used for validation.
    pub(crate) fn fields(&self) -> [(&'static str, f64); 8] {
        [
            ("material.k_solid", self.k_solid),
            ("material.k_liquid", self.k_liquid),
            ("material.c_solid", self.c_solid),
            ("material.c_liquid", self.c_liquid),
            ("material.rho", self.rho),
            ("material.t_melt", self.t_melt),
            ("material.latent_heat", self.latent_heat),
            ("material.t_initial", self.t_initial),
        ]
    }
}

/// Harmonic mean of two face-adjacent conductivities.
#[inline]
pub fn face_conductivity(k_left: f64, k_right: f64) -> f64 {
    2.0 * k_left * k_right / (k_left + k_right)
}
