//! Face fluxes from the current temperature and phase fields.
//!
//! `F = -k grad T` with the face conductivity taken as the harmonic mean of
//! the two neighbouring cells. Positive flux points along `+x` / `+y`,
//! `+y` being into the depth. The surface faces `fy[(i, 0)]` carry the
//! source flux instead, so the surface is insulated outside the beam.
//! The other three sides exchange heat with fixed-temperature boundary
//! nodes.

use crate::material::{face_conductivity, MaterialParameters};
use crate::mesh::Mesh;
use crate::par_slice;
use crate::state::SolutionState;

pub fn compute_flux(
    state: &mut SolutionState,
    mesh: &Mesh,
    materials: &MaterialParameters,
    f0: &[f64],
    chunk_size: usize,
) {
    profiling::scope!("flux");
    let cells = state.cells();
    debug_assert_eq!(f0.len(), cells);
    let t = &state.t;
    let p = &state.p;
    let k = |i: usize, j: usize| materials.conductivity(p[(i, j)]);

    // Faces between nodes i and i + 1 on interior rows
    par_slice::par_for_each_mut(&mut state.fx, chunk_size, |i, j, fx_mut| {
        if j == 0 || j == cells + 1 {
            *fx_mut = 0.0;
            return;
        }
        let k_face = face_conductivity(k(i, j), k(i + 1, j));
        *fx_mut =
            -k_face * (t[(i + 1, j)] - t[(i, j)]) / (mesh.x[i + 1] - mesh.x[i]);
    });

    // Faces between nodes j and j + 1 on interior columns
    par_slice::par_for_each_mut(&mut state.fy, chunk_size, |i, j, fy_mut| {
        if i == 0 || i == cells + 1 {
            *fy_mut = 0.0;
            return;
        }
        if j == 0 {
            *fy_mut = f0[i - 1];
            return;
        }
        let k_face = face_conductivity(k(i, j), k(i, j + 1));
        *fy_mut =
            -k_face * (t[(i, j + 1)] - t[(i, j)]) / (mesh.y[j + 1] - mesh.y[j]);
    });
}
