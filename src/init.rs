//! Initial profile.
//!
//! The whole plate, boundary nodes included, starts at the uniform
//! temperature `t_initial`. Boundary nodes keep that value for the whole
//! run.

use crate::eos;
use crate::material::MaterialParameters;
use crate::par_slice;
use crate::state::SolutionState;

pub fn initialize_profile(
    cells: usize,
    materials: &MaterialParameters,
    chunk_size: usize,
) -> SolutionState {
    let mut state = SolutionState::new(cells);
    let t0 = materials.t_initial;
    let e0 = eos::energy_from_temperature(t0, materials);
    let (_, p0) = eos::temperature_and_fraction(e0, materials);
    let n = state.t.nrows();
    let chunk_len = n.saturating_mul(chunk_size.max(1));
    par_slice::set_value(state.t.as_mut_slice(), t0, chunk_len);
    par_slice::set_value(state.e.as_mut_slice(), e0, chunk_len);
    par_slice::set_value(state.p.as_mut_slice(), p0, chunk_len);
    state
}
