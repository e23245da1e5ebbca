//! Forward Euler update of the conserved energy.

use crate::par_slice;
use crate::state::{is_boundary_node, SolutionState};

/// `E -= dt * div(F)` on every interior cell.
pub fn update_energy(
    state: &mut SolutionState,
    dx: f64,
    dy: f64,
    dt: f64,
    chunk_size: usize,
) {
    profiling::scope!("update_energy");
    let cells = state.cells();
    let fx = &state.fx;
    let fy = &state.fy;
    par_slice::par_for_each_mut(&mut state.e, chunk_size, |i, j, e_mut| {
        if is_boundary_node(cells, i, j) {
            return;
        }
        let div = (fx[(i, j)] - fx[(i - 1, j)]) / dx
            + (fy[(i, j)] - fy[(i, j - 1)]) / dy;
        *e_mut -= dt * div;
    });
}

/// Total interior energy times cell area.
pub fn total_energy(state: &SolutionState, dx: f64, dy: f64) -> f64 {
    let mut sum = 0.0;
    for j in state.interior() {
        for i in state.interior() {
            sum += state.e[(i, j)];
        }
    }
    sum * dx * dy
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn zero_flux_keeps_energy() {
        let mut s = SolutionState::new(5);
        s.e.fill(12.5);
        update_energy(&mut s, 0.1, 0.1, 0.01, 2);
        assert!(s.e.iter().all(|v| *v == 12.5));
    }

    #[test]
    fn surface_flux_heats_top_row() {
        let cells = 3;
        let mut s = SolutionState::new(cells);
        for i in 1..=cells {
            s.fy[(i, 0)] = 10.0;
        }
        let (dx, dy, dt) = (0.5, 0.25, 0.1);
        update_energy(&mut s, dx, dy, dt, 1);
        for i in 1..=cells {
            assert_approx_eq!(f64, s.e[(i, 1)], dt * 10.0 / dy);
            assert_eq!(s.e[(i, 2)], 0.0);
        }
        // Boundary nodes untouched
        assert_eq!(s.e[(0, 1)], 0.0);
        assert_eq!(s.e[(1, 0)], 0.0);
    }

    #[test]
    fn interior_fluxes_conserve() {
        let cells = 4;
        let mut s = SolutionState::new(cells);
        // Arbitrary interior face fluxes, zero on the outer faces
        for j in 1..=cells {
            for i in 1..cells {
                s.fx[(i, j)] = (i * 7 + j * 3) as f64 - 10.0;
            }
        }
        for i in 1..=cells {
            for j in 1..cells {
                s.fy[(i, j)] = (i * 2) as f64 - (j * 5) as f64;
            }
        }
        let (dx, dy) = (0.25, 0.25);
        let before = total_energy(&s, dx, dy);
        update_energy(&mut s, dx, dy, 0.01, 2);
        let after = total_energy(&s, dx, dy);
        assert_approx_eq!(f64, before, after, epsilon = 1e-12);
    }
}
