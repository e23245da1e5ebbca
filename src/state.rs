//! Per-cell solution fields.
//!
//! Every field is a column-major `DMatrix` indexed `(i, j)` with `i` along
//! the surface (axis 1) and `j` into the depth (axis 2).
//! Node fields cover the `M` interior cells plus the boundary layer,
//! `(M + 2) x (M + 2)`.
//! Face fluxes live between nodes: `fx[(i, j)]` is the flux across the
//! face between nodes `i` and `i + 1`, `fy[(i, j)]` between `j` and `j + 1`.
//!
//! Fields are sized once and never resized.

use nalgebra::DMatrix;

pub type Field = DMatrix<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct SolutionState {
    cells: usize,
    /// Temperature, K
    pub t: Field,
    /// Volumetric energy relative to solid at the melting point, J/cm^3
    pub e: Field,
    /// Liquid fraction in `[0, 1]`
    pub p: Field,
    /// Axis 1 face flux, W/cm^2, `(M + 1) x (M + 2)`
    pub fx: Field,
    /// Axis 2 face flux, W/cm^2, `(M + 2) x (M + 1)`
    pub fy: Field,
}

impl SolutionState {
    pub fn new(cells: usize) -> Self {
        let n = cells + 2;
        SolutionState {
            cells,
            t: Field::zeros(n, n),
            e: Field::zeros(n, n),
            p: Field::zeros(n, n),
            fx: Field::zeros(n - 1, n),
            fy: Field::zeros(n, n - 1),
        }
    }

    /// Number of interior cells per axis.
    #[inline]
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Interior cell indices along one axis, `1..=M`.
    #[inline]
    pub fn interior(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.cells
    }

    #[inline]
    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        is_boundary_node(self.cells, i, j)
    }
}

/// Whether `(i, j)` is a boundary node of a mesh with `cells` interior
/// cells per axis.
#[inline]
pub fn is_boundary_node(cells: usize, i: usize, j: usize) -> bool {
    i == 0 || j == 0 || i == cells + 1 || j == cells + 1
}

/// Whether an interior cell touches the side or bottom boundary.
/// The surface row `j = 1` only counts through its side cells.
#[inline]
pub fn touches_far_edge(cells: usize, i: usize, j: usize) -> bool {
    i == 1 || i == cells || j == cells
}
