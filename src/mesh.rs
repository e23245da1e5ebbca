//! Cell-centered finite volume mesh.
//!
//! Each axis holds `M + 2` coordinates: the two boundary nodes sit
//! exactly on the domain edges and the `M` interior nodes are cell centers,
//! offset half a cell from the left boundary.
//! The second axis mirrors the first, so the solution lives on the
//! tensor product `X x Y`.

/// Node coordinates along both axes. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    cells: usize,
    dx: f64,
    dy: f64,
}

impl Mesh {
    /// Build a mesh of `cells` control volumes over `[a, b]`
    /// with spacing `(b - a) / cells`.
    pub fn new(a: f64, b: f64, cells: usize) -> Self {
        let dx = (b - a) / cells as f64;
        Self::with_spacing(a, b, cells, dx)
    }

    /// Build a mesh with an externally chosen characteristic spacing.
    /// Boundary nodes are still pinned to `a` and `b`.
    pub fn with_spacing(a: f64, b: f64, cells: usize, dx: f64) -> Self {
        debug_assert!(cells >= 1, "mesh needs at least one cell");
        debug_assert!(b > a, "empty domain [{a}, {b}]");
        let (x, y) = build_mesh(a, b, cells, dx, dx);
        Mesh {
            x,
            y,
            cells,
            dx,
            dy: dx,
        }
    }

    /// Number of interior control volumes per axis.
    #[inline]
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Number of nodes per axis, boundary nodes included.
    #[inline]
    pub fn nodes(&self) -> usize {
        self.cells + 2
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        self.dy
    }

    pub fn a(&self) -> f64 {
        self.x[0]
    }

    pub fn b(&self) -> f64 {
        self.x[self.cells + 1]
    }
}

/// Fill both axes. `X[0] = a`, `X[M + 1] = b`, `X[i] = a + (i - 0.5) dx`.
pub fn build_mesh(
    a: f64,
    b: f64,
    cells: usize,
    dx: f64,
    dy: f64,
) -> (Vec<f64>, Vec<f64>) {
    let mut x = vec![0.0; cells + 2];
    let mut y = vec![0.0; cells + 2];
    x[0] = a;
    x[cells + 1] = b;
    y[0] = a;
    y[cells + 1] = b;
    for i in 1..=cells {
        x[i] = a + (i as f64 - 0.5) * dx;
        y[i] = a + (i as f64 - 0.5) * dy;
    }
    (x, y)
}
