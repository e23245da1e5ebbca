//! Output events.
//!
//! The loop hands a `Snapshot` to an `OutputSink` at startup and every time
//! the output clock fires. `FileOutput` writes the plain text files
//! (`temp.o`, `phase.o`, `enth.o` hold the latest interior snapshot,
//! `values.o` gets one line per event) and optionally vtk and png frames.

use crate::error::WeldError;
use crate::mesh::Mesh;
use crate::state::{Field, SolutionState};
use crate::util::ensure_dir_exists;
use crate::{image, vtk};
use std::io::prelude::*;
use std::path::{Path, PathBuf};

pub const TEMPERATURE_FILE: &str = "temp.o";
pub const PHASE_FILE: &str = "phase.o";
pub const ENTHALPY_FILE: &str = "enth.o";
pub const VALUES_FILE: &str = "values.o";
pub const VALUES_HEADER: &str =
    "nstep time(ms) width(cm) depth(cm) energy(J)";

/// Liquid fraction at which a cell counts as part of the melt pool.
pub const POOL_FRACTION: f64 = 0.5;

/// Everything an output event may read.
pub struct Snapshot<'a> {
    pub mesh: &'a Mesh,
    pub state: &'a SolutionState,
    pub time: f64,
    pub nsteps: usize,
    pub tend: f64,
    /// Interior energy at startup, times cell area.
    pub initial_energy: f64,
}

/// Melt pool measurements for one snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PoolMetrics {
    pub nsteps: usize,
    /// s
    pub time: f64,
    /// cm, along the surface
    pub width: f64,
    /// cm, below the surface
    pub depth: f64,
    /// J per unit length absorbed since startup
    pub energy: f64,
}

impl Snapshot<'_> {
    pub fn metrics(&self) -> PoolMetrics {
        let state = self.state;
        let cells = state.cells();
        let melted = |i: usize, j: usize| state.p[(i, j)] >= POOL_FRACTION;

        let width_cells = state.interior().filter(|&i| melted(i, 1)).count();
        let depth_cells = state
            .interior()
            .map(|i| (1..=cells).take_while(|&j| melted(i, j)).count())
            .max()
            .unwrap_or(0);
        let energy = crate::energy::total_energy(
            state,
            self.mesh.dx(),
            self.mesh.dy(),
        ) - self.initial_energy;

        PoolMetrics {
            nsteps: self.nsteps,
            time: self.time,
            width: width_cells as f64 * self.mesh.dx(),
            depth: depth_cells as f64 * self.mesh.dy(),
            energy,
        }
    }
}

pub trait OutputSink {
    fn emit(&mut self, snapshot: &Snapshot<'_>) -> Result<(), WeldError>;
}

/// Keeps the metrics of every event in memory.
#[derive(Debug, Default, Clone)]
pub struct MetricsRecorder {
    pub records: Vec<PoolMetrics>,
}

impl OutputSink for MetricsRecorder {
    fn emit(&mut self, snapshot: &Snapshot<'_>) -> Result<(), WeldError> {
        self.records.push(snapshot.metrics());
        Ok(())
    }
}

/// Writes output files into a directory.
pub struct FileOutput {
    dir: PathBuf,
    write_vtk: bool,
    write_image: bool,
    frame: u32,
}

impl FileOutput {
    /// Create the directory if needed and start a fresh `values.o`.
    pub fn new<P: AsRef<Path>>(
        dir: P,
        write_vtk: bool,
        write_image: bool,
    ) -> Result<Self, WeldError> {
        let dir = dir.as_ref().to_path_buf();
        ensure_dir_exists(&dir)?;
        let values_path = dir.join(VALUES_FILE);
        std::fs::write(&values_path, format!("{VALUES_HEADER}\n"))
            .map_err(|e| WeldError::output(&values_path, e))?;
        Ok(FileOutput {
            dir,
            write_vtk,
            write_image,
            frame: 0,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn frame_name(&self, ext: &str) -> PathBuf {
        self.dir.join(format!("frame_{:04}.{ext}", self.frame))
    }

    fn append_values(&self, metrics: &PoolMetrics) -> Result<(), WeldError> {
        let path = self.dir.join(VALUES_FILE);
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .map_err(|e| WeldError::output(&path, e))?;
        writeln!(
            file,
            "{} {:.6} {:.6} {:.6} {:.6}",
            metrics.nsteps,
            metrics.time * 1000.0,
            metrics.width,
            metrics.depth,
            metrics.energy
        )
        .map_err(|e| WeldError::output(&path, e))
    }
}

impl OutputSink for FileOutput {
    fn emit(&mut self, snapshot: &Snapshot<'_>) -> Result<(), WeldError> {
        profiling::scope!("output");
        let state = snapshot.state;
        let cells = state.cells();
        write_interior(&state.t, cells, &self.dir.join(TEMPERATURE_FILE))?;
        write_interior(&state.p, cells, &self.dir.join(PHASE_FILE))?;
        write_interior(&state.e, cells, &self.dir.join(ENTHALPY_FILE))?;

        let metrics = snapshot.metrics();
        self.append_values(&metrics)?;
        log::info!(
            "step {} t = {:.3} ms ({:.0}%) width = {:.4} cm depth = {:.4} cm",
            metrics.nsteps,
            metrics.time * 1000.0,
            100.0 * snapshot.time / snapshot.tend,
            metrics.width,
            metrics.depth
        );

        if self.write_vtk {
            vtk::write_vtk(snapshot.mesh, state, &self.frame_name("vtu"))?;
        }
        if self.write_image {
            image::write_temperature_image(state, &self.frame_name("png"))?;
        }
        self.frame += 1;
        Ok(())
    }
}

/// One line per depth row, space separated, interior cells only.
pub fn write_interior(
    field: &Field,
    cells: usize,
    path: &Path,
) -> Result<(), WeldError> {
    let file =
        std::fs::File::create(path).map_err(|e| WeldError::output(path, e))?;
    let mut output = std::io::BufWriter::new(file);
    let io = |e| WeldError::output(path, e);
    for j in 1..=cells {
        write!(output, "{}", field[(1, j)]).map_err(io)?;
        for i in 2..=cells {
            write!(output, " {}", field[(i, j)]).map_err(io)?;
        }
        writeln!(output).map_err(io)?;
    }
    output.flush().map_err(io)
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn snapshot_state(cells: usize) -> (Mesh, SolutionState) {
        (Mesh::new(0.0, 1.0, cells), SolutionState::new(cells))
    }

    #[test]
    fn metrics_measure_pool() {
        let (mesh, mut state) = snapshot_state(10);
        // Three cells wide at the surface, two deep in the middle
        state.p[(4, 1)] = 1.0;
        state.p[(5, 1)] = 0.6;
        state.p[(6, 1)] = 1.0;
        state.p[(5, 2)] = 0.5;
        state.p[(5, 3)] = 0.2;
        // Detached liquid below does not extend the depth
        state.p[(5, 5)] = 1.0;
        let snapshot = Snapshot {
            mesh: &mesh,
            state: &state,
            time: 0.002,
            nsteps: 7,
            tend: 1.0,
            initial_energy: 0.0,
        };
        let m = snapshot.metrics();
        assert_eq!(m.nsteps, 7);
        assert_approx_eq!(f64, m.width, 0.3, epsilon = 1e-12);
        assert_approx_eq!(f64, m.depth, 0.2, epsilon = 1e-12);
        assert_eq!(m.energy, 0.0);
    }

    #[test]
    fn metrics_energy_is_relative() {
        let (mesh, mut state) = snapshot_state(2);
        state.e.fill(3.0);
        let snapshot = Snapshot {
            mesh: &mesh,
            state: &state,
            time: 0.0,
            nsteps: 0,
            tend: 1.0,
            initial_energy: 1.0,
        };
        // 4 cells * 3.0 * 0.25 = 3.0, minus 1.0
        assert_approx_eq!(f64, snapshot.metrics().energy, 2.0);
    }

    #[test]
    fn recorder_keeps_events() {
        let (mesh, state) = snapshot_state(3);
        let mut recorder = MetricsRecorder::default();
        for n in 0..3 {
            let snapshot = Snapshot {
                mesh: &mesh,
                state: &state,
                time: n as f64,
                nsteps: n,
                tend: 3.0,
                initial_energy: 0.0,
            };
            recorder.emit(&snapshot).unwrap();
        }
        assert_eq!(recorder.records.len(), 3);
        assert_eq!(recorder.records[2].nsteps, 2);
    }

    #[test]
    fn files_have_expected_layout() {
        let dir = tempfile::tempdir().unwrap();
        let (mesh, mut state) = snapshot_state(4);
        state.t.fill(300.0);
        let mut output = FileOutput::new(dir.path(), false, false).unwrap();
        for n in 0..2 {
            let snapshot = Snapshot {
                mesh: &mesh,
                state: &state,
                time: 0.001 * n as f64,
                nsteps: n,
                tend: 1.0,
                initial_energy: 0.0,
            };
            output.emit(&snapshot).unwrap();
        }

        let temp = std::fs::read_to_string(dir.path().join(TEMPERATURE_FILE))
            .unwrap();
        let rows: Vec<&str> = temp.lines().collect();
        assert_eq!(rows.len(), 4);
        for row in rows {
            let values: Vec<f64> = row
                .split_whitespace()
                .map(|v| v.parse().unwrap())
                .collect();
            assert_eq!(values, vec![300.0; 4]);
        }
        assert!(dir.path().join(PHASE_FILE).exists());
        assert!(dir.path().join(ENTHALPY_FILE).exists());

        let values =
            std::fs::read_to_string(dir.path().join(VALUES_FILE)).unwrap();
        let lines: Vec<&str> = values.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], VALUES_HEADER);
        let columns: Vec<f64> = lines[2]
            .split_whitespace()
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(columns.len(), 5);
        assert_eq!(columns[0], 1.0);
        assert_approx_eq!(f64, columns[1], 1.0);
    }
}
