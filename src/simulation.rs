//! The explicit time integration loop.
//!
//! `Simulation` owns everything a run touches: mesh, materials, time
//! control, solution fields, the surface flux distribution and the
//! output sink. Nothing is global, two simulations built from the same
//! configuration are independent and identical.
//!
//! Every step runs flux, energy update and equation of state in that
//! order, each stage consuming the fields the previous one just wrote.

use crate::boundary::boundary_flux_profile;
use crate::config::RunConfig;
use crate::eos::equation_of_state;
use crate::energy::{total_energy, update_energy};
use crate::error::WeldError;
use crate::flux::compute_flux;
use crate::init::initialize_profile;
use crate::material::MaterialParameters;
use crate::mesh::Mesh;
use crate::output::{OutputSink, Snapshot};
use crate::state::SolutionState;
use crate::time_control::{discretize, TimeControl};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopState {
    Init,
    Stepping,
    Done,
}

/// How a run ended.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RunSummary {
    pub steps_taken: usize,
    pub final_time: f64,
    /// Output events, the initial one included.
    pub outputs: usize,
    /// Stopped because the melt pool reached the domain edge.
    pub terminated_early: bool,
}

pub struct Simulation<S: OutputSink> {
    mesh: Mesh,
    materials: MaterialParameters,
    time: TimeControl,
    state: SolutionState,
    f0: Vec<f64>,
    chunk_size: usize,
    nsteps: usize,
    current_time: f64,
    maxwidth: bool,
    loop_state: LoopState,
    initial_energy: f64,
    outputs: usize,
    warned_non_finite: bool,
    sink: S,
}

impl<S: OutputSink> Simulation<S> {
    /// Build the mesh, derive the timestep, fill the initial profile and
    /// emit the initial output.
    pub fn new(
        config: &RunConfig,
        chunk_size: usize,
        sink: S,
    ) -> Result<Self, WeldError> {
        config.validate()?;
        let materials = config.material;
        let discretization = discretize(
            config.factor,
            config.tend,
            config.dtout,
            config.m,
            config.domain.length(),
            &materials,
        );
        let cells = discretization.cells;
        let time = discretization.time;
        log::info!(
            "M = {}, tend = {}, dt = {:.15e}, Nend = {}",
            cells,
            time.tend,
            time.dt,
            time.nend
        );

        let mesh = Mesh::with_spacing(
            config.domain.a,
            config.domain.b,
            cells,
            discretization.dx,
        );
        let state = initialize_profile(cells, &materials, chunk_size);
        let f0 = boundary_flux_profile(&mesh, &config.source);
        let initial_energy = total_energy(&state, mesh.dx(), mesh.dy());

        let mut simulation = Simulation {
            mesh,
            materials,
            time,
            state,
            f0,
            chunk_size,
            nsteps: 0,
            current_time: time.t0,
            maxwidth: false,
            loop_state: LoopState::Init,
            initial_energy,
            outputs: 0,
            warned_non_finite: false,
            sink,
        };
        simulation.emit()?;
        simulation.loop_state = LoopState::Stepping;
        Ok(simulation)
    }

    fn emit(&mut self) -> Result<(), WeldError> {
        let snapshot = Snapshot {
            mesh: &self.mesh,
            state: &self.state,
            time: self.current_time,
            nsteps: self.nsteps,
            tend: self.time.tend,
            initial_energy: self.initial_energy,
        };
        self.sink.emit(&snapshot)?;
        self.outputs += 1;
        Ok(())
    }

    /// Advance one step. Returns the state after the step; once `Done`
    /// further calls change nothing.
    pub fn step(&mut self) -> Result<LoopState, WeldError> {
        if self.loop_state != LoopState::Stepping {
            return Ok(self.loop_state);
        }
        profiling::scope!("step");
        self.nsteps += 1;
        self.current_time = self.time.time_at(self.nsteps);

        compute_flux(
            &mut self.state,
            &self.mesh,
            &self.materials,
            &self.f0,
            self.chunk_size,
        );
        update_energy(
            &mut self.state,
            self.mesh.dx(),
            self.mesh.dy(),
            self.time.dt,
            self.chunk_size,
        );
        let report = equation_of_state(
            &mut self.state,
            &self.materials,
            self.chunk_size,
        );

        if report.non_finite && !self.warned_non_finite {
            log::warn!(
                "non-finite energy at step {}, the run is no longer physical",
                self.nsteps
            );
            self.warned_non_finite = true;
        }
        self.maxwidth |= report.maxwidth;

        if self.current_time > self.time.tout {
            self.emit()?;
            self.time.advance_output();
        }

        if self.maxwidth {
            log::info!(
                "Melt pool reached the domain edge at step {}, t = {}",
                self.nsteps,
                self.current_time
            );
            self.loop_state = LoopState::Done;
        } else if self.nsteps >= self.time.nend {
            self.loop_state = LoopState::Done;
        }
        profiling::finish_frame!();
        Ok(self.loop_state)
    }

    /// Step until done.
    pub fn run(&mut self) -> Result<RunSummary, WeldError> {
        while self.step()? != LoopState::Done {}
        Ok(self.summary())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            steps_taken: self.nsteps,
            final_time: self.current_time,
            outputs: self.outputs,
            terminated_early: self.maxwidth,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn materials(&self) -> &MaterialParameters {
        &self.materials
    }

    pub fn time_control(&self) -> &TimeControl {
        &self.time
    }

    pub fn state(&self) -> &SolutionState {
        &self.state
    }

    /// Surface flux distribution.
    pub fn f0(&self) -> &[f64] {
        &self.f0
    }

    pub fn nsteps(&self) -> usize {
        self.nsteps
    }

    pub fn time(&self) -> f64 {
        self.current_time
    }

    pub fn maxwidth(&self) -> bool {
        self.maxwidth
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
