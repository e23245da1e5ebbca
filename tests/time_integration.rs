use weldpool::boundary::{FluxProfile, HeatSource};
use weldpool::config::{Domain, RunConfig};
use weldpool::material::MaterialParameters;
use weldpool::output::{MetricsRecorder, OutputSink, Snapshot};
use weldpool::time_control::step_count;
use weldpool::{LoopState, Simulation, WeldError};

use float_cmp::assert_approx_eq;

fn base_config() -> RunConfig {
    RunConfig {
        factor: 0.5,
        dtout: 0.002,
        tend: 0.01,
        m: 64,
        domain: Domain::default(),
        material: MaterialParameters::default(),
        source: HeatSource::off(),
    }
}

/// Records the step and time of every output event.
#[derive(Default)]
struct StepLog {
    steps: Vec<usize>,
    times: Vec<f64>,
}

impl OutputSink for StepLog {
    fn emit(&mut self, snapshot: &Snapshot<'_>) -> Result<(), WeldError> {
        self.steps.push(snapshot.nsteps);
        self.times.push(snapshot.time);
        Ok(())
    }
}

#[test]
fn unit_material_scenario() {
    let config = RunConfig {
        factor: 0.5,
        dtout: 0.1,
        tend: 1.0,
        m: 10,
        material: MaterialParameters {
            k_solid: 1.0,
            k_liquid: 1.0,
            c_solid: 1.0,
            c_liquid: 1.0,
            rho: 1.0,
            ..Default::default()
        },
        ..base_config()
    };
    let sim = Simulation::new(&config, 4, MetricsRecorder::default()).unwrap();
    let mesh = sim.mesh();
    assert_eq!(mesh.cells(), 10);
    assert_approx_eq!(f64, mesh.dx(), 0.1);
    assert_eq!(mesh.x[0], 0.0);
    assert_eq!(mesh.x[11], 1.0);
    assert_approx_eq!(f64, mesh.x[1], 0.05, epsilon = 1e-12);
    assert_approx_eq!(f64, mesh.x[10], 0.95, epsilon = 1e-12);

    let time = sim.time_control();
    assert_approx_eq!(f64, time.dt, 0.00125, epsilon = 1e-15);
    assert_eq!(time.nend, step_count(0.0, 1.0, time.dt));
    assert_eq!(step_count(0.0, 1.0, 0.00125), 801);
}

#[test]
fn init_is_repeatable() {
    let config = RunConfig {
        source: HeatSource::default(),
        ..base_config()
    };
    let a = Simulation::new(&config, 2, MetricsRecorder::default()).unwrap();
    let b = Simulation::new(&config, 7, MetricsRecorder::default()).unwrap();
    assert_eq!(a.mesh(), b.mesh());
    assert_eq!(a.time_control(), b.time_control());
    assert_eq!(a.state(), b.state());
    assert_eq!(a.f0(), b.f0());
}

#[test]
fn output_fires_after_each_tout() {
    let config = base_config();
    let mut sim = Simulation::new(&config, 3, StepLog::default()).unwrap();
    let dt = sim.time_control().dt;
    let dtout = sim.time_control().dtout;
    let mut tout = sim.time_control().tout;
    let summary = sim.run().unwrap();
    let log = sim.sink();

    assert_eq!(log.steps[0], 0);
    assert_eq!(log.times[0], 0.0);
    assert_eq!(summary.outputs, log.steps.len());
    assert!(log.steps.len() > 2);
    for (&n, &t) in log.steps.iter().zip(&log.times).skip(1) {
        // First step strictly past the scheduled time
        assert_eq!(t, n as f64 * dt);
        assert!(t > tout);
        assert!((n - 1) as f64 * dt <= tout);
        tout += dtout;
    }
    // Times strictly increase between events
    for w in log.times.windows(2) {
        assert!(w[1] > w[0]);
    }
    assert_eq!(sim.time_control().tout, tout);
}

#[test]
fn runs_to_nend() {
    let config = base_config();
    let mut sim =
        Simulation::new(&config, 3, MetricsRecorder::default()).unwrap();
    let nend = sim.time_control().nend;
    let summary = sim.run().unwrap();
    assert_eq!(summary.steps_taken, nend);
    assert!(!summary.terminated_early);
    assert_eq!(summary.final_time, nend as f64 * sim.time_control().dt);
    assert!(summary.final_time >= config.tend);
}

#[test]
fn melt_reaching_the_edge_stops_the_loop() {
    // Strong uniform source over the whole surface melts the corner
    // cells on the first step.
    let config = RunConfig {
        tend: 1.0,
        source: HeatSource {
            profile: FluxProfile::Uniform,
            q0: 1.0e6,
            radius: 1.0,
            center: None,
        },
        ..base_config()
    };
    let mut sim = Simulation::new(&config, 2, StepLog::default()).unwrap();
    assert!(sim.time_control().nend > 1);

    let state = sim.step().unwrap();
    assert_eq!(state, LoopState::Done);
    assert!(sim.maxwidth());
    assert_eq!(sim.nsteps(), 1);

    // Nothing moves after Done
    let snapshot = sim.state().clone();
    assert_eq!(sim.step().unwrap(), LoopState::Done);
    assert_eq!(sim.nsteps(), 1);
    assert_eq!(sim.state(), &snapshot);

    let summary = sim.summary();
    assert!(summary.terminated_early);
    assert_eq!(summary.steps_taken, 1);
    // dtout is far above dt, so only the initial event fired
    assert_eq!(sim.sink().steps, vec![0]);
}

#[test]
fn terminating_step_still_emits_when_due() {
    // Corner cells reach the melting point on the second step. With
    // dtout below dt the output clock is due on every step after the
    // first, so the last event belongs to the terminating step.
    let config = RunConfig {
        tend: 1.0,
        dtout: 1.0e-12,
        source: HeatSource {
            profile: FluxProfile::Uniform,
            q0: 2.0e5,
            radius: 1.0,
            center: None,
        },
        ..base_config()
    };
    let mut sim = Simulation::new(&config, 2, StepLog::default()).unwrap();
    let summary = sim.run().unwrap();
    assert!(summary.terminated_early);
    assert!(summary.steps_taken > 1, "{summary:?}");
    assert!(summary.steps_taken < sim.time_control().nend);
    let log = sim.sink();
    assert_eq!(log.steps.last(), Some(&summary.steps_taken));
    assert_eq!(summary.outputs, log.steps.len());
}

#[test]
fn centred_beam_grows_a_pool() {
    let config = RunConfig {
        m: 32,
        tend: 0.02,
        dtout: 0.001,
        source: HeatSource {
            profile: FluxProfile::Gaussian,
            q0: 2.0e5,
            radius: 0.1,
            center: None,
        },
        ..base_config()
    };
    let mut sim =
        Simulation::new(&config, 4, MetricsRecorder::default()).unwrap();
    sim.run().unwrap();
    let records = &sim.sink().records;
    let last = records.last().unwrap();
    assert!(last.width > 0.0, "{last:?}");
    assert!(last.depth > 0.0, "{last:?}");
    assert!(last.energy > 0.0);
    // Symmetric about the beam centre
    let state = sim.state();
    for i in 1..=16 {
        assert_approx_eq!(
            f64,
            state.t[(i, 1)],
            state.t[(33 - i, 1)],
            epsilon = 1e-6
        );
    }
}
