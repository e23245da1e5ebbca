use clap::Parser;
use std::path::PathBuf;
use weldpool::config::{input_path, read_inputs};
use weldpool::output::FileOutput;
use weldpool::{build_info, Simulation, WeldError};

/// Weld pool heat conduction with melting, explicit finite volumes.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Input configuration name, reads `NAME.i`.
    /// Without a name the file `input` is read.
    pub name: Option<String>,

    /// Directory for output files, will be created.
    #[arg(short, long, default_value = "outputs")]
    pub output_dir: PathBuf,

    /// Columns per parallel task.
    #[arg(short, long, default_value = "64")]
    pub chunk_size: usize,

    /// The number of threads to use.
    #[arg(short, long, default_value = "8")]
    pub threads: usize,

    /// Write a vtu frame per output event.
    #[arg(long)]
    pub write_vtk: bool,

    /// Write a temperature png per output event.
    #[arg(long)]
    pub write_image: bool,
}

impl Args {
    pub fn cli_parse(name: &str) -> Self {
        build_info::print_report(name);
        let args = Args::parse();

        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
        {
            log::warn!("Using the existing thread pool: {e}");
        }

        args
    }
}

fn run(args: &Args) -> Result<(), WeldError> {
    let input = input_path(args.name.as_deref());
    let config = read_inputs(&input)?;

    let sink =
        FileOutput::new(&args.output_dir, args.write_vtk, args.write_image)?;
    let mut simulation = Simulation::new(&config, args.chunk_size, sink)?;
    let summary = simulation.run()?;

    if summary.terminated_early {
        log::info!(
            "Stopped early after {} of {} steps",
            summary.steps_taken,
            simulation.time_control().nend
        );
    }
    log::info!(
        "Finished at t = {} after {} steps, {} outputs in {:?}",
        summary.final_time,
        summary.steps_taken,
        summary.outputs,
        simulation.into_sink().dir()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args = Args::cli_parse("weldpool");

    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = {
        let server_addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        println!(
            "Run this to view profiling data:  puffin_viewer {server_addr}"
        );
        profiling::puffin::set_scopes_on(true);
        puffin_http::Server::new(&server_addr).ok()
    };

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
