pub mod boundary;
pub mod build_info;
pub mod config;
pub mod energy;
pub mod eos;
pub mod error;
pub mod flux;
pub mod image;
pub mod init;
pub mod material;
pub mod mesh;
pub mod output;
pub mod par_slice;
pub mod simulation;
pub mod state;
pub mod time_control;
pub mod util;
pub mod vtk;

pub use config::{read_inputs, RunConfig};
pub use error::{ConfigError, WeldError};
pub use simulation::{LoopState, RunSummary, Simulation};
