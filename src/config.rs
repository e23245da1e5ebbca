//! Run configuration, read from a TOML input file.
//!
//! ```toml
//! factor = 0.5     # fraction of the explicit stability bound
//! dtout = 0.01     # output interval, s
//! tend = 0.5       # end time, s
//! m = 64           # requested control volumes per unit length
//!
//! [domain]
//! a = 0.0
//! b = 1.0
//!
//! [material]
//! k_solid = 0.25
//!
//! [source]
//! profile = "gaussian"
//! q0 = 2.0e4
//! radius = 0.1
//! ```
//!
//! Only the four top level keys are required.

use crate::boundary::HeatSource;
use crate::error::ConfigError;
use crate::material::MaterialParameters;
use crate::time_control;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Input file used when no name is given.
pub const DEFAULT_INPUT: &str = "input";

/// Extension appended to a named input.
pub const INPUT_EXTENSION: &str = "i";

#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Domain {
    pub a: f64,
    pub b: f64,
}

impl Default for Domain {
    fn default() -> Self {
        Domain { a: 0.0, b: 1.0 }
    }
}

impl Domain {
    #[inline]
    pub fn length(&self) -> f64 {
        self.b - self.a
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Fraction of the explicit stability bound.
    pub factor: f64,
    /// Output interval.
    pub dtout: f64,
    /// End time.
    pub tend: f64,
    /// Requested control volumes per unit length.
    pub m: usize,
    #[serde(default)]
    pub domain: Domain,
    #[serde(default)]
    pub material: MaterialParameters,
    #[serde(default)]
    pub source: HeatSource,
}

/// `input` without a name, `NAME.i` otherwise.
pub fn input_path(name: Option<&str>) -> PathBuf {
    match name {
        None => PathBuf::from(DEFAULT_INPUT),
        Some(name) => PathBuf::from(format!("{name}.{INPUT_EXTENSION}")),
    }
}

/// Read and validate an input file.
pub fn read_inputs<P: AsRef<Path>>(path: P) -> Result<RunConfig, ConfigError> {
    let path = path.as_ref();
    let text =
        std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let config: RunConfig =
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    log::info!("Read inputs: {path:?}");
    Ok(config)
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        reason: reason.into(),
    }
}

fn positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(key, format!("expected a positive number, got {value}")))
    }
}

impl RunConfig {
    /// Check ranges. `factor > 1` is allowed here, the timestep policy
    /// warns about it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("factor", self.factor)?;
        positive("dtout", self.dtout)?;
        positive("tend", self.tend)?;
        if self.m == 0 {
            return Err(invalid("m", "at least one control volume is needed"));
        }
        if !(self.domain.a.is_finite() && self.domain.b.is_finite()) {
            return Err(invalid("domain", "bounds must be finite"));
        }
        if self.domain.b <= self.domain.a {
            return Err(invalid(
                "domain",
                format!(
                    "b = {} must be greater than a = {}",
                    self.domain.b, self.domain.a
                ),
            ));
        }
        if self.cells() == 0 {
            return Err(invalid(
                "m",
                format!(
                    "m * (b - a) = {} leaves no control volumes",
                    self.m as f64 * self.domain.length()
                ),
            ));
        }
        for (key, value) in self.material.fields() {
            positive(key, value)?;
        }
        if !(self.source.q0.is_finite() && self.source.q0 >= 0.0) {
            return Err(invalid("source.q0", "expected a non-negative number"));
        }
        positive("source.radius", self.source.radius)?;
        Ok(())
    }

    /// Control volumes per axis.
    pub fn cells(&self) -> usize {
        time_control::control_volumes(self.m, self.domain.length())
    }
}
