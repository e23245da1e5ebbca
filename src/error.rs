use thiserror::Error;

/// Errors raised while loading a run configuration.
///
/// All of these are fatal and are reported before the mesh is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input file could not be read.
    #[error("failed to read input file {path:?}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    /// The input file is not valid TOML or does not match the expected
    /// layout.
    #[error("failed to parse input file {path:?}: {source}")]
    Parse {
        path: std::path::PathBuf,
        source: toml::de::Error,
    },

    /// A value parsed correctly but lies outside its valid range.
    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Errors surfaced by a simulation run.
#[derive(Debug, Error)]
pub enum WeldError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing an output file failed.
    #[error("output error for {path:?}: {source}")]
    Output {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    /// Exporting a vtk snapshot failed.
    #[error("vtk export failed: {0}")]
    Vtk(String),

    /// Encoding a snapshot image failed.
    #[error("image export failed: {0}")]
    Image(#[from] ::image::ImageError),
}

impl WeldError {
    pub fn output<P: AsRef<std::path::Path>>(
        path: P,
        source: std::io::Error,
    ) -> Self {
        WeldError::Output {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
