//! Experiment configuration: closed token enumerations, the typed parameter
//! model, and loading of the two fixed-location input files.
//!
//! Loading follows a parse-then-validate shape: the TOML document is first
//! deserialized into a loosely-typed raw mirror, every cross-field check runs
//! against that form, and only then is the immutable [`ExperimentParameters`]
//! value constructed.

mod error;
mod model;
mod raw;
pub mod tokens;

pub use error::ConfigError;
pub use model::{ExperimentParameters, ExperimentPhysicsList, ParticleSource, Quantity, Scorer};

use raw::RawExperimentParameters;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default location of the parameters file, relative to the working directory.
pub const EXPERIMENT_PARAMETERS_PATH: &str = "../../EXPERIMENT_PARAMETERS.toml";
/// Default location of the geometry file, relative to the working directory.
pub const EXPERIMENT_GEOMETRY_PATH: &str = "../../EXPERIMENT_GEOMETRY.txt";
/// Default root directory under which experiment workspaces are created.
pub const EXPERIMENTS_ROOT: &str = "../../experiments";

/// Loads and validates the experiment parameters file.
///
/// Absence of the file is reported as [`ConfigError::MissingParametersFile`],
/// distinct from parsing and validation failures.
pub fn load_experiment_parameters(path: &Path) -> Result<ExperimentParameters, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingParametersFile {
            path: path.to_path_buf(),
        });
    }
    debug!("Loading experiment parameters from file: {:?}", path);
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let raw: RawExperimentParameters =
        toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })?;
    raw.validate()
}

/// Reads the physical experiment layout as verbatim text lines.
///
/// The content is opaque to this library; it is included unmodified in every
/// generated script.
pub fn load_experiment_geometry(path: &Path) -> Result<Vec<String>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingGeometryFile {
            path: path.to_path_buf(),
        });
    }
    debug!("Loading experiment geometry from file: {:?}", path);
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(content.lines().map(str::to_string).collect())
}
