//! Experiment workspace layout: the fixed `scripts`/`data`/`analysis` folder
//! triple and the deterministic per-combination filenames.

use crate::config::tokens::EnergyUnit;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error(
        "An experiment named '{name}' already exists at '{path}'. \
         Rename the experiment or set overwrite_existing_experiment to true.",
        path = path.display()
    )]
    AlreadyExists { name: String, path: PathBuf },

    #[error(
        "Unexpected non-directory entry with the experiment name '{name}' at '{path}'. \
         Please remove it.",
        path = path.display()
    )]
    NotADirectory { name: String, path: PathBuf },

    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The three guaranteed-to-exist, initially empty experiment subdirectories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentLayout {
    pub scripts_dir: PathBuf,
    pub data_dir: PathBuf,
    pub analysis_dir: PathBuf,
}

impl ExperimentLayout {
    /// Path under `scripts/` where the script for this combination is written.
    pub fn script_path(&self, energy: f64, unit: EnergyUnit, histories: u64) -> PathBuf {
        self.scripts_dir.join(script_file_name(energy, unit, histories))
    }

    /// Path under `data/` the simulator will write this combination's output
    /// to. Referenced by generated scripts, never written by this library.
    pub fn data_output_path(&self, energy: f64, unit: EnergyUnit, histories: u64) -> PathBuf {
        self.data_dir.join(script_file_name(energy, unit, histories))
    }
}

/// Derives the deterministic filename for one (energy, unit, histories)
/// combination. The energy is rendered with exactly two decimal digits and
/// the decimal point replaced by `p`, so distinct triples never collide.
pub fn script_file_name(energy: f64, unit: EnergyUnit, histories: u64) -> String {
    let energy_token = format!("{energy:.2}").replace('.', "p");
    format!("beam_energy_{energy_token}_{unit}_number_of_histories_{histories}")
}

/// Creates the `scripts`/`data`/`analysis` triple for a named experiment.
///
/// An existing entry that is not a directory fails regardless of `overwrite`
/// and is never deleted. An existing directory fails when `overwrite` is
/// false, and is recursively removed first when `overwrite` is true.
pub fn create_experiment_layout(
    experiments_root: &Path,
    experiment_name: &str,
    overwrite: bool,
) -> Result<ExperimentLayout, LayoutError> {
    let experiment_dir = experiments_root.join(experiment_name);

    if experiment_dir.exists() {
        if !experiment_dir.is_dir() {
            return Err(LayoutError::NotADirectory {
                name: experiment_name.to_string(),
                path: experiment_dir,
            });
        }
        if !overwrite {
            return Err(LayoutError::AlreadyExists {
                name: experiment_name.to_string(),
                path: experiment_dir,
            });
        }
        debug!("Removing existing experiment directory: {:?}", experiment_dir);
        fs::remove_dir_all(&experiment_dir).map_err(|e| LayoutError::Io {
            path: experiment_dir.clone(),
            source: e,
        })?;
    }

    let layout = ExperimentLayout {
        scripts_dir: experiment_dir.join("scripts"),
        data_dir: experiment_dir.join("data"),
        analysis_dir: experiment_dir.join("analysis"),
    };

    // Parent first, then the three children; any failure aborts before
    // generation is attempted, so a partial layout is never returned.
    fs::create_dir_all(&layout.scripts_dir).map_err(|e| LayoutError::Io {
        path: layout.scripts_dir.clone(),
        source: e,
    })?;
    for dir in [&layout.data_dir, &layout.analysis_dir] {
        fs::create_dir(dir).map_err(|e| LayoutError::Io {
            path: dir.clone(),
            source: e,
        })?;
    }

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_all_three_subdirectories() {
        let root = tempdir().unwrap();
        let layout = create_experiment_layout(root.path(), "bragg_peak", false).unwrap();
        assert!(layout.scripts_dir.is_dir());
        assert!(layout.data_dir.is_dir());
        assert!(layout.analysis_dir.is_dir());
        assert_eq!(layout.scripts_dir, root.path().join("bragg_peak/scripts"));
    }

    #[test]
    fn second_call_without_overwrite_fails_and_leaves_layout_intact() {
        let root = tempdir().unwrap();
        let layout = create_experiment_layout(root.path(), "bragg_peak", false).unwrap();
        let marker = layout.scripts_dir.join("marker");
        fs::write(&marker, "keep me").unwrap();

        let err = create_experiment_layout(root.path(), "bragg_peak", false).unwrap_err();
        assert!(matches!(err, LayoutError::AlreadyExists { .. }));
        assert_eq!(fs::read_to_string(&marker).unwrap(), "keep me");
    }

    #[test]
    fn overwrite_removes_prior_contents() {
        let root = tempdir().unwrap();
        let layout = create_experiment_layout(root.path(), "bragg_peak", false).unwrap();
        let marker = layout.scripts_dir.join("marker");
        fs::write(&marker, "stale").unwrap();

        let layout = create_experiment_layout(root.path(), "bragg_peak", true).unwrap();
        assert!(!marker.exists());
        assert!(layout.scripts_dir.is_dir());
        assert!(layout.data_dir.is_dir());
        assert!(layout.analysis_dir.is_dir());
    }

    #[test]
    fn non_directory_entry_fails_even_with_overwrite() {
        let root = tempdir().unwrap();
        let clash = root.path().join("bragg_peak");
        fs::write(&clash, "not a directory").unwrap();

        let err = create_experiment_layout(root.path(), "bragg_peak", true).unwrap_err();
        assert!(matches!(err, LayoutError::NotADirectory { .. }));
        assert_eq!(fs::read_to_string(&clash).unwrap(), "not a directory");
    }

    #[test]
    fn file_name_renders_energy_with_two_decimals() {
        assert_eq!(
            script_file_name(150.0, EnergyUnit::Mev, 1000),
            "beam_energy_150p00_MeV_number_of_histories_1000"
        );
        assert_eq!(
            script_file_name(7.5, EnergyUnit::Ev, 16000),
            "beam_energy_7p50_eV_number_of_histories_16000"
        );
    }

    #[test]
    fn file_name_is_deterministic_and_collision_free() {
        assert_eq!(
            script_file_name(7.5, EnergyUnit::Mev, 1000),
            script_file_name(7.5, EnergyUnit::Mev, 1000)
        );
        assert_ne!(
            script_file_name(7.50, EnergyUnit::Mev, 1001),
            script_file_name(7.5, EnergyUnit::Mev, 1000)
        );
        assert_ne!(
            script_file_name(7.5, EnergyUnit::Ev, 1000),
            script_file_name(7.5, EnergyUnit::Mev, 1000)
        );
    }
}
