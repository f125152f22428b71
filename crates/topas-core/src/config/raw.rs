use super::error::ConfigError;
use super::model::{
    ExperimentParameters, ExperimentPhysicsList, ParticleSource, Quantity, Scorer,
};
use super::tokens::{
    AngleUnit, BeamAngularDistribution, BeamParticle, BeamPositionCutoffShape,
    BeamPositionDistribution, EnergyUnit, LengthUnit, ParticleSourceType, ParticleType,
    PhysicsListModule, PhysicsListType, ScorerQuantity,
};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RawParticleSource {
    /// Must match a component name in the external geometry description.
    component: String,
    #[serde(rename = "type")]
    source_type: ParticleSourceType,
    beam_particle: BeamParticle,
    beam_energy: Vec<f64>,
    beam_energy_unit: EnergyUnit,
    beam_energy_spreads: Vec<f64>,
    beam_position_distribution: BeamPositionDistribution,
    beam_position_cutoff_shape: BeamPositionCutoffShape,
    beam_position_cutoff_x: f64,
    beam_position_cutoff_x_units: LengthUnit,
    beam_position_cutoff_y: f64,
    beam_position_cutoff_y_units: LengthUnit,
    beam_position_spread_x: f64,
    beam_position_spread_x_units: LengthUnit,
    beam_position_spread_y: f64,
    beam_position_spread_y_units: LengthUnit,
    beam_angular_distribution: BeamAngularDistribution,
    beam_angular_cutoff_x: f64,
    beam_angular_cutoff_x_units: AngleUnit,
    beam_angular_cutoff_y: f64,
    beam_angular_cutoff_y_units: AngleUnit,
    beam_angular_spread_x: f64,
    beam_angular_spread_x_units: AngleUnit,
    beam_angular_spread_y: f64,
    beam_angular_spread_y_units: AngleUnit,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RawPhysicsList {
    list_name: String,
    list_processes: bool,
    #[serde(rename = "type")]
    list_type: PhysicsListType,
    modules: Vec<PhysicsListModule>,
    #[serde(rename = "EM_range_min")]
    em_range_min: f64,
    #[serde(rename = "EM_range_min_units")]
    em_range_min_units: EnergyUnit,
    #[serde(rename = "EM_range_max")]
    em_range_max: f64,
    #[serde(rename = "EM_range_max_units")]
    em_range_max_units: EnergyUnit,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RawScorer {
    quantity: ScorerQuantity,
    /// Must match a component name in the external geometry description.
    component: String,
    only_include_particles_named: Option<Vec<ParticleType>>,
    x_bins: Option<i64>,
    y_bins: Option<i64>,
    z_bins: Option<i64>,
}

/// Loosely-typed mirror of the parameters file.
///
/// All cross-field checks run against this form; the immutable
/// [`ExperimentParameters`] is constructed only once every check has passed,
/// so no partially-valid typed value ever exists.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RawExperimentParameters {
    experiment_name: String,
    overwrite_existing_experiment: bool,
    number_of_threads: i64,
    #[serde(default)]
    seed: i64,
    numbers_of_histories: Vec<i64>,
    particle_source: RawParticleSource,
    physics_list: RawPhysicsList,
    scorer: RawScorer,
}

fn check_non_negative(field: &'static str, values: &[f64]) -> Result<(), ConfigError> {
    if let Some(bad) = values.iter().find(|v| **v < 0.0) {
        return Err(ConfigError::Validation {
            field,
            message: format!("values must be >= 0, got {bad} in {values:?}"),
        });
    }
    Ok(())
}

fn check_bins(field: &'static str, bins: Option<i64>) -> Result<Option<u32>, ConfigError> {
    match bins {
        None => Ok(None),
        Some(n) if n > 0 => u32::try_from(n).map(Some).map_err(|_| ConfigError::Validation {
            field,
            message: format!("bin count must fit in 32 bits, got {n}"),
        }),
        Some(n) => Err(ConfigError::Validation {
            field,
            message: format!("bin count must be > 0, got {n}"),
        }),
    }
}

impl RawExperimentParameters {
    /// Runs every cross-field check and constructs the typed configuration.
    ///
    /// Check order: spread broadcast/length against energies, non-negativity
    /// of energies and spreads, non-negativity of history counts, positivity
    /// of any supplied bin count. The first failure aborts validation.
    pub fn validate(self) -> Result<ExperimentParameters, ConfigError> {
        let source = self.particle_source;

        let spreads = broadcast_spreads(&source.beam_energy, source.beam_energy_spreads)?;
        check_non_negative("particle_source.beam_energy", &source.beam_energy)?;
        check_non_negative("particle_source.beam_energy_spreads", &spreads)?;

        if let Some(bad) = self.numbers_of_histories.iter().find(|n| **n < 0) {
            return Err(ConfigError::Validation {
                field: "numbers_of_histories",
                message: format!(
                    "history counts must be >= 0, got {bad} in {:?}",
                    self.numbers_of_histories
                ),
            });
        }

        let x_bins = check_bins("scorer.x_bins", self.scorer.x_bins)?;
        let y_bins = check_bins("scorer.y_bins", self.scorer.y_bins)?;
        let z_bins = check_bins("scorer.z_bins", self.scorer.z_bins)?;

        let number_of_threads =
            u32::try_from(self.number_of_threads).map_err(|_| ConfigError::Validation {
                field: "number_of_threads",
                message: format!(
                    "thread count must be >= 0 and fit in 32 bits, got {}",
                    self.number_of_threads
                ),
            })?;
        if self.seed < 0 {
            return Err(ConfigError::Validation {
                field: "seed",
                message: format!("seed must be >= 0 (0 seeds from system time), got {}", self.seed),
            });
        }
        if self.physics_list.modules.is_empty() {
            return Err(ConfigError::Validation {
                field: "physics_list.modules",
                message: "at least one physics module is required".to_string(),
            });
        }

        let physics = self.physics_list;
        Ok(ExperimentParameters {
            experiment_name: self.experiment_name,
            overwrite_existing_experiment: self.overwrite_existing_experiment,
            number_of_threads,
            seed: self.seed as u64,
            numbers_of_histories: self
                .numbers_of_histories
                .into_iter()
                .map(|n| n as u64)
                .collect(),
            particle_source: ParticleSource {
                component: source.component,
                source_type: source.source_type,
                beam_particle: source.beam_particle,
                beam_energies: source.beam_energy,
                beam_energy_unit: source.beam_energy_unit,
                beam_energy_spreads: spreads,
                beam_position_distribution: source.beam_position_distribution,
                beam_position_cutoff_shape: source.beam_position_cutoff_shape,
                beam_position_cutoff_x: Quantity::new(
                    source.beam_position_cutoff_x,
                    source.beam_position_cutoff_x_units,
                ),
                beam_position_cutoff_y: Quantity::new(
                    source.beam_position_cutoff_y,
                    source.beam_position_cutoff_y_units,
                ),
                beam_position_spread_x: Quantity::new(
                    source.beam_position_spread_x,
                    source.beam_position_spread_x_units,
                ),
                beam_position_spread_y: Quantity::new(
                    source.beam_position_spread_y,
                    source.beam_position_spread_y_units,
                ),
                beam_angular_distribution: source.beam_angular_distribution,
                beam_angular_cutoff_x: Quantity::new(
                    source.beam_angular_cutoff_x,
                    source.beam_angular_cutoff_x_units,
                ),
                beam_angular_cutoff_y: Quantity::new(
                    source.beam_angular_cutoff_y,
                    source.beam_angular_cutoff_y_units,
                ),
                beam_angular_spread_x: Quantity::new(
                    source.beam_angular_spread_x,
                    source.beam_angular_spread_x_units,
                ),
                beam_angular_spread_y: Quantity::new(
                    source.beam_angular_spread_y,
                    source.beam_angular_spread_y_units,
                ),
            },
            physics_list: ExperimentPhysicsList {
                list_name: physics.list_name,
                list_processes: physics.list_processes,
                list_type: physics.list_type,
                modules: physics.modules,
                em_range_min: Quantity::new(physics.em_range_min, physics.em_range_min_units),
                em_range_max: Quantity::new(physics.em_range_max, physics.em_range_max_units),
            },
            scorer: Scorer {
                quantity: self.scorer.quantity,
                component: self.scorer.component,
                only_include_particles_named: self.scorer.only_include_particles_named,
                x_bins,
                y_bins,
                z_bins,
            },
        })
    }
}

/// Broadcasts a single configured spread to the length of the energies list;
/// any other length mismatch is a validation error.
fn broadcast_spreads(energies: &[f64], spreads: Vec<f64>) -> Result<Vec<f64>, ConfigError> {
    if spreads.len() == energies.len() {
        return Ok(spreads);
    }
    if spreads.len() == 1 {
        return Ok(vec![spreads[0]; energies.len()]);
    }
    Err(ConfigError::Validation {
        field: "particle_source.beam_energy_spreads",
        message: format!(
            "must have the same number of entries as beam_energy or exactly one entry; \
             got beam_energy: {energies:?} and beam_energy_spreads: {spreads:?}"
        ),
    })
}
