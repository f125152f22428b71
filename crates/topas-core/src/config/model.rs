use super::tokens::{
    AngleUnit, BeamAngularDistribution, BeamParticle, BeamPositionCutoffShape,
    BeamPositionDistribution, EnergyUnit, LengthUnit, ParticleSourceType, ParticleType,
    PhysicsListModule, PhysicsListType, ScorerQuantity,
};

/// A numeric value paired with its unit token, rendered as `<value> <unit>`
/// in dimensioned (`d:`) script directives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity<U> {
    pub value: f64,
    pub unit: U,
}

impl<U> Quantity<U> {
    pub fn new(value: f64, unit: U) -> Self {
        Self { value, unit }
    }
}

/// A named beam source attached to a geometry component.
///
/// `beam_energy_spreads` always has the same length as `beam_energies`; the
/// broadcast of a single configured spread happens during validation, before
/// this value is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSource {
    pub component: String,
    pub source_type: ParticleSourceType,
    pub beam_particle: BeamParticle,
    pub beam_energies: Vec<f64>,
    pub beam_energy_unit: EnergyUnit,
    pub beam_energy_spreads: Vec<f64>,
    pub beam_position_distribution: BeamPositionDistribution,
    pub beam_position_cutoff_shape: BeamPositionCutoffShape,
    pub beam_position_cutoff_x: Quantity<LengthUnit>,
    pub beam_position_cutoff_y: Quantity<LengthUnit>,
    pub beam_position_spread_x: Quantity<LengthUnit>,
    pub beam_position_spread_y: Quantity<LengthUnit>,
    pub beam_angular_distribution: BeamAngularDistribution,
    pub beam_angular_cutoff_x: Quantity<AngleUnit>,
    pub beam_angular_cutoff_y: Quantity<AngleUnit>,
    pub beam_angular_spread_x: Quantity<AngleUnit>,
    pub beam_angular_spread_y: Quantity<AngleUnit>,
}

/// A modular physics list selection. `modules` is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentPhysicsList {
    pub list_name: String,
    pub list_processes: bool,
    pub list_type: PhysicsListType,
    pub modules: Vec<PhysicsListModule>,
    pub em_range_min: Quantity<EnergyUnit>,
    pub em_range_max: Quantity<EnergyUnit>,
}

/// A scoring-quantity collector attached to a geometry component.
///
/// The particle filter and the per-axis bin counts are emitted only when
/// configured; absence means the corresponding directive is omitted entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorer {
    pub quantity: ScorerQuantity,
    pub component: String,
    pub only_include_particles_named: Option<Vec<ParticleType>>,
    pub x_bins: Option<u32>,
    pub y_bins: Option<u32>,
    pub z_bins: Option<u32>,
}

/// The root experiment configuration, constructed once per run by validating
/// the deserialized parameters file and read-only thereafter.
///
/// A `seed` of 0 means "seed the simulator from system time".
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentParameters {
    pub experiment_name: String,
    pub overwrite_existing_experiment: bool,
    pub number_of_threads: u32,
    pub seed: u64,
    pub numbers_of_histories: Vec<u64>,
    pub particle_source: ParticleSource,
    pub physics_list: ExperimentPhysicsList,
    pub scorer: Scorer,
}
