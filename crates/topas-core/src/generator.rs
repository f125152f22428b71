//! Script template generation: expands a validated configuration into one
//! TOPAS script per (beam energy, history count) combination.

use crate::config::ExperimentParameters;
use crate::layout::ExperimentLayout;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(
        "Script name '{name}' is derived by more than one (beam energy, history count) \
         combination. Beam energies must stay distinct at two-decimal precision and \
         history counts must not repeat."
    )]
    DuplicateScriptName { name: String },

    #[error("Failed to write script '{path}': {source}", path = path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

const PARTICLE_SOURCE_START: &str = "!!!particle-source-start!!!";
const PARTICLE_SOURCE_END: &str = "!!!particle-source-end!!!";
const PHYSICS_LISTS_START: &str = "!!!physics-lists-start!!!";
const PHYSICS_LISTS_END: &str = "!!!physics-lists-end!!!";
const SCORER_START: &str = "!!!scorer-start!!!";
const SCORER_END: &str = "!!!scorer-end!!!";

/// TOPAS renders booleans as the quoted tokens `"True"` / `"False"`.
fn bool_token(value: bool) -> &'static str {
    if value { "\"True\"" } else { "\"False\"" }
}

/// Renders a count-prefixed (`sv:`) value list: `<count> "a" "b" ...`.
fn count_prefixed(tokens: impl ExactSizeIterator<Item = String>) -> String {
    let mut out = tokens.len().to_string();
    for token in tokens {
        out.push_str(" \"");
        out.push_str(&token);
        out.push('"');
    }
    out
}

/// Renders the full ordered line sequence of one script: thread count, seed,
/// history count, the geometry verbatim, then the particle-source,
/// physics-list and scorer blocks.
///
/// The beam energy is rendered with exactly two decimal places wherever it
/// appears; every other numeric value uses its natural decimal form.
pub fn render_script(
    params: &ExperimentParameters,
    geometry_lines: &[String],
    energy_index: usize,
    histories: u64,
    layout: &ExperimentLayout,
) -> Vec<String> {
    let source = &params.particle_source;
    let energy = source.beam_energies[energy_index];
    let spread = source.beam_energy_spreads[energy_index];
    let unit = source.beam_energy_unit;
    let component = &source.component;

    let mut lines = Vec::with_capacity(geometry_lines.len() + 40);

    lines.push(format!("i:Ts/NumberOfThreads = {}", params.number_of_threads));
    if params.seed == 0 {
        lines.push("b:Ts/SeedFromTime = \"True\"".to_string());
    } else {
        lines.push(format!("i:Ts/Seed = {}", params.seed));
    }
    lines.push(format!(
        "i:So/{component}/NumberOfHistoriesInRun = {histories}"
    ));

    lines.extend(geometry_lines.iter().cloned());

    lines.push(PARTICLE_SOURCE_START.to_string());
    lines.push(format!("s:So/{component}/Type = \"{}\"", source.source_type));
    lines.push(format!("s:So/{component}/Component = \"{component}\""));
    lines.push(format!(
        "s:So/{component}/BeamParticle = \"{}\"",
        source.beam_particle
    ));
    lines.push(format!("d:So/{component}/BeamEnergy = {energy:.2} {unit}"));
    lines.push(format!("u:So/{component}/BeamEnergySpread = {spread}"));
    lines.push(format!(
        "s:So/{component}/BeamPositionDistribution = \"{}\"",
        source.beam_position_distribution
    ));
    lines.push(format!(
        "s:So/{component}/BeamPositionCutoffShape = \"{}\"",
        source.beam_position_cutoff_shape
    ));
    lines.push(format!(
        "d:So/{component}/BeamPositionCutoffX = {} {}",
        source.beam_position_cutoff_x.value, source.beam_position_cutoff_x.unit
    ));
    lines.push(format!(
        "d:So/{component}/BeamPositionCutoffY = {} {}",
        source.beam_position_cutoff_y.value, source.beam_position_cutoff_y.unit
    ));
    lines.push(format!(
        "d:So/{component}/BeamPositionSpreadX = {} {}",
        source.beam_position_spread_x.value, source.beam_position_spread_x.unit
    ));
    lines.push(format!(
        "d:So/{component}/BeamPositionSpreadY = {} {}",
        source.beam_position_spread_y.value, source.beam_position_spread_y.unit
    ));
    lines.push(format!(
        "s:So/{component}/BeamAngularDistribution = \"{}\"",
        source.beam_angular_distribution
    ));
    lines.push(format!(
        "d:So/{component}/BeamAngularCutoffX = {} {}",
        source.beam_angular_cutoff_x.value, source.beam_angular_cutoff_x.unit
    ));
    lines.push(format!(
        "d:So/{component}/BeamAngularCutoffY = {} {}",
        source.beam_angular_cutoff_y.value, source.beam_angular_cutoff_y.unit
    ));
    lines.push(format!(
        "d:So/{component}/BeamAngularSpreadX = {} {}",
        source.beam_angular_spread_x.value, source.beam_angular_spread_x.unit
    ));
    lines.push(format!(
        "d:So/{component}/BeamAngularSpreadY = {} {}",
        source.beam_angular_spread_y.value, source.beam_angular_spread_y.unit
    ));
    lines.push(PARTICLE_SOURCE_END.to_string());

    let physics = &params.physics_list;
    let list_name = &physics.list_name;
    lines.push(PHYSICS_LISTS_START.to_string());
    lines.push(format!("s:Ph/ListName = \"{list_name}\""));
    lines.push(format!(
        "b:Ph/ListProcesses = {}",
        bool_token(physics.list_processes)
    ));
    lines.push(format!("s:Ph/{list_name}/Type = \"{}\"", physics.list_type));
    lines.push(format!(
        "sv:Ph/{list_name}/Modules = {}",
        count_prefixed(physics.modules.iter().map(|m| m.to_string()))
    ));
    lines.push(format!(
        "d:Ph/{list_name}/EMRangeMin = {} {}",
        physics.em_range_min.value, physics.em_range_min.unit
    ));
    lines.push(format!(
        "d:Ph/{list_name}/EMRangeMax = {} {}",
        physics.em_range_max.value, physics.em_range_max.unit
    ));
    lines.push(PHYSICS_LISTS_END.to_string());

    let scorer = &params.scorer;
    let scorer_name = scorer.quantity.as_str();
    lines.push(SCORER_START.to_string());
    lines.push(format!("s:Sc/{scorer_name}/Quantity = \"{}\"", scorer.quantity));
    lines.push(format!(
        "s:Sc/{scorer_name}/Component = \"{}\"",
        scorer.component
    ));
    lines.push(format!("b:Sc/{scorer_name}/OutputToConsole = \"False\""));
    if let Some(particles) = &scorer.only_include_particles_named {
        lines.push(format!(
            "sv:Sc/{scorer_name}/OnlyIncludeParticlesNamed = {}",
            count_prefixed(particles.iter().map(|p| p.to_string()))
        ));
    }
    for (directive, bins) in [
        ("XBins", scorer.x_bins),
        ("YBins", scorer.y_bins),
        ("ZBins", scorer.z_bins),
    ] {
        if let Some(n) = bins {
            lines.push(format!("i:Sc/{scorer_name}/{directive} = {n}"));
        }
    }
    lines.push(format!(
        "s:Sc/{scorer_name}/OutputFile = \"{}\"",
        layout.data_output_path(energy, unit, histories).display()
    ));
    lines.push(SCORER_END.to_string());

    lines
}

/// Writes one script file per combination of beam energy and history count,
/// energy index varying outer and history-count index inner, and returns the
/// written paths in generation order.
///
/// Filenames are unique per combination, so no file is overwritten within a
/// single run.
pub fn generate_scripts(
    params: &ExperimentParameters,
    geometry_lines: &[String],
    layout: &ExperimentLayout,
) -> Result<Vec<PathBuf>, GeneratorError> {
    let source = &params.particle_source;

    // Distinct configured energies can still render identically at two
    // decimals, and history counts may repeat; either would silently
    // overwrite an earlier script. Reject the whole run before writing
    // anything.
    let mut seen = std::collections::HashSet::new();
    for &energy in &source.beam_energies {
        for &histories in &params.numbers_of_histories {
            let name = crate::layout::script_file_name(energy, source.beam_energy_unit, histories);
            if !seen.insert(name.clone()) {
                return Err(GeneratorError::DuplicateScriptName { name });
            }
        }
    }

    let mut written = Vec::new();

    for (energy_index, &energy) in source.beam_energies.iter().enumerate() {
        for &histories in &params.numbers_of_histories {
            let lines = render_script(params, geometry_lines, energy_index, histories, layout);
            let path = layout.script_path(energy, source.beam_energy_unit, histories);

            let mut content = lines.join("\n");
            content.push('\n');
            fs::write(&path, content).map_err(|e| GeneratorError::Write {
                path: path.clone(),
                source: e,
            })?;

            debug!("Wrote script: {:?}", path);
            written.push(path);
        }
    }

    Ok(written)
}
