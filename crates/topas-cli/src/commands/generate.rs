use crate::cli::GenerateArgs;
use crate::error::Result;
use topasgen::config;
use topasgen::generator;
use topasgen::layout;
use tracing::{debug, info};

/// Runs the whole expansion: load and validate the configuration, create the
/// experiment workspace, then write one script per combination.
///
/// Any failure in loading or layout creation aborts before a single script is
/// written.
pub fn run(args: GenerateArgs) -> Result<()> {
    let params = config::load_experiment_parameters(&args.parameters)?;
    let geometry = config::load_experiment_geometry(&args.geometry)?;
    info!(
        "Loaded experiment '{}': {} beam energies x {} history counts.",
        params.experiment_name,
        params.particle_source.beam_energies.len(),
        params.numbers_of_histories.len()
    );

    let layout = layout::create_experiment_layout(
        &args.experiments_root,
        &params.experiment_name,
        params.overwrite_existing_experiment,
    )?;
    debug!("Created experiment layout: {:?}", layout);

    let written = generator::generate_scripts(&params, &geometry, &layout)?;
    for path in &written {
        debug!("Generated script: {:?}", path);
    }
    info!(
        "Wrote {} scripts to {:?}.",
        written.len(),
        layout.scripts_dir
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const PARAMETERS: &str = r#"
        experiment_name = "bragg_peak"
        overwrite_existing_experiment = false
        number_of_threads = 4
        seed = 0
        numbers_of_histories = [1000]

        [particle_source]
        component = "BeamPosition"
        type = "Beam"
        beam_particle = "proton"
        beam_energy = [150.0]
        beam_energy_unit = "MeV"
        beam_energy_spreads = [1.0]
        beam_position_distribution = "Gaussian"
        beam_position_cutoff_shape = "Ellipse"
        beam_position_cutoff_x = 10.0
        beam_position_cutoff_x_units = "cm"
        beam_position_cutoff_y = 10.0
        beam_position_cutoff_y_units = "cm"
        beam_position_spread_x = 0.65
        beam_position_spread_x_units = "cm"
        beam_position_spread_y = 0.65
        beam_position_spread_y_units = "cm"
        beam_angular_distribution = "Gaussian"
        beam_angular_cutoff_x = 90.0
        beam_angular_cutoff_x_units = "deg"
        beam_angular_cutoff_y = 90.0
        beam_angular_cutoff_y_units = "deg"
        beam_angular_spread_x = 0.0032
        beam_angular_spread_x_units = "rad"
        beam_angular_spread_y = 0.0032
        beam_angular_spread_y_units = "rad"

        [physics_list]
        list_name = "Default"
        list_processes = false
        type = "Geant4_Modular"
        modules = ["g4em-standard_opt4"]
        EM_range_min = 100.0
        EM_range_min_units = "eV"
        EM_range_max = 500.0
        EM_range_max_units = "MeV"

        [scorer]
        quantity = "DoseToMedium"
        component = "Phantom"
    "#;

    fn generate_args(dir: &Path) -> GenerateArgs {
        let cli = Cli::parse_from([
            "topas",
            "generate",
            "-p",
            dir.join("EXPERIMENT_PARAMETERS.toml").to_str().unwrap(),
            "-g",
            dir.join("EXPERIMENT_GEOMETRY.txt").to_str().unwrap(),
            "-e",
            dir.join("experiments").to_str().unwrap(),
        ]);
        let Commands::Generate(args) = cli.command;
        args
    }

    #[test]
    fn end_to_end_generates_the_expected_script() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("EXPERIMENT_PARAMETERS.toml"), PARAMETERS).unwrap();
        fs::write(
            dir.path().join("EXPERIMENT_GEOMETRY.txt"),
            "s:Ge/Phantom/Material = \"G4_WATER\"\n",
        )
        .unwrap();

        run(generate_args(dir.path())).unwrap();

        let scripts_dir = dir.path().join("experiments/bragg_peak/scripts");
        let entries: Vec<_> = fs::read_dir(&scripts_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(
            entries,
            vec!["beam_energy_150p00_MeV_number_of_histories_1000".to_string()]
        );

        let content =
            fs::read_to_string(scripts_dir.join("beam_energy_150p00_MeV_number_of_histories_1000"))
                .unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "i:Ts/NumberOfThreads = 4");
        assert_eq!(lines[1], "b:Ts/SeedFromTime = \"True\"");
        assert!(lines.contains(&"s:Ge/Phantom/Material = \"G4_WATER\""));

        assert!(dir.path().join("experiments/bragg_peak/data").is_dir());
        assert!(dir.path().join("experiments/bragg_peak/analysis").is_dir());
    }

    #[test]
    fn missing_parameters_file_aborts_before_layout_creation() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("EXPERIMENT_GEOMETRY.txt"), "").unwrap();

        let result = run(generate_args(dir.path()));
        assert!(matches!(
            result,
            Err(crate::error::CliError::Config(
                topasgen::config::ConfigError::MissingParametersFile { .. }
            ))
        ));
        assert!(!dir.path().join("experiments").exists());
    }

    #[test]
    fn existing_experiment_without_overwrite_aborts_before_generation() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("EXPERIMENT_PARAMETERS.toml"), PARAMETERS).unwrap();
        fs::write(dir.path().join("EXPERIMENT_GEOMETRY.txt"), "").unwrap();
        fs::create_dir_all(dir.path().join("experiments/bragg_peak")).unwrap();

        let result = run(generate_args(dir.path()));
        assert!(matches!(
            result,
            Err(crate::error::CliError::Layout(
                topasgen::layout::LayoutError::AlreadyExists { .. }
            ))
        ));
        assert!(!dir.path().join("experiments/bragg_peak/scripts").exists());
    }
}
