//! # TOPAS Script Generator Library
//!
//! Expands a declarative experiment configuration into the set of parameterized
//! scripts consumed by the TOPAS particle-simulation engine, one script per
//! combination of beam energy and history count.
//!
//! The library is organized in three layers:
//!
//! - **[`config`]: The Input.** Typed, validated representation of the
//!   experiment parameters (beam, physics, scoring), deserialized from TOML
//!   together with the verbatim geometry description.
//!
//! - **[`layout`]: The Workspace.** Creates the fixed three-folder experiment
//!   layout (`scripts`, `data`, `analysis`) and derives the deterministic
//!   per-combination filenames.
//!
//! - **[`generator`]: The Output.** Walks the Cartesian product of beam
//!   energies and history counts and renders one TOPAS script per combination.

pub mod config;
pub mod generator;
pub mod layout;
