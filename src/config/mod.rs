//! Configuration management for the Hashi solver

pub mod settings;

pub use settings::{
    CliOverrides, InputConfig, OutputConfig, OutputFormat, Settings, SolverBackend, SolverConfig,
};
