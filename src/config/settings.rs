//! Configuration settings for the Hashi solver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    pub solver: SolverConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub backend: SolverBackend,
    /// Zero disables the limit
    pub timeout_seconds: u64,
    /// Island index that anchors the connectivity layers
    pub root_island: usize,
    pub verify_solutions: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    Cadical,
    Varisat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub puzzle_pattern: String,
    pub max_puzzles: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_directory: PathBuf,
    pub format: OutputFormat,
    pub parallel: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            backend: SolverBackend::Cadical,
            timeout_seconds: 0,
            root_island: 0,
            verify_solutions: true,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            puzzle_pattern: "./puzzles/*.json".to_string(),
            max_puzzles: 100,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("output/solutions"),
            format: OutputFormat::Json,
            parallel: false,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.input.max_puzzles == 0 {
            anyhow::bail!("Maximum puzzles must be positive");
        }

        if self.input.puzzle_pattern.trim().is_empty() {
            anyhow::bail!("Puzzle pattern must not be empty");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref pattern) = cli_overrides.puzzle_pattern {
            self.input.puzzle_pattern = pattern.clone();
        }
        if let Some(max_puzzles) = cli_overrides.max_puzzles {
            self.input.max_puzzles = max_puzzles;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if let Some(backend) = cli_overrides.backend {
            self.solver.backend = backend;
        }
        if let Some(timeout) = cli_overrides.timeout_seconds {
            self.solver.timeout_seconds = timeout;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub puzzle_pattern: Option<String>,
    pub max_puzzles: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub backend: Option<SolverBackend>,
    pub timeout_seconds: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.solver.backend, SolverBackend::Cadical);
        assert_eq!(settings.solver.root_island, 0);
        assert_eq!(settings.input.puzzle_pattern, "./puzzles/*.json");
        assert_eq!(settings.input.max_puzzles, 100);
    }

    #[test]
    fn test_yaml_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut settings = Settings::default();
        settings.solver.backend = SolverBackend::Varisat;
        settings.output.format = OutputFormat::Text;
        settings.to_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("backend: varisat"));
        assert!(text.contains("format: text"));

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.solver.backend, SolverBackend::Varisat);
        assert_eq!(loaded.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_zero_max_puzzles_rejected() {
        let mut settings = Settings::default();
        settings.input.max_puzzles = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            puzzle_pattern: Some("data/*.json".to_string()),
            max_puzzles: Some(3),
            output_dir: Some(PathBuf::from("out")),
            backend: Some(SolverBackend::Varisat),
            timeout_seconds: None,
        });

        assert_eq!(settings.input.puzzle_pattern, "data/*.json");
        assert_eq!(settings.input.max_puzzles, 3);
        assert_eq!(settings.output.output_directory, PathBuf::from("out"));
        assert_eq!(settings.solver.backend, SolverBackend::Varisat);
        assert_eq!(settings.solver.timeout_seconds, 0);
    }
}
