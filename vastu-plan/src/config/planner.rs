//! Main PlannerConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::field::FieldConfig;
use crate::grid::RobotGeometry;
use crate::planner::DescentConfig;
use crate::rl::TrainingConfig;

use super::error::ConfigLoadError;
use super::persistence::PersistenceSection;

/// Full planner configuration loaded from YAML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct PlannerConfig {
    /// Robot footprint
    #[serde(default)]
    pub robot: RobotGeometry,

    /// Potential field gains
    #[serde(default)]
    pub field: FieldConfig,

    /// Descent planner limits
    #[serde(default)]
    pub descent: DescentConfig,

    /// Q-learning hyperparameters
    #[serde(default)]
    pub training: TrainingConfig,

    /// File locations
    #[serde(default)]
    pub persistence: PersistenceSection,

    /// RNG seed. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl PlannerConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/planner.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/planner.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Robot footprint
    pub fn robot_geometry(&self) -> RobotGeometry {
        self.robot
    }

    /// Get the potential field config
    pub fn to_field_config(&self) -> FieldConfig {
        self.field
    }

    /// Get the descent planner config
    pub fn to_descent_config(&self) -> DescentConfig {
        self.descent.clone()
    }

    /// Get the Q-learning config
    pub fn to_training_config(&self) -> TrainingConfig {
        self.training.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::{EpsilonSchedule, MapSampling};

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.robot, RobotGeometry::new(2, 2));
        assert_eq!(config.field.attract_gain, 3.0);
        assert_eq!(config.descent.max_steps, 5000);
        assert_eq!(config.training.episodes_per_map, 15_000);
        assert_eq!(config.persistence.map_dir, "maps");
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = PlannerConfig {
            seed: Some(7),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = PlannerConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
robot:
  width: 3
field:
  repulse_gain: 40.0
training:
  episodes_per_map: 200
  sampling: uniform
  epsilon:
    kind: linear
    start: 1.0
    floor: 0.05
    episodes: 100
seed: 42
"#;
        let config = PlannerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.robot_geometry(), RobotGeometry::new(3, 2));

        let field = config.to_field_config();
        assert_eq!(field.repulse_gain, 40.0);
        assert_eq!(field.attract_gain, 3.0);

        let training = config.to_training_config();
        assert_eq!(training.episodes_per_map, 200);
        assert_eq!(training.sampling, MapSampling::Uniform);
        assert!(matches!(training.epsilon, EpsilonSchedule::Linear { .. }));
        assert_eq!(training.learning_rate, 0.1);

        assert_eq!(config.to_descent_config(), DescentConfig::default());
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_parse_error() {
        let err = PlannerConfig::from_yaml("robot: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse(_)));
        assert!(err.to_string().starts_with("Invalid planner config"));
    }

    #[test]
    fn test_load_missing_file() {
        let path = Path::new("/nonexistent/planner.yaml");
        let err = PlannerConfig::load(path).unwrap_err();
        match &err {
            ConfigLoadError::Io { path: reported, source } => {
                assert_eq!(reported, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io, got {other:?}"),
        }
        assert!(err.to_string().contains("/nonexistent/planner.yaml"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
