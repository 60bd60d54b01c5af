//! YAML configuration for the three renderers.
//!
//! ```yaml
//! all:
//!   x_tick_interval: 10
//!   legend: { columns: 2, location: "upper left" }
//! each:
//!   x_label_size: 18
//! group:
//!   share_y: false
//! ```
//!
//! Missing sections and fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::plots::{AllOptions, EachOptions, GroupOptions};

/// Options for every renderer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Single-panel options.
    pub all: AllOptions,
    /// Per-series grid options.
    pub each: EachOptions,
    /// Grouped grid options.
    pub group: GroupOptions,
}

impl PlotConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Serializes to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(|e| Error::ConfigParse {
            line: 0,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::LegendLocation;

    #[test]
    fn test_empty_is_default() {
        assert_eq!(PlotConfig::parse("{}").unwrap(), PlotConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let yaml = r#"
all:
  x_tick_interval: 10
  legend:
    columns: 2
    location: "upper left"
group:
  share_y: false
"#;
        let config = PlotConfig::parse(yaml).unwrap();
        assert_eq!(config.all.x_tick_interval, 10);
        assert_eq!(config.all.legend.columns, 2);
        assert_eq!(config.all.legend.location, LegendLocation::UpperLeft);
        assert!((config.all.legend.font_size - 10.0).abs() < f32::EPSILON);
        assert!(!config.group.share_y);
        assert!(config.group.share_x);
        assert_eq!(config.each, EachOptions::default());
    }

    #[test]
    fn test_bad_location_reports_line() {
        let yaml = "all:\n  legend:\n    location: middle\n";
        match PlotConfig::parse(yaml) {
            Err(Error::ConfigParse { line, message }) => {
                assert!(line > 0);
                assert!(message.contains("middle"));
            }
            other => panic!("expected ConfigParse, got {other:?}"),
        }
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = PlotConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(PlotConfig::parse(&yaml).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            PlotConfig::load(dir.path().join("absent.yaml")),
            Err(Error::Io(_))
        ));
    }
}
