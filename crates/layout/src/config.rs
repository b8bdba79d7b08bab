use crate::error::{LayoutError, Result};
use crate::hierarchy::Hierarchy;
use crate::runner::HierarchicalRunner;
use crate::{HierarchicalLayout, LinearLayout, RadialLayout};
use depscope_graph::{EdgeMatcher, GraphModel};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Available layout families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Cartesian tree, depth along x
    #[default]
    Linear,

    /// Concentric rings by depth
    Radial,
}

impl LayoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Linear => "linear",
            LayoutKind::Radial => "radial",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "linear" | "tree" => Ok(LayoutKind::Linear),
            "radial" => Ok(LayoutKind::Radial),
            other => Err(LayoutError::invalid_config(format!(
                "unknown layout '{other}' (expected linear or radial)"
            ))),
        }
    }
}

/// Layout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub kind: LayoutKind,

    /// Linear: distance between levels
    pub horizontal_spacing: f64,

    /// Linear: distance between leaf offsets
    pub vertical_spacing: f64,

    /// Radial: distance between rings
    pub ring_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            kind: LayoutKind::Linear,
            horizontal_spacing: 100.0,
            vertical_spacing: 50.0,
            ring_spacing: 1.0,
        }
    }
}

impl LayoutConfig {
    pub fn linear(horizontal_spacing: f64, vertical_spacing: f64) -> Self {
        Self {
            kind: LayoutKind::Linear,
            horizontal_spacing,
            vertical_spacing,
            ..Default::default()
        }
    }

    pub fn radial() -> Self {
        Self {
            kind: LayoutKind::Radial,
            ..Default::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| LayoutError::parse(e.to_string()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| LayoutError::parse(e.to_string()))
    }

    /// Load from a file; `.toml` files are read as TOML, anything else as JSON
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml(&text)?,
            _ => Self::from_json(&text)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("horizontal_spacing", self.horizontal_spacing),
            ("vertical_spacing", self.vertical_spacing),
            ("ring_spacing", self.ring_spacing),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::invalid_config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// The concrete layout described by this config
    pub fn layout(&self) -> Box<dyn HierarchicalLayout> {
        match self.kind {
            LayoutKind::Linear => Box::new(LinearLayout::new(
                self.horizontal_spacing,
                self.vertical_spacing,
            )),
            LayoutKind::Radial => Box::new(RadialLayout::new(self.ring_spacing)),
        }
    }

    /// Build the hierarchy induced by `matcher` and wrap it in a runner
    pub fn runner(&self, graph: &GraphModel, matcher: &EdgeMatcher) -> Result<HierarchicalRunner> {
        self.validate()?;
        let hierarchy = Hierarchy::build(graph, matcher);
        Ok(HierarchicalRunner::new(self.layout(), hierarchy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(LayoutConfig::default().validate().is_ok());
        assert!(LayoutConfig::radial().validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = LayoutConfig::linear(0.0, 1.0);
        assert!(config.validate().is_err());

        config.horizontal_spacing = f64::NAN;
        assert!(config.validate().is_err());

        config.horizontal_spacing = 10.0;
        config.ring_spacing = -1.0;
        assert!(config.validate().is_err());

        config.ring_spacing = 2.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml_with_defaults() {
        let config = LayoutConfig::from_toml(
            r#"
            kind = "radial"
            ring_spacing = 40.0
            "#,
        )
        .unwrap();

        assert_eq!(config.kind, LayoutKind::Radial);
        assert_eq!(config.ring_spacing, 40.0);
        assert_eq!(config.horizontal_spacing, 100.0);
        assert_eq!(config.layout().name(), "radial");
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        assert!(matches!(
            LayoutConfig::from_json(r#"{"kind": "linear", "spacing": 3}"#),
            Err(LayoutError::ParseError(_))
        ));
    }

    #[test]
    fn test_layout_kind_from_str() {
        assert_eq!("Radial".parse::<LayoutKind>().unwrap(), LayoutKind::Radial);
        assert_eq!("tree".parse::<LayoutKind>().unwrap(), LayoutKind::Linear);
        assert!("spring".parse::<LayoutKind>().is_err());
    }
}
