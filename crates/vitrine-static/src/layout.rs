//! Per-component preview layout.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

/// Scale used for every component without an override.
pub const DEFAULT_SCALE: f64 = 0.75;

/// Smallest accepted scale. Card classes carry two decimals, so anything
/// smaller would print as `scale-[0]`.
pub const MIN_SCALE: f64 = 0.01;

/// How a preview frame is scaled inside its card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Visual scale applied to the frame
    pub scale_factor: f64,
    /// Frame width as a percentage of its container
    pub container_width_percent: f64,
    /// Frame height as a percentage of its container
    pub container_height_percent: f64,
}

impl LayoutConfig {
    /// Layout for a scale, with the frame inflated by the inverse of the
    /// scale so the scaled frame still fills its slot.
    pub fn from_scale(scale_factor: f64) -> Result<Self, LayoutError> {
        if !scale_factor.is_finite() || scale_factor < MIN_SCALE {
            return Err(LayoutError::InvalidScale(scale_factor));
        }

        let percent = 100.0 / scale_factor;
        Ok(Self {
            scale_factor,
            container_width_percent: percent,
            container_height_percent: percent,
        })
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE,
            container_width_percent: 100.0 / DEFAULT_SCALE,
            container_height_percent: 100.0 / DEFAULT_SCALE,
        }
    }
}

/// Layout settings as written in configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LayoutSettings {
    /// Default scale
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Scale overrides keyed by exact component name
    #[serde(default = "default_overrides")]
    pub overrides: BTreeMap<String, f64>,
}

fn default_scale() -> f64 {
    DEFAULT_SCALE
}

fn default_overrides() -> BTreeMap<String, f64> {
    // Fieldset packs several controls and needs the extra room.
    BTreeMap::from([("Fieldset".to_string(), 0.55)])
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            overrides: default_overrides(),
        }
    }
}

/// Errors for invalid layout settings.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid preview scale {0}: must be a number of at least 0.01")]
    InvalidScale(f64),

    #[error("Invalid preview scale for {name}: {source}")]
    InvalidOverride {
        name: String,
        #[source]
        source: Box<LayoutError>,
    },
}

/// Resolves a component name to its layout.
#[derive(Debug, Clone)]
pub struct LayoutResolver {
    default: LayoutConfig,
    overrides: HashMap<String, LayoutConfig>,
}

impl LayoutResolver {
    /// Resolver with the given default scale and no overrides.
    pub fn new(scale: f64) -> Result<Self, LayoutError> {
        Ok(Self {
            default: LayoutConfig::from_scale(scale)?,
            overrides: HashMap::new(),
        })
    }

    /// Build a resolver from configuration.
    pub fn from_settings(settings: &LayoutSettings) -> Result<Self, LayoutError> {
        settings
            .overrides
            .iter()
            .try_fold(Self::new(settings.scale)?, |resolver, (name, scale)| {
                resolver.with_override(name, *scale)
            })
    }

    /// Add a scale override for a component name.
    pub fn with_override(mut self, name: &str, scale: f64) -> Result<Self, LayoutError> {
        let layout =
            LayoutConfig::from_scale(scale).map_err(|e| LayoutError::InvalidOverride {
                name: name.to_string(),
                source: Box::new(e),
            })?;
        self.overrides.insert(name.to_string(), layout);
        Ok(self)
    }

    /// Resolve the layout for a component. Unknown names get the default.
    pub fn resolve(&self, name: &str) -> LayoutConfig {
        self.overrides.get(name).copied().unwrap_or(self.default)
    }
}

impl Default for LayoutResolver {
    fn default() -> Self {
        Self::from_settings(&LayoutSettings::default()).expect("Default layout settings are valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn unknown_component_gets_default() {
        let layout = LayoutResolver::default().resolve("Buttons");

        assert!(approx(layout.scale_factor, 0.75));
        assert!(approx(layout.container_width_percent, 100.0 / 0.75));
        assert!(approx(layout.container_height_percent, 100.0 / 0.75));
    }

    #[test]
    fn fieldset_is_denser() {
        let layout = LayoutResolver::default().resolve("Fieldset");

        assert!(approx(layout.scale_factor, 0.55));
        assert!(approx(layout.container_width_percent, 100.0 / 0.55));
    }

    #[test]
    fn override_match_is_exact() {
        let resolver = LayoutResolver::default();

        assert!(approx(resolver.resolve("fieldset").scale_factor, 0.75));
        assert!(approx(resolver.resolve("Fieldset ").scale_factor, 0.75));
    }

    #[test]
    fn builds_from_settings() {
        let settings = LayoutSettings {
            scale: 0.5,
            overrides: BTreeMap::from([("Tabs".to_string(), 0.8)]),
        };

        let resolver = LayoutResolver::from_settings(&settings).unwrap();

        assert!(approx(resolver.resolve("Tabs").scale_factor, 0.8));
        assert!(approx(resolver.resolve("Fieldset").scale_factor, 0.5));
        assert!(approx(resolver.resolve("Other").container_width_percent, 200.0));
    }

    #[test]
    fn rejects_non_positive_scale() {
        assert!(matches!(
            LayoutResolver::new(0.0),
            Err(LayoutError::InvalidScale(_))
        ));
        assert!(matches!(
            LayoutConfig::from_scale(f64::NAN),
            Err(LayoutError::InvalidScale(_))
        ));
    }

    #[test]
    fn rejects_scale_below_two_decimals() {
        assert!(matches!(
            LayoutConfig::from_scale(0.004),
            Err(LayoutError::InvalidScale(s)) if s == 0.004
        ));
        assert!(matches!(
            LayoutConfig::from_scale(-0.5),
            Err(LayoutError::InvalidScale(_))
        ));

        let smallest = LayoutConfig::from_scale(MIN_SCALE).unwrap();
        assert!(approx(smallest.container_width_percent, 10000.0));
    }

    #[test]
    fn rejects_invalid_override() {
        let result = LayoutResolver::new(0.75).unwrap().with_override("Tabs", -1.0);

        assert!(matches!(
            result,
            Err(LayoutError::InvalidOverride { ref name, .. }) if name == "Tabs"
        ));
    }
}
