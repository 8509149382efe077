//! Tween settings file handling
//!
//! Settings come from a TOML file with two sections:
//! - `[scheduler]` sizes the recycling pool
//! - `[presets.<name>]` defines reusable tween specs
//!
//! ```toml
//! [scheduler]
//! initial_capacity = 64
//!
//! [presets.fade_in]
//! duration = 0.25
//! ease = "out-cubic"
//!
//! [presets.pulse]
//! duration = 0.5
//! wrap_mode = "ping-pong"
//! loop_count = 3
//! ease = "in-out-sine"
//! ```

use crate::easing::{Ease, EasingSelection, Evaluator};
use crate::error::{Result, TweenError};
use crate::spec::{PlayDirection, TweenSpec, WrapMode};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level settings file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TweenSettings {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub presets: FxHashMap<String, TweenPreset>,
}

impl TweenSettings {
    /// Parse settings from TOML text, validating every preset's easing
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: TweenSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            presets = settings.presets.len(),
            "loaded tween settings"
        );
        Ok(settings)
    }

    /// Load settings from a file, or fall back to defaults when it is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn preset(&self, name: &str) -> Result<&TweenPreset> {
        self.presets
            .get(name)
            .ok_or_else(|| TweenError::UnknownPreset(name.to_string()))
    }

    /// Build a fresh spec from the named preset
    pub fn spec(&self, name: &str) -> Result<TweenSpec> {
        self.preset(name).map(TweenSpec::from_preset)
    }

    fn validate(&self) -> Result<()> {
        for preset in self.presets.values() {
            if preset.ease == Ease::Curve {
                // Curves are attached in code; a preset can only name the family
                continue;
            }
            Evaluator::from_selection(&preset.easing())?;
        }
        Ok(())
    }
}

/// Scheduler sizing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedulerConfig {
    /// Free slots pre-allocated in the recycling pool
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
}

fn default_initial_capacity() -> usize {
    64
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_capacity: default_initial_capacity(),
        }
    }
}

/// A named, reusable tween description
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TweenPreset {
    pub duration: f32,
    #[serde(default)]
    pub delay: f32,
    #[serde(default = "default_time_scale")]
    pub time_scale: f32,
    #[serde(default)]
    pub wrap_mode: WrapMode,
    #[serde(default)]
    pub loop_count: u32,
    #[serde(default)]
    pub direction: PlayDirection,
    #[serde(default)]
    pub ease: Ease,
    #[serde(default)]
    pub params: [f32; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bezier: Option<[f32; 4]>,
    #[serde(default)]
    pub tick_while_paused: bool,
    #[serde(default)]
    pub unscaled_time: bool,
}

fn default_time_scale() -> f32 {
    1.0
}

impl TweenPreset {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            delay: 0.0,
            time_scale: default_time_scale(),
            wrap_mode: WrapMode::Once,
            loop_count: 0,
            direction: PlayDirection::Forward,
            ease: Ease::Linear,
            params: [0.0, 0.0],
            bezier: None,
            tick_while_paused: false,
            unscaled_time: false,
        }
    }

    pub fn easing(&self) -> EasingSelection {
        EasingSelection {
            ease: self.ease,
            params: self.params,
            bezier: self.bezier,
            curve: None,
        }
    }
}

impl TweenSpec {
    /// Build a spec from a preset; callbacks and owner start unset
    pub fn from_preset(preset: &TweenPreset) -> Self {
        TweenSpec::new(preset.duration)
            .delay(preset.delay)
            .time_scale(preset.time_scale)
            .wrap(preset.wrap_mode)
            .loop_count(preset.loop_count)
            .direction(preset.direction)
            .easing(preset.easing())
            .tick_while_paused(preset.tick_while_paused)
            .unscaled_time(preset.unscaled_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: &str = r#"
        [scheduler]
        initial_capacity = 16

        [presets.fade_in]
        duration = 0.25
        ease = "out-cubic"

        [presets.pulse]
        duration = 0.5
        wrap_mode = "ping-pong"
        loop_count = 3
        ease = "in-out-sine"

        [presets.css_ease]
        duration = 1.0
        ease = "cubic-bezier"
        bezier = [0.25, 0.1, 0.25, 1.0]
    "#;

    #[test]
    fn test_parse_settings() {
        let settings = TweenSettings::from_toml_str(SETTINGS).unwrap();
        assert_eq!(settings.scheduler.initial_capacity, 16);
        assert_eq!(settings.presets.len(), 3);

        let pulse = settings.preset("pulse").unwrap();
        assert_eq!(pulse.wrap_mode, WrapMode::PingPong);
        assert_eq!(pulse.loop_count, 3);
        assert_eq!(pulse.ease, Ease::InOutSine);
        assert_eq!(pulse.time_scale, 1.0);
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let settings = TweenSettings::from_toml_str("").unwrap();
        assert_eq!(settings.scheduler.initial_capacity, 64);
        assert!(settings.presets.is_empty());
    }

    #[test]
    fn test_spec_from_preset() {
        let settings = TweenSettings::from_toml_str(SETTINGS).unwrap();
        let spec = settings.spec("css_ease").unwrap();
        assert_eq!(spec.duration, 1.0);
        assert_eq!(spec.easing.ease, Ease::CubicBezier);
        assert_eq!(spec.easing.bezier, Some([0.25, 0.1, 0.25, 1.0]));
    }

    #[test]
    fn test_unknown_preset() {
        let settings = TweenSettings::default();
        assert!(matches!(
            settings.preset("missing"),
            Err(TweenError::UnknownPreset(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_invalid_bezier_preset_is_rejected() {
        let result = TweenSettings::from_toml_str(
            r#"
            [presets.bad]
            duration = 1.0
            ease = "cubic-bezier"
            bezier = [1.5, 0.0, 0.5, 1.0]
            "#,
        );
        assert!(matches!(result, Err(TweenError::InvalidBezier { .. })));

        let result = TweenSettings::from_toml_str(
            r#"
            [presets.bad]
            duration = 1.0
            ease = "cubic-bezier"
            "#,
        );
        assert!(matches!(result, Err(TweenError::MissingBezierPoints)));
    }

    #[test]
    fn test_parse_error() {
        let result = TweenSettings::from_toml_str("[presets.fade]\nduration = \"slow\"");
        assert!(matches!(result, Err(TweenError::Parse(_))));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let mut settings = TweenSettings::default();
        settings
            .presets
            .insert("slide".to_string(), TweenPreset::new(0.4));
        let text = settings.to_toml_string().unwrap();
        let parsed = TweenSettings::from_toml_str(&text).unwrap();
        assert_eq!(parsed.preset("slide").unwrap(), &TweenPreset::new(0.4));
    }

    #[test]
    fn test_load_missing_file() {
        let path = Path::new("/nonexistent/glide/tweens.toml");
        assert!(matches!(TweenSettings::load(path), Err(TweenError::Io(_))));
        assert!(TweenSettings::load_or_default(path).is_ok());
    }
}
