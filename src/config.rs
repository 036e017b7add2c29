use crate::error::{Error, Result};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Multiplies every length below and the theme font size.
    pub scale: f64,
    pub ring_depth: f64,
    pub max_rings: usize,
    /// Minimum distance between two label anchors.
    pub label_spacing: f64,
    /// Shift applied to a label anchor so the glyphs centre on the wedge.
    pub label_nudge: f64,
    pub uppercase_labels: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            ring_depth: 100.0,
            max_rings: 20,
            label_spacing: 10.0,
            label_nudge: 4.0,
            uppercase_labels: true,
        }
    }
}

impl LayoutConfig {
    pub fn scaled_ring_depth(&self) -> f64 {
        self.ring_depth * self.scale
    }

    pub fn scaled_label_spacing(&self) -> f64 {
        self.label_spacing * self.scale
    }

    pub fn scaled_label_nudge(&self) -> f64 {
        self.label_nudge * self.scale
    }

    /// Side length of the square canvas.
    pub fn canvas_size(&self) -> f64 {
        self.max_rings as f64 * self.scaled_ring_depth() * 2.0
    }

    /// Rejects lengths that would collapse or invert the chart.
    pub fn validate(&self) -> Result<()> {
        let positive = [("scale", self.scale), ("ringDepth", self.ring_depth)];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidLayout {
                    message: format!("{name} must be a positive number, got {value}"),
                });
            }
        }
        let non_negative = [
            ("labelSpacing", self.label_spacing),
            ("labelNudge", self.label_nudge),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidLayout {
                    message: format!("{name} must be zero or more, got {value}"),
                });
            }
        }
        if self.max_rings == 0 {
            return Err(Error::InvalidLayout {
                message: "maxRings must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path_delimiter: char,
    pub field_delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path_delimiter: ';',
            field_delimiter: '\t',
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub input: InputConfig,
}

impl Config {
    pub fn scaled_font_size(&self) -> f64 {
        self.theme.font_size * self.layout.scale
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f64>,
    font_color: Option<String>,
    line_color: Option<String>,
    color_lightness: Option<f64>,
    color_saturation: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    scale: Option<f64>,
    ring_depth: Option<f64>,
    max_rings: Option<usize>,
    label_spacing: Option<f64>,
    label_nudge: Option<f64>,
    uppercase_labels: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct InputConfigFile {
    path_delimiter: Option<char>,
    field_delimiter: Option<char>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    input: Option<InputConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a config document (JSON, or JSON5 as a fallback) over the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents).map_err(|json5_err| {
            anyhow::anyhow!("invalid config file: {json_err} (as JSON5: {json5_err})")
        })?,
    };
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "modern" => config.theme = Theme::modern(),
            "classic" | "default" => config.theme = Theme::classic(),
            other => tracing::warn!(theme = other, "unknown theme, keeping classic"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.font_color {
            config.theme.font_color = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.color_lightness {
            config.theme.color_lightness = v.clamp(0.0, 1.0);
        }
        if let Some(v) = vars.color_saturation {
            config.theme.color_saturation = v.clamp(0.0, 1.0);
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.scale {
            config.layout.scale = v;
        }
        if let Some(v) = layout.ring_depth {
            config.layout.ring_depth = v;
        }
        if let Some(v) = layout.max_rings {
            config.layout.max_rings = v;
        }
        if let Some(v) = layout.label_spacing {
            config.layout.label_spacing = v;
        }
        if let Some(v) = layout.label_nudge {
            config.layout.label_nudge = v;
        }
        if let Some(v) = layout.uppercase_labels {
            config.layout.uppercase_labels = v;
        }
    }

    if let Some(input) = parsed.input {
        if let Some(v) = input.path_delimiter {
            config.input.path_delimiter = v;
        }
        if let Some(v) = input.field_delimiter {
            config.input.field_delimiter = v;
        }
    }

    config.layout.validate()?;
    Ok(config)
}
