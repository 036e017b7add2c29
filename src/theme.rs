use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f64,
    pub font_color: String,
    pub line_color: String,
    pub color_lightness: f64,
    pub color_saturation: f64,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "Helvetica".to_string(),
            font_size: 10.0,
            font_color: "#555555".to_string(),
            line_color: "white".to_string(),
            color_lightness: 0.85,
            color_saturation: 1.0,
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            font_color: "#1C2430".to_string(),
            line_color: "#FFFFFF".to_string(),
            color_lightness: 0.78,
            color_saturation: 0.65,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

/// Label to fill colour, one evenly spaced hue per vocabulary entry.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    colors: HashMap<String, String>,
}

impl Palette {
    pub fn new<'a, I>(vocabulary: I, theme: &Theme) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let labels: BTreeSet<&String> = vocabulary.into_iter().collect();
        let count = labels.len();
        let colors = labels
            .into_iter()
            .enumerate()
            .map(|(rank, label)| {
                let hue = rank as f64 / count as f64;
                let rgb = hls_to_rgb(hue, theme.color_lightness, theme.color_saturation);
                (label.clone(), rgb_hex(rgb))
            })
            .collect();
        Self { colors }
    }

    pub fn color(&self, label: &str) -> Option<&str> {
        self.colors.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

pub fn hls_to_rgb(hue: f64, lightness: f64, saturation: f64) -> (f64, f64, f64) {
    if saturation == 0.0 {
        return (lightness, lightness, lightness);
    }
    let m2 = if lightness <= 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let m1 = 2.0 * lightness - m2;
    (
        hue_channel(m1, m2, hue + 1.0 / 3.0),
        hue_channel(m1, m2, hue),
        hue_channel(m1, m2, hue - 1.0 / 3.0),
    )
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

pub fn rgb_hex((r, g, b): (f64, f64, f64)) -> String {
    // Channels are truncated, not rounded.
    let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}
