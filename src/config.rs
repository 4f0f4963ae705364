//! Host options: theme overrides, typesetting toggle, data seed and mount id.

use std::collections::BTreeMap;
use std::path::Path;

use egui::{Color32, Context, Visuals};
use serde::{Deserialize, Serialize};

use crate::error::{PlaygroundError, Result};

/// Environment variable naming a YAML options file (native only).
pub const OPTIONS_ENV: &str = "RESEARCH_PLAYGROUND_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundOptions {
    /// Color role -> color string. Unknown roles are ignored.
    pub theme: BTreeMap<String, String>,
    /// When false, prompts are shown as raw TeX.
    pub typeset: bool,
    /// Fixed seed for the generated datasets.
    pub seed: Option<u64>,
    /// Id of the canvas element to mount into (web only).
    pub canvas_id: Option<String>,
}

impl Default for PlaygroundOptions {
    fn default() -> Self {
        Self {
            theme: BTreeMap::new(),
            typeset: true,
            seed: None,
            canvas_id: None,
        }
    }
}

impl PlaygroundOptions {
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Canvas id to mount into. Without one the widget refuses to start.
    pub fn mount_id(&self) -> Result<&str> {
        match self.canvas_id.as_deref() {
            Some(id) if !id.trim().is_empty() => Ok(id),
            _ => Err(PlaygroundError::MissingMount("no canvas id given".into())),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Options file from the first CLI argument or [`OPTIONS_ENV`]; defaults otherwise.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self> {
        let path = std::env::args()
            .nth(1)
            .or_else(|| std::env::var(OPTIONS_ENV).ok());
        match path {
            Some(p) => {
                log::info!("reading options from {p}");
                Self::load(p)
            }
            None => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub bg: Color32,
    pub panel: Color32,
    pub fg: Color32,
    pub grid: Color32,
    pub accent: Color32,
    pub accent2: Color32,
    pub good: Color32,
    pub bad: Color32,
    pub amber: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color32::from_rgb(0x0B, 0x0F, 0x14),
            panel: Color32::from_rgb(0x0F, 0x14, 0x1A),
            fg: Color32::from_rgb(0xE8, 0xF1, 0xF8),
            grid: Color32::from_rgba_unmultiplied(255, 255, 255, 20),
            accent: Color32::from_rgb(0x7A, 0xE6, 0xFF),
            accent2: Color32::from_rgb(0xA9, 0x90, 0xFF),
            good: Color32::from_rgb(0x6B, 0xEF, 0xA3),
            bad: Color32::from_rgb(0xFF, 0x70, 0x8D),
            amber: Color32::from_rgb(0xFF, 0xB8, 0x6B),
        }
    }
}

impl Theme {
    /// Defaults with the recognized roles of `overrides` applied.
    pub fn from_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut theme = Self::default();
        for (role, value) in overrides {
            let Some(slot) = theme.role_mut(role) else {
                log::warn!("ignoring unknown theme role {role:?}");
                continue;
            };
            match parse_color(value) {
                Some(color) => *slot = color,
                None => log::warn!("theme role {role}: cannot parse color {value:?}"),
            }
        }
        theme
    }

    fn role_mut(&mut self, role: &str) -> Option<&mut Color32> {
        let slot = match role {
            "bg" => &mut self.bg,
            "panel" => &mut self.panel,
            "fg" => &mut self.fg,
            "grid" => &mut self.grid,
            "accent" => &mut self.accent,
            "accent2" => &mut self.accent2,
            "good" => &mut self.good,
            "bad" => &mut self.bad,
            "amber" => &mut self.amber,
            _ => return None,
        };
        Some(slot)
    }

    pub fn visuals(&self) -> Visuals {
        let mut visuals = Visuals::dark();
        visuals.panel_fill = self.bg;
        visuals.window_fill = self.panel;
        visuals.extreme_bg_color = self.bg;
        visuals.override_text_color = Some(self.fg);
        visuals.hyperlink_color = self.accent2;
        visuals.selection.bg_fill = self.accent.gamma_multiply(0.35);
        visuals.selection.stroke.color = self.accent;
        visuals
    }

    pub fn apply(&self, ctx: &Context) {
        ctx.set_visuals(self.visuals());
    }
}

/// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa` and `rgb(..)`/`rgba(..)` with a 0..1 alpha.
pub fn parse_color(value: &str) -> Option<Color32> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    let (inner, has_alpha) = if let Some(rest) = value.strip_prefix("rgba(") {
        (rest.strip_suffix(')')?, true)
    } else if let Some(rest) = value.strip_prefix("rgb(") {
        (rest.strip_suffix(')')?, false)
    } else {
        return None;
    };

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let expected = if has_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;
    let a = if has_alpha {
        let a = parts[3].parse::<f32>().ok()?;
        if !(0.0..=1.0).contains(&a) {
            return None;
        }
        (a * 255.0).round() as u8
    } else {
        255
    };
    Some(Color32::from_rgba_unmultiplied(r, g, b, a))
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, c) in rgb.iter_mut().zip(hex.chars()) {
                let v = c.to_digit(16)? as u8;
                *slot = v * 17;
            }
            Some(Color32::from_rgb(rgb[0], rgb[1], rgb[2]))
        }
        6 => Some(Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color32::from_rgba_unmultiplied(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            byte(6)?,
        )),
        _ => None,
    }
}
