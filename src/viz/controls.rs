use egui::{Slider, Ui};

/// Labeled range input owned by a visualization.
#[derive(Debug, Clone)]
pub struct ParamSlider {
    pub label: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub integer: bool,
}

impl ParamSlider {
    pub fn new(label: &'static str, value: f64, min: f64, max: f64, step: f64) -> Self {
        Self {
            label,
            value: value.clamp(min, max),
            min,
            max,
            step,
            integer: false,
        }
    }

    pub fn integer(mut self) -> Self {
        self.integer = true;
        self.value = self.value.floor();
        self
    }

    pub fn as_usize(&self) -> usize {
        self.value.max(0.0).floor() as usize
    }

    /// Sets the value, clamped to the range. Returns true when it changed.
    pub fn set(&mut self, value: f64) -> bool {
        let mut v = value.clamp(self.min, self.max);
        if self.integer {
            v = v.floor();
        }
        let changed = v != self.value;
        self.value = v;
        changed
    }

    /// Returns true when the user moved the slider this frame.
    pub fn show(&mut self, ui: &mut Ui) -> bool {
        let mut value = self.value;
        let mut slider = Slider::new(&mut value, self.min..=self.max)
            .text(self.label)
            .step_by(self.step);
        if self.integer {
            slider = slider.fixed_decimals(0);
        }
        ui.add(slider);
        self.set(value)
    }
}
