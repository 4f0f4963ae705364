mod helpers;
pub mod layout;
pub mod views;

use std::time::Duration;

use crate::app::PlaygroundApp;
use eframe::{App, Frame};
use egui::Context;
use layout::{bottom_panel, top_panel};

impl App for PlaygroundApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        let now = ctx.input(|i| i.time);
        if let Some(left) = self.expire_hint(now) {
            ctx.request_repaint_after(Duration::from_secs_f64(left));
        }

        // One simulation step per frame while playing.
        if self.stage.tick() {
            ctx.request_repaint();
        }

        top_panel(self, ctx);
        bottom_panel(self, ctx);
        views::ui_playground(self, ctx);
    }
}
