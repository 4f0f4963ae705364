pub mod answer;
pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod session;
pub mod tex;
pub mod ui;
pub mod viz;

pub use app::PlaygroundApp;
pub use config::PlaygroundOptions;
pub use error::{PlaygroundError, Result};

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use crate::{PlaygroundApp, PlaygroundError, PlaygroundOptions};

    /// Mounts the playground into the canvas named by `canvas_id`.
    /// `options_yaml` may be empty.
    #[wasm_bindgen]
    pub async fn start(canvas_id: Option<String>, options_yaml: String) -> Result<(), JsValue> {
        eframe::WebLogger::init(log::LevelFilter::Info).ok();

        let mut options = PlaygroundOptions::from_yaml(&options_yaml)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        if canvas_id.is_some() {
            options.canvas_id = canvas_id;
        }
        let canvas = find_canvas(&options).map_err(|e| {
            log::error!("{e}");
            JsValue::from_str(&e.to_string())
        })?;

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(move |cc| Ok(Box::new(PlaygroundApp::new(cc, options)?))),
            )
            .await
    }

    fn find_canvas(
        options: &PlaygroundOptions,
    ) -> Result<web_sys::HtmlCanvasElement, PlaygroundError> {
        let id = options.mount_id()?;
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
            .ok_or_else(|| PlaygroundError::MissingMount(format!("no canvas with id {id:?}")))
    }
}
