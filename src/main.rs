#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use research_playground::{PlaygroundApp, PlaygroundOptions};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = match PlaygroundOptions::from_env() {
        Ok(options) => options,
        Err(e) => {
            log::error!("cannot read options: {e}");
            std::process::exit(1);
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 860.0])
            .with_title("Research Playground"),
        ..Default::default()
    };
    eframe::run_native(
        "Research Playground",
        native_options,
        Box::new(|cc| Ok(Box::new(PlaygroundApp::new(cc, options)?))),
    )
}

// The web build starts through the exported `start` function.
#[cfg(target_arch = "wasm32")]
fn main() {}
