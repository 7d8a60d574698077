use eframe::egui;
use gesture_flow::gui::PanelApp;
use gesture_flow::logging;
use gesture_flow::settings::{Settings, SETTINGS_FILE};

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(SETTINGS_FILE)?;
    logging::init(settings.debug_logging);

    let (width, height) = settings.window_size.unwrap_or((760, 560));
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    if let Err(err) = eframe::run_native(
        "GestureFlow",
        native_options,
        Box::new(move |cc| Box::new(PanelApp::new(cc, settings))),
    ) {
        tracing::error!(?err, "window loop ended with error");
    }
    Ok(())
}
