use crate::settings::Settings;
use eframe::egui;

/// Edits the settings file in place. `ui` reports whether anything
/// changed this frame so the caller can persist and re-apply.
#[derive(Default)]
pub struct SettingsDialog {
    open: bool,
    endpoint: String,
}

impl SettingsDialog {
    pub fn open(&mut self, settings: &Settings) {
        self.open = true;
        self.endpoint = settings.suggestion_endpoint.clone().unwrap_or_default();
    }

    pub fn ui(&mut self, ctx: &egui::Context, settings: &mut Settings) -> bool {
        if !self.open {
            return false;
        }
        let mut changed = false;
        let mut close = false;
        egui::Window::new("Settings")
            .open(&mut self.open)
            .resizable(false)
            .show(ctx, |ui| {
                changed |= ui
                    .checkbox(&mut settings.enable_toasts, "Enable toasts")
                    .changed();
                changed |= ui
                    .add(
                        egui::Slider::new(&mut settings.toast_duration, 1.0..=10.0)
                            .text("Toast duration (s)"),
                    )
                    .changed();
                changed |= ui
                    .add(
                        egui::Slider::new(&mut settings.detection_interval, 1.0..=30.0)
                            .text("Detection interval (s)"),
                    )
                    .changed();
                changed |= ui
                    .add(
                        egui::Slider::new(&mut settings.scroll_step, 20.0..=400.0)
                            .text("Scroll step (px)"),
                    )
                    .changed();
                changed |= ui
                    .checkbox(&mut settings.debug_logging, "Debug logging")
                    .changed();
                ui.horizontal(|ui| {
                    ui.label("Suggestion endpoint");
                    if ui.text_edit_singleline(&mut self.endpoint).changed() {
                        let trimmed = self.endpoint.trim();
                        settings.suggestion_endpoint = if trimmed.is_empty() {
                            None
                        } else {
                            Some(trimmed.to_string())
                        };
                        changed = true;
                    }
                });
                if ui.button("Close").clicked() {
                    close = true;
                }
            });
        if close {
            self.open = false;
        }
        changed
    }
}
