use crate::actions::MappingAction;
use crate::mappings::MappingStore;
use crate::suggestions::AISuggestion;
use eframe::egui;

/// Modal listing the fetched suggestions. `ui` returns a suggestion the
/// user accepted this frame, if any; already-configured pairs render a
/// disabled "Added" button instead.
#[derive(Default)]
pub struct SuggestionsDialog {
    open: bool,
    suggestions: Vec<AISuggestion>,
}

impl SuggestionsDialog {
    pub fn open_with(&mut self, suggestions: Vec<AISuggestion>) {
        self.suggestions = suggestions;
        self.open = true;
    }

    pub fn ui(&mut self, ctx: &egui::Context, store: &MappingStore) -> Option<AISuggestion> {
        if !self.open {
            return None;
        }
        let mut accepted = None;
        let mut close = false;
        egui::Window::new("AI Gesture Suggestions")
            .open(&mut self.open)
            .show(ctx, |ui| {
                ui.label("Gestures suggested by the model. Add the ones you like.");
                if self.suggestions.is_empty() {
                    ui.label("No suggestions available at the moment.");
                }
                egui::ScrollArea::vertical()
                    .max_height(320.0)
                    .show(ui, |ui| {
                        for suggestion in &self.suggestions {
                            ui.horizontal(|ui| {
                                ui.vertical(|ui| {
                                    ui.strong(&suggestion.gesture);
                                    ui.label(&suggestion.action);
                                    ui.small(&suggestion.description);
                                });
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        let action =
                                            MappingAction::from(suggestion.action.clone());
                                        if store.contains_pair(&suggestion.gesture, &action) {
                                            ui.add_enabled(
                                                false,
                                                egui::Button::new("Added"),
                                            );
                                        } else if ui.button("Add").clicked() {
                                            accepted = Some(suggestion.clone());
                                        }
                                    },
                                );
                            });
                            ui.separator();
                        }
                    });
                if ui.button("Close").clicked() {
                    close = true;
                }
            });
        if close {
            self.open = false;
        }
        accepted
    }
}
