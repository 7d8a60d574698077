use crate::actions::{SystemAction, CUSTOM_ACTION_SENTINEL};
use crate::mappings::{ActionChoice, FieldError, GestureMapping, MappingDraft};
use eframe::egui;

/// Create/edit dialog for one mapping. `ui` returns the validated record
/// on submit; the caller routes it into the store.
#[derive(Default)]
pub struct MappingFormDialog {
    open: bool,
    editing: bool,
    draft: MappingDraft,
    errors: Vec<FieldError>,
}

impl MappingFormDialog {
    pub fn open_new(&mut self) {
        self.open = true;
        self.editing = false;
        self.draft = MappingDraft::default();
        self.errors.clear();
    }

    pub fn open_edit(&mut self, mapping: &GestureMapping) {
        self.open = true;
        self.editing = true;
        self.draft = MappingDraft::from_mapping(mapping);
        self.errors.clear();
    }

    pub fn ui(&mut self, ctx: &egui::Context) -> Option<GestureMapping> {
        if !self.open {
            return None;
        }
        let title = if self.editing {
            "Edit Gesture Mapping"
        } else {
            "Add New Gesture Mapping"
        };
        let mut submitted = None;
        let mut close = false;
        egui::Window::new(title)
            .open(&mut self.open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Gesture name");
                    ui.text_edit_singleline(&mut self.draft.gesture_name);
                });
                if let Some(err) = self
                    .errors
                    .iter()
                    .find(|e| e.field == "gesture_name")
                {
                    ui.colored_label(egui::Color32::RED, &err.message);
                }
                ui.horizontal(|ui| {
                    ui.label("Action");
                    egui::ComboBox::from_id_source("mapping_action")
                        .selected_text(self.draft.choice.label())
                        .show_ui(ui, |ui| {
                            for action in SystemAction::ALL {
                                ui.selectable_value(
                                    &mut self.draft.choice,
                                    ActionChoice::Predefined(action),
                                    action.label(),
                                );
                            }
                            ui.selectable_value(
                                &mut self.draft.choice,
                                ActionChoice::Custom,
                                CUSTOM_ACTION_SENTINEL,
                            );
                        });
                });
                if self.draft.choice == ActionChoice::Custom {
                    ui.horizontal(|ui| {
                        ui.label("Custom action");
                        ui.text_edit_singleline(&mut self.draft.custom_action);
                    });
                }
                ui.horizontal(|ui| {
                    ui.label("Description");
                    ui.text_edit_singleline(&mut self.draft.description);
                });
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    let submit_label = if self.editing {
                        "Save Changes"
                    } else {
                        "Add Gesture"
                    };
                    if ui.button(submit_label).clicked() {
                        match self.draft.validate() {
                            Ok(mapping) => {
                                submitted = Some(mapping);
                                close = true;
                            }
                            Err(errors) => self.errors = errors,
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                });
            });
        if close {
            self.open = false;
        }
        submitted
    }
}
