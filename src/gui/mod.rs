mod mapping_form;
mod settings_dialog;
mod suggestions_dialog;

pub use mapping_form::MappingFormDialog;
pub use settings_dialog::SettingsDialog;
pub use suggestions_dialog::SuggestionsDialog;

use crate::actions::{MappingAction, SystemAction};
use crate::camera::{CameraPermission, CameraStatus, SimulatedCameraBackend};
use crate::detection_log::{append_detection_log, DETECTION_LOG_FILE};
use crate::mappings::{GestureMapping, MappingStore, UpsertOutcome, MAPPINGS_FILE};
use crate::settings::{Settings, SETTINGS_FILE};
use crate::simulator::{DetectionEvent, DetectionSimulator, DetectionSink};
use crate::suggestions::{AISuggestion, SuggestionFetcher, SuggestionGateway};
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Hands simulator emissions to the UI thread and wakes the frame loop so
/// they render without waiting for input.
struct ChannelSink {
    tx: Mutex<Sender<DetectionEvent>>,
    ctx: egui::Context,
}

impl DetectionSink for ChannelSink {
    fn dispatch(&self, event: DetectionEvent) {
        if let Ok(tx) = self.tx.lock() {
            let _ = tx.send(event);
        }
        self.ctx.request_repaint();
    }
}

pub struct PanelApp {
    settings: Settings,
    store: MappingStore,
    simulator: DetectionSimulator,
    detection_rx: Receiver<DetectionEvent>,
    fetcher: SuggestionFetcher,
    camera: CameraPermission,
    recognition_active: bool,
    camera_denied_notified: bool,
    last_detected: Option<DetectionEvent>,
    pending_scroll: f32,
    toasts: Toasts,
    form: MappingFormDialog,
    suggestions_dialog: SuggestionsDialog,
    settings_dialog: SettingsDialog,
}

impl PanelApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let store = MappingStore::load(MAPPINGS_FILE);
        let (tx, detection_rx) = channel();
        let sink = Arc::new(ChannelSink {
            tx: Mutex::new(tx),
            ctx: cc.egui_ctx.clone(),
        });
        let simulator = DetectionSimulator::with_interval(sink, settings.detection_interval());
        simulator.update_mappings(store.mappings().to_vec());
        let camera = CameraPermission::request(Arc::new(SimulatedCameraBackend));
        let toasts = Toasts::new().anchor(egui::Align2::RIGHT_TOP, [10.0, 10.0]);
        Self {
            settings,
            store,
            simulator,
            detection_rx,
            fetcher: SuggestionFetcher::default(),
            camera,
            recognition_active: false,
            camera_denied_notified: false,
            last_detected: None,
            pending_scroll: 0.0,
            toasts,
            form: MappingFormDialog::default(),
            suggestions_dialog: SuggestionsDialog::default(),
            settings_dialog: SettingsDialog::default(),
        }
    }

    fn notify(&mut self, kind: ToastKind, text: impl Into<String>) {
        if !self.settings.enable_toasts {
            return;
        }
        self.toasts.add(Toast {
            text: text.into().into(),
            kind,
            options: ToastOptions::default()
                .duration_in_seconds(self.settings.toast_duration as f64),
        });
    }

    fn persist_and_sync(&mut self) {
        if let Err(err) = self.store.save() {
            tracing::error!(?err, "failed to save mappings");
            self.notify(ToastKind::Error, format!("Failed to save mappings: {err}"));
        }
        self.simulator.update_mappings(self.store.mappings().to_vec());
    }

    fn drain_detections(&mut self) {
        while let Ok(event) = self.detection_rx.try_recv() {
            // An emission can race a stop by one frame; drop it.
            if !self.recognition_active {
                continue;
            }
            match &event.action {
                MappingAction::Predefined(SystemAction::ScrollUp) => {
                    self.pending_scroll += self.settings.scroll_step;
                }
                MappingAction::Predefined(SystemAction::ScrollDown) => {
                    self.pending_scroll -= self.settings.scroll_step;
                }
                _ => {}
            }
            append_detection_log(DETECTION_LOG_FILE, &event.gesture_name, event.action.label());
            let text = format!(
                "Gesture Detected! {} triggered {}",
                event.gesture_name, event.action
            );
            self.notify(ToastKind::Info, text);
            self.last_detected = Some(event);
        }
    }

    fn enforce_preconditions(&mut self) {
        let camera = self.camera.status();
        if camera == CameraStatus::Denied && !self.camera_denied_notified {
            self.camera_denied_notified = true;
            self.notify(
                ToastKind::Error,
                "Camera Access Denied: enable camera permissions to use recognition.",
            );
        }
        if self.recognition_active {
            if camera == CameraStatus::Denied {
                self.simulator.stop();
                self.recognition_active = false;
                self.last_detected = None;
                self.notify(
                    ToastKind::Info,
                    "Recognition Deactivated: camera access is required for gesture recognition.",
                );
            } else if !self.simulator.is_running() {
                // The worker wound down after the collection emptied.
                self.recognition_active = false;
                self.last_detected = None;
            }
        }
    }

    fn recognition_status(&self, camera: CameraStatus) -> (String, egui::Color32) {
        let text = if self.store.is_empty() && camera == CameraStatus::Granted {
            "Recognition: Inactive (Add Gestures)".to_string()
        } else {
            match camera {
                CameraStatus::Denied => "Recognition: Inactive (No Camera)".to_string(),
                CameraStatus::Initializing => {
                    "Recognition: Inactive (Camera initializing)".to_string()
                }
                CameraStatus::Granted if self.recognition_active => {
                    "Recognition: Active".to_string()
                }
                CameraStatus::Granted => "Recognition: Inactive".to_string(),
            }
        };
        let color = if self.recognition_active && camera == CameraStatus::Granted {
            egui::Color32::DARK_GREEN
        } else {
            egui::Color32::LIGHT_RED
        };
        (text, color)
    }

    fn apply_submission(&mut self, mapping: GestureMapping) {
        let name = mapping.gesture_name.clone();
        let action = mapping.action.label().to_string();
        let outcome = self.store.upsert(mapping);
        let title = match outcome {
            UpsertOutcome::Added => "Gesture Added",
            UpsertOutcome::Updated => "Gesture Updated",
        };
        self.notify(
            ToastKind::Success,
            format!("{title}: {name} configured for {action}."),
        );
        self.persist_and_sync();
    }

    fn accept_suggestion(&mut self, suggestion: AISuggestion) {
        match self.store.accept_suggestion(&suggestion) {
            Ok(mapping) => {
                let text = format!(
                    "Suggested Gesture Added: {} configured for {}.",
                    mapping.gesture_name, mapping.action
                );
                self.notify(ToastKind::Success, text);
                self.persist_and_sync();
            }
            Err(_) => {
                self.notify(
                    ToastKind::Info,
                    "Already Exists: this gesture mapping is already configured.",
                );
            }
        }
    }

    fn delete_mapping(&mut self, id: &str) {
        if let Some(removed) = self.store.remove(id) {
            self.notify(
                ToastKind::Info,
                format!("Gesture Deleted: {} has been removed.", removed.gesture_name),
            );
            self.persist_and_sync();
        }
    }

    fn panel_contents(&mut self, ui: &mut egui::Ui) {
        let camera = self.camera.status();
        ui.horizontal(|ui| {
            ui.heading("GestureFlow");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Settings").clicked() {
                    self.settings_dialog.open(&self.settings);
                }
                let allowed = camera == CameraStatus::Granted && !self.store.is_empty();
                let mut active = self.recognition_active;
                let toggle = ui.add_enabled(
                    allowed,
                    egui::Checkbox::new(&mut active, "Gesture Recognition"),
                );
                if toggle.changed() {
                    if active {
                        self.recognition_active = self.simulator.start();
                    } else {
                        self.simulator.stop();
                        self.recognition_active = false;
                        self.last_detected = None;
                    }
                }
            });
        });
        let (status, color) = self.recognition_status(camera);
        ui.colored_label(color, status);
        if camera == CameraStatus::Initializing {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Initializing camera...");
            });
        }
        if let Some(event) = &self.last_detected {
            if self.recognition_active {
                ui.label(format!("Last simulated action: {}", event.action));
            }
        }
        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Add New Gesture").clicked() {
                self.form.open_new();
            }
            let loading = self.fetcher.is_loading();
            if ui
                .add_enabled(!loading, egui::Button::new("Get AI Suggestions"))
                .clicked()
            {
                match SuggestionGateway::from_settings(&self.settings) {
                    Ok(gateway) => self.fetcher.begin(Arc::new(gateway)),
                    Err(err) => self.notify(
                        ToastKind::Error,
                        format!("Could not fetch AI suggestions: {err}"),
                    ),
                }
            }
            if loading {
                ui.spinner();
            }
        });
        ui.small(
            "Gesture recognition is a simulation; OS-level actions are not executed. \
             Scroll Up/Down scroll the mapping list.",
        );
        ui.separator();
        ui.heading("My Gesture Mappings");
        if self.store.is_empty() {
            ui.label("You haven't configured any gestures yet.");
            ui.small(
                "Use \"Add New Gesture\" or \"Get AI Suggestions\" to get started. \
                 Recognition enables once a gesture exists.",
            );
            return;
        }
        let mut edit_request: Option<GestureMapping> = None;
        let mut removal: Option<String> = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                if self.pending_scroll != 0.0 {
                    ui.scroll_with_delta(egui::vec2(0.0, self.pending_scroll));
                    self.pending_scroll = 0.0;
                }
                for mapping in self.store.mappings() {
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.strong(&mapping.gesture_name);
                            ui.label(mapping.action.label());
                            if let Some(desc) = &mapping.description {
                                ui.small(desc);
                            }
                        });
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui.button("Remove").clicked() {
                                    removal = Some(mapping.id.clone());
                                }
                                if ui.button("Edit").clicked() {
                                    edit_request = Some(mapping.clone());
                                }
                            },
                        );
                    });
                    ui.separator();
                }
            });
        if let Some(mapping) = edit_request {
            self.form.open_edit(&mapping);
        }
        if let Some(id) = removal {
            self.delete_mapping(&id);
        }
    }
}

impl eframe::App for PanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_detections();
        self.enforce_preconditions();

        if let Some(outcome) = self.fetcher.take_outcome() {
            match outcome {
                Ok(suggestions) => self.suggestions_dialog.open_with(suggestions),
                Err(err) => {
                    tracing::warn!(%err, "suggestion fetch surfaced to panel");
                    self.notify(
                        ToastKind::Error,
                        "Could not fetch AI suggestions. Please try again.",
                    );
                }
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| self.panel_contents(ui));

        if let Some(mapping) = self.form.ui(ctx) {
            self.apply_submission(mapping);
        }
        if let Some(suggestion) = self.suggestions_dialog.ui(ctx, &self.store) {
            self.accept_suggestion(suggestion);
        }
        if self.settings_dialog.ui(ctx, &mut self.settings) {
            if let Err(err) = self.settings.save(SETTINGS_FILE) {
                tracing::error!(?err, "failed to save settings");
                self.notify(ToastKind::Error, format!("Failed to save settings: {err}"));
            }
            let interval = self.settings.detection_interval();
            self.simulator.set_interval(interval);
        }

        if self.fetcher.is_loading() || self.camera.status() == CameraStatus::Initializing {
            ctx.request_repaint_after(Duration::from_millis(200));
        }
        self.toasts.show(ctx);
    }
}
