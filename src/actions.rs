use serde::{Deserialize, Serialize};

/// Label of the escape-hatch entry at the end of the action picker.
pub const CUSTOM_ACTION_SENTINEL: &str = "Custom Action...";

/// Stored action value when the custom field is left blank.
pub const DEFAULT_CUSTOM_LABEL: &str = "Custom Action";

/// The closed set of built-in action labels a gesture can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemAction {
    VolumeUp,
    VolumeDown,
    MuteUnmute,
    BrightnessUp,
    BrightnessDown,
    NextTrack,
    PreviousTrack,
    PlayPauseMedia,
    SwitchApplicationForward,
    SwitchApplicationBackward,
    OpenSpotlightSearch,
    ShowDesktop,
    MissionControl,
    ScrollUp,
    ScrollDown,
    ZoomIn,
    ZoomOut,
    Undo,
    Redo,
    Copy,
    Paste,
}

impl SystemAction {
    pub const ALL: [SystemAction; 21] = [
        SystemAction::VolumeUp,
        SystemAction::VolumeDown,
        SystemAction::MuteUnmute,
        SystemAction::BrightnessUp,
        SystemAction::BrightnessDown,
        SystemAction::NextTrack,
        SystemAction::PreviousTrack,
        SystemAction::PlayPauseMedia,
        SystemAction::SwitchApplicationForward,
        SystemAction::SwitchApplicationBackward,
        SystemAction::OpenSpotlightSearch,
        SystemAction::ShowDesktop,
        SystemAction::MissionControl,
        SystemAction::ScrollUp,
        SystemAction::ScrollDown,
        SystemAction::ZoomIn,
        SystemAction::ZoomOut,
        SystemAction::Undo,
        SystemAction::Redo,
        SystemAction::Copy,
        SystemAction::Paste,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SystemAction::VolumeUp => "Volume Up",
            SystemAction::VolumeDown => "Volume Down",
            SystemAction::MuteUnmute => "Mute/Unmute",
            SystemAction::BrightnessUp => "Brightness Up",
            SystemAction::BrightnessDown => "Brightness Down",
            SystemAction::NextTrack => "Next Track",
            SystemAction::PreviousTrack => "Previous Track",
            SystemAction::PlayPauseMedia => "Play/Pause Media",
            SystemAction::SwitchApplicationForward => "Switch Application Forward",
            SystemAction::SwitchApplicationBackward => "Switch Application Backward",
            SystemAction::OpenSpotlightSearch => "Open Spotlight Search",
            SystemAction::ShowDesktop => "Show Desktop",
            SystemAction::MissionControl => "Mission Control/Task View",
            SystemAction::ScrollUp => "Scroll Up",
            SystemAction::ScrollDown => "Scroll Down",
            SystemAction::ZoomIn => "Zoom In",
            SystemAction::ZoomOut => "Zoom Out",
            SystemAction::Undo => "Undo",
            SystemAction::Redo => "Redo",
            SystemAction::Copy => "Copy",
            SystemAction::Paste => "Paste",
        }
    }

    pub fn from_label(label: &str) -> Option<SystemAction> {
        SystemAction::ALL
            .iter()
            .copied()
            .find(|action| action.label() == label)
    }
}

impl std::fmt::Display for SystemAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A mapping's target: either one of the built-in actions or free text the
/// user supplied through the custom escape hatch. Persisted as the plain
/// label string, so custom text that happens to equal a built-in label
/// rehydrates as the built-in variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum MappingAction {
    Predefined(SystemAction),
    Custom(String),
}

impl MappingAction {
    pub fn label(&self) -> &str {
        match self {
            MappingAction::Predefined(action) => action.label(),
            MappingAction::Custom(text) => text,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, MappingAction::Custom(_))
    }
}

impl From<SystemAction> for MappingAction {
    fn from(action: SystemAction) -> Self {
        MappingAction::Predefined(action)
    }
}

impl From<String> for MappingAction {
    fn from(value: String) -> Self {
        match SystemAction::from_label(&value) {
            Some(action) => MappingAction::Predefined(action),
            None => MappingAction::Custom(value),
        }
    }
}

impl From<MappingAction> for String {
    fn from(action: MappingAction) -> Self {
        match action {
            MappingAction::Predefined(action) => action.label().to_string(),
            MappingAction::Custom(text) => text,
        }
    }
}

impl std::fmt::Display for MappingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_label() {
        for action in SystemAction::ALL {
            assert_eq!(SystemAction::from_label(action.label()), Some(action));
        }
    }

    #[test]
    fn sentinel_is_not_a_system_action() {
        assert_eq!(SystemAction::from_label(CUSTOM_ACTION_SENTINEL), None);
    }

    #[test]
    fn unknown_label_becomes_custom() {
        let action = MappingAction::from("Launch Terminal".to_string());
        assert_eq!(action, MappingAction::Custom("Launch Terminal".into()));
        assert!(action.is_custom());
    }

    #[test]
    fn predefined_label_round_trips_as_predefined() {
        let action = MappingAction::from("Volume Up".to_string());
        assert_eq!(action, MappingAction::Predefined(SystemAction::VolumeUp));
        assert_eq!(String::from(action), "Volume Up");
    }
}
