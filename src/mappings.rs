use crate::actions::{
    MappingAction, SystemAction, CUSTOM_ACTION_SENTINEL, DEFAULT_CUSTOM_LABEL,
};
use crate::suggestions::AISuggestion;
use serde::{Deserialize, Serialize};

pub const MAPPINGS_FILE: &str = "gesture_mappings.json";

/// A persisted association between a named gesture and an action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GestureMapping {
    pub id: String,
    pub gesture_name: String,
    pub action: MappingAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GestureMapping {
    pub fn mint_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

pub fn load_mappings(path: &str) -> anyhow::Result<Vec<GestureMapping>> {
    let content = std::fs::read_to_string(path).unwrap_or_default();
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&content)?)
}

pub fn save_mappings(path: &str, mappings: &[GestureMapping]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(mappings)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Added,
    Updated,
}

/// Returned when accepting a suggestion whose `(gesture_name, action)` pair
/// is already configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateMapping {
    pub gesture_name: String,
    pub action: MappingAction,
}

impl std::fmt::Display for DuplicateMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mapping '{}' -> '{}' already exists",
            self.gesture_name, self.action
        )
    }
}

impl std::error::Error for DuplicateMapping {}

/// The single source of truth for gesture mappings. Mutations go through
/// this store; the panel persists after each one and the simulator samples
/// a copy of the collection.
pub struct MappingStore {
    path: String,
    mappings: Vec<GestureMapping>,
}

impl MappingStore {
    /// Read the collection from `path`. Missing, empty, or malformed
    /// content yields an empty store.
    pub fn load(path: &str) -> Self {
        let mappings = match load_mappings(path) {
            Ok(mappings) => mappings,
            Err(err) => {
                tracing::warn!(?err, path, "ignoring malformed mappings file");
                Vec::new()
            }
        };
        Self {
            path: path.to_string(),
            mappings,
        }
    }

    /// Rewrite the whole collection under the store's path.
    pub fn save(&self) -> anyhow::Result<()> {
        save_mappings(&self.path, &self.mappings)
    }

    pub fn mappings(&self) -> &[GestureMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Replace the record with the same `id`, keeping its position, or
    /// append a new one at the end.
    pub fn upsert(&mut self, mapping: GestureMapping) -> UpsertOutcome {
        match self.mappings.iter_mut().find(|m| m.id == mapping.id) {
            Some(existing) => {
                *existing = mapping;
                UpsertOutcome::Updated
            }
            None => {
                self.mappings.push(mapping);
                UpsertOutcome::Added
            }
        }
    }

    /// Remove the record matching `id`. No-op when absent.
    pub fn remove(&mut self, id: &str) -> Option<GestureMapping> {
        let idx = self.mappings.iter().position(|m| m.id == id)?;
        Some(self.mappings.remove(idx))
    }

    pub fn contains_pair(&self, gesture_name: &str, action: &MappingAction) -> bool {
        self.mappings
            .iter()
            .any(|m| m.gesture_name == gesture_name && m.action == *action)
    }

    /// Mint a new record from a suggestion, rejecting duplicates of the
    /// `(gesture_name, action)` pair without mutating the collection.
    pub fn accept_suggestion(
        &mut self,
        suggestion: &AISuggestion,
    ) -> Result<GestureMapping, DuplicateMapping> {
        let action = MappingAction::from(suggestion.action.clone());
        if self.contains_pair(&suggestion.gesture, &action) {
            return Err(DuplicateMapping {
                gesture_name: suggestion.gesture.clone(),
                action,
            });
        }
        let mapping = GestureMapping {
            id: GestureMapping::mint_id(),
            gesture_name: suggestion.gesture.clone(),
            action,
            description: if suggestion.description.trim().is_empty() {
                None
            } else {
                Some(suggestion.description.clone())
            },
        };
        self.mappings.push(mapping.clone());
        Ok(mapping)
    }
}

/// State of the action picker while a mapping is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionChoice {
    Predefined(SystemAction),
    Custom,
}

impl ActionChoice {
    pub fn label(self) -> &'static str {
        match self {
            ActionChoice::Predefined(action) => action.label(),
            ActionChoice::Custom => CUSTOM_ACTION_SENTINEL,
        }
    }
}

impl Default for ActionChoice {
    fn default() -> Self {
        ActionChoice::Predefined(SystemAction::ALL[0])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// In-progress form state for creating or editing one mapping.
#[derive(Debug, Clone, Default)]
pub struct MappingDraft {
    /// `Some` while editing an existing record; its id is reused on submit.
    pub id: Option<String>,
    pub gesture_name: String,
    pub choice: ActionChoice,
    pub custom_action: String,
    pub description: String,
}

impl MappingDraft {
    /// Pre-populate from an existing record. A stored action outside the
    /// predefined set routes into the custom field with the sentinel
    /// selected.
    pub fn from_mapping(mapping: &GestureMapping) -> Self {
        let (choice, custom_action) = match &mapping.action {
            MappingAction::Predefined(action) => (ActionChoice::Predefined(*action), String::new()),
            MappingAction::Custom(text) => (ActionChoice::Custom, text.clone()),
        };
        Self {
            id: Some(mapping.id.clone()),
            gesture_name: mapping.gesture_name.clone(),
            choice,
            custom_action,
            description: mapping.description.clone().unwrap_or_default(),
        }
    }

    /// Check field constraints and produce the finished mapping: the
    /// existing id is reused when editing, a fresh one is minted when
    /// creating.
    pub fn validate(&self) -> Result<GestureMapping, Vec<FieldError>> {
        let mut errors = Vec::new();
        let gesture_name = self.gesture_name.trim();
        if gesture_name.chars().count() < 2 {
            errors.push(FieldError::new(
                "gesture_name",
                "Gesture name must be at least 2 characters.",
            ));
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        let action = match self.choice {
            ActionChoice::Predefined(action) => MappingAction::Predefined(action),
            ActionChoice::Custom => {
                let text = self.custom_action.trim();
                if text.is_empty() {
                    MappingAction::Custom(DEFAULT_CUSTOM_LABEL.to_string())
                } else {
                    MappingAction::Custom(text.to_string())
                }
            }
        };
        let description = self.description.trim();
        Ok(GestureMapping {
            id: self
                .id
                .clone()
                .unwrap_or_else(GestureMapping::mint_id),
            gesture_name: gesture_name.to_string(),
            action,
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
        })
    }
}
