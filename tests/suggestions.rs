use gesture_flow::mappings::MappingStore;
use gesture_flow::suggestions::{
    parse_suggestions, AISuggestion, SuggestionFetcher, SuggestionGateway, SuggestionTransport,
    SUGGESTION_TARGET,
};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

struct MockTransport {
    body: Result<String, String>,
}

impl MockTransport {
    fn ok(body: &str) -> Self {
        Self {
            body: Ok(body.to_string()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            body: Err(message.to_string()),
        }
    }
}

impl SuggestionTransport for MockTransport {
    fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
        match &self.body {
            Ok(body) => Ok(body.clone()),
            Err(message) => Err(anyhow::anyhow!("{message}")),
        }
    }
}

const FIVE_SUGGESTIONS: &str = r#"[
  {"gesture": "Two Finger Swipe Up", "action": "Volume Up", "description": "Raise the volume."},
  {"gesture": "Two Finger Swipe Down", "action": "Volume Down", "description": "Lower the volume."},
  {"gesture": "Open Palm", "action": "Play/Pause Media", "description": "Toggle playback."},
  {"gesture": "Swipe Right", "action": "Next Track", "description": "Skip forward."},
  {"gesture": "Swipe Left", "action": "Previous Track", "description": "Skip back."}
]"#;

fn wait_outcome(fetcher: &SuggestionFetcher) -> Result<Vec<AISuggestion>, String> {
    for _ in 0..200 {
        if let Some(outcome) = fetcher.take_outcome() {
            return outcome;
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("suggestion fetch did not finish");
}

#[test]
fn parse_accepts_a_well_formed_batch() {
    let suggestions = parse_suggestions(FIVE_SUGGESTIONS).unwrap();
    assert_eq!(suggestions.len(), SUGGESTION_TARGET);
    assert_eq!(suggestions[0].gesture, "Two Finger Swipe Up");
    assert_eq!(suggestions[4].action, "Previous Track");
}

#[test]
fn parse_rejects_malformed_json() {
    assert!(parse_suggestions("not json at all").is_err());
    assert!(parse_suggestions("{\"gesture\": \"x\"}").is_err());
}

#[test]
fn parse_rejects_an_empty_field() {
    let body = r#"[{"gesture": "Wave", "action": "", "description": "Toggle audio."}]"#;
    assert!(parse_suggestions(body).is_err());
    let body = r#"[{"gesture": "   ", "action": "Copy", "description": "Copy."}]"#;
    assert!(parse_suggestions(body).is_err());
}

#[test]
fn parse_rejects_a_missing_field() {
    let body = r#"[{"gesture": "Wave", "action": "Copy"}]"#;
    assert!(parse_suggestions(body).is_err());
}

#[test]
fn gateway_is_all_or_nothing() {
    let body = r#"[
      {"gesture": "Wave", "action": "Copy", "description": "Copy."},
      {"gesture": "Pinch", "action": "", "description": "Broken."}
    ]"#;
    let gateway = SuggestionGateway::new(Box::new(MockTransport::ok(body)));
    assert!(gateway.fetch_suggestions().is_err());
}

#[test]
fn fetcher_delivers_a_successful_batch() {
    let gateway = Arc::new(SuggestionGateway::new(Box::new(MockTransport::ok(
        FIVE_SUGGESTIONS,
    ))));
    let fetcher = SuggestionFetcher::default();
    fetcher.begin(gateway);
    let suggestions = wait_outcome(&fetcher).unwrap();
    assert_eq!(suggestions.len(), 5);
    assert!(!fetcher.is_loading());
}

#[test]
fn fetcher_clears_loading_on_failure() {
    let gateway = Arc::new(SuggestionGateway::new(Box::new(MockTransport::failing(
        "connection refused",
    ))));
    let fetcher = SuggestionFetcher::default();
    fetcher.begin(gateway);
    let outcome = wait_outcome(&fetcher);
    assert!(outcome.is_err());
    assert!(!fetcher.is_loading());
    // The outcome was taken; nothing further is pending.
    assert!(fetcher.take_outcome().is_none());
}

#[test]
fn accepting_a_fetched_suggestion_twice_is_rejected() {
    let gateway = SuggestionGateway::new(Box::new(MockTransport::ok(FIVE_SUGGESTIONS)));
    let suggestions = gateway.fetch_suggestions().unwrap();
    assert_eq!(suggestions.len(), 5);

    let dir = tempdir().unwrap();
    let path = dir.path().join("gesture_mappings.json");
    let mut store = MappingStore::load(path.to_str().unwrap());

    assert!(store.accept_suggestion(&suggestions[0]).is_ok());
    assert_eq!(store.len(), 1);

    assert!(store.accept_suggestion(&suggestions[0]).is_err());
    assert_eq!(store.len(), 1);
}
