use gesture_flow::actions::SystemAction;
use gesture_flow::mappings::GestureMapping;
use gesture_flow::simulator::{DetectionEvent, DetectionSimulator, DetectionSink};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Default)]
struct RecordingSink {
    events: Arc<Mutex<Vec<DetectionEvent>>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<DetectionEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl DetectionSink for RecordingSink {
    fn dispatch(&self, event: DetectionEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}

fn mapping(name: &str, action: SystemAction) -> GestureMapping {
    GestureMapping {
        id: GestureMapping::mint_id(),
        gesture_name: name.into(),
        action: action.into(),
        description: None,
    }
}

const TICK: Duration = Duration::from_millis(20);

#[test]
fn start_refused_with_empty_collection() {
    let sink = Arc::new(RecordingSink::default());
    let mut simulator = DetectionSimulator::with_interval(sink.clone(), TICK);
    assert!(!simulator.start());
    assert!(!simulator.is_running());
    thread::sleep(TICK * 3);
    assert!(sink.events().is_empty());
}

#[test]
fn start_and_stop_are_idempotent() {
    let sink = Arc::new(RecordingSink::default());
    let mut simulator = DetectionSimulator::with_interval(sink, TICK);
    simulator.update_mappings(vec![mapping("Wave", SystemAction::MuteUnmute)]);

    assert!(simulator.start());
    assert!(simulator.start());
    assert!(simulator.is_running());

    simulator.stop();
    assert!(!simulator.is_running());
    simulator.stop();
    assert!(!simulator.is_running());
}

#[test]
fn emissions_are_drawn_from_the_current_collection() {
    let sink = Arc::new(RecordingSink::default());
    let mut simulator = DetectionSimulator::with_interval(sink.clone(), TICK);
    let mappings = vec![
        mapping("Wave", SystemAction::MuteUnmute),
        mapping("Swipe Right", SystemAction::NextTrack),
        mapping("Pinch", SystemAction::ZoomOut),
    ];
    simulator.update_mappings(mappings.clone());
    assert!(simulator.start());

    thread::sleep(TICK * 10);
    simulator.stop();

    let events = sink.events();
    assert!(!events.is_empty());
    for event in &events {
        assert!(mappings.iter().any(|m| m.id == event.mapping_id
            && m.gesture_name == event.gesture_name
            && m.action == event.action));
    }
}

#[test]
fn no_emissions_after_stop() {
    let sink = Arc::new(RecordingSink::default());
    let mut simulator = DetectionSimulator::with_interval(sink.clone(), TICK);
    simulator.update_mappings(vec![mapping("Wave", SystemAction::MuteUnmute)]);
    assert!(simulator.start());
    thread::sleep(TICK * 5);
    simulator.stop();

    let count = sink.events().len();
    thread::sleep(TICK * 5);
    assert_eq!(sink.events().len(), count);
}

#[test]
fn worker_winds_down_when_the_collection_empties() {
    let sink = Arc::new(RecordingSink::default());
    let mut simulator = DetectionSimulator::with_interval(sink, TICK);
    simulator.update_mappings(vec![mapping("Wave", SystemAction::MuteUnmute)]);
    assert!(simulator.start());
    assert!(simulator.is_running());

    simulator.update_mappings(Vec::new());
    thread::sleep(TICK * 5);
    assert!(!simulator.is_running());
}

#[test]
fn replacing_the_collection_switches_the_pool() {
    let sink = Arc::new(RecordingSink::default());
    let mut simulator = DetectionSimulator::with_interval(sink.clone(), TICK);
    simulator.update_mappings(vec![mapping("Wave", SystemAction::MuteUnmute)]);
    assert!(simulator.start());
    thread::sleep(TICK * 5);

    let replacement = mapping("Fist", SystemAction::PlayPauseMedia);
    simulator.update_mappings(vec![replacement.clone()]);
    // Let any emission that raced the swap land first.
    thread::sleep(TICK * 3);
    let before = sink.events().len();
    thread::sleep(TICK * 10);
    simulator.stop();

    let events = sink.events();
    assert!(events.len() > before);
    for event in &events[before..] {
        assert_eq!(event.mapping_id, replacement.id);
    }
}

#[test]
fn restart_after_stop_works() {
    let sink = Arc::new(RecordingSink::default());
    let mut simulator = DetectionSimulator::with_interval(sink.clone(), TICK);
    simulator.update_mappings(vec![mapping("Wave", SystemAction::MuteUnmute)]);

    assert!(simulator.start());
    thread::sleep(TICK * 3);
    simulator.stop();

    assert!(simulator.start());
    assert!(simulator.is_running());
    thread::sleep(TICK * 3);
    simulator.stop();
    assert!(!sink.events().is_empty());
}
