use crate::actions::MappingAction;
use crate::mappings::GestureMapping;
use rand::Rng;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// One simulated "gesture detected" emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionEvent {
    pub mapping_id: String,
    pub gesture_name: String,
    pub action: MappingAction,
}

pub trait DetectionSink: Send + Sync {
    fn dispatch(&self, event: DetectionEvent);
}

pub type SharedMappings = Arc<Mutex<Vec<GestureMapping>>>;

struct WorkerHandle {
    stop_tx: Sender<()>,
    join: JoinHandle<()>,
}

/// Timer-driven stand-in for a real recognizer. While running, each tick
/// picks one mapping uniformly at random from the collection as it is at
/// fire time and dispatches it through the sink. No sensor input is
/// consumed.
pub struct DetectionSimulator {
    interval: Duration,
    mappings: SharedMappings,
    sink: Arc<dyn DetectionSink>,
    worker: Option<WorkerHandle>,
}

impl DetectionSimulator {
    pub fn with_interval(sink: Arc<dyn DetectionSink>, interval: Duration) -> Self {
        Self {
            interval,
            mappings: Arc::new(Mutex::new(Vec::new())),
            sink,
            worker: None,
        }
    }

    /// Replace the collection the worker samples from. Takes effect at the
    /// next tick; an empty collection makes the worker wind down.
    pub fn update_mappings(&self, mappings: Vec<GestureMapping>) {
        if let Ok(mut guard) = self.mappings.lock() {
            *guard = mappings;
        }
    }

    /// Change the tick period. Restarts the worker when one is running.
    pub fn set_interval(&mut self, interval: Duration) {
        if self.interval == interval {
            return;
        }
        self.interval = interval;
        if self.is_running() {
            self.stop();
            self.start();
        }
    }

    /// Begin emitting. Refused when the collection is empty; idempotent
    /// while already running. Returns whether the simulator is running
    /// afterwards.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return true;
        }
        let empty = self
            .mappings
            .lock()
            .map(|mappings| mappings.is_empty())
            .unwrap_or(true);
        if empty {
            tracing::warn!("detection simulator not started: no mappings configured");
            return false;
        }
        let (stop_tx, stop_rx) = mpsc::channel();
        let interval = self.interval;
        let mappings = Arc::clone(&self.mappings);
        let sink = Arc::clone(&self.sink);
        let join = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }
            // Resolve the random index against the collection length now,
            // not a snapshot taken when the worker started.
            let event = {
                let guard = match mappings.lock() {
                    Ok(guard) => guard,
                    Err(_) => break,
                };
                if guard.is_empty() {
                    break;
                }
                let idx = rand::thread_rng().gen_range(0..guard.len());
                let mapping = &guard[idx];
                DetectionEvent {
                    mapping_id: mapping.id.clone(),
                    gesture_name: mapping.gesture_name.clone(),
                    action: mapping.action.clone(),
                }
            };
            sink.dispatch(event);
        });
        self.worker = Some(WorkerHandle { stop_tx, join });
        true
    }

    /// Cancel the pending timer and join the worker. No emissions happen
    /// after this returns.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            let _ = worker.join.join();
        }
    }

    /// Whether a worker is live. Reaps a worker that wound down on its own
    /// after observing an empty collection.
    pub fn is_running(&mut self) -> bool {
        let finished = self
            .worker
            .as_ref()
            .map(|worker| worker.join.is_finished())
            .unwrap_or(false);
        if finished {
            if let Some(worker) = self.worker.take() {
                let _ = worker.join.join();
            }
            return false;
        }
        self.worker.is_some()
    }
}

impl Drop for DetectionSimulator {
    fn drop(&mut self) {
        self.stop();
    }
}
