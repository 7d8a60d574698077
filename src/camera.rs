use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Environment variable that makes the simulated backend report a denial.
pub const CAMERA_DENIED_ENV: &str = "GF_CAMERA_DENIED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraStatus {
    Initializing,
    Granted,
    Denied,
}

pub trait CameraBackend: Send + Sync {
    /// Ask the platform for camera access. May block; called off the UI
    /// thread.
    fn request_access(&self) -> bool;
}

/// Stand-in backend for the permission prompt. Access is granted unless
/// `GF_CAMERA_DENIED` is set. No frames are ever captured; the status only
/// gates the recognition toggle.
#[derive(Debug, Default)]
pub struct SimulatedCameraBackend;

impl CameraBackend for SimulatedCameraBackend {
    fn request_access(&self) -> bool {
        // Brief pause so the panel shows its initializing state.
        thread::sleep(Duration::from_millis(400));
        std::env::var(CAMERA_DENIED_ENV).is_err()
    }
}

/// Holds the outcome of a background permission probe.
pub struct CameraPermission {
    status: Arc<Mutex<CameraStatus>>,
}

impl CameraPermission {
    /// Start a probe on a background thread; `status()` reports
    /// `Initializing` until it answers.
    pub fn request(backend: Arc<dyn CameraBackend>) -> Self {
        let status = Arc::new(Mutex::new(CameraStatus::Initializing));
        let thread_status = Arc::clone(&status);
        thread::spawn(move || {
            let granted = backend.request_access();
            if let Ok(mut guard) = thread_status.lock() {
                *guard = if granted {
                    CameraStatus::Granted
                } else {
                    CameraStatus::Denied
                };
            }
        });
        Self { status }
    }

    pub fn status(&self) -> CameraStatus {
        self.status
            .lock()
            .map(|status| *status)
            .unwrap_or(CameraStatus::Initializing)
    }
}
