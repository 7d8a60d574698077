use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;

pub const DETECTION_LOG_FILE: &str = "detections.log";

/// Append one simulated detection to the plain-text log. Write errors are
/// swallowed; the log is best-effort.
pub fn append_detection_log(path: &str, gesture_name: &str, action: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(
            file,
            "{} {} -> {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            gesture_name,
            action
        );
    }
}
