//! Terminal spinner shown while the trigger requests are in flight

use std::io::{self, IsTerminal, Write};
use std::time::Duration;
use tokio::task::JoinHandle;

const FRAMES: &[&str] = &["🌍", "🌎", "🌏"];
const FRAME_INTERVAL: Duration = Duration::from_millis(250);

/// Spinner drawn on stderr by a background task
pub struct Spinner {
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    /// Start spinning after `prefix`. Does nothing when disabled.
    pub fn start(prefix: String, enabled: bool) -> Self {
        if !enabled {
            return Self { handle: None };
        }

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(FRAME_INTERVAL);
            for frame in FRAMES.iter().cycle() {
                interval.tick().await;
                let mut stderr = io::stderr();
                let _ = write!(stderr, "\r{}{}", prefix, frame);
                let _ = stderr.flush();
            }
        });

        Self { handle: Some(handle) }
    }

    /// Whether a spinner should be drawn on this process's stderr
    pub fn stderr_is_terminal() -> bool {
        io::stderr().is_terminal()
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop the spinner and clear its line
    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
            let mut stderr = io::stderr();
            let _ = write!(stderr, "\r\x1b[2K");
            let _ = stderr.flush();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_spinner_is_inert() {
        let spinner = Spinner::start("Gathering results ".to_string(), false);
        assert!(!spinner.is_running());
        spinner.stop().await;
    }

    #[tokio::test]
    async fn test_enabled_spinner_stops() {
        let spinner = Spinner::start("Gathering results ".to_string(), true);
        assert!(spinner.is_running());
        tokio::time::sleep(Duration::from_millis(10)).await;
        tokio::time::timeout(Duration::from_secs(1), spinner.stop())
            .await
            .expect("stopping the spinner should not hang");
    }
}
