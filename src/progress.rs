use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::Duration;

/// Progress indicator manager
pub struct ProgressManager {
    enabled: bool,
    verbose: bool,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(quiet: bool, verbose: bool) -> Self {
        // Only enable progress if we're in a terminal and not in quiet mode
        let enabled = !quiet && io::stdout().is_terminal();

        Self { enabled, verbose }
    }

    /// Create a spinner for a search run
    pub fn create_search_spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap()
                .tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Some(pb)
    }

    /// Show a simple message (for verbose mode)
    pub fn show_message(&self, message: &str) {
        if self.verbose && self.enabled {
            eprintln!("🔍 {}", message);
        }
    }

    /// Check if progress is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Progress context for one search run
pub struct SearchProgress {
    spinner: Option<ProgressBar>,
    manager: Arc<ProgressManager>,
}

impl SearchProgress {
    /// Create a new search progress context
    pub fn new(manager: Arc<ProgressManager>, term: &str) -> Self {
        let message = messages::searching_term(term);
        let spinner = if manager.is_enabled() {
            manager.create_search_spinner(&message)
        } else {
            None
        };

        Self { spinner, manager }
    }

    /// Update the progress message
    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.spinner {
            pb.set_message(message.to_string());
        }
        self.manager.show_message(message);
    }

    /// Finish and clear the progress
    pub fn finish_and_clear(&self) {
        if let Some(ref pb) = self.spinner {
            pb.finish_and_clear();
        }
    }
}

impl Drop for SearchProgress {
    fn drop(&mut self) {
        if let Some(ref pb) = self.spinner {
            pb.finish_and_clear();
        }
    }
}

/// Progress messages for different operations
pub mod messages {
    pub fn searching_term(term: &str) -> String {
        format!("Searching for '{}'...", term)
    }

    pub fn run_complete(written: usize, duplicates: u32) -> String {
        format!(
            "Stored {} new case(s), skipped {} duplicate(s)",
            written, duplicates
        )
    }
}
