use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::prelude::*;

/// Progress state
enum ProgressState {
    /// Progress is running
    Running,
    /// Progress finished successfully
    Finished,
    /// Progress is hidden
    Silent,
    /// Progress is errored
    Errored,
}

/// Progress bar shown on stderr while a long corpus operation runs.
pub struct Progress {
    progress_bar: ProgressBar,
    state: ProgressState,
}

impl Progress {
    /// Creates a new Progress over `len` steps.
    pub fn new(len: u64, silent: bool) -> Result<Self> {
        let progress_bar = if silent {
            ProgressBar::hidden()
        } else {
            let progress_bar = ProgressBar::new(len);
            progress_bar.enable_steady_tick(Duration::from_millis(100));
            let style = ProgressStyle::with_template(
                "{spinner:.magenta} [{bar:30.magenta}] {pos}/{len} {msg}",
            )?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
            .progress_chars("=> ");
            progress_bar.set_style(style);
            progress_bar
        };
        Ok(Self {
            state: if silent {
                ProgressState::Silent
            } else {
                ProgressState::Running
            },
            progress_bar,
        })
    }

    pub fn message(&self, msg: &str) {
        self.progress_bar.set_message(msg.to_string());
    }

    pub fn inc(&self) {
        self.progress_bar.inc(1);
    }

    /// Stops the progress bar successfully
    pub fn ok(&mut self) {
        if let ProgressState::Running = self.state {
            self.state = ProgressState::Finished;
            self.progress_bar.finish_and_clear()
        }
    }

    /// Stops the progress bar with an error
    pub fn err(&mut self, msg: &str) {
        if let ProgressState::Running = self.state {
            self.progress_bar.abandon_with_message(msg.to_string());
            self.state = ProgressState::Errored;
        }
    }
}
