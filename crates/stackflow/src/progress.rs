use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a stack operation is in flight
pub struct WaitProgress {
    progress_bar: ProgressBar,
}

impl WaitProgress {
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap(),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));

        Self { progress_bar: pb }
    }

    pub fn finish_and_clear(&self) {
        self.progress_bar.finish_and_clear();
    }
}
