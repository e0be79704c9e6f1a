use graphsniper_pipeline::{AggregateState, PipelineObserver};
use indicatif::{ProgressBar, ProgressStyle};

/// Detect if we're running in a CI environment
fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Create a spinner with a message
/// Returns a hidden spinner in CI environments or when `visible` is false
pub fn spinner(message: &str, visible: bool) -> ProgressBar {
    let pb = if visible && !is_ci() {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };

    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .expect("Failed to set progress style"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Create a bar counting processed documents.
pub fn document_bar(total: usize, visible: bool) -> ProgressBar {
    let pb = if visible && !is_ci() {
        ProgressBar::new(total as u64)
    } else {
        ProgressBar::hidden()
    };

    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .expect("Failed to set progress style")
            .progress_chars("=> "),
    );
    pb
}

/// Advances a bar once per merged document.
pub struct BarObserver(pub ProgressBar);

impl PipelineObserver for BarObserver {
    fn on_merged(&mut self, _url: &str, state: &AggregateState) {
        self.0.inc(1);
        self.0.set_message(format!(
            "{} queries, {} mutations",
            state.queries().len(),
            state.mutations().len()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ci_detects_ci_env() {
        let ci_orig = std::env::var("CI").ok();

        std::env::set_var("CI", "true");
        assert!(is_ci());

        if let Some(val) = ci_orig {
            std::env::set_var("CI", val);
        } else {
            std::env::remove_var("CI");
        }
    }

    #[test]
    fn test_spinner_creates_progressbar() {
        let pb = spinner("Loading...", true);
        pb.finish_and_clear();
    }

    #[test]
    fn test_hidden_bar_when_not_visible() {
        let pb = document_bar(10, false);
        assert!(pb.is_hidden());
    }

    #[test]
    fn test_observer_advances_bar() {
        let mut observer = BarObserver(document_bar(2, false));
        observer.on_merged("https://a.test/a.js", &AggregateState::new());
        assert_eq!(observer.0.position(), 1);
    }
}
