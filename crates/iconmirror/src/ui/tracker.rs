use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;

pub trait Tracker {
    fn step(&self, completed: u64, succeeded: u64) -> &Self;
    fn finish(self);
}

const PB_STYLE: &str =
    "{spinner:.blue} {prefix:>10.cyan.bold} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} ({per_sec}, {eta}) {msg}";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

static PB_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    let pb_style = match ProgressStyle::with_template(PB_STYLE) {
        Ok(pb_style) => pb_style.tick_chars(TICK).progress_chars(PB_CHARS),
        Err(_) => return None,
    };

    Some(pb_style)
});

/// Progress bar over the fetch phase.
#[derive(Clone)]
pub struct ProgressTracker {
    pb:     ProgressBar,
    finish: Option<String>,
}

impl Tracker for ProgressTracker {
    fn step(&self, completed: u64, succeeded: u64) -> &Self {
        self.pb.set_position(completed);
        self.pb.set_message(format!("{succeeded} stored"));
        self
    }

    fn finish(self) {
        match self.finish {
            Some(msg) => self.pb.finish_with_message(msg),
            None => self.pb.finish(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProgressTrackerBuilder {
    len:    Option<u64>,
    prefix: Option<String>,
    finish: Option<String>,
    hidden: bool,
}

impl ProgressTrackerBuilder {
    pub fn with_len(mut self, len: u64) -> Self {
        self.len = Some(len);
        self
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    pub fn with_finish(mut self, finish: &str) -> Self {
        self.finish = Some(finish.to_string());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn build(self) -> ProgressTracker {
        let pb = if self.hidden {
            ProgressBar::hidden()
        } else if let Some(len) = self.len {
            ProgressBar::new(len)
        } else {
            ProgressBar::new_spinner()
        };
        let pb = match PB_TEMPLATE.as_ref() {
            Some(style) => pb.with_style(style.clone()),
            None => pb,
        };
        if let Some(len) = self.len {
            pb.set_length(len);
        }
        if let Some(prefix) = self.prefix {
            pb.set_prefix(prefix);
        }

        ProgressTracker {
            pb,
            finish: self.finish,
        }
    }
}
