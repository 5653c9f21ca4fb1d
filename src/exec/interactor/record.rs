use super::super::interactive::{ExecutionMode, Interactor};
use crate::exec::{run::Summary, types::Snapshot};

/// Keeps the trace a `console::TraceInteractor` would have printed, line by line.
#[derive(Debug, Default)]
pub struct Recorder {
    pub lines: Vec<String>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl Interactor for Recorder {
    fn handle(&mut self, snap: &Snapshot) -> Option<ExecutionMode> {
        self.lines.extend(super::step_lines(snap));
        Some(ExecutionMode::Stepping)
    }

    fn teardown(&mut self, summary: &Summary) {
        self.lines.extend(super::summary_lines(summary));
    }
}
