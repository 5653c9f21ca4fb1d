use super::super::interactive::{ExecutionMode, Interactor};
use crate::exec::{run::Summary, types::Snapshot};
use ansi_term::Color;

fn print_end_marginal(summary: &Summary) {
    if summary.timed_out() {
        println!(
            "{}",
            Color::Yellow
                .bold()
                .paint(format!("Step limit reached after {} instructions", summary.steps))
        );
    }

    if let Some(overflow) = summary.overflow {
        println!(
            "{}",
            Color::Red.bold().paint(format!(
                "Stopped after {} instructions: {}",
                summary.steps, overflow
            ))
        );
    }

    for line in super::summary_lines(summary) {
        println!("{}", line);
    }
}

/// Prints the registers and the upcoming instruction before every step.
pub struct TraceInteractor;

impl Interactor for TraceInteractor {
    fn handle(&mut self, snap: &Snapshot) -> Option<ExecutionMode> {
        for line in super::step_lines(snap) {
            println!("{}", line);
        }

        Some(ExecutionMode::Stepping)
    }

    fn teardown(&mut self, summary: &Summary) {
        print_end_marginal(summary);
    }
}

/// Only prints the final configuration.
pub struct QuietInteractor;

impl Interactor for QuietInteractor {
    fn handle(&mut self, _: &Snapshot) -> Option<ExecutionMode> {
        Some(ExecutionMode::Continue)
    }

    fn teardown(&mut self, summary: &Summary) {
        print_end_marginal(summary);
    }
}
