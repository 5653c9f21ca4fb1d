use super::{run::Summary, types::Snapshot};

pub mod console;
pub mod noninteractive;
pub mod record;

fn step_lines(snap: &Snapshot) -> Vec<String> {
    let mut lines = vec![snap.registers.to_string()];
    if let Some(next) = &snap.next {
        lines.push(format!("Next: {}", next));
    }
    lines
}

fn summary_lines(summary: &Summary) -> Vec<String> {
    vec![
        String::new(),
        format!(
            "Final configuration after {} instructions:",
            summary.steps
        ),
        summary.registers.to_string(),
        String::new(),
        format!("Result: {}", summary.result()),
    ]
}
