use super::types::{Loc, Located};
use log::debug;

const COMMENT_CHAR: char = '#';
const CALL_OPEN_CHAR: char = '(';
const SEPARATOR_CHARS: [char; 3] = ['(', ')', ','];

/// The tokens of a single meaningful source line.
///
/// `call_syntax` records whether the line was written as `K(...)`. The parser needs this to tell
/// an instruction apart from a line which only declares labels.
#[derive(Debug, PartialEq, Eq)]
pub struct Line {
    pub tokens: Vec<Located<String>>,
    pub call_syntax: bool,
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || SEPARATOR_CHARS.contains(&c)
}

/// Returns `None` for lines which carry nothing: blank lines, comments, and lines made up only
/// of separators.
pub fn tokenize_line(line_no: usize, line: &str) -> Option<Line> {
    if line.trim_start().starts_with(COMMENT_CHAR) {
        return None;
    }

    let mut tokens = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    for (col, (idx, c)) in line.char_indices().enumerate() {
        match (is_separator(c), start) {
            (true, Some((start_idx, start_col))) => {
                tokens.push(Located::with_loc(
                    Loc::new(line_no, start_col + 1),
                    line[start_idx..idx].to_owned(),
                ));
                start = None;
            }
            (false, None) => start = Some((idx, col)),
            _ => (),
        }
    }

    if let Some((start_idx, start_col)) = start {
        tokens.push(Located::with_loc(
            Loc::new(line_no, start_col + 1),
            line[start_idx..].to_owned(),
        ));
    }

    if tokens.is_empty() {
        return None;
    }

    Some(Line {
        tokens,
        call_syntax: line.contains(CALL_OPEN_CHAR),
    })
}

pub fn tokenize(source: &str) -> Vec<Line> {
    let lines: Vec<Line> = source
        .lines()
        .enumerate()
        .filter_map(|(line_no, line)| tokenize_line(line_no + 1, line))
        .collect();

    debug!(
        "tokenized {} meaningful lines ({} tokens)",
        lines.len(),
        lines.iter().map(|line| line.tokens.len()).sum::<usize>()
    );

    lines
}
