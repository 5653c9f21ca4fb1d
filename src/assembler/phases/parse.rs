use super::tokenize::Line;
use super::types::Located;
use crate::assembler::model::{Arg, Inst, Kind, LabelName, RawInst};
use log::debug;
use std::{fmt::Display, str::FromStr};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    UnsupportedKind(String),
    Malformed(String, Kind, usize),
    LiteralOutOfRange(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnsupportedKind(head) => {
                write!(f, "Unsupported instruction kind: '{}'", head)
            }
            Error::Malformed(head, kind, found) => write!(
                f,
                "Malformed instruction: '{}' ({}) takes {} parameter(s), found {}",
                head,
                kind,
                kind.arity(),
                found
            ),
            Error::LiteralOutOfRange(raw) => {
                write!(f, "Numeric parameter out of range: '{}'", raw)
            }
        }
    }
}

/// A line of source after parsing: an optional instruction, and the labels declared on the line.
#[derive(Debug, PartialEq, Eq, Default)]
pub struct ParsedLine {
    pub inst: Option<Located<RawInst>>,
    pub labels: Vec<Located<LabelName>>,
}

impl ParsedLine {
    pub fn kind(&self) -> Option<Kind> {
        self.inst.as_ref().map(|inst| inst.get().kind())
    }
}

/// Instruction heads start with a capital letter; anything else on a bare line is a label.
fn is_inst_head(head: &str) -> bool {
    head.chars().next().map_or(false, |c| c.is_ascii_uppercase())
}

fn param<T: FromStr>(raw: &Located<String>) -> Result<Arg<T>, Located<Error>> {
    Arg::parse(raw.get())
        .ok_or_else(|| raw.transfer(Error::LiteralOutOfRange(raw.get().clone())))
}

fn build_inst(
    head: &Located<String>,
    kind: Kind,
    params: &[Located<String>],
) -> Result<RawInst, Located<Error>> {
    Ok(match (kind, params) {
        (Kind::Zero, [r]) => Inst::Zero(param(r)?),
        (Kind::Succ, [r]) => Inst::Succ(param(r)?),
        (Kind::Transfer, [src, dst]) => Inst::Transfer(param(src)?, param(dst)?),
        (Kind::Jump, [left, right, to]) => Inst::Jump(param(left)?, param(right)?, param(to)?),
        _ => {
            return Err(head.transfer(Error::Malformed(
                head.get().clone(),
                kind,
                params.len(),
            )))
        }
    })
}

pub fn parse_line(line: Line) -> Result<ParsedLine, Located<Error>> {
    let Line {
        tokens,
        call_syntax,
    } = line;
    let mut tokens = tokens.into_iter();

    let head = match tokens.next() {
        Some(head) => head,
        None => return Ok(ParsedLine::default()),
    };

    // A line like `end` only names the next instruction.
    if !call_syntax && !is_inst_head(head.get()) {
        return Ok(ParsedLine {
            inst: None,
            labels: std::iter::once(head).chain(tokens).collect(),
        });
    }

    let kind = head.get().chars().next().and_then(Kind::from_mnemonic);
    let kind = match kind {
        Some(kind) => kind,
        None => return Err(head.map(Error::UnsupportedKind)),
    };

    let params: Vec<Located<String>> = tokens.by_ref().take(kind.arity()).collect();
    let inst = head.transfer(build_inst(&head, kind, &params)?);

    Ok(ParsedLine {
        inst: Some(inst),
        labels: tokens.collect(),
    })
}

pub fn parse(lines: Vec<Line>) -> Result<Vec<ParsedLine>, Located<Error>> {
    let parsed = lines
        .into_iter()
        .map(parse_line)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "parsed {} instructions from {} lines",
        parsed.iter().filter(|line| line.inst.is_some()).count(),
        parsed.len()
    );

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::super::tokenize::tokenize_line;
    use super::super::types::{Loc, Located};
    use super::{parse_line, Error, ParsedLine};
    use crate::assembler::model::{Arg, Inst, Kind};

    fn parse_str(line: &str) -> Result<ParsedLine, Located<Error>> {
        parse_line(tokenize_line(1, line).unwrap())
    }

    fn labels(line: &ParsedLine) -> Vec<&str> {
        line.labels.iter().map(|l| l.get().as_str()).collect()
    }

    #[test]
    fn zero() {
        let line = parse_str("Z(1)").unwrap();
        assert_eq!(line.inst.unwrap().value(), Inst::Zero(Arg::Lit(1)));
        assert!(line.labels.is_empty());
    }

    #[test]
    fn transfer() {
        let line = parse_str("T(3,1)").unwrap();
        assert_eq!(
            line.inst.unwrap().value(),
            Inst::Transfer(Arg::Lit(3), Arg::Lit(1))
        );
    }

    #[test]
    fn jump_to_label_with_labels() {
        let line = parse_str("J(1,2,end) start top").unwrap();
        assert_eq!(line.kind(), Some(Kind::Jump));
        assert_eq!(labels(&line), vec!["start", "top"]);
        assert_eq!(
            line.inst.unwrap().value(),
            Inst::Jump(Arg::Lit(1), Arg::Lit(2), Arg::Label(String::from("end")))
        );
    }

    #[test]
    fn label_in_register_slot_is_kept() {
        let line = parse_str("S(r)").unwrap();
        assert_eq!(
            line.inst.unwrap().value(),
            Inst::Succ(Arg::Label(String::from("r")))
        );
    }

    #[test]
    fn only_first_char_selects_kind() {
        let line = parse_str("Succ(4)").unwrap();
        assert_eq!(line.inst.unwrap().value(), Inst::Succ(Arg::Lit(4)));
    }

    #[test]
    fn space_separated_form() {
        let line = parse_str("S 1 here").unwrap();
        assert_eq!(line.kind(), Some(Kind::Succ));
        assert_eq!(labels(&line), vec!["here"]);
    }

    #[test]
    fn label_only_line() {
        let line = parse_str("end finish").unwrap();
        assert_eq!(line.inst, None);
        assert_eq!(labels(&line), vec!["end", "finish"]);
    }

    #[test]
    fn unsupported_kind() {
        assert_eq!(
            parse_str("  X(1)"),
            Err(Located::with_loc(
                Loc::new(1, 3),
                Error::UnsupportedKind(String::from("X"))
            ))
        );
    }

    #[test]
    fn lowercase_kind_unsupported() {
        assert!(matches!(
            parse_str("z(1)").map_err(Located::value),
            Err(Error::UnsupportedKind(_))
        ));
    }

    #[test]
    fn too_few_params() {
        assert_eq!(
            parse_str("J(1,2)"),
            Err(Located::with_loc(
                Loc::new(1, 1),
                Error::Malformed(String::from("J"), Kind::Jump, 2)
            ))
        );
        assert_eq!(
            parse_str("S").map_err(Located::value),
            Err(Error::Malformed(String::from("S"), Kind::Succ, 0))
        );
    }

    #[test]
    fn extra_tokens_become_labels() {
        let line = parse_str("Z(1,2)").unwrap();
        assert_eq!(labels(&line), vec!["2"]);
        assert_eq!(line.inst.unwrap().value(), Inst::Zero(Arg::Lit(1)));
    }

    #[test]
    fn bare_capitalised_head_is_an_instruction() {
        assert_eq!(
            parse_str("S1").map_err(Located::value),
            Err(Error::Malformed(String::from("S1"), Kind::Succ, 0))
        );
        assert_eq!(
            parse_str("Stop").map_err(Located::value),
            Err(Error::Malformed(String::from("Stop"), Kind::Succ, 0))
        );
        assert_eq!(
            parse_str("X 1"),
            Err(Located::with_loc(
                Loc::new(1, 1),
                Error::UnsupportedKind(String::from("X"))
            ))
        );
    }

    #[test]
    fn oversized_literal() {
        assert_eq!(
            parse_str("S(99999999999999999999)"),
            Err(Located::with_loc(
                Loc::new(1, 3),
                Error::LiteralOutOfRange(String::from("99999999999999999999"))
            ))
        );
        assert_eq!(
            parse_str("T(1,-2)").map_err(Located::value),
            Err(Error::LiteralOutOfRange(String::from("-2")))
        );
    }
}
