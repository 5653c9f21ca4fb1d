use super::model::{Addr, Arg, Inst, LabelName, RegIdx, ResolvedInst};
use super::phases::parse::ParsedLine;
use super::phases::types::Located;
use derive_more::Constructor;
use itertools::Itertools;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt::Display;

/// An assembled program. Instructions are addressed from 1.
///
/// Alongside the instructions we keep the label table, and for every jump whose destination
/// was written as a label, that label (so traces can show what the source said).
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct Program {
    insts: Vec<ResolvedInst>,
    labels: HashMap<LabelName, usize>,
    origins: HashMap<usize, LabelName>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.insts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }

    pub fn insts(&self) -> &[ResolvedInst] {
        &self.insts
    }

    /// Returns `None` for any `pc` outside the program, which is exactly when the machine halts.
    pub fn get(&self, pc: Addr) -> Option<&ResolvedInst> {
        usize::try_from(pc)
            .ok()
            .and_then(|pc| pc.checked_sub(1))
            .and_then(|idx| self.insts.get(idx))
    }

    pub fn labels(&self) -> &HashMap<LabelName, usize> {
        &self.labels
    }

    pub fn label(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    pub fn origin(&self, pos: usize) -> Option<&str> {
        self.origins.get(&pos).map(String::as_str)
    }

    /// The instruction at `pos` as it was written, with a symbolic jump destination restored.
    pub fn source_form(&self, pos: usize) -> Option<Inst<RegIdx, Arg<Addr>>> {
        let inst = self.insts.get(pos.checked_sub(1)?)?.clone();
        Some(inst.map(
            |reg| reg,
            |dest| match self.origin(pos) {
                Some(label) => Arg::Label(label.to_owned()),
                None => Arg::Lit(dest),
            },
        ))
    }

    fn labels_at(&self, pos: usize) -> Vec<&str> {
        self.labels
            .iter()
            .filter(|&(_, &p)| p == pos)
            .map(|(label, _)| label.as_str())
            .sorted()
            .collect()
    }

    /// Lifts the program back into unresolved lines, one instruction per line with its labels
    /// attached (and a trailing label-only line for labels naming the end of the program).
    pub fn to_parsed_lines(&self) -> Vec<ParsedLine> {
        let label_line = |pos| {
            self.labels_at(pos)
                .into_iter()
                .map(|label| Located::<LabelName>::from(label.to_owned()))
                .collect::<Vec<_>>()
        };

        let mut lines: Vec<ParsedLine> = (1..=self.len())
            .map(|pos| ParsedLine {
                inst: self
                    .source_form(pos)
                    .map(|inst| Located::from(inst.map(Arg::Lit, |dest| dest))),
                labels: label_line(pos),
            })
            .collect();

        let trailing = label_line(self.len() + 1);
        if !trailing.is_empty() {
            lines.push(ParsedLine {
                inst: None,
                labels: trailing,
            });
        }

        lines
    }

    pub fn listing(&self) -> Listing<'_> {
        Listing(self)
    }
}

pub struct Listing<'a>(&'a Program);

impl<'a> Display for Listing<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prog = self.0;
        let label_cols: Vec<String> = (1..=prog.len() + 1)
            .map(|pos| prog.labels_at(pos).join(" "))
            .collect();
        let pad = label_cols.iter().map(String::len).max().unwrap_or(0);
        let num_pad = (prog.len() + 1).to_string().len();

        for (pos, labels) in (1..).zip(label_cols.iter()) {
            match prog.source_form(pos) {
                Some(inst) => writeln!(
                    f,
                    "{: >num_pad$}: {: <pad$}  {}",
                    pos,
                    labels,
                    inst,
                    num_pad = num_pad,
                    pad = pad
                )?,
                None if !labels.is_empty() => writeln!(
                    f,
                    "{: >num_pad$}: {: <pad$}  <halt>",
                    pos,
                    labels,
                    num_pad = num_pad,
                    pad = pad
                )?,
                None => (),
            }
        }

        Ok(())
    }
}
