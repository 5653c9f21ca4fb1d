use super::parse::ParsedLine;
use super::types::Located;
use crate::assembler::{
    model::{Addr, Arg, Inst, LabelName, RawInst, RegIdx, ResolvedInst},
    program::Program,
};
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt::Display;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    UnknownLabel(LabelName),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnknownLabel(label) => write!(f, "Unknown label: '{}'", label),
        }
    }
}

/// Labels on a line without an instruction name the next instruction. When a label is declared
/// more than once the last declaration wins.
fn build_label_map(lines: &[ParsedLine]) -> HashMap<LabelName, usize> {
    let mut label_map = HashMap::new();

    let mut pos = 1;
    for line in lines {
        for label in &line.labels {
            match label_map.insert(label.get().clone(), pos) {
                Some(prev) if prev != pos => warn!(
                    "label '{}' redeclared {}, shadowing its previous position {}",
                    label.get(),
                    label.loc().map(|loc| loc.to_string()).unwrap_or_default(),
                    prev
                ),
                _ => (),
            }
        }

        if line.inst.is_some() {
            pos += 1;
        }
    }

    label_map
}

fn resolve_inst(
    inst: RawInst,
    label_map: &HashMap<LabelName, usize>,
) -> Result<ResolvedInst, Error> {
    let lookup = |label: LabelName| {
        label_map
            .get(&label)
            .copied()
            .ok_or(Error::UnknownLabel(label))
    };

    inst.try_map(
        |reg: Arg<RegIdx>| reg.resolve(lookup),
        |dest: Arg<Addr>| dest.resolve(|label| lookup(label).map(|pos| pos as Addr)),
    )
}

pub fn resolve(lines: Vec<ParsedLine>) -> Result<Program, Located<Error>> {
    let label_map = build_label_map(&lines);

    let mut origins = HashMap::new();
    let mut insts = Vec::new();
    for inst in lines.into_iter().filter_map(|line| line.inst) {
        if let Inst::Jump(_, _, Arg::Label(label)) = inst.get() {
            origins.insert(insts.len() + 1, label.clone());
        }

        insts.push(inst.map_result_value(|inst| resolve_inst(inst, &label_map))?);
    }

    debug!(
        "resolved {} instructions against {} labels ({} symbolic jumps)",
        insts.len(),
        label_map.len(),
        origins.len()
    );

    Ok(Program::new(insts, label_map, origins))
}
