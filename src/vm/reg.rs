use crate::assembler::model::{RegIdx, Value};
use itertools::Itertools;
use std::{collections::BTreeMap, fmt::Display};

/// The register file: sparse, with every register never written reading as zero.
///
/// We also remember the highest register index ever touched (by the initial configuration, a
/// read, or a write), since that is how far a dump of the registers extends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registers {
    regs: BTreeMap<RegIdx, Value>,
    highest: RegIdx,
}

impl Display for Registers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.values().join(" "))
    }
}

impl Registers {
    /// Registers `1..=initial.len()` take the given values.
    pub fn new(initial: &[Value]) -> Self {
        Registers {
            regs: (1..).zip(initial.iter().copied()).collect(),
            highest: initial.len(),
        }
    }

    /// Looks a register up without marking it as referenced.
    pub fn get(&self, r: RegIdx) -> Value {
        self.regs.get(&r).copied().unwrap_or(0)
    }

    pub fn read(&mut self, r: RegIdx) -> Value {
        self.touch(r);
        self.get(r)
    }

    pub fn set(&mut self, r: RegIdx, val: Value) {
        self.touch(r);
        self.regs.insert(r, val);
    }

    fn touch(&mut self, r: RegIdx) {
        self.highest = self.highest.max(r);
    }

    /// The last register shown in a dump; always at least register 1.
    pub fn highest(&self) -> RegIdx {
        self.highest.max(1)
    }

    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        (1..=self.highest()).map(move |r| self.get(r))
    }
}
