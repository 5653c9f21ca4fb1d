use crate::assembler::model::{Addr, Arg, Inst, RegIdx};
use crate::vm::{self, Registers};
use std::convert::TryFrom;

/// Everything an interactor gets to see of the machine before a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub state: vm::State,
    pub pc: Addr,
    pub steps: u64,
    pub registers: Registers,
    pub next: Option<Inst<RegIdx, Arg<Addr>>>,
}

impl Snapshot {
    pub fn of(vm: &vm::Instance) -> Self {
        Self {
            state: vm.state(),
            pc: vm.pc(),
            steps: vm.steps(),
            registers: vm.registers().clone(),
            next: usize::try_from(vm.pc())
                .ok()
                .and_then(|pc| vm.program().source_form(pc)),
        }
    }
}
