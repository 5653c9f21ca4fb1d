use super::interactive::{ExecutionMode, Interactor};
use super::types::Snapshot;
use crate::assembler::{model::Value, Program};
use crate::vm::{Instance, Overflow, Registers, State};
use derive_more::Constructor;
use log::info;

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// `None` runs until the program halts, however long that takes.
    pub max_steps: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct Summary {
    pub state: State,
    pub steps: u64,
    pub registers: Registers,
    pub overflow: Option<Overflow>,
}

impl Summary {
    pub fn result(&self) -> Value {
        self.registers.get(1)
    }

    pub fn timed_out(&self) -> bool {
        self.state == State::Timeout
    }
}

pub fn execute<I: Interactor>(
    cfg: &Config,
    program: &Program,
    initial: &[Value],
    interactor: &mut I,
) -> Summary {
    info!(
        "starting run of {} instructions with initial configuration {:?}",
        program.len(),
        initial
    );

    let mut vm = Instance::new(program, initial);

    let did_timeout = loop {
        if vm.state() != State::Running {
            break false;
        }

        let budget = cfg.max_steps.map(|max| max.saturating_sub(vm.steps()));
        if budget == Some(0) {
            break true;
        }

        let steps = match interactor.handle(&Snapshot::of(&vm)) {
            None => break false,
            Some(ExecutionMode::Continue) => budget,
            Some(ExecutionMode::Stepping) => Some(1),
        };

        vm.run(steps);
    };

    let summary = Summary::new(
        if did_timeout {
            State::Timeout
        } else {
            vm.state()
        },
        vm.steps(),
        vm.registers().clone(),
        vm.overflow(),
    );

    info!(
        "run stopped (in state {}) after {} steps",
        summary.state, summary.steps
    );

    interactor.teardown(&summary);
    summary
}
