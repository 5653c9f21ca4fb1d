use super::super::interactive::{ExecutionMode, Interactor as TraitInteractor};
use crate::exec::{run::Summary, types::Snapshot};

pub struct Interactor;

impl TraitInteractor for Interactor {
    fn handle(&mut self, _: &Snapshot) -> Option<ExecutionMode> {
        Some(ExecutionMode::Continue)
    }

    fn teardown(&mut self, _: &Summary) {}
}
