use super::{run::Summary, types::Snapshot};

pub enum ExecutionMode {
    /// Run on without consulting the interactor again.
    Continue,
    Stepping,
}

pub trait Interactor {
    /// Called before every step the interactor asked to see.
    /// Returns `None` if the run should be stopped.
    fn handle(&mut self, snap: &Snapshot) -> Option<ExecutionMode>;

    fn teardown(&mut self, summary: &Summary);
}
