mod instance;
mod reg;

pub use instance::{transition, Instance, Overflow, State};
pub use reg::Registers;
