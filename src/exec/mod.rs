pub mod types;

pub mod interactive;
pub mod interactor;

pub mod run;

pub use run::{execute, Config, Summary};
