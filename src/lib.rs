pub mod assets;

pub mod assembler;

pub mod exec;
pub mod vm;

pub mod cli;
