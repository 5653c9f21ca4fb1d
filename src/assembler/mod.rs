pub mod model;
pub mod phases;
pub mod program;

pub use phases::types::Error;
pub use program::Program;

pub fn assemble(source: &str) -> Result<Program, Error> {
    let lines = phases::tokenize(source);
    let parsed = phases::parse(lines)?;
    let program = phases::resolve(parsed)?;

    Ok(program)
}
