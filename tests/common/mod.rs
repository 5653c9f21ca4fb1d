use urm::assembler::{self, model::Value};
use urm::exec::{self, interactor::record::Recorder, Summary};

pub const MAX_STEPS: u64 = 100_000;

/// Assembles and runs `prog_src`, returning the summary and the full trace.
pub fn trace(
    prog_src: &str,
    initial: &[Value],
) -> Result<(Summary, Vec<String>), assembler::Error> {
    let program = assembler::assemble(prog_src)?;

    let mut rec = Recorder::new();
    let summary = exec::execute(
        &exec::Config {
            max_steps: Some(MAX_STEPS),
        },
        &program,
        initial,
        &mut rec,
    );

    Ok((summary, rec.into_lines()))
}
