use super::suite;
use crate::assembler::{self, model::Value, Program};
use crate::assets;
use crate::exec::{self, interactor::console};
use crate::vm::State;
use ansi_term::Color::Red;
use anyhow::Context;
use std::ffi::OsString;
use std::{
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
};
use structopt::StructOpt;

#[cfg(windows)]
pub fn terminal_init() {
    // Without ANSI support we only lose the colours.
    let _ = ansi_term::enable_ansi_support();
}

#[cfg(not(windows))]
pub fn terminal_init() {}

pub fn assemble_path(path: &Path) -> anyhow::Result<Program> {
    let prog_src = std::fs::read_to_string(path)
        .with_context(|| format!("could not read '{}'", path.display()))?;
    let program = assembler::assemble(&prog_src)
        .with_context(|| format!("could not assemble '{}'", path.display()))?;

    Ok(program)
}

#[derive(StructOpt, Debug)]
#[structopt(name = "urm", about = "Interpreter for Unlimited Register Machine programs")]
pub enum CommandRoot {
    /// Run a program, tracing every step
    Run(SubcommandRun),
    /// Print the assembled program
    List(SubcommandList),
    /// Run every unit in a suite directory
    Suite(SubcommandSuite),
}

#[derive(StructOpt, Debug)]
struct RunOpts {
    #[structopt(short, long, name = "max-steps")]
    max_steps: Option<StepLimit>,

    /// Only print the final configuration
    #[structopt(short, long)]
    quiet: bool,
}

#[derive(StructOpt, Debug)]
#[structopt(name = "urm-run")]
pub struct SubcommandRun {
    #[structopt(flatten)]
    run_opts: RunOpts,

    #[structopt(name = "prog.urm", parse(from_os_str))]
    in_src: PathBuf,

    /// Initial values of registers 1, 2, ...
    #[structopt(name = "R")]
    initial: Vec<Value>,
}

#[derive(StructOpt, Debug)]
pub struct SubcommandList {
    #[structopt(name = "prog.urm", parse(from_os_str))]
    in_src: PathBuf,
}

#[derive(StructOpt, Debug)]
pub struct SubcommandSuite {
    #[structopt(name = "suite/dir", parse(from_os_str))]
    suite_dir: Option<PathBuf>,

    #[structopt(short, long, parse(from_os_str))]
    only: Option<OsString>,

    #[structopt(short, long, name = "max-steps")]
    max_steps: Option<StepLimit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepLimit(Option<u64>);

impl Display for StepLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.0.map(|lim| lim.to_string()).as_deref().unwrap_or("∞")
        )
    }
}

impl FromStr for StepLimit {
    type Err = <u64 as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("unlimited") || s.eq_ignore_ascii_case("infinity") || s.eq("∞")
        {
            Ok(StepLimit(None))
        } else {
            Ok(StepLimit(Some(u64::from_str(s)?)))
        }
    }
}

impl StepLimit {
    pub fn into_option(self) -> Option<u64> {
        self.0
    }
}

pub fn root(cmd: CommandRoot) -> ! {
    match cmd {
        CommandRoot::Run(scmd) => run(scmd),
        CommandRoot::List(scmd) => list(scmd),
        CommandRoot::Suite(scmd) => suite(scmd),
    }
}

pub fn run(cmd: SubcommandRun) -> ! {
    exit_with(run_prog(cmd))
}

pub fn list(cmd: SubcommandList) -> ! {
    exit_with(assemble_path(&cmd.in_src).map(|program| {
        print!("{}", program.listing());
        true
    }))
}

pub fn suite(cmd: SubcommandSuite) -> ! {
    exit_with(suite::run_suite(
        &cmd.suite_dir.unwrap_or_else(assets::default_suite_dir),
        cmd.only.as_ref(),
        cmd.max_steps
            .map_or(Some(suite::DEFAULT_MAX_STEPS), StepLimit::into_option),
    ))
}

fn run_prog(cmd: SubcommandRun) -> anyhow::Result<bool> {
    let program = assemble_path(&cmd.in_src)?;
    let cfg = exec::Config {
        max_steps: cmd.run_opts.max_steps.unwrap_or_default().into_option(),
    };

    let summary = if cmd.run_opts.quiet {
        exec::execute(&cfg, &program, &cmd.initial, &mut console::QuietInteractor)
    } else {
        exec::execute(&cfg, &program, &cmd.initial, &mut console::TraceInteractor)
    };

    Ok(summary.state == State::Halted)
}

fn exit_with(result: anyhow::Result<bool>) -> ! {
    let code = match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(err) => {
            eprintln!("{} {:#}", Red.bold().paint("error:"), err);
            1
        }
    };

    std::process::exit(code)
}

#[cfg(test)]
mod tests {
    use super::{CommandRoot, StepLimit};
    use std::str::FromStr;
    use structopt::StructOpt;

    #[test]
    fn step_limit_parses() {
        assert_eq!(StepLimit::from_str("100"), Ok(StepLimit(Some(100))));
        assert_eq!(StepLimit::from_str("Unlimited"), Ok(StepLimit(None)));
        assert_eq!(StepLimit::from_str("∞"), Ok(StepLimit(None)));
        assert!(StepLimit::from_str("-1").is_err());
        assert_eq!(StepLimit::default().to_string(), "∞");
    }

    #[test]
    fn run_takes_initial_registers() {
        let cmd = CommandRoot::from_iter_safe(&["urm", "run", "-q", "add.urm", "3", "4"]).unwrap();
        match cmd {
            CommandRoot::Run(run) => {
                assert!(run.run_opts.quiet);
                assert_eq!(run.initial, vec![3, 4]);
                assert_eq!(run.in_src.to_str(), Some("add.urm"));
            }
            _ => panic!("expected the run subcommand"),
        }
    }

    #[test]
    fn negative_registers_rejected() {
        assert!(CommandRoot::from_iter_safe(&["urm", "run", "add.urm", "-3"]).is_err());
    }
}
