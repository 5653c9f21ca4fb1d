use crate::assembler::{self, model::Value, Program};
use crate::assets;
use crate::exec::{self, interactor::noninteractive, Summary};
use crate::vm::State;
use ansi_term::Color::{Green, Red};
use anyhow::{anyhow, bail, Context};
use derive_more::Constructor;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_STEPS: u64 = 10_000_000;

const DIRECTIVE_PREFIX: &str = "#!";

/// Per-unit settings, given in comment lines of the form `#! args 3 4` and `#! expect 7`.
#[derive(Debug, PartialEq, Eq, Default)]
pub struct Directives {
    pub args: Vec<Value>,
    pub expect: Option<Value>,
}

fn parse_values<'a>(
    line_no: usize,
    words: impl Iterator<Item = &'a str>,
) -> anyhow::Result<Vec<Value>> {
    words
        .map(|word| {
            word.parse()
                .with_context(|| format!("line {}: bad register value '{}'", line_no, word))
        })
        .collect()
}

impl Directives {
    pub fn parse(source: &str) -> anyhow::Result<Self> {
        let mut directives = Directives::default();

        for (line_no, line) in (1..).zip(source.lines()) {
            let rest = match line.trim_start().strip_prefix(DIRECTIVE_PREFIX) {
                Some(rest) => rest,
                None => continue,
            };

            let mut words = rest.split_whitespace();
            match words.next() {
                Some("args") => directives.args = parse_values(line_no, words)?,
                Some("expect") => match parse_values(line_no, words)?.as_slice() {
                    [val] => directives.expect = Some(*val),
                    _ => bail!("line {}: 'expect' takes exactly one value", line_no),
                },
                Some(other) => bail!("line {}: unknown directive '{}'", line_no, other),
                None => bail!("line {}: empty directive", line_no),
            }
        }

        Ok(directives)
    }
}

#[derive(Constructor)]
struct UnitSrc {
    name: OsString,
    path: PathBuf,
}

#[derive(Constructor)]
struct UnitBin {
    program: Program,
    directives: Directives,
}

impl UnitSrc {
    fn assemble(&self) -> anyhow::Result<UnitBin> {
        let source = std::fs::read_to_string(&self.path)
            .with_context(|| format!("could not read '{}'", self.path.display()))?;

        Ok(UnitBin::new(
            assembler::assemble(&source)?,
            Directives::parse(&source)?,
        ))
    }
}

impl UnitBin {
    fn execute(&self, max_steps: Option<u64>) -> Summary {
        exec::execute(
            &exec::Config { max_steps },
            &self.program,
            &self.directives.args,
            &mut noninteractive::Interactor,
        )
    }
}

pub fn run_suite(
    suite_dir: &Path,
    only_this: Option<&OsString>,
    max_steps: Option<u64>,
) -> anyhow::Result<bool> {
    let all_units = find_units(suite_dir)?;

    let mut selected_units = match only_this {
        None => all_units,
        Some(only_this) => vec![all_units
            .into_iter()
            .find(|unit| &unit.name == only_this)
            .ok_or_else(|| {
                anyhow!(
                    "no unit '{}' in suite '{}'",
                    only_this.to_string_lossy(),
                    suite_dir.display()
                )
            })?],
    };

    selected_units.sort_unstable_by(|unit1, unit2| unit1.name.cmp(&unit2.name));

    let name = suite_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| suite_dir.display().to_string());

    Ok(run_units(&name, max_steps, &selected_units))
}

fn find_file_unit(path: &Path) -> Option<UnitSrc> {
    if !path
        .extension()
        .map_or(false, |ext| ext == assets::DEFAULT_SOURCE_EXT)
    {
        return None;
    }

    Some(UnitSrc::new(path.file_stem()?.to_owned(), PathBuf::from(path)))
}

fn find_units(suite_dir: &Path) -> anyhow::Result<Vec<UnitSrc>> {
    let mut units = Vec::new();

    let entries = suite_dir
        .read_dir()
        .with_context(|| format!("could not open suite '{}'", suite_dir.display()))?;
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            units.extend(find_file_unit(&entry.path()));
        }
    }

    Ok(units)
}

fn run_units(name: &str, max_steps: Option<u64>, units: &[UnitSrc]) -> bool {
    let name_pad = units.iter().map(|unit| unit.name.len()).max().unwrap_or(0);

    println!("Running suite: '{}' ({} units)", name, units.len());
    println!("{:-<line_len$}", "", line_len = name_pad + 45);

    let passes = units
        .iter()
        .enumerate()
        .filter(|(num, unit)| run_unit(unit, num + 1, name_pad, max_steps))
        .count();
    let success = passes == units.len();

    println!("{:-<line_len$}", "", line_len = name_pad + 45);
    println!(
        "Suite Result: {}, {}/{} passes",
        if success {
            Green.bold().paint("SUCCESS")
        } else {
            Red.bold().paint("FAILED")
        },
        passes,
        units.len()
    );

    success
}

fn run_unit(src: &UnitSrc, num: usize, name_pad: usize, max_steps: Option<u64>) -> bool {
    let outcome = src.assemble().map(|bin| {
        let summary = bin.execute(max_steps);
        (summary, bin.directives.expect)
    });

    let (success, msg) = match outcome {
        Err(err) => (
            false,
            format!(
                "{}:\n\t{}",
                Red.bold().paint("FAIL: ASSEMBLY ERROR"),
                format!("{:#}", err).replace("\n", "\n\t")
            ),
        ),
        Ok((summary, expect)) => match (summary.state, expect) {
            (State::Timeout, _) => (
                false,
                format!(
                    "{} after {} steps",
                    Red.bold().paint("FAIL: STEP LIMIT"),
                    summary.steps
                ),
            ),
            (State::Overflow, _) => (
                false,
                format!(
                    "{} after {} steps",
                    Red.bold().paint("FAIL: OVERFLOW"),
                    summary.steps
                ),
            ),
            (State::Running, _) => (false, format!("{}", Red.bold().paint("FAIL: STOPPED"))),
            (State::Halted, Some(expect)) if expect != summary.result() => (
                false,
                format!(
                    "{}: expected {}, got {}",
                    Red.bold().paint("FAIL: WRONG RESULT"),
                    expect,
                    summary.result()
                ),
            ),
            (State::Halted, _) => (
                true,
                format!(
                    "{} {: >9} steps  result {}",
                    Green.bold().paint("PASS"),
                    summary.steps,
                    summary.result()
                ),
            ),
        },
    };

    println!(
        "Unit {:2}: {} {}{}",
        num,
        src.name.to_string_lossy(),
        " ".repeat(name_pad - src.name.len()),
        msg
    );

    success
}
