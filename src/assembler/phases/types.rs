use super::{parse, resolve};
use derive_more::Constructor;
use std::fmt::Display;

/*
    Phases:

        1.  Tokenization: Blank and comment lines are dropped, and every remaining line is split
            into a flat list of tokens at parentheses, commas and whitespace. Each token remembers
            where it came from.

        2.  Parsing: Each token line is parsed into a `ParsedLine`: optionally an instruction
            (whose kind is decided by the first character of the first token), together with
            any labels declared on the line. Parameters which are not numeric are kept as
            unresolved label references.

        3.  Resolution: The positions of the labels are read off the `ParsedLine` list (the n-th
            instruction lives at position n, and labels on a line without an instruction name
            the next instruction). Given this table, every label reference is replaced by a
            position, producing the final `Program`.

    Only parsing and resolution can fail, and both failures are fatal: nothing is ever executed
    from a program which did not assemble completely.
*/

#[derive(Debug, PartialEq, Clone, Eq, Constructor)]
pub struct Loc {
    line: usize,
    col: usize,
}

impl Loc {
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn col(&self) -> usize {
        self.col
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Located<T: Sized> {
    loc: Option<Loc>,
    val: T,
}

impl Display for Loc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(line: {}, col: {})", self.line, self.col)
    }
}

impl<T: Display> Display for Located<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.loc {
            None => write!(f, "@<unknown location>: {}", self.val),
            Some(loc) => write!(f, "@{}: {}", loc, self.val),
        }
    }
}

impl<T> Located<T> {
    fn new(loc: Option<Loc>, val: T) -> Self {
        Located { loc, val }
    }

    pub fn with_loc(loc: Loc, val: T) -> Self {
        Located::new(Some(loc), val)
    }

    pub fn loc(&self) -> Option<&Loc> {
        self.loc.as_ref()
    }

    pub fn get(&self) -> &T {
        &self.val
    }

    pub fn value(self) -> T {
        self.val
    }

    pub fn map<S, F>(self, f: F) -> Located<S>
    where
        F: FnOnce(T) -> S,
    {
        Located::new(self.loc, f(self.val))
    }

    pub fn map_result_value<S, E, F>(self, f: F) -> Result<S, Located<E>>
    where
        F: FnOnce(T) -> Result<S, E>,
    {
        let loc = self.loc;
        f(self.val).map_err(|err| Located::new(loc, err))
    }

    pub fn transfer<S>(&self, s: S) -> Located<S> {
        Located::new(self.loc.clone(), s)
    }
}

impl<T> From<T> for Located<T> {
    fn from(val: T) -> Self {
        Located { loc: None, val }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    Parse(Located<parse::Error>),
    Resolve(Located<resolve::Error>),
}

impl From<Located<parse::Error>> for Error {
    fn from(err: Located<parse::Error>) -> Self {
        Error::Parse(err)
    }
}

impl From<Located<resolve::Error>> for Error {
    fn from(err: Located<resolve::Error>) -> Self {
        Error::Resolve(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Assembly Error (in ")?;
        match self {
            Error::Parse(_) => write!(f, "Parser"),
            Error::Resolve(_) => write!(f, "Resolver"),
        }?;
        write!(f, "): ")?;
        match self {
            Error::Parse(err) => write!(f, "{}", err),
            Error::Resolve(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {}
