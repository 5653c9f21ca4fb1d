use std::{fmt, str::FromStr};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/*
    The representation of URM programs inside the assembler:

        An instruction is an `Inst<R, D>`, generic over the type of its register parameters `R`
        and the type of its jump destination `D`. The parser produces `RawInst`s, where every
        parameter is an `Arg`: either a literal or a reference to a label which has not yet
        been resolved. The resolver then replaces every `Arg` by a concrete value, producing
        `ResolvedInst`s, which is all the VM ever sees.

        Only the destination of a `Jump` is expected to name a label, but nothing stops a label
        from appearing in a register slot; it resolves to the position of the labelled
        instruction just the same.
*/

pub type LabelName = String;

/// Register index. Register `0` is addressable but never shown in traces.
pub type RegIdx = usize;

/// A 1-based instruction position. Jumps to anything outside the program halt the machine,
/// so this is signed.
pub type Addr = i64;

/// The value stored in a single register.
pub type Value = u64;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Kind {
    Zero,
    Succ,
    Transfer,
    Jump,
}

impl Kind {
    pub fn mnemonic(self) -> char {
        match self {
            Kind::Zero => 'Z',
            Kind::Succ => 'S',
            Kind::Transfer => 'T',
            Kind::Jump => 'J',
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Kind::Zero | Kind::Succ => 1,
            Kind::Transfer => 2,
            Kind::Jump => 3,
        }
    }

    pub fn from_mnemonic(c: char) -> Option<Kind> {
        Kind::iter().find(|kind| kind.mnemonic() == c)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg<T> {
    Lit(T),
    Label(LabelName),
}

fn is_numeral(raw: &str) -> bool {
    let digits = raw.strip_prefix(&['-', '+'][..]).unwrap_or(raw);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

impl<T: FromStr> Arg<T> {
    /// Anything which does not look like a number is taken to be a label reference.
    ///
    /// Returns `None` for a numeral which does not fit in a `T`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.parse() {
            Ok(val) => Some(Arg::Lit(val)),
            Err(_) if is_numeral(raw) => None,
            Err(_) => Some(Arg::Label(raw.to_owned())),
        }
    }
}

impl<T> Arg<T> {
    pub fn resolve<E, F>(self, resolver: F) -> Result<T, E>
    where
        F: FnOnce(LabelName) -> Result<T, E>,
    {
        match self {
            Arg::Lit(val) => Ok(val),
            Arg::Label(label) => resolver(label),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Arg<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Lit(val) => write!(f, "{}", val),
            Arg::Label(label) => write!(f, "{}", label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst<R, D> {
    Zero(R),
    Succ(R),
    Transfer(R, R),
    Jump(R, R, D),
}

pub type RawInst = Inst<Arg<RegIdx>, Arg<Addr>>;
pub type ResolvedInst = Inst<RegIdx, Addr>;

impl<R, D> Inst<R, D> {
    pub fn kind(&self) -> Kind {
        match self {
            Inst::Zero(_) => Kind::Zero,
            Inst::Succ(_) => Kind::Succ,
            Inst::Transfer(_, _) => Kind::Transfer,
            Inst::Jump(_, _, _) => Kind::Jump,
        }
    }

    pub fn try_map<R2, D2, E, FR, FD>(self, mut reg: FR, dest: FD) -> Result<Inst<R2, D2>, E>
    where
        FR: FnMut(R) -> Result<R2, E>,
        FD: FnOnce(D) -> Result<D2, E>,
    {
        Ok(match self {
            Inst::Zero(r) => Inst::Zero(reg(r)?),
            Inst::Succ(r) => Inst::Succ(reg(r)?),
            Inst::Transfer(src, dst) => Inst::Transfer(reg(src)?, reg(dst)?),
            Inst::Jump(left, right, to) => Inst::Jump(reg(left)?, reg(right)?, dest(to)?),
        })
    }

    pub fn map<R2, D2, FR, FD>(self, mut reg: FR, dest: FD) -> Inst<R2, D2>
    where
        FR: FnMut(R) -> R2,
        FD: FnOnce(D) -> D2,
    {
        match self {
            Inst::Zero(r) => Inst::Zero(reg(r)),
            Inst::Succ(r) => Inst::Succ(reg(r)),
            Inst::Transfer(src, dst) => Inst::Transfer(reg(src), reg(dst)),
            Inst::Jump(left, right, to) => Inst::Jump(reg(left), reg(right), dest(to)),
        }
    }
}

impl<R: fmt::Display, D: fmt::Display> fmt::Display for Inst<R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.kind().mnemonic();
        match self {
            Inst::Zero(r) | Inst::Succ(r) => write!(f, "{}({})", m, r),
            Inst::Transfer(src, dst) => write!(f, "{}({}, {})", m, src, dst),
            Inst::Jump(left, right, to) => write!(f, "{}({}, {}, {})", m, left, right, to),
        }
    }
}
