use super::reg::Registers;
use crate::assembler::{
    model::{Addr, Inst, RegIdx, ResolvedInst, Value},
    Program,
};
use strum_macros::Display;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,

    /// A successor ran past the largest representable value. The machine stops with the
    /// offending instruction unexecuted.
    Overflow,

    // Not a real state, just returned by `run()` when it runs out of steps
    Timeout,
}

/// The register a successor was applied to while it held `Value::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow(pub RegIdx);

impl std::fmt::Display for Overflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "register {} overflowed", self.0)
    }
}

/// Applies `inst` (found at `pc`) to `regs`, and returns the next value of the program counter.
///
/// On overflow `regs` is left untouched.
pub fn transition(inst: &ResolvedInst, regs: &mut Registers, pc: Addr) -> Result<Addr, Overflow> {
    Ok(match *inst {
        Inst::Zero(r) => {
            regs.set(r, 0);
            pc + 1
        }
        Inst::Succ(r) => {
            let val = regs.get(r).checked_add(1).ok_or(Overflow(r))?;
            regs.set(r, val);
            pc + 1
        }
        Inst::Transfer(src, dst) => {
            let val = regs.read(src);
            regs.set(dst, val);
            pc + 1
        }
        Inst::Jump(left, right, dest) => {
            if regs.read(left) == regs.read(right) {
                dest
            } else {
                pc + 1
            }
        }
    })
}

pub struct Instance<'a> {
    program: &'a Program,
    regs: Registers,
    pc: Addr,
    steps: u64,
    overflow: Option<Overflow>,
}

impl<'a> Instance<'a> {
    pub fn new(program: &'a Program, initial: &[Value]) -> Self {
        Self {
            program,
            regs: Registers::new(initial),
            pc: 1,
            steps: 0,
            overflow: None,
        }
    }

    pub fn program(&self) -> &'a Program {
        self.program
    }

    pub fn pc(&self) -> Addr {
        self.pc
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    /// The designated result of a run: the value of register 1.
    pub fn result(&self) -> Value {
        self.regs.get(1)
    }

    pub fn overflow(&self) -> Option<Overflow> {
        self.overflow
    }

    pub fn next_inst(&self) -> Option<&'a ResolvedInst> {
        self.program.get(self.pc)
    }

    /// There is no halt instruction: the machine halts exactly when `pc` leaves the program.
    pub fn state(&self) -> State {
        if self.overflow.is_some() {
            return State::Overflow;
        }

        match self.next_inst() {
            Some(_) => State::Running,
            None => State::Halted,
        }
    }

    pub fn step(&mut self) -> State {
        if self.state() != State::Running {
            return self.state();
        }

        if let Some(inst) = self.next_inst() {
            match transition(inst, &mut self.regs, self.pc) {
                Ok(pc) => {
                    self.steps += 1;
                    self.pc = pc;
                }
                Err(overflow) => self.overflow = Some(overflow),
            }
        }

        self.state()
    }

    pub fn run(&mut self, max_steps: Option<u64>) -> State {
        let then = self.steps;

        while self.state() == State::Running {
            if let Some(max_steps) = max_steps {
                if self.steps - then >= max_steps {
                    return State::Timeout;
                }
            }

            self.step();
        }

        self.state()
    }
}

#[cfg(test)]
mod tests {
    use super::{transition, Instance, Overflow, State};
    use crate::assembler::{self, model::Inst};
    use crate::vm::Registers;

    #[test]
    fn zero_succ_transfer_advance() {
        let mut regs = Registers::new(&[5, 2]);
        assert_eq!(transition(&Inst::Zero(1), &mut regs, 1), Ok(2));
        assert_eq!(regs.get(1), 0);
        assert_eq!(transition(&Inst::Succ(2), &mut regs, 2), Ok(3));
        assert_eq!(regs.get(2), 3);
        assert_eq!(transition(&Inst::Transfer(2, 4), &mut regs, 3), Ok(4));
        assert_eq!(regs.get(4), 3);
        assert_eq!(regs.to_string(), "0 3 0 3");
    }

    #[test]
    fn jump_taken_and_not_taken() {
        let mut regs = Registers::new(&[1, 1, 2]);
        assert_eq!(transition(&Inst::Jump(1, 2, 9), &mut regs, 4), Ok(9));
        assert_eq!(transition(&Inst::Jump(1, 3, 9), &mut regs, 4), Ok(5));
    }

    #[test]
    fn jump_compares_unset_registers_as_zero() {
        let mut regs = Registers::new(&[]);
        assert_eq!(transition(&Inst::Jump(7, 8, -2), &mut regs, 1), Ok(-2));
        assert_eq!(regs.highest(), 8);
    }

    #[test]
    fn empty_program_is_halted() {
        let program = assembler::assemble("# nothing here").unwrap();
        let vm = Instance::new(&program, &[4]);
        assert_eq!(vm.state(), State::Halted);
        assert_eq!(vm.result(), 4);
    }

    #[test]
    fn step_on_halted_is_a_no_op() {
        let program = assembler::assemble("Z(1)").unwrap();
        let mut vm = Instance::new(&program, &[5]);
        assert_eq!(vm.step(), State::Halted);
        assert_eq!(vm.step(), State::Halted);
        assert_eq!(vm.steps(), 1);
        assert_eq!(vm.result(), 0);
    }

    #[test]
    fn run_times_out() {
        let program = assembler::assemble("S(1) top\nJ(1,1,top)").unwrap();
        let mut vm = Instance::new(&program, &[]);
        assert_eq!(vm.run(Some(10)), State::Timeout);
        assert_eq!(vm.steps(), 10);
        assert_eq!(vm.result(), 5);
        assert_eq!(vm.run(Some(3)), State::Timeout);
        assert_eq!(vm.steps(), 13);
    }

    #[test]
    fn jump_past_end_halts() {
        let program = assembler::assemble("J(1,1,3)\nS(1)").unwrap();
        let mut vm = Instance::new(&program, &[]);
        assert_eq!(vm.run(None), State::Halted);
        assert_eq!(vm.steps(), 1);
        assert_eq!(vm.pc(), 3);
    }

    #[test]
    fn jump_to_zero_halts() {
        let program = assembler::assemble("S(2)\nJ(1,3,0)\nS(1)").unwrap();
        let mut vm = Instance::new(&program, &[]);
        assert_eq!(vm.run(None), State::Halted);
        assert_eq!(vm.steps(), 2);
        assert_eq!(vm.result(), 0);
    }

    #[test]
    fn successor_overflow_stops_the_machine() {
        let mut regs = Registers::new(&[u64::MAX]);
        assert_eq!(
            transition(&Inst::Succ(1), &mut regs, 1),
            Err(Overflow(1))
        );
        assert_eq!(regs.get(1), u64::MAX);

        let program = assembler::assemble("S(2)\nS(1)\nZ(1)").unwrap();
        let mut vm = Instance::new(&program, &[u64::MAX]);
        assert_eq!(vm.run(None), State::Overflow);
        assert_eq!(vm.steps(), 1);
        assert_eq!(vm.pc(), 2);
        assert_eq!(vm.overflow(), Some(Overflow(1)));
        assert_eq!(vm.result(), u64::MAX);
        assert_eq!(vm.step(), State::Overflow);
        assert_eq!(vm.steps(), 1);
    }
}
