//! The register file: four signed 64-bit registers, all starting at zero.
//! Arithmetic wraps on overflow.

use std::fmt;
use super::ast::{Mnemonic, Register};

#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct RegisterFile {
    ax: i64,
    bx: i64,
    cx: i64,
    dx: i64,
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, reg: Register) -> i64 {
        use Register::*;
        match reg {
            AX => self.ax,
            BX => self.bx,
            CX => self.cx,
            DX => self.dx,
        }
    }

    pub fn set(&mut self, reg: Register, value: i64) {
        *self.slot(reg) = value;
    }

    /// Applies `mnemonic` to `reg` with `value` as the source operand and
    /// returns the new register value. Returns None, leaving the register
    /// untouched, for a division by zero.
    pub fn apply(&mut self, mnemonic: Mnemonic, reg: Register, value: i64) -> Option<i64> {
        use Mnemonic::*;
        let current = self.get(reg);
        let result = match mnemonic {
            MOV => value,
            ADD => current.wrapping_add(value),
            SUB => current.wrapping_sub(value),
            MUL => current.wrapping_mul(value),
            DIV => floor_div(current, value)?,
        };
        self.set(reg, result);
        Some(result)
    }

    fn slot(&mut self, reg: Register) -> &mut i64 {
        use Register::*;
        match reg {
            AX => &mut self.ax,
            BX => &mut self.bx,
            CX => &mut self.cx,
            DX => &mut self.dx,
        }
    }
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Final Register Values:")?;
        for reg in Register::ALL.iter() {
            writeln!(f, "{} = {}", reg, self.get(*reg))?;
        }
        Ok(())
    }
}

/// Integer division rounding toward negative infinity.
pub fn floor_div(a: i64, b: i64) -> Option<i64> {
    if b == 0 {
        return None;
    }
    let q = a.wrapping_div(b);
    if a.wrapping_rem(b) != 0 && ((a < 0) != (b < 0)) {
        Some(q - 1)
    } else {
        Some(q)
    }
}
