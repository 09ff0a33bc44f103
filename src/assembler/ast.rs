//! The closed vocabulary of the instruction set.
//!
//! Supported Instructions:
//!
//! ```nasm
//! MOV DEST, SRC  ; DEST <= SRC (DEST is a register or a declared symbol)
//! ADD RA, SRC    ; RA <= RA + SRC
//! SUB RA, SRC    ; RA <= RA - SRC
//! MUL RA, SRC    ; RA <= RA * SRC
//! DIV RA, SRC    ; RA <= floor(RA / SRC)
//! NAME DW VALUE  ; declare a data word
//! NAME:          ; define a label
//! ```
//!
//! SRC may be an integer literal, a symbol or one of the four
//! registers AX, BX, CX and DX. Mnemonics and operands are
//! case-insensitive; `DW` is not.

use std::fmt;
use regex::Regex;

lazy_static! {
    static ref LITERAL: Regex = Regex::new(r"^-?[0-9]+$").unwrap();
    static ref WORD: Regex = Regex::new(r"^[+-]?[0-9]+$").unwrap();
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Mnemonic {
    MOV,
    ADD,
    SUB,
    MUL,
    DIV,
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Mnemonic {
    /// Looks up a mnemonic. The input is expected to be upper case already.
    pub fn parse(s: &str) -> Option<Mnemonic> {
        use Mnemonic::*;
        match s {
            "MOV" => Some(MOV),
            "ADD" => Some(ADD),
            "SUB" => Some(SUB),
            "MUL" => Some(MUL),
            "DIV" => Some(DIV),
            _ => None,
        }
    }

    /// Returns the 6-bit opcode of the instruction.
    pub fn opcode(&self) -> u8 {
        use Mnemonic::*;
        match self {
            MOV => 0b100010,
            ADD => 0b000000,
            SUB => 0b001010,
            MUL => 0b111011,
            DIV => 0b111000,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Register {
    AX,
    BX,
    CX,
    DX,
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Register {
    /// Every register, in dump order.
    pub const ALL: [Register; 4] = [Register::AX, Register::BX, Register::CX, Register::DX];

    /// Looks up a register by name. The input is expected to be upper case already.
    pub fn parse(s: &str) -> Option<Register> {
        use Register::*;
        match s {
            "AX" => Some(AX),
            "BX" => Some(BX),
            "CX" => Some(CX),
            "DX" => Some(DX),
            _ => None,
        }
    }

    /// Convert the register to its 3-bit binary code.
    pub fn code(&self) -> u8 {
        use Register::*;
        match self {
            AX => 0b000,
            BX => 0b001,
            CX => 0b010,
            DX => 0b011,
        }
    }
}

/// Parses an instruction literal: an optional `-` followed by decimal digits.
/// Values outside the i64 range wrap around.
pub fn parse_literal(s: &str) -> Option<i64> {
    if !LITERAL.is_match(s) {
        return None;
    }
    Some(fold_digits(s))
}

/// Parses a `DW` value. Like `parse_literal`, but a leading `+` is allowed.
pub fn parse_word(s: &str) -> Option<i64> {
    if !WORD.is_match(s) {
        return None;
    }
    Some(fold_digits(s))
}

/// Folds a pre-validated signed digit string modulo 2^64.
fn fold_digits(s: &str) -> i64 {
    let (negative, digits) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let magnitude = digits.bytes()
        .fold(0i64, |acc, d| acc.wrapping_mul(10).wrapping_add(i64::from(d - b'0')));
    if negative { magnitude.wrapping_neg() } else { magnitude }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mnemonic_parse() {
        assert_eq!(Mnemonic::parse("MOV"), Some(Mnemonic::MOV));
        assert_eq!(Mnemonic::parse("ADD"), Some(Mnemonic::ADD));
        assert_eq!(Mnemonic::parse("SUB"), Some(Mnemonic::SUB));
        assert_eq!(Mnemonic::parse("MUL"), Some(Mnemonic::MUL));
        assert_eq!(Mnemonic::parse("DIV"), Some(Mnemonic::DIV));

        assert_eq!(Mnemonic::parse("mov"), None);
        assert_eq!(Mnemonic::parse("JMP"), None);
        assert_eq!(Mnemonic::parse(" MOV"), None);
    }

    #[test]
    fn test_opcodes() {
        assert_eq!(format!("{:06b}", Mnemonic::MOV.opcode()), "100010");
        assert_eq!(format!("{:06b}", Mnemonic::ADD.opcode()), "000000");
        assert_eq!(format!("{:06b}", Mnemonic::SUB.opcode()), "001010");
        assert_eq!(format!("{:06b}", Mnemonic::MUL.opcode()), "111011");
        assert_eq!(format!("{:06b}", Mnemonic::DIV.opcode()), "111000");
    }

    #[test]
    fn test_register_parse() {
        for reg in Register::ALL.iter() {
            assert_eq!(Register::parse(&reg.to_string()), Some(*reg));
        }
        assert_eq!(Register::parse("ax"), None);
        assert_eq!(Register::parse("EX"), None);
        assert_eq!(Register::parse("R0"), None);
    }

    #[test]
    fn test_register_codes() {
        let codes: Vec<String> = Register::ALL.iter().map(|r| format!("{:03b}", r.code())).collect();
        assert_eq!(codes, vec!["000", "001", "010", "011"]);
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(parse_literal("0"), Some(0));
        assert_eq!(parse_literal("42"), Some(42));
        assert_eq!(parse_literal("-42"), Some(-42));
        assert_eq!(parse_literal("007"), Some(7));

        assert_eq!(parse_literal(""), None);
        assert_eq!(parse_literal("-"), None);
        assert_eq!(parse_literal("+5"), None);
        assert_eq!(parse_literal("0x10"), None);
        assert_eq!(parse_literal("5A"), None);
        assert_eq!(parse_literal("--5"), None);
    }

    #[test]
    fn test_parse_literal_wraps() {
        assert_eq!(parse_literal("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_literal("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(parse_literal("9223372036854775808"), Some(i64::MIN));
        // 99999999999999999999 - 5 * 2^64
        assert_eq!(parse_literal("99999999999999999999"), Some(7766279631452241919));
        assert_eq!(parse_literal("-99999999999999999999"), Some(-7766279631452241919));
    }

    #[test]
    fn test_parse_word() {
        assert_eq!(parse_word("12"), Some(12));
        assert_eq!(parse_word("+12"), Some(12));
        assert_eq!(parse_word("-12"), Some(-12));
        assert_eq!(parse_word("99999999999999999999"), Some(7766279631452241919));

        assert_eq!(parse_word("+"), None);
        assert_eq!(parse_word("+-1"), None);
        assert_eq!(parse_word("abc"), None);
        assert_eq!(parse_word(""), None);
    }
}
