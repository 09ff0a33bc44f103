//! Renders one instruction as text: the 6-bit opcode, followed by the
//! operand fields when the destination is a register.
//!
//! ```text
//! MOV AX, BX   => 100010 000 001
//! ADD CX, 5    => 000000 010 0000000000000101
//! MOV X, 5     => 100010
//! ```

use super::ast::{parse_literal, Mnemonic, Register};
use super::symbols::SymbolTable;

/// Encodes an instruction. `operand1` and `operand2` are the upper-cased
/// operand texts. The second operand is tried as a register, then as a
/// literal, then as a symbol. If the destination is not a register, or the
/// source matches nothing, the opcode is returned on its own.
pub fn encode(mnemonic: Mnemonic, operand1: &str, operand2: &str, symbols: &SymbolTable) -> String {
    let mut code = format!("{:06b}", mnemonic.opcode());

    if let Some(dest) = Register::parse(operand1) {
        if let Some(src) = Register::parse(operand2) {
            code.push_str(&format!(" {:03b} {:03b}", dest.code(), src.code()));
        } else if let Some(value) = parse_literal(operand2) {
            code.push_str(&format!(" {:03b} {}", dest.code(), word(value)));
        } else if let Some(value) = symbols.get(operand2) {
            code.push_str(&format!(" {:03b} {}", dest.code(), word(value)));
        }
    }

    code
}

/// Formats a value as a binary word of at least 16 digits.
/// Negative values use the 16-bit two's complement of their low half-word.
pub fn word(value: i64) -> String {
    if value < 0 {
        format!("{:016b}", value as u16)
    } else {
        format!("{:016b}", value)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_register_register() {
        let table = SymbolTable::new();
        assert_eq!(encode(Mnemonic::MOV, "AX", "BX", &table), "100010 000 001");
        assert_eq!(encode(Mnemonic::ADD, "DX", "CX", &table), "000000 011 010");
        assert_eq!(encode(Mnemonic::SUB, "CX", "DX", &table), "001010 010 011");
    }

    #[test]
    fn test_encode_register_literal() {
        let table = SymbolTable::new();
        assert_eq!(encode(Mnemonic::MUL, "BX", "5", &table), "111011 001 0000000000000101");
        assert_eq!(encode(Mnemonic::DIV, "AX", "-1", &table), "111000 000 1111111111111111");
    }

    #[test]
    fn test_encode_register_symbol() {
        let mut table = SymbolTable::new();
        table.define("X", 10);
        assert_eq!(encode(Mnemonic::MOV, "AX", "X", &table), "100010 000 0000000000001010");
    }

    #[test]
    fn test_register_beats_symbol() {
        let mut table = SymbolTable::new();
        table.define("BX", 10);
        assert_eq!(encode(Mnemonic::MOV, "AX", "BX", &table), "100010 000 001");
    }

    #[test]
    fn test_encode_without_register_destination() {
        let mut table = SymbolTable::new();
        table.define("X", 1);
        assert_eq!(encode(Mnemonic::MOV, "X", "5", &table), "100010");
        assert_eq!(encode(Mnemonic::ADD, "5", "AX", &table), "000000");
    }

    #[test]
    fn test_encode_unknown_source() {
        let table = SymbolTable::new();
        assert_eq!(encode(Mnemonic::MOV, "AX", "NOPE", &table), "100010");
    }

    #[test]
    fn test_word() {
        assert_eq!(word(0), "0000000000000000");
        assert_eq!(word(65535), "1111111111111111");
        assert_eq!(word(65536), "10000000000000000");
        assert_eq!(word(-2), "1111111111111110");
        assert_eq!(word(-32768), "1000000000000000");
    }
}
