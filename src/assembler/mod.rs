//! The Assembler module is in charge of taking a
//! source file and producing the encoded lines, the
//! symbol table and the final register values.
//!
//! It does this by implementing a simple tokenizer
//! and a single-pass interpreter that executes each
//! instruction as it encodes it.

pub mod ast;
pub mod encoder;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod registers;
pub mod symbols;
