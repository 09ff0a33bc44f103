//! The Interpreter walks a token stream once, executing each
//! instruction against the register file while it encodes it.
//!
//! Labels and data words are entered into the symbol table as they
//! are met, so a symbol is only visible to instructions after it.
use super::ast::{parse_literal, parse_word, Mnemonic, Register};
use super::encoder::encode;
use super::error::{AsmError, ErrorKind};
use super::lexer::Token;
use super::registers::RegisterFile;
use super::symbols::SymbolTable;

/// One executed instruction and its encoding.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EncodedLine {
    /// Index of the mnemonic token.
    pub index: usize,
    pub mnemonic: Mnemonic,
    pub operand1: String,
    pub operand2: String,
    pub code: String,
}

/// Everything a run produced. A run that stopped on a fatal error
/// still carries whatever was accumulated before it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Assembly {
    pub lines: Vec<EncodedLine>,
    pub symbols: SymbolTable,
    pub registers: RegisterFile,
    /// Non-fatal errors, in the order they were raised.
    pub diagnostics: Vec<AsmError>,
    /// The fatal error that stopped the run, if any.
    pub halted: Option<AsmError>,
}

impl Assembly {
    /// The encoded lines, each terminated by a newline.
    pub fn object_code(&self) -> String {
        self.lines.iter().map(|l| format!("{}\n", l.code)).collect()
    }
}

pub struct Interpreter {
    tokens:      Vec<Token>,
    cursor:      usize,
    symbols:     SymbolTable,
    registers:   RegisterFile,
    lines:       Vec<EncodedLine>,
    diagnostics: Vec<AsmError>,
}

impl Interpreter {
    pub fn new(tokens: Vec<Token>) -> Self {
        Interpreter {
            tokens,
            cursor: 0,
            symbols: SymbolTable::new(),
            registers: RegisterFile::new(),
            lines: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Run the interpreter, consuming itself and returning the results.
    pub fn run(mut self) -> Assembly {
        let mut halted = None;

        while self.cursor < self.tokens.len() {
            match self.step() {
                Ok(advance) => self.cursor += advance,
                Err(e) => {
                    debug_assert!(e.is_fatal());
                    error!("{}", e);
                    error!("Stopped assembly at token {}.", e.index);
                    halted = Some(e);
                    break;
                }
            }
        }

        info!("Executed {} instruction(s), {} symbol(s), {} warning(s).",
            self.lines.len(), self.symbols.len(), self.diagnostics.len());

        Assembly {
            lines: self.lines,
            symbols: self.symbols,
            registers: self.registers,
            diagnostics: self.diagnostics,
            halted,
        }
    }

    /// Handles the construct at the cursor and returns how far to advance.
    /// Only fatal errors are returned; the rest go through `diagnose`.
    fn step(&mut self) -> Result<usize, AsmError> {
        let i = self.cursor;
        let mnemonic = Mnemonic::parse(&self.tokens[i].text.to_uppercase());
        let is_colon = self.tokens[i].is_colon();
        let declares = self.tokens.get(i + 1).map_or(false, |t| t.text == "DW");

        if let Some(mnemonic) = mnemonic {
            self.instruction(mnemonic)
        } else if is_colon {
            self.label();
            Ok(1)
        } else if declares {
            Ok(self.data_word())
        } else {
            debug!("Skipping token {} `{}`.", i, self.tokens[i]);
            Ok(1)
        }
    }

    /// MNEMONIC OPERAND1 OPERAND2
    fn instruction(&mut self, mnemonic: Mnemonic) -> Result<usize, AsmError> {
        let i = self.cursor;
        let line = self.tokens[i].line;

        if i + 2 >= self.tokens.len() {
            return Err(AsmError::new(ErrorKind::MalformedInstruction, i, line,
                format!("{} expects two operands", mnemonic)));
        }

        let operand1 = self.tokens[i + 1].text.to_uppercase();
        let operand2 = self.tokens[i + 2].text.to_uppercase();

        let value = match self.resolve(&operand2) {
            Some(value) => value,
            None => return Err(AsmError::new(ErrorKind::UnresolvedOperand, i + 2, line,
                format!("`{}` is not a number, symbol or register", operand2))),
        };

        if mnemonic == Mnemonic::DIV && value == 0 {
            return Err(AsmError::new(ErrorKind::DivisionByZero, i + 2, line,
                format!("operand `{}` is zero", operand2)));
        }

        let written = match Register::parse(&operand1) {
            Some(reg) => {
                if let Some(result) = self.registers.apply(mnemonic, reg, value) {
                    debug!("{} {}, {} => {} = {}", mnemonic, operand1, operand2, reg, result);
                }
                true
            }
            None if mnemonic == Mnemonic::MOV => self.symbols.assign(&operand1, value),
            None => false,
        };

        if !written {
            self.diagnose(AsmError::new(ErrorKind::InvalidDestination, i + 1, line,
                format!("`{}` cannot be written by {}", operand1, mnemonic)));
        }

        // Encoded even when the destination was rejected.
        let code = encode(mnemonic, &operand1, &operand2, &self.symbols);
        self.lines.push(EncodedLine { index: i, mnemonic, operand1, operand2, code });

        Ok(3)
    }

    /// NAME :
    /// The label's value is the index of the NAME token.
    fn label(&mut self) {
        let i = self.cursor;
        if i > 0 {
            let name = self.tokens[i - 1].text.clone();
            debug!("Label {} = {}", name, i - 1);
            self.symbols.define(&name, (i - 1) as i64);
        }
    }

    /// NAME DW VALUE
    fn data_word(&mut self) -> usize {
        let i = self.cursor;
        let line = self.tokens[i].line;

        let value = match self.tokens.get(i + 2) {
            Some(tok) => parse_word(&tok.text).ok_or_else(|| format!("`{}` is not an integer", tok)),
            None => Err("missing value".to_string()),
        };

        match value {
            Ok(value) => {
                let name = self.tokens[i].text.clone();
                debug!("Data word {} = {}", name, value);
                self.symbols.define(&name, value);
                3
            }
            Err(detail) => {
                self.diagnose(AsmError::new(ErrorKind::MalformedDataDeclaration, i, line, detail));
                1
            }
        }
    }

    /// Literal, then symbol, then register.
    fn resolve(&self, operand: &str) -> Option<i64> {
        parse_literal(operand)
            .or_else(|| self.symbols.get(operand))
            .or_else(|| Register::parse(operand).map(|reg| self.registers.get(reg)))
    }

    fn diagnose(&mut self, err: AsmError) {
        debug_assert!(!err.is_fatal());
        warn!("{}", err);
        self.diagnostics.push(err);
    }
}
