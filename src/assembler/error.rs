//! Errors raised while assembling.
use std::error::Error;
use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// The source could not be read.
    InputUnavailable,
    /// A mnemonic without two operand tokens after it.
    MalformedInstruction,
    /// A source operand that is not a literal, symbol or register.
    UnresolvedOperand,
    DivisionByZero,
    /// A destination that cannot be written to.
    InvalidDestination,
    /// A `DW` declaration with a missing or non-integer value.
    MalformedDataDeclaration,
}

impl ErrorKind {
    /// Fatal errors stop the run; the others are reported and skipped.
    pub fn is_fatal(&self) -> bool {
        use ErrorKind::*;
        match self {
            MalformedInstruction | UnresolvedOperand | DivisionByZero => true,
            InputUnavailable | InvalidDestination | MalformedDataDeclaration => false,
        }
    }

    fn description(&self) -> &'static str {
        use ErrorKind::*;
        match self {
            InputUnavailable => "unable to read input",
            MalformedInstruction => "invalid instruction format",
            UnresolvedOperand => "invalid operand",
            DivisionByZero => "division by zero",
            InvalidDestination => "invalid destination",
            MalformedDataDeclaration => "invalid DW declaration",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AsmError {
    pub kind: ErrorKind,
    /// Index of the token the error was raised at.
    pub index: usize,
    pub line: usize,
    pub detail: String,
}

impl AsmError {
    pub fn new<S: Into<String>>(kind: ErrorKind, index: usize, line: usize, detail: S) -> Self {
        AsmError { kind, index, line, detail: detail.into() }
    }

    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            // Raised before there are any tokens to point at.
            ErrorKind::InputUnavailable => write!(f, "{}: {}", self.kind.description(), self.detail),
            _ => write!(f, "{} at token {} on line {}: {}",
                self.kind.description(), self.index, self.line, self.detail),
        }
    }
}

impl Error for AsmError {}
