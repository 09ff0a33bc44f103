//! This lexer splits assembly source into string atoms.
use std::fmt;
use std::io::{BufReader, BufRead, Read};

/// A token is the raw text of one atom and the line it appears on.
/// The line is only used for diagnostics; everything else addresses
/// tokens by their index in the sequence.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new<S: Into<String>>(text: S, line: usize) -> Self {
        Token { text: text.into(), line }
    }

    pub fn is_colon(&self) -> bool {
        self.text == ":"
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Whitespace, commas and colons bound tokens. A colon is
/// also a token of its own, so `LABEL:` yields `LABEL` and `:`.
pub fn tokenize<T: Read + ?Sized>(reader: Box<T>) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::with_capacity(256);

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        match line {
            Ok(s) => tokens.append(&mut tokenize_line(&s, index)),
            Err(e) => error!("Error reading line {}: {}", index, e.to_string()),
        }
    }

    debug!("Tokenizer produced {} token(s).", tokens.len());
    tokens
}

fn tokenize_line(line: &str, line_num: usize) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::new();

    let mut sb = String::new();
    for c in line.chars() {
        match c {
            // Separators end the current token. Only the colon
            // survives as a token itself; commas and whitespace
            // are dropped.
            ',' | ':' => {
                flush(&mut sb, &mut out, line_num);
                if c == ':' {
                    out.push(Token::new(":", line_num));
                }
            }
            // The information separators 0x1C-0x1F also count as whitespace.
            c if c.is_whitespace() || ('\x1C'..='\x1F').contains(&c) => flush(&mut sb, &mut out, line_num),

            _ => sb.push(c),
        };
    }
    flush(&mut sb, &mut out, line_num);

    out
}

#[inline]
fn flush(sb: &mut String, out: &mut Vec<Token>, line_num: usize) {
    if !sb.is_empty() {
        out.push(Token::new(sb.clone(), line_num));
        sb.clear();
    }
}
