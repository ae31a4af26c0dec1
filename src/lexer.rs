use crate::error::{AsmError, Loc, SyntaxError};
use crate::isa::{Opcode, Register, StackOp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Label(String),
    Register(Register),
    Stack(StackOp),
    Mnemonic(Opcode),
    Dat,
    Ident(String),
    Number(u32),
    Str(String),
    Comma,
    Plus,
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    /// Text after `;`, up to the end of the line.
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub loc: Loc,
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Splits one source line into tokens. Keywords are upper-cased here so
/// nothing downstream has to compare case-insensitively.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Lexer {
    pub fn new(text: &str, line: usize) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line,
        }
    }

    fn loc_at(&self, pos: usize) -> Loc {
        Loc { line: self.line, column: pos + 1 }
    }

    fn err(&self, pos: usize, kind: SyntaxError) -> AsmError {
        AsmError::Syntax { loc: self.loc_at(pos), kind }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn take_while(&mut self, f: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        while self.peek().is_some_and(&f) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, AsmError> {
        let mut out = Vec::new();
        while let Some(c) = self.peek() {
            let start = self.pos;
            let kind = match c {
                ' ' | '\t' | '\r' => {
                    self.pos += 1;
                    continue;
                }
                ';' => {
                    self.pos = self.chars.len();
                    TokenKind::Comment(self.chars[start + 1..].iter().collect())
                }
                ',' => self.single(TokenKind::Comma),
                '+' => self.single(TokenKind::Plus),
                '[' => self.single(TokenKind::OpenBracket),
                ']' => self.single(TokenKind::CloseBracket),
                '(' => self.single(TokenKind::OpenParen),
                ')' => self.single(TokenKind::CloseParen),
                ':' => {
                    self.pos += 1;
                    if !self.peek().is_some_and(is_ident_start) {
                        return Err(self.err(start, SyntaxError::EmptyLabel));
                    }
                    TokenKind::Label(self.take_while(is_ident_char))
                }
                '"' | '\'' => self.string(c)?,
                c if c.is_ascii_digit() => self.number()?,
                c if is_ident_start(c) => self.word(),
                other => return Err(self.err(start, SyntaxError::UnexpectedChar(other))),
            };
            out.push(Token { kind, loc: self.loc_at(start) });
        }
        Ok(out)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    fn word(&mut self) -> TokenKind {
        let text = self.take_while(is_ident_char);
        let upper = text.to_ascii_uppercase();
        if let Some(r) = Register::from_keyword(&upper) {
            TokenKind::Register(r)
        } else if let Some(s) = StackOp::from_keyword(&upper) {
            TokenKind::Stack(s)
        } else if let Some(op) = Opcode::from_mnemonic(&upper) {
            TokenKind::Mnemonic(op)
        } else if upper == "DAT" {
            TokenKind::Dat
        } else {
            TokenKind::Ident(text)
        }
    }

    fn number(&mut self) -> Result<TokenKind, AsmError> {
        let start = self.pos;
        let text = self.take_while(is_ident_char);
        let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            Some(hex) if !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()) => {
                u32::from_str_radix(hex, 16).ok()
            }
            Some(_) => None,
            None if text.chars().all(|c| c.is_ascii_digit()) => text.parse::<u32>().ok(),
            None => None,
        };
        parsed
            .map(TokenKind::Number)
            .ok_or_else(|| self.err(start, SyntaxError::InvalidNumber(text)))
    }

    fn string(&mut self, quote: char) -> Result<TokenKind, AsmError> {
        let start = self.pos;
        self.pos += 1;
        let mut s = String::new();
        loop {
            let Some(c) = self.peek() else {
                return Err(self.err(start, SyntaxError::UnterminatedString));
            };
            self.pos += 1;
            match c {
                c if c == quote => return Ok(TokenKind::Str(s)),
                // a backslash only stops the next character from closing the
                // string; both are kept verbatim
                '\\' => {
                    let Some(next) = self.peek() else {
                        return Err(self.err(start, SyntaxError::UnterminatedString));
                    };
                    self.pos += 1;
                    s.push('\\');
                    s.push(next);
                }
                c => s.push(c),
            }
        }
    }
}
