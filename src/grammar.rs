//! Line-oriented recursive-descent grammar.
//!
//! ```text
//! line      := [":" ident] [statement] [";" comment]
//! statement := mnemonic operand ["," operand]
//!            | "DAT" [datum {"," datum}]
//! operand   := "[" inner "]" | "(" inner ")" | basic
//! inner     := literal "+" register | basic
//! basic     := register | stack_op | literal
//! literal   := number | ident
//! datum     := number | string
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AsmError, Loc, SyntaxError};
use crate::isa::{Opcode, Register};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::operand::{Basic, Literal, Operand};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Datum {
    Number(u32),
    Str(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    Instruction {
        op: Opcode,
        a: Operand,
        b: Option<Operand>,
    },
    Data(Vec<Datum>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// 1-based.
    pub number: usize,
    pub label: Option<String>,
    pub statement: Option<Statement>,
    pub comment: Option<String>,
}

/// Parses a whole source text. Fails on the first malformed line.
pub fn parse(source: &str) -> Result<Vec<Line>, AsmError> {
    source
        .lines()
        .enumerate()
        .map(|(i, text)| parse_line(text, i + 1))
        .collect()
}

pub fn parse_line(text: &str, number: usize) -> Result<Line, AsmError> {
    let tokens = Lexer::new(text, number).tokenize()?;
    let eol = Loc { line: number, column: text.chars().count() + 1 };
    let mut p = Parser { tokens, pos: 0, eol };

    let label = match p.peek() {
        Some(TokenKind::Label(name)) => {
            let name = name.clone();
            p.pos += 1;
            Some(name)
        }
        _ => None,
    };
    let statement = p.statement()?;
    let comment = match p.peek() {
        Some(TokenKind::Comment(c)) => {
            let c = c.clone();
            p.pos += 1;
            Some(c)
        }
        _ => None,
    };
    if p.peek().is_some() {
        return Err(p.expected("end of line"));
    }
    Ok(Line { number, label, statement, comment })
}

fn describe(kind: Option<&TokenKind>) -> String {
    match kind {
        None => "end of line".into(),
        Some(TokenKind::Label(n)) => format!("label definition `:{n}`"),
        Some(TokenKind::Register(r)) => format!("register {}", r.name()),
        Some(TokenKind::Stack(s)) => s.name().into(),
        Some(TokenKind::Mnemonic(op)) => format!("mnemonic {}", op.mnemonic()),
        Some(TokenKind::Dat) => "DAT".into(),
        Some(TokenKind::Ident(i)) => format!("`{i}`"),
        Some(TokenKind::Number(n)) => format!("{n:#x}"),
        Some(TokenKind::Str(_)) => "string".into(),
        Some(TokenKind::Comma) => "','".into(),
        Some(TokenKind::Plus) => "'+'".into(),
        Some(TokenKind::OpenBracket) => "'['".into(),
        Some(TokenKind::CloseBracket) => "']'".into(),
        Some(TokenKind::OpenParen) => "'('".into(),
        Some(TokenKind::CloseParen) => "')'".into(),
        Some(TokenKind::Comment(_)) => "comment".into(),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    eol: Loc,
}

impl Parser {
    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn peek_at(&self, ahead: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + ahead).map(|t| &t.kind)
    }

    fn loc(&self) -> Loc {
        self.tokens.get(self.pos).map_or(self.eol, |t| t.loc)
    }

    fn expected(&self, expected: &'static str) -> AsmError {
        AsmError::Syntax {
            loc: self.loc(),
            kind: SyntaxError::Expected { expected, found: describe(self.peek()) },
        }
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn statement(&mut self) -> Result<Option<Statement>, AsmError> {
        let st = match self.peek() {
            None | Some(TokenKind::Comment(_)) => return Ok(None),
            Some(TokenKind::Mnemonic(op)) => {
                let op = *op;
                self.pos += 1;
                let a = self.operand()?;
                let b = if self.eat(&TokenKind::Comma) { Some(self.operand()?) } else { None };
                Statement::Instruction { op, a, b }
            }
            Some(TokenKind::Dat) => {
                self.pos += 1;
                Statement::Data(self.data()?)
            }
            Some(TokenKind::Ident(name)) => {
                return Err(AsmError::Syntax {
                    loc: self.loc(),
                    kind: SyntaxError::UnknownMnemonic(name.to_ascii_uppercase()),
                })
            }
            Some(_) => return Err(self.expected("instruction")),
        };
        Ok(Some(st))
    }

    fn data(&mut self) -> Result<Vec<Datum>, AsmError> {
        let mut items = Vec::new();
        if matches!(self.peek(), None | Some(TokenKind::Comment(_))) {
            return Ok(items);
        }
        loop {
            let d = match self.peek() {
                Some(TokenKind::Number(n)) => Datum::Number(*n),
                Some(TokenKind::Str(s)) => Datum::Str(s.clone()),
                _ => return Err(self.expected("number or string")),
            };
            self.pos += 1;
            items.push(d);
            if !self.eat(&TokenKind::Comma) {
                return Ok(items);
            }
        }
    }

    fn operand(&mut self) -> Result<Operand, AsmError> {
        let (close, open_ch, close_desc) = match self.peek() {
            Some(TokenKind::OpenBracket) => (TokenKind::CloseBracket, '[', "']'"),
            Some(TokenKind::OpenParen) => (TokenKind::CloseParen, '(', "')'"),
            _ => return Ok(self.basic()?.into()),
        };
        let open_loc = self.loc();
        self.pos += 1;

        let is_offset = matches!(self.peek(), Some(TokenKind::Number(_) | TokenKind::Ident(_)))
            && self.peek_at(1) == Some(&TokenKind::Plus);
        let op = if is_offset {
            let lit = self.literal()?;
            self.pos += 1; // '+'
            Operand::IndirectOffset(lit, self.register()?)
        } else {
            Operand::Indirect(self.basic()?)
        };

        if self.eat(&close) {
            Ok(op)
        } else if self.peek().is_none() {
            Err(AsmError::Syntax { loc: open_loc, kind: SyntaxError::Unmatched(open_ch) })
        } else {
            Err(self.expected(close_desc))
        }
    }

    fn basic(&mut self) -> Result<Basic, AsmError> {
        let b = match self.peek() {
            Some(TokenKind::Register(r)) => Basic::Register(*r),
            Some(TokenKind::Stack(s)) => Basic::Stack(*s),
            Some(TokenKind::Number(_) | TokenKind::Ident(_)) => return Ok(Basic::Literal(self.literal()?)),
            _ => return Err(self.expected("operand")),
        };
        self.pos += 1;
        Ok(b)
    }

    fn literal(&mut self) -> Result<Literal, AsmError> {
        let lit = match self.peek() {
            Some(TokenKind::Number(n)) => Literal::Number(*n),
            Some(TokenKind::Ident(name)) => Literal::Label(name.clone()),
            _ => return Err(self.expected("literal")),
        };
        self.pos += 1;
        Ok(lit)
    }

    fn register(&mut self) -> Result<Register, AsmError> {
        match self.peek() {
            Some(TokenKind::Register(r)) => {
                let r = *r;
                self.pos += 1;
                Ok(r)
            }
            _ => Err(self.expected("register")),
        }
    }
}
