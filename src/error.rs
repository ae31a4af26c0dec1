use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Loc {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("invalid number literal \"{0}\"")]
    InvalidNumber(String),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("expected label name after ':'")]
    EmptyLabel,
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),
    #[error("expected {expected}, found {found}")]
    Expected { expected: &'static str, found: String },
    #[error("unmatched '{0}'")]
    Unmatched(char),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("register {0} cannot be used indirectly")]
    IndirectRegister(&'static str),
    #[error("stack operation {0} cannot be used indirectly")]
    IndirectStack(&'static str),
    #[error("empty literal")]
    EmptyLiteral,
    #[error("label `{0}` used as an indirect offset")]
    SymbolicOffset(String),
    #[error("literal {0:#x} does not fit in 16 bits")]
    LiteralOutOfRange(u32),
    #[error("character {0:?} does not fit in a byte")]
    CharOutOfRange(char),
    #[error("{0} expects two operands")]
    MissingOperand(&'static str),
    #[error("JSR takes a single operand")]
    ExtraOperand,
    #[error("address {0:#x} is beyond the 16-bit address space")]
    AddressOverflow(usize),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("syntax error at {loc}: {kind}")]
    Syntax { loc: Loc, kind: SyntaxError },
    #[error("line {line}: {kind}")]
    Encode { line: usize, kind: EncodeError },
    #[error("line {line}: undefined label `{name}`")]
    Undefined { line: usize, name: String },
    #[error("line {line}: label `{name}` already defined on line {first}")]
    Duplicate { line: usize, name: String, first: usize },
}

impl AsmError {
    /// Position to point at when rendering the error.
    pub fn loc(&self) -> Loc {
        match self {
            AsmError::Syntax { loc, .. } => *loc,
            AsmError::Encode { line, .. }
            | AsmError::Undefined { line, .. }
            | AsmError::Duplicate { line, .. } => Loc { line: *line, column: 1 },
        }
    }

    /// The message without its position, for callers that print [`AsmError::loc`] themselves.
    pub fn detail(&self) -> String {
        match self {
            AsmError::Syntax { kind, .. } => format!("syntax error: {kind}"),
            AsmError::Encode { kind, .. } => kind.to_string(),
            AsmError::Undefined { name, .. } => format!("undefined label `{name}`"),
            AsmError::Duplicate { name, first, .. } => {
                format!("label `{name}` already defined on line {first}")
            }
        }
    }
}
