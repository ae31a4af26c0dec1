use crate::error::EncodeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramWord {
    Resolved(u16),
    /// Reference to a label, with the source line that used it.
    Pending { name: String, line: usize },
}

/// Range-checks a literal before it enters the word stream.
pub fn to_word(n: u32) -> Result<u16, EncodeError> {
    u16::try_from(n).map_err(|_| EncodeError::LiteralOutOfRange(n))
}

impl ProgramWord {
    pub fn number(n: u32) -> Result<Self, EncodeError> {
        to_word(n).map(ProgramWord::Resolved)
    }

    pub fn label(name: impl Into<String>, line: usize) -> Self {
        ProgramWord::Pending { name: name.into(), line }
    }
}
