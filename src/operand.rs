use serde::{Deserialize, Serialize};

use crate::config::AsmConfig;
use crate::error::EncodeError;
use crate::isa::{Register, StackOp};
use crate::word::ProgramWord;

/// Largest literal that fits inside the operand field itself.
pub const INLINE_MAX: u32 = 0x1F;

pub const NEXT_WORD: u8 = 0x1F;
pub const NEXT_WORD_INDIRECT: u8 = 0x1E;
const INDIRECT_REG: u8 = 0x08;
const INDIRECT_OFFSET: u8 = 0x10;
const INLINE: u8 = 0x20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Literal {
    Number(u32),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Basic {
    Register(Register),
    Stack(StackOp),
    Literal(Literal),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Register(Register),
    Stack(StackOp),
    Literal(Literal),
    /// `[x]` or `(x)`
    Indirect(Basic),
    /// `[literal + register]`
    IndirectOffset(Literal, Register),
}

impl From<Basic> for Operand {
    fn from(b: Basic) -> Self {
        match b {
            Basic::Register(r) => Operand::Register(r),
            Basic::Stack(s) => Operand::Stack(s),
            Basic::Literal(l) => Operand::Literal(l),
        }
    }
}

/// Field code plus the word that follows the instruction, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub code: u8,
    pub extra: Option<ProgramWord>,
}

impl Encoded {
    fn bare(code: u8) -> Self {
        Self { code, extra: None }
    }

    fn with(code: u8, extra: ProgramWord) -> Self {
        Self { code, extra: Some(extra) }
    }
}

fn literal_word(lit: &Literal, line: usize) -> Result<ProgramWord, EncodeError> {
    match lit {
        Literal::Number(n) => ProgramWord::number(*n),
        Literal::Label(name) if name.is_empty() => Err(EncodeError::EmptyLiteral),
        Literal::Label(name) => Ok(ProgramWord::label(name.as_str(), line)),
    }
}

fn general_index(r: Register) -> Result<u8, EncodeError> {
    r.index().ok_or(EncodeError::IndirectRegister(r.name()))
}

/// Classifies one operand. `line` is attached to label references so that
/// an unresolved name can be reported where it was used.
pub fn encode_operand(op: &Operand, line: usize, cfg: &AsmConfig) -> Result<Encoded, EncodeError> {
    let enc = match op {
        Operand::Register(r) => Encoded::bare(r.code()),
        Operand::Stack(s) => Encoded::bare(s.code()),
        Operand::Literal(Literal::Number(n)) if *n <= INLINE_MAX => Encoded::bare(INLINE | *n as u8),
        Operand::Literal(lit) => Encoded::with(NEXT_WORD, literal_word(lit, line)?),
        Operand::Indirect(Basic::Register(r)) => Encoded::bare(INDIRECT_REG + general_index(*r)?),
        Operand::Indirect(Basic::Stack(s)) => return Err(EncodeError::IndirectStack(s.name())),
        Operand::Indirect(Basic::Literal(lit)) => {
            Encoded::with(NEXT_WORD_INDIRECT, literal_word(lit, line)?)
        }
        Operand::IndirectOffset(lit, r) => {
            let index = general_index(*r)?;
            if let Literal::Label(name) = lit {
                if !cfg.label_offsets && !name.is_empty() {
                    return Err(EncodeError::SymbolicOffset(name.clone()));
                }
            }
            Encoded::with(INDIRECT_OFFSET | index, literal_word(lit, line)?)
        }
    };
    Ok(enc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(op: Operand) -> Result<Encoded, EncodeError> {
        encode_operand(&op, 1, &AsmConfig::default())
    }

    #[test]
    fn registers_and_stack() {
        assert_eq!(enc(Operand::Register(Register::J)).unwrap(), Encoded::bare(0x07));
        assert_eq!(enc(Operand::Register(Register::Pc)).unwrap(), Encoded::bare(0x1C));
        assert_eq!(enc(Operand::Stack(StackOp::Push)).unwrap(), Encoded::bare(0x1A));
    }

    #[test]
    fn inline_boundary() {
        let lit = |n| Operand::Literal(Literal::Number(n));
        assert_eq!(enc(lit(0)).unwrap(), Encoded::bare(0x20));
        assert_eq!(enc(lit(0x1F)).unwrap(), Encoded::bare(0x3F));
        assert_eq!(
            enc(lit(0x20)).unwrap(),
            Encoded::with(0x1F, ProgramWord::Resolved(0x20))
        );
    }

    #[test]
    fn indirect_forms() {
        assert_eq!(enc(Operand::Indirect(Basic::Register(Register::B))).unwrap(), Encoded::bare(0x09));
        assert_eq!(
            enc(Operand::IndirectOffset(Literal::Number(0x2000), Register::I)).unwrap(),
            Encoded::with(0x16, ProgramWord::Resolved(0x2000))
        );
        // small literals are never inlined inside brackets
        assert_eq!(
            enc(Operand::Indirect(Basic::Literal(Literal::Number(3)))).unwrap(),
            Encoded::with(0x1E, ProgramWord::Resolved(3))
        );
    }

    #[test]
    fn restricted_registers() {
        assert_eq!(
            enc(Operand::Indirect(Basic::Register(Register::Pc))),
            Err(EncodeError::IndirectRegister("PC"))
        );
        assert_eq!(
            enc(Operand::IndirectOffset(Literal::Number(1), Register::Sp)),
            Err(EncodeError::IndirectRegister("SP"))
        );
        assert_eq!(
            enc(Operand::Indirect(Basic::Stack(StackOp::Pop))),
            Err(EncodeError::IndirectStack("POP"))
        );
    }

    #[test]
    fn empty_label_is_rejected() {
        assert_eq!(
            enc(Operand::Literal(Literal::Label(String::new()))),
            Err(EncodeError::EmptyLiteral)
        );
    }
}
