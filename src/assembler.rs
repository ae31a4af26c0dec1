use serde::Serialize;
use tracing::{debug, trace};

use crate::config::AsmConfig;
use crate::data;
use crate::error::{AsmError, EncodeError};
use crate::grammar::{self, Line, Statement};
use crate::image;
use crate::isa::{InstructionWord, Opcode, JSR_A};
use crate::labels::{Symbol, SymbolTable};
use crate::operand::{encode_operand, Operand};
use crate::word::ProgramWord;

/// Words produced by one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub line: usize,
    pub addr: usize,
    pub len: usize,
}

#[derive(Debug, Clone)]
pub struct Assembly {
    words: Vec<u16>,
    symbols: SymbolTable,
    listing: Vec<ListingEntry>,
}

impl Assembly {
    pub fn words(&self) -> &[u16] {
        &self.words
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        image::to_bytes(&self.words)
    }

    pub fn symbols(&self) -> Vec<Symbol> {
        self.symbols.symbols()
    }

    pub fn address_of(&self, label: &str) -> Option<u16> {
        self.symbols.get(label)
    }

    /// Lines that emitted at least one word.
    pub fn listing(&self) -> &[ListingEntry] {
        &self.listing
    }
}

/// Encodes one instruction into its word plus any extra words.
pub fn encode_instruction(
    op: Opcode,
    a: &Operand,
    b: Option<&Operand>,
    line: usize,
    cfg: &AsmConfig,
) -> Result<Vec<ProgramWord>, EncodeError> {
    let (a, b) = match (op, b) {
        (Opcode::Jsr, None) => (None, encode_operand(a, line, cfg)?),
        (Opcode::Jsr, Some(_)) => return Err(EncodeError::ExtraOperand),
        (_, None) => return Err(EncodeError::MissingOperand(op.mnemonic())),
        (_, Some(b)) => (Some(encode_operand(a, line, cfg)?), encode_operand(b, line, cfg)?),
    };
    let a_code = a.as_ref().map_or(JSR_A, |e| e.code);
    let word = InstructionWord::pack(op.bits(), a_code, b.code);

    let mut out = vec![ProgramWord::Resolved(word.0)];
    out.extend(a.and_then(|e| e.extra));
    out.extend(b.extra);
    Ok(out)
}

#[derive(Debug, Default, Clone)]
pub struct Assembler {
    cfg: AsmConfig,
}

impl Assembler {
    pub fn new(cfg: AsmConfig) -> Self {
        Self { cfg }
    }

    /// Parses, generates and resolves `source` in one go.
    pub fn assemble(&self, source: &str) -> Result<Assembly, AsmError> {
        let lines = grammar::parse(source)?;
        debug!(lines = lines.len(), "parsed source");
        self.assemble_lines(&lines)
    }

    pub fn assemble_lines(&self, lines: &[Line]) -> Result<Assembly, AsmError> {
        let mut program: Vec<ProgramWord> = Vec::new();
        let mut symbols = SymbolTable::new();
        let mut listing = Vec::new();

        for line in lines {
            let addr = program.len();
            if let Some(name) = &line.label {
                symbols.define(name, addr, line.number)?;
                trace!(label = %name, addr, "label defined");
            }
            let Some(st) = &line.statement else { continue };
            let enc = |kind| AsmError::Encode { line: line.number, kind };
            match st {
                Statement::Data(items) => {
                    let words = data::expand(items).map_err(enc)?;
                    program.extend(words.into_iter().map(ProgramWord::Resolved));
                }
                Statement::Instruction { op, a, b } => {
                    let words = encode_instruction(*op, a, b.as_ref(), line.number, &self.cfg).map_err(enc)?;
                    program.extend(words);
                }
            }
            let len = program.len() - addr;
            trace!(line = line.number, addr, len, "generated");
            if len > 0 {
                listing.push(ListingEntry { line: line.number, addr, len });
            }
        }
        debug!(words = program.len(), labels = symbols.len(), "generation done");

        let words = symbols.resolve(&program)?;
        debug!("labels resolved");
        Ok(Assembly { words, symbols, listing })
    }
}

pub fn assemble(source: &str) -> Result<Assembly, AsmError> {
    Assembler::default().assemble(source)
}
