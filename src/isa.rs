//! DCPU-16 instruction set tables and the basic instruction word layout.
//!
//! ```text
//!  15        10 9         4 3     0
//! +------------+-----------+-------+
//! |  b (6 bit) | a (6 bit) | o (4) |
//! +------------+-----------+-------+
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    A,
    B,
    C,
    X,
    Y,
    Z,
    I,
    J,
    Sp,
    Pc,
    O,
}

impl Register {
    pub const GENERAL: [Register; 8] = [
        Register::A,
        Register::B,
        Register::C,
        Register::X,
        Register::Y,
        Register::Z,
        Register::I,
        Register::J,
    ];

    /// Operand field code when used directly as a value.
    pub fn code(self) -> u8 {
        match self {
            Register::A => 0x00,
            Register::B => 0x01,
            Register::C => 0x02,
            Register::X => 0x03,
            Register::Y => 0x04,
            Register::Z => 0x05,
            Register::I => 0x06,
            Register::J => 0x07,
            Register::Sp => 0x1B,
            Register::Pc => 0x1C,
            Register::O => 0x1D,
        }
    }

    /// Index 0..8 for the general registers; `None` for SP, PC and O.
    pub fn index(self) -> Option<u8> {
        match self {
            Register::Sp | Register::Pc | Register::O => None,
            r => Some(r.code()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Register::A => "A",
            Register::B => "B",
            Register::C => "C",
            Register::X => "X",
            Register::Y => "Y",
            Register::Z => "Z",
            Register::I => "I",
            Register::J => "J",
            Register::Sp => "SP",
            Register::Pc => "PC",
            Register::O => "O",
        }
    }

    /// Expects an already upper-cased word.
    pub fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "A" => Register::A,
            "B" => Register::B,
            "C" => Register::C,
            "X" => Register::X,
            "Y" => Register::Y,
            "Z" => Register::Z,
            "I" => Register::I,
            "J" => Register::J,
            "SP" => Register::Sp,
            "PC" => Register::Pc,
            "O" => Register::O,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackOp {
    Pop,
    Peek,
    Push,
}

impl StackOp {
    pub fn code(self) -> u8 {
        match self {
            StackOp::Pop => 0x18,
            StackOp::Peek => 0x19,
            StackOp::Push => 0x1A,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StackOp::Pop => "POP",
            StackOp::Peek => "PEEK",
            StackOp::Push => "PUSH",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "POP" => Some(StackOp::Pop),
            "PEEK" => Some(StackOp::Peek),
            "PUSH" => Some(StackOp::Push),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    Set,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Shl,
    Shr,
    And,
    Bor,
    Xor,
    Ife,
    Ifn,
    Ifg,
    Ifb,
    /// Non-basic: encoded with `o = 0` and `a = 0x01`.
    Jsr,
}

#[derive(Debug, Clone, Copy)]
pub struct OpcodeDesc {
    pub op: Opcode,
    pub mnemonic: &'static str,
    pub bits: u8,
}

pub const TABLE: &[OpcodeDesc] = &[
    OpcodeDesc { op: Opcode::Set, mnemonic: "SET", bits: 0x1 },
    OpcodeDesc { op: Opcode::Add, mnemonic: "ADD", bits: 0x2 },
    OpcodeDesc { op: Opcode::Sub, mnemonic: "SUB", bits: 0x3 },
    OpcodeDesc { op: Opcode::Mul, mnemonic: "MUL", bits: 0x4 },
    OpcodeDesc { op: Opcode::Div, mnemonic: "DIV", bits: 0x5 },
    OpcodeDesc { op: Opcode::Mod, mnemonic: "MOD", bits: 0x6 },
    OpcodeDesc { op: Opcode::Shl, mnemonic: "SHL", bits: 0x7 },
    OpcodeDesc { op: Opcode::Shr, mnemonic: "SHR", bits: 0x8 },
    OpcodeDesc { op: Opcode::And, mnemonic: "AND", bits: 0x9 },
    OpcodeDesc { op: Opcode::Bor, mnemonic: "BOR", bits: 0xA },
    OpcodeDesc { op: Opcode::Xor, mnemonic: "XOR", bits: 0xB },
    OpcodeDesc { op: Opcode::Ife, mnemonic: "IFE", bits: 0xC },
    OpcodeDesc { op: Opcode::Ifn, mnemonic: "IFN", bits: 0xD },
    OpcodeDesc { op: Opcode::Ifg, mnemonic: "IFG", bits: 0xE },
    OpcodeDesc { op: Opcode::Ifb, mnemonic: "IFB", bits: 0xF },
    OpcodeDesc { op: Opcode::Jsr, mnemonic: "JSR", bits: 0x0 },
];

pub const JSR_A: u8 = 0x01;

impl Opcode {
    fn desc(self) -> &'static OpcodeDesc {
        // TABLE rows follow declaration order
        &TABLE[self as usize]
    }

    pub fn mnemonic(self) -> &'static str {
        self.desc().mnemonic
    }

    pub fn bits(self) -> u8 {
        self.desc().bits
    }

    pub fn from_mnemonic(word: &str) -> Option<Self> {
        TABLE.iter().find(|d| d.mnemonic == word).map(|d| d.op)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionWord(pub u16);

impl InstructionWord {
    /// Packs the three fields; `o` is masked to 4 bits and `a`/`b` to 6.
    pub fn pack(o: u8, a: u8, b: u8) -> Self {
        let raw = ((b as u16 & 0x3F) << 10) | ((a as u16 & 0x3F) << 4) | (o as u16 & 0xF);
        InstructionWord(raw)
    }

    pub fn opcode(self) -> u8 {
        (self.0 & 0xF) as u8
    }

    pub fn a(self) -> u8 {
        ((self.0 >> 4) & 0x3F) as u8
    }

    pub fn b(self) -> u8 {
        ((self.0 >> 10) & 0x3F) as u8
    }
}
