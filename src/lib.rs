pub mod assembler;
pub mod config;
pub mod data;
pub mod diag;
pub mod error;
pub mod grammar;
pub mod image;
pub mod isa;
pub mod labels;
pub mod lexer;
pub mod operand;
pub mod word;

pub use assembler::{assemble, Assembler, Assembly, ListingEntry};
pub use config::AsmConfig;
pub use diag::Diagnostic;
pub use error::{AsmError, EncodeError, Loc, SyntaxError};
pub use labels::Symbol;
