use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{AsmError, EncodeError};
use crate::word::ProgramWord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub addr: u16,
    pub name: String,
}

#[derive(Debug, Clone, Copy)]
struct Binding {
    addr: u16,
    line: usize,
}

#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    map: HashMap<String, Binding>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to the word index `addr`. Names may be bound once.
    pub fn define(&mut self, name: &str, addr: usize, line: usize) -> Result<(), AsmError> {
        if let Some(prev) = self.map.get(name) {
            return Err(AsmError::Duplicate { line, name: name.to_string(), first: prev.line });
        }
        let addr = u16::try_from(addr)
            .map_err(|_| AsmError::Encode { line, kind: EncodeError::AddressOverflow(addr) })?;
        self.map.insert(name.to_string(), Binding { addr, line });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.map.get(name).map(|b| b.addr)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All bindings ordered by address, then name.
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut out: Vec<Symbol> = self
            .map
            .iter()
            .map(|(name, b)| Symbol { addr: b.addr, name: name.clone() })
            .collect();
        out.sort_by(|x, y| x.addr.cmp(&y.addr).then_with(|| x.name.cmp(&y.name)));
        out
    }

    /// Substitutes every pending reference. The first undefined name aborts.
    pub fn resolve(&self, words: &[ProgramWord]) -> Result<Vec<u16>, AsmError> {
        words
            .iter()
            .map(|w| match w {
                ProgramWord::Resolved(v) => Ok(*v),
                ProgramWord::Pending { name, line } => self.get(name).ok_or_else(|| {
                    AsmError::Undefined { line: *line, name: name.clone() }
                }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_pending_words() {
        let mut t = SymbolTable::new();
        t.define("start", 0, 1).unwrap();
        t.define("end", 5, 9).unwrap();
        let words = vec![
            ProgramWord::Resolved(0x7DC1),
            ProgramWord::label("end", 2),
            ProgramWord::label("start", 3),
        ];
        assert_eq!(t.resolve(&words).unwrap(), vec![0x7DC1, 5, 0]);
    }

    #[test]
    fn undefined_label_reports_use_site() {
        let t = SymbolTable::new();
        let err = t.resolve(&[ProgramWord::label("nowhere", 12)]).unwrap_err();
        assert_eq!(err, AsmError::Undefined { line: 12, name: "nowhere".into() });
    }

    #[test]
    fn redefinition_is_an_error() {
        let mut t = SymbolTable::new();
        t.define("x", 0, 1).unwrap();
        assert_eq!(
            t.define("x", 4, 6),
            Err(AsmError::Duplicate { line: 6, name: "x".into(), first: 1 })
        );
        assert_eq!(t.get("x"), Some(0));
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut t = SymbolTable::new();
        t.define("loop", 1, 1).unwrap();
        t.define("LOOP", 2, 2).unwrap();
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn symbols_sorted_by_address() {
        let mut t = SymbolTable::new();
        t.define("b", 3, 1).unwrap();
        t.define("a", 0, 2).unwrap();
        t.define("c", 3, 3).unwrap();
        let names: Vec<_> = t.symbols().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
