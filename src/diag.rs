use std::fmt;

use crate::error::{AsmError, Loc};

/// An error rendered against the source it came from:
///
/// ```text
/// prog.asm:3:8: syntax error: expected operand, found ']'
///     SET B, ]
///            ^
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub source_name: String,
    pub loc: Loc,
    pub message: String,
    pub snippet: Option<String>,
}

impl Diagnostic {
    pub fn new(source_name: &str, source: &str, err: &AsmError) -> Self {
        let loc = err.loc();
        let snippet = source.lines().nth(loc.line.saturating_sub(1)).map(|l| l.to_string());
        Self {
            source_name: source_name.to_string(),
            loc,
            message: err.detail(),
            snippet,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.source_name, self.loc, self.message)?;
        if let Some(line) = &self.snippet {
            // keep tabs so the caret lines up
            let pad: String = line
                .chars()
                .take(self.loc.column.saturating_sub(1))
                .map(|c| if c == '\t' { '\t' } else { ' ' })
                .collect();
            write!(f, "\n    {line}\n    {pad}^")?;
        }
        Ok(())
    }
}
