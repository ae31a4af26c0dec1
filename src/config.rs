use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsmConfig {
    pub label_offsets: bool, // labels allowed as the offset in `[L + R]`
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self { label_offsets: true }
    }
}
