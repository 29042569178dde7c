use serde::Serialize;

#[derive(Debug, Serialize, PartialEq)]
pub struct ExportEntry {
    pub word: String,
    pub definition: String,
}

#[derive(Debug, Default, PartialEq)]
pub struct WarmReport {
    pub added: usize,
    pub cached: usize,
    pub failed: usize,
}
