use crate::consolidate::Field;

/// How a client header was matched to a canonical field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Canonical, // Header is the field's own output label
    Synonym,   // Built-in synonym
    Custom,    // Operator-supplied alias from the config file
}

impl MatchKind {
    /// Get display label for match kind
    pub fn label(&self) -> &'static str {
        match self {
            MatchKind::Canonical => "[Canonical]",
            MatchKind::Synonym => "[Synonym]",
            MatchKind::Custom => "[Custom]",
        }
    }
}

/// Result of resolving a single header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasMatch {
    pub field: Field,
    pub kind: MatchKind,
}

impl AliasMatch {
    pub fn new(field: Field, kind: MatchKind) -> Self {
        Self { field, kind }
    }
}

/// One registered alias, kept for listing the effective table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    /// Label as written in the table or config file
    pub label: String,
    pub kind: MatchKind,
    /// False when an earlier registration already claimed the key
    pub active: bool,
}
