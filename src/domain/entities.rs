//! Domain entities for the reconciliation run.

/// A collection within the configured Discovery project.
///
/// Collections are enumerated from the service at the start of each run;
/// this tool never creates or owns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub id: String,
    /// Display name used in logs and the error report. Collections without
    /// a name are reported as `"Unnamed"`.
    pub name: String,
}

impl Collection {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
