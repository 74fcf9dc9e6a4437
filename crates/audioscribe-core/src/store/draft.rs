use serde::{Deserialize, Serialize};

/// Working copy of the note currently being created.
///
/// Filled incrementally as pipeline steps complete and discarded when the
/// note is committed or the pipeline is abandoned. Kept separate from the
/// progress tracker; the two are only consistent to the extent the caller
/// keeps them so.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: Option<String>,
    pub transcript: Option<String>,
    pub content: Option<String>,
}
