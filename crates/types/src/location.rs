// crates/types/src/location.rs
//! Canonical `(document, page)` locations derived from RAG source strings.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Where a RAG chunk's source text points inside the document corpus.
///
/// Produced by the source resolver in `chatchw-view-core`; consumed by the
/// dashboard's source buttons and the PDF viewer. Downstream code treats the
/// pair as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../bindings/"))]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocation {
    /// Document file name, e.g. `who-guide.pdf`. Empty only in the explicit
    /// unresolved form returned for empty input.
    pub document_name: String,
    /// 1-based page number, when one was determined.
    pub page: Option<u32>,
}

impl ResolvedLocation {
    pub fn new(document_name: impl Into<String>, page: Option<u32>) -> Self {
        Self {
            document_name: document_name.into(),
            page,
        }
    }

    /// The explicit unresolved form: empty document name, no page.
    pub fn unresolved() -> Self {
        Self {
            document_name: String::new(),
            page: None,
        }
    }

    /// Whether a document was determined. Callers must check this before
    /// using the location as a link target.
    pub fn is_resolved(&self) -> bool {
        !self.document_name.is_empty()
    }
}
