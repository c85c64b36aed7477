// crates/core/src/resolver.rs
//! Best-effort resolution of free-text RAG source strings to document
//! locations.
//!
//! Upstream RAG chunks carry no structured provenance, only an opaque
//! `source` string: sometimes a path-like fragment
//! (`guides/who-guide.pdf/page_15`), more often a raw excerpt of the chunk
//! text itself. Resolution runs an ordered heuristic chain (first match
//! wins, all matching case-insensitive):
//!
//! 1. empty input → explicit unresolved form
//! 2. curated phrase table, in configured order
//! 3. topic fallback rules, in configured order
//! 4. structural parse of path-like input, else the configured default
//!
//! `resolve` is total: any string, including control characters or binary
//! garbage, produces a structurally valid [`ResolvedLocation`]. Callers
//! never see an error path.

use regex_lite::Regex;
use tracing::debug;

use chatchw_view_types::ResolvedLocation;

use crate::config::ResolverConfig;
use crate::error::ConfigError;

/// Page hint pattern for path segments after the document segment.
///
/// Alternation order is the precedence: `page_7` / `page 7`, then `p.7` /
/// `p7`, then a bare integer. The first non-empty capture group wins.
const PAGE_PATTERN: &str = r"(?i)page[_\s]?(\d+)|p\.?(\d+)|(\d+)";

/// Stateless resolver over one corpus configuration.
///
/// Pure and `Send + Sync`; every call is independent, no caching, no I/O.
/// Construction normalizes the config copy (phrases, terms, and suffix
/// lowered once) so per-call matching only lowers the input.
pub struct SourceResolver {
    config: ResolverConfig,
    page_re: Regex,
}

impl SourceResolver {
    /// Validate a configuration and build a resolver over it.
    pub fn new(config: ResolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut config = config;
        for entry in &mut config.phrase_pages {
            entry.phrase = entry.phrase.to_lowercase();
        }
        for rule in &mut config.topic_rules {
            for clause in &mut rule.any_of {
                for group in clause.iter_mut() {
                    for term in group.iter_mut() {
                        *term = term.to_lowercase();
                    }
                }
            }
        }
        config.document_suffix = config.document_suffix.to_lowercase();
        let page_re = Regex::new(PAGE_PATTERN).expect("page pattern is a valid regex");
        Ok(Self { config, page_re })
    }

    /// Resolver over the shipped ChatCHW deployment table.
    pub fn who_guide() -> Self {
        Self::new(ResolverConfig::who_guide()).expect("shipped table is valid")
    }

    /// The normalized configuration this resolver runs.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a source string to a `(document, page)` location.
    ///
    /// Total over all inputs; the only unresolved output is the explicit
    /// empty-input form `{ "", None }`.
    pub fn resolve(&self, source: &str) -> ResolvedLocation {
        if source.is_empty() {
            return ResolvedLocation::unresolved();
        }
        let lowered = source.to_lowercase();

        // First pass: curated phrase table, precise where it applies.
        for entry in &self.config.phrase_pages {
            if lowered.contains(entry.phrase.as_str()) {
                debug!(phrase = %entry.phrase, page = entry.page, "phrase table hit");
                return ResolvedLocation::new(&self.config.default_document, Some(entry.page));
            }
        }

        // Second pass: coarser topic rules, first satisfied rule wins.
        for rule in &self.config.topic_rules {
            if rule.matches(&lowered) {
                debug!(rule = %rule.label, page = rule.page, "topic rule matched");
                return ResolvedLocation::new(&self.config.default_document, Some(rule.page));
            }
        }

        self.resolve_structural(source)
    }

    /// Parse path-like input: a segment ending in the document suffix names
    /// the document, later segments may carry a page hint.
    fn resolve_structural(&self, source: &str) -> ResolvedLocation {
        let parts: Vec<&str> = source.split(['/', '\\']).collect();
        let doc_index = parts
            .iter()
            .position(|p| p.to_lowercase().ends_with(&self.config.document_suffix));

        let Some(doc_index) = doc_index else {
            // Snippet-style source with no match anywhere: default document.
            debug!(document = %self.config.default_document, "no document segment; using default");
            return ResolvedLocation::new(&self.config.default_document, Some(1));
        };

        let page = if doc_index + 1 < parts.len() {
            let rest = parts[doc_index + 1..].join("/");
            self.page_re.captures(&rest).and_then(|caps| {
                caps.get(1)
                    .or_else(|| caps.get(2))
                    .or_else(|| caps.get(3))
                    .and_then(|m| m.as_str().parse::<u32>().ok())
            })
        } else {
            None
        };

        // A document was named, so a page is always forced: missing,
        // unparseable, or zero hints become page 1.
        let page = page.filter(|&p| p > 0).unwrap_or(1);
        ResolvedLocation::new(parts[doc_index], Some(page))
    }

    /// Viewer-openable locator for a source, `None` when unresolved.
    ///
    /// The page fragment is appended only when a page is known; unlike the
    /// structural fallback inside [`Self::resolve`], this never forces a
    /// default page.
    pub fn viewer_link(&self, source: &str) -> Option<String> {
        let location = self.resolve(source);
        if !location.is_resolved() {
            return None;
        }

        let mut url = format!(
            "{}/{}",
            self.config.viewer_base_path,
            urlencoding::encode(&location.document_name)
        );
        if let Some(page) = location.page {
            url.push_str(&format!("#page={page}"));
        }
        Some(url)
    }

    /// Human-readable name for a source, e.g. `who-guide.pdf (Page 15)`.
    ///
    /// Falls back to the raw source text when unresolved, or to
    /// `"Unknown Source"` when the source itself was empty.
    pub fn display_name(&self, source: &str) -> String {
        let location = self.resolve(source);
        if !location.is_resolved() {
            return if source.is_empty() {
                "Unknown Source".to_string()
            } else {
                source.to_string()
            };
        }

        match location.page {
            Some(page) => format!("{} (Page {page})", location.document_name),
            None => location.document_name,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
