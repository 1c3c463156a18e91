//! Core types for font attribution

use std::collections::{BTreeMap, BTreeSet};

use fontscope_core_types::NodeRef;
use serde::{Deserialize, Serialize};

/// Which elements one page snapshot enumerates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EnumerationScope {
    /// Every element in the document.
    All,
    /// Only elements with the given (lowercase) tag name.
    Tag(String),
}

impl EnumerationScope {
    /// CSS selector matching this scope.
    pub fn selector(&self) -> &str {
        match self {
            EnumerationScope::All => "*",
            EnumerationScope::Tag(tag) => tag,
        }
    }
}

/// Tags whose font attribution is ambiguous because nearly every element can
/// inherit from them.
pub fn is_root_scope_tag(tag: &str) -> bool {
    matches!(tag, "html" | "body")
}

/// Per-element observation returned by the page port for one enumeration
/// pass. Field names follow the wire shape the CDP adapter's probe returns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementFacts {
    pub node: NodeRef,
    /// Lowercase element type name.
    pub tag: String,
    pub display: String,
    pub visibility: String,
    pub width: f64,
    pub height: f64,
    /// Whether at least one direct child text node has non-empty trimmed
    /// content. Text inherited only through descendants does not count.
    pub has_direct_text: bool,
    /// Raw computed font-family declaration.
    pub font_family: String,
    /// The element's own inline font-family declaration, empty when absent.
    pub inline_font_family: String,
}

impl ElementFacts {
    /// A visible, text-bearing element with the given computed font stack.
    /// Starting point for fixtures; the node handle is assigned by the page.
    pub fn visible(tag: &str, font_family: &str) -> Self {
        Self {
            node: NodeRef(0),
            tag: tag.to_string(),
            display: "block".to_string(),
            visibility: "visible".to_string(),
            width: 120.0,
            height: 18.0,
            has_direct_text: true,
            font_family: font_family.to_string(),
            inline_font_family: String::new(),
        }
    }

    pub fn with_inline_font(mut self, declaration: &str) -> Self {
        self.inline_font_family = declaration.to_string();
        self
    }

    pub fn with_display(mut self, display: &str) -> Self {
        self.display = display.to_string();
        self
    }

    pub fn with_visibility(mut self, visibility: &str) -> Self {
        self.visibility = visibility.to_string();
        self
    }

    pub fn with_box(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn without_direct_text(mut self) -> Self {
        self.has_direct_text = false;
        self
    }
}

/// Outcome of classifying one element.
#[derive(Clone, Debug, PartialEq)]
pub enum Classification {
    /// Counts toward the report under (font, tag).
    Reportable { tag: String, font: String },
    Excluded(ExclusionReason),
}

/// Why an element contributes nothing to attribution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExclusionReason {
    /// Style-sheet container tags hold CSS text, never user-visible text.
    StyleContainer,
    /// Display none, visibility hidden, or a collapsed rendered box.
    NotVisible,
    NoDirectText,
    /// No entry of the font stack is available for rendering.
    NoAvailableFont,
}

impl ExclusionReason {
    pub fn name(&self) -> &'static str {
        match self {
            ExclusionReason::StyleContainer => "style-container",
            ExclusionReason::NotVisible => "not-visible",
            ExclusionReason::NoDirectText => "no-direct-text",
            ExclusionReason::NoAvailableFont => "no-available-font",
        }
    }
}

/// Aggregated result of one attribution scan. Holds no element handles;
/// safe to hand across the messaging boundary once serialized.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributionReport {
    /// font name -> tags that font appears in
    pub tags_by_font: BTreeMap<String, BTreeSet<String>>,
    /// font name -> tag -> element count
    pub counts_by_font_and_tag: BTreeMap<String, BTreeMap<String, u64>>,
}

impl AttributionReport {
    /// Record one reportable element. Keeps the two mappings in lockstep:
    /// a tag is present for a font exactly when its count is positive.
    pub fn record(&mut self, font: &str, tag: &str) {
        self.tags_by_font
            .entry(font.to_string())
            .or_default()
            .insert(tag.to_string());
        *self
            .counts_by_font_and_tag
            .entry(font.to_string())
            .or_default()
            .entry(tag.to_string())
            .or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.tags_by_font.is_empty()
    }

    pub fn count(&self, font: &str, tag: &str) -> u64 {
        self.counts_by_font_and_tag
            .get(font)
            .and_then(|tags| tags.get(tag))
            .copied()
            .unwrap_or(0)
    }

    /// Total elements attributed to one font across all tags.
    pub fn total_for_font(&self, font: &str) -> u64 {
        self.counts_by_font_and_tag
            .get(font)
            .map(|tags| tags.values().sum())
            .unwrap_or(0)
    }

    /// Serialized form exchanged over the messaging boundary: the tag set
    /// becomes a tag list.
    pub fn to_payload(&self) -> FontReportPayload {
        FontReportPayload {
            tag_by_font: self
                .tags_by_font
                .iter()
                .map(|(font, tags)| (font.clone(), tags.iter().cloned().collect()))
                .collect(),
            counts_by_font_and_tag: self.counts_by_font_and_tag.clone(),
        }
    }
}

/// Wire shape of an attribution report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontReportPayload {
    pub tag_by_font: BTreeMap<String, Vec<String>>,
    pub counts_by_font_and_tag: BTreeMap<String, BTreeMap<String, u64>>,
}

/// Element set matching one (font, tag) highlight query. Exists only for
/// the duration of one highlight request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighlightSelection {
    pub nodes: Vec<NodeRef>,
}

impl HighlightSelection {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First element in enumeration order; the scroll target.
    pub fn first(&self) -> Option<NodeRef> {
        self.nodes.first().copied()
    }
}

/// What the highlighter did with a selection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HighlightOutcome {
    Applied { marked: usize },
    /// Nothing matched; previous marks were still cleared.
    NoMatch,
}

impl HighlightOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, HighlightOutcome::Applied { .. })
    }
}
