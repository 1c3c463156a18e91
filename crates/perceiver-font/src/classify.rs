//! Shared classification primitive
//!
//! Both the attribution scan and the highlight re-resolution pass run every
//! element through [`Classifier::classify`]. The two passes agreeing on what
//! is reportable, and on which font wins, is what makes a highlight match
//! the report it came from - the rule must not be re-derived anywhere else.

use std::collections::HashMap;

use tracing::trace;

use crate::errors::PerceiverError;
use crate::model::{Classification, ElementFacts, ExclusionReason};
use crate::ports::PagePort;

const STYLE_TAG: &str = "style";

/// Split a computed font-family declaration into its fallback stack.
///
/// Commas separate entries; each entry is trimmed and every quote character
/// removed. Entries left empty are dropped. Order is preserved - it is the
/// fallback preference order.
pub fn parse_font_stack(declaration: &str) -> Vec<String> {
    declaration
        .split(',')
        .map(|entry| entry.trim().replace(['\'', '"'], ""))
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Classifies elements for one traversal pass.
///
/// One instance lives for exactly one pass, so the availability memo can
/// never leak answers across page states.
pub struct Classifier<'a> {
    page: &'a dyn PagePort,
    availability: HashMap<String, bool>,
}

impl<'a> Classifier<'a> {
    pub fn new(page: &'a dyn PagePort) -> Self {
        Self {
            page,
            availability: HashMap::new(),
        }
    }

    /// Classify one observed element: reportable with its resolved font, or
    /// excluded with the reason.
    pub async fn classify(
        &mut self,
        facts: &ElementFacts,
    ) -> Result<Classification, PerceiverError> {
        if facts.tag == STYLE_TAG {
            return Ok(Classification::Excluded(ExclusionReason::StyleContainer));
        }
        if facts.display == "none"
            || facts.visibility == "hidden"
            || facts.width <= 0.0
            || facts.height <= 0.0
        {
            return Ok(Classification::Excluded(ExclusionReason::NotVisible));
        }
        if !facts.has_direct_text {
            return Ok(Classification::Excluded(ExclusionReason::NoDirectText));
        }

        match self.resolve_font(&facts.font_family).await? {
            Some(font) => Ok(Classification::Reportable {
                tag: facts.tag.clone(),
                font,
            }),
            None => Ok(Classification::Excluded(ExclusionReason::NoAvailableFont)),
        }
    }

    /// First entry of the fallback stack the engine reports available.
    async fn resolve_font(
        &mut self,
        declaration: &str,
    ) -> Result<Option<String>, PerceiverError> {
        for name in parse_font_stack(declaration) {
            if self.is_available(&name).await? {
                return Ok(Some(name));
            }
            trace!(target: "perceiver-font", font = %name, "stack entry unavailable");
        }
        Ok(None)
    }

    async fn is_available(&mut self, name: &str) -> Result<bool, PerceiverError> {
        if let Some(&known) = self.availability.get(name) {
            return Ok(known);
        }
        let available = self.page.font_available(name).await?;
        self.availability.insert(name.to_string(), available);
        Ok(available)
    }
}
