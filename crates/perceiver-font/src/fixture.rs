//! Canned page for exercising the perceiver without a browser
//!
//! Elements carry fixed facts, font availability is a fixed set, and every
//! highlight-side call is recorded so tests can assert on what reached the
//! page.

use std::collections::BTreeSet;

use async_trait::async_trait;
use fontscope_core_types::{InspectError, NodeRef};
use parking_lot::Mutex;

use crate::model::{ElementFacts, EnumerationScope};
use crate::ports::PagePort;

#[derive(Default)]
pub struct FixturePage {
    elements: Vec<ElementFacts>,
    available: BTreeSet<String>,
    probes: Mutex<Vec<String>>,
    marked: Mutex<Vec<NodeRef>>,
    cleared: Mutex<u32>,
    scrolled: Mutex<Vec<NodeRef>>,
}

impl FixturePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a font as loaded/available on this page.
    pub fn with_available_font(mut self, name: &str) -> Self {
        self.available.insert(name.to_string());
        self
    }

    /// Append an element; its node handle is assigned by insertion order.
    pub fn add(&mut self, facts: ElementFacts) -> NodeRef {
        let node = NodeRef(self.elements.len() as u32);
        self.elements.push(ElementFacts { node, ..facts });
        node
    }

    /// All element facts, in enumeration order.
    pub fn facts(&self) -> Vec<ElementFacts> {
        self.elements.clone()
    }

    /// How often the availability of `name` was probed.
    pub fn probe_count(&self, name: &str) -> usize {
        self.probes.lock().iter().filter(|p| *p == name).count()
    }

    /// Nodes currently marked as highlighted.
    pub fn marked(&self) -> Vec<NodeRef> {
        self.marked.lock().clone()
    }

    /// How often the marks were cleared.
    pub fn clear_count(&self) -> u32 {
        *self.cleared.lock()
    }

    /// Scroll targets, in call order.
    pub fn scroll_targets(&self) -> Vec<NodeRef> {
        self.scrolled.lock().clone()
    }
}

#[async_trait]
impl PagePort for FixturePage {
    async fn snapshot(
        &self,
        scope: &EnumerationScope,
    ) -> Result<Vec<ElementFacts>, InspectError> {
        let facts = match scope {
            EnumerationScope::All => self.elements.clone(),
            EnumerationScope::Tag(tag) => self
                .elements
                .iter()
                .filter(|el| el.tag == *tag)
                .cloned()
                .collect(),
        };
        Ok(facts)
    }

    async fn font_available(&self, name: &str) -> Result<bool, InspectError> {
        self.probes.lock().push(name.to_string());
        Ok(self.available.contains(name))
    }

    async fn clear_marks(&self) -> Result<(), InspectError> {
        *self.cleared.lock() += 1;
        self.marked.lock().clear();
        Ok(())
    }

    async fn mark(&self, nodes: &[NodeRef]) -> Result<(), InspectError> {
        self.marked.lock().extend_from_slice(nodes);
        Ok(())
    }

    async fn scroll_into_view(&self, node: NodeRef) -> Result<(), InspectError> {
        self.scrolled.lock().push(node);
        Ok(())
    }
}
