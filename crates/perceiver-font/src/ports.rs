use async_trait::async_trait;
use fontscope_core_types::{InspectError, NodeRef};

use crate::model::{ElementFacts, EnumerationScope};

/// Size of the availability probe, in CSS pixels.
pub const FONT_PROBE_SIZE_PX: u32 = 16;

/// Reference sample the availability probe renders. Both traversal passes
/// must use the same sample or their resolutions can disagree.
pub const FONT_PROBE_SAMPLE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Host-page capability surface the perception core runs against.
///
/// Implemented by the CDP adapter for live pages and by [`crate::FixturePage`]
/// for tests. Node handles returned from `snapshot` stay resolvable until the
/// next `snapshot` call on the same port.
#[async_trait]
pub trait PagePort: Send + Sync {
    /// Enumerate elements in the given scope and observe their facts.
    async fn snapshot(
        &self,
        scope: &EnumerationScope,
    ) -> Result<Vec<ElementFacts>, InspectError>;

    /// Whether the rendering engine has the named font available for the
    /// `16px` reference sample.
    async fn font_available(&self, name: &str) -> Result<bool, InspectError>;

    /// Remove every highlight mark currently on the page.
    async fn clear_marks(&self) -> Result<(), InspectError>;

    /// Mark the given elements as highlighted.
    async fn mark(&self, nodes: &[NodeRef]) -> Result<(), InspectError>;

    /// Scroll the element into the viewport center.
    async fn scroll_into_view(&self, node: NodeRef) -> Result<(), InspectError>;
}
