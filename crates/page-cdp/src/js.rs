//! Script builders for the page-side probes.
//!
//! Every snippet is a self-invoking expression returning a JSON-serializable
//! value, so `Runtime.evaluate` with return-by-value covers all of them.
//! Dynamic fragments are embedded as JSON string literals to keep arbitrary
//! font names and selectors from breaking out of the script.

use fontscope_core_types::NodeRef;
use perceiver_font::{EnumerationScope, FONT_PROBE_SAMPLE, FONT_PROBE_SIZE_PX};

/// Class toggled on highlighted elements.
pub const HIGHLIGHT_CLASS: &str = "fontscope-highlight";

const HIGHLIGHT_STYLE_ID: &str = "fontscope-highlight-style";

const HIGHLIGHT_CSS: &str = r#".fontscope-highlight {
  outline: 2px solid red !important;
  background-color: rgba(255, 0, 0, 0.2) !important;
  box-shadow: 0 0 10px red !important;
  animation: fontscope-pulse 1s ease-in-out 2 !important;
  transition: outline 0.5s ease, box-shadow 0.5s ease;
}
@keyframes fontscope-pulse {
  0% { box-shadow: 0 0 0 red; }
  50% { box-shadow: 0 0 15px red; }
  100% { box-shadow: 0 0 10px red; }
}"#;

fn js_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Enumerate the scope's elements, stash the node list on the window, and
/// return the per-element facts.
pub fn snapshot_script(scope: &EnumerationScope) -> String {
    format!(
        r#"(() => {{
  const nodes = Array.from(document.querySelectorAll({selector}));
  window.__fontscopeNodes = nodes;
  return nodes.map((el, idx) => {{
    const cs = window.getComputedStyle(el);
    return {{
      node: idx,
      tag: el.tagName.toLowerCase(),
      display: cs.display,
      visibility: cs.visibility,
      width: el.offsetWidth,
      height: el.offsetHeight,
      hasDirectText: Array.from(el.childNodes).some(
        (n) => n.nodeType === Node.TEXT_NODE && n.textContent.trim() !== ''
      ),
      fontFamily: cs.fontFamily,
      inlineFontFamily: el.style.fontFamily || ''
    }};
  }});
}})()"#,
        selector = js_literal(scope.selector())
    )
}

/// `document.fonts.check` against the fixed reference sample.
pub fn availability_script(name: &str) -> String {
    format!(
        r#"(() => {{
  const name = {name};
  return document.fonts.check('{size}px ' + name, {sample});
}})()"#,
        name = js_literal(name),
        size = FONT_PROBE_SIZE_PX,
        sample = js_literal(FONT_PROBE_SAMPLE)
    )
}

/// Install the highlight style rule once per page session.
pub fn ensure_style_script() -> String {
    format!(
        r#"(() => {{
  if (document.getElementById({id})) {{ return true; }}
  const style = document.createElement('style');
  style.id = {id};
  style.textContent = {css};
  document.head.appendChild(style);
  return true;
}})()"#,
        id = js_literal(HIGHLIGHT_STYLE_ID),
        css = js_literal(HIGHLIGHT_CSS)
    )
}

/// Remove every highlight mark on the page, wherever it came from.
pub fn clear_marks_script() -> String {
    format!(
        r#"(() => {{
  document.querySelectorAll({selector}).forEach((el) => {{
    el.classList.remove({marker});
  }});
  return true;
}})()"#,
        selector = js_literal(&format!(".{HIGHLIGHT_CLASS}")),
        marker = js_literal(HIGHLIGHT_CLASS)
    )
}

/// Mark the stashed nodes at the given indexes.
pub fn mark_script(nodes: &[NodeRef]) -> String {
    let indexes: Vec<u64> = nodes.iter().map(|node| u64::from(node.0)).collect();
    format!(
        r#"(() => {{
  const nodes = window.__fontscopeNodes || [];
  for (const idx of {indexes}) {{
    const el = nodes[idx];
    if (el) {{ el.classList.add({marker}); }}
  }}
  return true;
}})()"#,
        indexes = serde_json::Value::from(indexes),
        marker = js_literal(HIGHLIGHT_CLASS)
    )
}

/// Smooth-scroll the stashed node at the given index to the viewport center.
pub fn scroll_script(node: NodeRef) -> String {
    format!(
        r#"(() => {{
  const el = (window.__fontscopeNodes || [])[{idx}];
  if (el) {{ el.scrollIntoView({{ behavior: 'smooth', block: 'center' }}); }}
  return true;
}})()"#,
        idx = node.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_script_quotes_the_scope_selector() {
        let all = snapshot_script(&EnumerationScope::All);
        assert!(all.contains("document.querySelectorAll(\"*\")"));

        let tagged = snapshot_script(&EnumerationScope::Tag("h1".to_string()));
        assert!(tagged.contains("document.querySelectorAll(\"h1\")"));
    }

    #[test]
    fn availability_script_embeds_name_as_json_literal() {
        let script = availability_script("Helvetica \"Neue\"");
        assert!(script.contains(r#"const name = "Helvetica \"Neue\"";"#));
        assert!(script.contains("document.fonts.check('16px ' + name"));
        assert!(script.contains("abcdefghijklmnopqrstuvwxyz"));
    }

    #[test]
    fn mark_script_lists_node_indexes() {
        let script = mark_script(&[NodeRef(3), NodeRef(11)]);
        assert!(script.contains("[3,11]"));
        assert!(script.contains("fontscope-highlight"));
    }

    #[test]
    fn style_injection_is_guarded_by_element_id() {
        let script = ensure_style_script();
        assert!(script.contains("getElementById(\"fontscope-highlight-style\")"));
        assert!(script.contains("fontscope-pulse"));
    }
}
