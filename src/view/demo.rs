//! Synthetic items for the demo binary.
//!
//! Item heights cycle through one to three rows so the size estimate is
//! exercised with uneven extents.

use super::TerminalNode;
use std::ops::Range;

const WORDS: [&str; 8] = [
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit",
];

/// One generated list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoItem {
    /// Stable identifier; prepended items get negative ids.
    pub id: i64,
    /// Number of text rows the item renders to.
    pub rows: u16,
}

impl DemoItem {
    /// Item with the row count derived from `id`.
    pub fn new(id: i64) -> Self {
        let rows = 1 + id.rem_euclid(3) as u16;
        Self { id, rows }
    }
}

/// Items for every id in `ids`, in order.
pub fn demo_items(ids: Range<i64>) -> Vec<DemoItem> {
    ids.map(DemoItem::new).collect()
}

/// Renders an item to its terminal rows.
pub fn render_demo_item(item: &DemoItem) -> TerminalNode {
    let word = WORDS[item.id.rem_euclid(WORDS.len() as i64) as usize];
    let mut lines = vec![format!("#{:>6}  {word}", item.id)];
    lines.extend((1..item.rows).map(|row| format!("         {} {row}", "·".repeat(row as usize))));
    TerminalNode::new(lines)
}
