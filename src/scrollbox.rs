use crate::tree::EntryId;

/// The element the sidebar lives in. Implemented over the DOM by the wasm crate, and in memory
/// for tests and the clis.
pub trait Scrollbox {
    /// Replace the container's contents with rendered markup.
    fn set_content(&mut self, markup: &str);

    fn scroll_top(&self) -> i64;

    /// Jump straight to `offset`, no animation.
    fn set_scroll_top(&mut self, offset: i64);

    /// Smoothly scroll `id` into the vertical center of the container. Unknown ids are ignored.
    fn center_entry(&mut self, id: EntryId);

    /// Flip the rendered expanded marker on `id`. Unknown ids are ignored.
    fn set_expanded(&mut self, id: EntryId, expanded: bool);
}

/// A scrollbox that just remembers what happened to it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryScrollbox {
    pub content: String,
    pub scroll_top: i64,
    /// Every entry that was scrolled to, oldest first.
    pub centered: Vec<EntryId>,
    /// Every expanded marker change, oldest first.
    pub expansions: Vec<(EntryId, bool)>,
}

impl MemoryScrollbox {
    pub fn new() -> MemoryScrollbox {
        Default::default()
    }

    pub fn scrolled_to(mut self, offset: i64) -> Self {
        self.scroll_top = offset;
        self
    }
}

impl Scrollbox for MemoryScrollbox {
    fn set_content(&mut self, markup: &str) {
        self.content = markup.to_string();
    }

    fn scroll_top(&self) -> i64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, offset: i64) {
        self.scroll_top = offset;
    }

    fn center_entry(&mut self, id: EntryId) {
        self.centered.push(id);
    }

    fn set_expanded(&mut self, id: EntryId, expanded: bool) {
        self.expansions.push((id, expanded));
    }
}
