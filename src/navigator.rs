use std::collections::BTreeSet;

use failure::Error;
use url::Url;

use crate::activation::{self, Activation};
use crate::config::FoldConfig;
use crate::render;
use crate::scrollbox::Scrollbox;
use crate::storage::{ScrollMemory, SessionStorage};
use crate::tree::{EntryId, NavigationTree};

pub const DEFAULT_CONTAINER_ID: &str = "sidebar";
pub const DEFAULT_STORAGE_KEY: &str = "sidebar-scroll";
pub const DEFAULT_DOCUMENT: &str = "index.html";

/// Everything the navigator needs to know about the page it's attached to.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarSettings {
    /// Relative path from the current page back to the root of the site, eg `../`.
    pub root_path: String,
    pub container_id: String,
    pub storage_key: String,
    /// Document name that a url ending in `/` refers to.
    pub default_document: String,
    pub numbered: bool,
    pub fold: FoldConfig,
}

impl SidebarSettings {
    pub fn new<S: Into<String>>(root_path: S) -> SidebarSettings {
        SidebarSettings {
            root_path: root_path.into(),
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_document: DEFAULT_DOCUMENT.to_string(),
            numbered: true,
            fold: FoldConfig::default(),
        }
    }

    pub fn set_container_id<S: Into<String>>(mut self, container_id: S) -> Self {
        self.container_id = container_id.into();
        self
    }

    pub fn set_storage_key<S: Into<String>>(mut self, storage_key: S) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    pub fn set_default_document<S: Into<String>>(mut self, default_document: S) -> Self {
        self.default_document = default_document.into();
        self
    }

    pub fn set_numbered(mut self, numbered: bool) -> Self {
        self.numbered = numbered;
        self
    }

    pub fn set_fold(mut self, fold: FoldConfig) -> Self {
        self.fold = fold;
        self
    }
}

/// What `attach` ended up doing with the container's scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attachment {
    /// There was no container on the page, nothing happened.
    Detached,
    /// We arrived from a sidebar link, and put the container back where it was.
    Restored(i64),
    /// We arrived some other way, and scrolled to the active entry.
    Centered(EntryId),
    /// No recorded offset and no active entry.
    Unscrolled,
}

/// Something the user clicked on inside the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickTarget {
    Link,
    Toggle(EntryId),
    Other,
}

#[derive(Debug)]
pub struct SidebarNavigator {
    tree: NavigationTree,
    settings: SidebarSettings,
    activation: Activation,
    expanded: BTreeSet<EntryId>,
}

impl SidebarNavigator {
    pub fn new(tree: NavigationTree, settings: SidebarSettings) -> SidebarNavigator {
        let expanded = activation::default_expansion(&tree, settings.fold);
        SidebarNavigator {
            tree,
            settings,
            activation: Activation::default(),
            expanded,
        }
    }

    pub fn tree(&self) -> &NavigationTree {
        &self.tree
    }

    pub fn settings(&self) -> &SidebarSettings {
        &self.settings
    }

    pub fn activation(&self) -> &Activation {
        &self.activation
    }

    pub fn active(&self) -> Option<EntryId> {
        self.activation.active()
    }

    pub fn is_expanded(&self, id: EntryId) -> bool {
        self.expanded.contains(&id)
    }

    /// Work out the active entry for `location` and expand everything above it. Entries that
    /// aren't on the active entry's path keep whatever state they had.
    pub fn resolve(&mut self, location: &Url) -> &Activation {
        let activation = activation::resolve(
            &self.tree,
            &self.settings.root_path,
            location,
            &self.settings.default_document,
        );
        self.expanded.extend(activation.revealed().iter().cloned());
        self.activation = activation;
        &self.activation
    }

    pub fn render(&self) -> Result<String, Error> {
        render::render_sidebar(
            &self.tree,
            &self.settings,
            self.activation.active(),
            &self.expanded,
        )
    }

    /// Bring the sidebar up on a freshly loaded page: render into the container, mark the active
    /// entry, and then either restore the recorded scroll offset or scroll to the active entry.
    pub fn attach<C, S>(
        &mut self,
        location: &Url,
        container: Option<&mut C>,
        storage: &mut S,
    ) -> Result<Attachment, Error>
    where
        C: Scrollbox + ?Sized,
        S: SessionStorage + ?Sized,
    {
        let container = match container {
            Some(container) => container,
            None => {
                debug!("No #{} on this page, not attaching", self.settings.container_id);
                return Ok(Attachment::Detached);
            }
        };

        self.resolve(location);
        container.set_content(&self.render()?);

        let memory = ScrollMemory::new(&self.settings.storage_key);
        let attachment = match memory.take(storage) {
            Some(offset) => {
                container.set_scroll_top(offset);
                Attachment::Restored(offset)
            }
            None => match self.activation.active() {
                Some(id) => {
                    container.center_entry(id);
                    Attachment::Centered(id)
                }
                None => Attachment::Unscrolled,
            },
        };
        info!("Attached sidebar at {}: {:?}", location, attachment);
        Ok(attachment)
    }

    /// Record the container's offset, ahead of the browser following a sidebar link.
    pub fn record_scroll<C, S>(&self, container: &C, storage: &mut S)
    where
        C: Scrollbox + ?Sized,
        S: SessionStorage + ?Sized,
    {
        ScrollMemory::new(&self.settings.storage_key).record(storage, container.scroll_top());
    }

    /// Flip the expanded state of `id`, returning the new state. `None` if there's no such entry.
    pub fn toggle(&mut self, id: EntryId) -> Option<bool> {
        self.tree.get(id)?;
        let expanded = if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        };
        trace!("Toggled {} to expanded={}", id, expanded);
        Some(expanded)
    }

    /// Handle a click inside the container.
    pub fn click<C, S>(&mut self, target: ClickTarget, container: Option<&mut C>, storage: &mut S)
    where
        C: Scrollbox + ?Sized,
        S: SessionStorage + ?Sized,
    {
        let container = match container {
            Some(container) => container,
            None => return,
        };

        match target {
            ClickTarget::Link => self.record_scroll(&*container, storage),
            ClickTarget::Toggle(id) => {
                if let Some(expanded) = self.toggle(id) {
                    container.set_expanded(id, expanded);
                }
            }
            ClickTarget::Other => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrollbox::MemoryScrollbox;
    use crate::storage::MemoryStorage;
    use crate::test_helpers::{fixture_tree, location};

    fn navigator(root_path: &str) -> SidebarNavigator {
        SidebarNavigator::new(fixture_tree(), SidebarSettings::new(root_path))
    }

    #[test]
    fn test_attach_renders_into_container() {
        let mut nav = navigator("../");
        let mut container = MemoryScrollbox::new();
        let mut storage = MemoryStorage::new();
        nav.attach(&location("guide/themes.html"), Some(&mut container), &mut storage)
            .unwrap();
        assert!(container.content.contains(r#"<a href="../guide/themes.html" class="active">"#));
        assert_eq!(nav.active(), Some(EntryId(4)));
    }

    #[test]
    fn test_recorded_offset_is_restored_once() {
        let mut nav = navigator("../");
        let mut container = MemoryScrollbox::new();
        let mut storage = MemoryStorage::new();
        storage.set_item(DEFAULT_STORAGE_KEY, "640");

        let attachment = nav
            .attach(&location("guide/themes.html"), Some(&mut container), &mut storage)
            .unwrap();
        assert_eq!(attachment, Attachment::Restored(640));
        assert_eq!(container.scroll_top, 640);
        assert!(container.centered.is_empty());
        assert!(!storage.contains(DEFAULT_STORAGE_KEY));

        // Next page load with nothing recorded scrolls to the active entry instead
        let mut container = MemoryScrollbox::new();
        let attachment = nav
            .attach(&location("guide/themes.html"), Some(&mut container), &mut storage)
            .unwrap();
        assert_eq!(attachment, Attachment::Centered(EntryId(4)));
        assert_eq!(container.scroll_top, 0);
        assert_eq!(container.centered, vec![EntryId(4)]);
    }

    #[test]
    fn test_no_offset_no_active_entry_means_no_scroll() {
        let mut nav = navigator("");
        let mut container = MemoryScrollbox::new().scrolled_to(25);
        let mut storage = MemoryStorage::new();
        let attachment = nav
            .attach(&location("elsewhere.html"), Some(&mut container), &mut storage)
            .unwrap();
        assert_eq!(attachment, Attachment::Unscrolled);
        assert_eq!(container.scroll_top, 25);
        assert!(container.centered.is_empty());
    }

    #[test]
    fn test_missing_container_is_a_no_op() {
        let mut nav = navigator("");
        let mut storage = MemoryStorage::new();
        storage.set_item(DEFAULT_STORAGE_KEY, "12");
        let attachment = nav
            .attach::<MemoryScrollbox, _>(&location("intro.html"), None, &mut storage)
            .unwrap();
        assert_eq!(attachment, Attachment::Detached);
        assert!(storage.contains(DEFAULT_STORAGE_KEY));
        assert_eq!(nav.active(), None);

        nav.click::<MemoryScrollbox, _>(ClickTarget::Link, None, &mut storage);
        assert_eq!(storage.get_item(DEFAULT_STORAGE_KEY), Some("12".to_string()));
    }

    #[test]
    fn test_link_click_records_offset() {
        let mut nav = navigator("");
        let mut container = MemoryScrollbox::new().scrolled_to(1234);
        let mut storage = MemoryStorage::new();
        nav.click(ClickTarget::Link, Some(&mut container), &mut storage);
        assert_eq!(storage.get_item(DEFAULT_STORAGE_KEY), Some("1234".to_string()));

        // And the next page picks it up
        let mut next = navigator("../");
        let mut container = MemoryScrollbox::new();
        let attachment = next
            .attach(&location("guide/installing.html"), Some(&mut container), &mut storage)
            .unwrap();
        assert_eq!(attachment, Attachment::Restored(1234));
    }

    #[test]
    fn test_custom_storage_key() {
        let settings = SidebarSettings::new("").set_storage_key("toc-offset");
        let mut nav = SidebarNavigator::new(fixture_tree(), settings);
        let mut container = MemoryScrollbox::new().scrolled_to(7);
        let mut storage = MemoryStorage::new();
        nav.click(ClickTarget::Link, Some(&mut container), &mut storage);
        assert!(storage.contains("toc-offset"));
        assert!(!storage.contains(DEFAULT_STORAGE_KEY));
    }

    #[test]
    fn test_other_clicks_do_nothing() {
        let mut nav = navigator("");
        let mut container = MemoryScrollbox::new().scrolled_to(99);
        let mut storage = MemoryStorage::new();
        nav.click(ClickTarget::Other, Some(&mut container), &mut storage);
        assert!(storage.is_empty());
        assert!(container.expansions.is_empty());
    }

    #[test]
    fn test_ancestors_expand_and_unrelated_entries_keep_their_state() {
        let settings = SidebarSettings::new("../").set_fold(FoldConfig { enable: true, level: 0 });
        let mut nav = SidebarNavigator::new(fixture_tree(), settings);
        nav.resolve(&location("guide/themes.html"));

        assert!(nav.is_expanded(EntryId(1)));
        assert!(nav.is_expanded(EntryId(3)));
        assert!(nav.is_expanded(EntryId(4)));
        for id in &[0, 2, 5, 6, 7, 8, 9] {
            assert!(!nav.is_expanded(EntryId(*id)), "{} was expanded", id);
        }
    }

    #[test]
    fn test_toggle_flips_only_its_entry() {
        let settings = SidebarSettings::new("../").set_fold(FoldConfig { enable: true, level: 0 });
        let mut nav = SidebarNavigator::new(fixture_tree(), settings);
        nav.resolve(&location("guide/installing.html"));
        let mut container = MemoryScrollbox::new();
        let mut storage = MemoryStorage::new();

        nav.click(ClickTarget::Toggle(EntryId(3)), Some(&mut container), &mut storage);
        assert!(nav.is_expanded(EntryId(3)));
        nav.click(ClickTarget::Toggle(EntryId(1)), Some(&mut container), &mut storage);
        assert!(!nav.is_expanded(EntryId(1)));
        assert_eq!(container.expansions, vec![(EntryId(3), true), (EntryId(1), false)]);

        assert_eq!(nav.active(), Some(EntryId(2)));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_toggle_unknown_entry() {
        let mut nav = navigator("");
        let mut container = MemoryScrollbox::new();
        let mut storage = MemoryStorage::new();
        assert_eq!(nav.toggle(EntryId(500)), None);
        nav.click(ClickTarget::Toggle(EntryId(500)), Some(&mut container), &mut storage);
        assert!(container.expansions.is_empty());
    }
}
