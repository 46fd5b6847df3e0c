use std::collections::BTreeSet;

use url::Url;

use crate::config::FoldConfig;
use crate::paths;
use crate::tree::{EntryId, NavigationTree};

/// Which entry is active for a page, and which entries have to be expanded to show it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Activation {
    active: Option<EntryId>,
    revealed: BTreeSet<EntryId>,
}

impl Activation {
    pub fn active(&self) -> Option<EntryId> {
        self.active
    }

    /// The active entry and all of its ancestors.
    pub fn revealed(&self) -> &BTreeSet<EntryId> {
        &self.revealed
    }

    pub fn is_active(&self, id: EntryId) -> bool {
        self.active == Some(id)
    }
}

/// The first link in the tree doubles as the landing page of the site. This only applies when
/// we're rendering for the root of the site, and only for its default document.
pub fn landing_page_alias(
    link_index: usize,
    root_path: &str,
    current_page: &Url,
    default_document: &str,
) -> bool {
    link_index == 0
        && root_path.is_empty()
        && current_page
            .path()
            .ends_with(&format!("/{}", default_document))
}

/// Match `location` against every link in the tree. The first match wins.
pub fn resolve(
    tree: &NavigationTree,
    root_path: &str,
    location: &Url,
    default_document: &str,
) -> Activation {
    let current = paths::current_page(location, default_document);
    trace!("Resolving active entry for {}", &current);

    let matched = tree.links().enumerate().find(|(index, entry)| {
        let href = match entry.path {
            Some(ref path) => paths::rewrite_href(root_path, path),
            None => return false,
        };
        let resolved = paths::resolve(location, &href);
        resolved.as_ref() == Some(&current)
            || landing_page_alias(*index, root_path, &current, default_document)
    });

    match matched {
        Some((_, entry)) => {
            debug!("Active entry is {} ({:?})", entry.id, entry.label);
            let mut revealed: BTreeSet<_> = tree.ancestors(entry.id).into_iter().collect();
            revealed.insert(entry.id);
            Activation {
                active: Some(entry.id),
                revealed,
            }
        }
        None => {
            debug!("No entry matches {}", &current);
            Activation::default()
        }
    }
}

/// Entries that start out expanded before anything is activated. Without folding everything with
/// children is open, with folding only the levels above `fold.level` are.
pub fn default_expansion(tree: &NavigationTree, fold: FoldConfig) -> BTreeSet<EntryId> {
    tree.iter()
        .filter(|entry| entry.has_children())
        .filter(|entry| !fold.enable || entry.depth < fold.level)
        .map(|entry| entry.id)
        .collect()
}
