#![deny(unused_must_use, missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]

#[macro_use]
extern crate serde;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate failure_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

/// Working out which entry belongs to the page being shown, and which entries have to be open for
/// it to be visible. Also home to the landing page alias.
pub mod activation;

/// Some helpers associated with driving the clis that ship with booknav.
#[cfg(feature = "cli")]
pub mod cli;

/// Details pertaining to parsing the configuration file, and turning it into the settings for a
/// single page.
pub mod config;

/// The sidebar itself. Ties the tree, the container and session storage together for one page
/// load.
pub mod navigator;

/// Rules for rewriting and resolving entry paths: which hrefs get the root-relative prefix, what
/// the current page's canonical location is, and how far a page is from the root of the site.
pub mod paths;

/// Turns the tree into nested list markup.
mod render;

/// The `Scrollbox` trait, which abstracts over the element the sidebar is rendered into.
pub mod scrollbox;

/// Session scoped storage, and carrying the sidebar's scroll offset between page loads with it.
pub mod storage;

/// The navigation tree, and loading it from toml or json.
pub mod tree;

mod version;

/// What version of booknav do you have :)
pub use crate::version::VERSION;

/// Who wrote this
pub use crate::version::AUTHOR;

pub use crate::navigator::{Attachment, ClickTarget, SidebarNavigator, SidebarSettings};
pub use crate::tree::{EntryId, NavigationEntry, NavigationTree};

#[cfg(test)]
/// Helpers for use in tests
mod test_helpers;
