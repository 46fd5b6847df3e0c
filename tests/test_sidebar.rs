use url::Url;

use booknav::config::{Config, FoldConfig};
use booknav::paths;
use booknav::scrollbox::MemoryScrollbox;
use booknav::storage::{MemoryStorage, SessionStorage};
use booknav::{Attachment, ClickTarget, EntryId, NavigationTree, SidebarNavigator, SidebarSettings};

fn tree() -> NavigationTree {
    NavigationTree::from_file("test-data/book/toc.toml").unwrap()
}

fn location(page: &str) -> Url {
    Url::parse("https://docs.example/book/").unwrap().join(page).unwrap()
}

/// Load `page` the way a browser would: fresh navigator, same session storage.
fn visit(
    page: &str,
    container: &mut MemoryScrollbox,
    storage: &mut MemoryStorage,
) -> (SidebarNavigator, Attachment) {
    let mut navigator = SidebarNavigator::new(tree(), SidebarSettings::new(paths::path_to_root(page)));
    let attachment = navigator
        .attach(&location(page), Some(container), storage)
        .unwrap();
    (navigator, attachment)
}

#[test]
fn test_json_and_toml_trees_agree() {
    let json = NavigationTree::from_file("test-data/book/toc.json").unwrap();
    assert_eq!(json, tree());
}

#[test]
fn test_every_link_activates_exactly_itself() {
    let tree = tree();
    for entry in tree.links() {
        let page = entry.path.as_ref().unwrap();
        let mut navigator =
            SidebarNavigator::new(tree.clone(), SidebarSettings::new(paths::path_to_root(page)));
        let activation = navigator.resolve(&location(page));
        assert_eq!(activation.active(), Some(entry.id), "{}", page);

        let html = navigator.render().unwrap();
        assert_eq!(html.matches(r#"class="active""#).count(), 1, "{}", page);
    }
}

#[test]
fn test_site_root_aliases_the_first_chapter() {
    let mut container = MemoryScrollbox::new();
    let mut storage = MemoryStorage::new();
    let (navigator, attachment) = visit("", &mut container, &mut storage);
    assert_eq!(navigator.active(), Some(EntryId(0)));
    assert_eq!(attachment, Attachment::Centered(EntryId(0)));
    assert!(container.content.contains(r#"<a href="intro.html" class="active">"#));
}

#[test]
fn test_navigating_through_the_sidebar_keeps_its_position() {
    let mut storage = MemoryStorage::new();

    // Arrive from a search result
    let mut container = MemoryScrollbox::new();
    let (mut navigator, attachment) = visit("guide/installing.html", &mut container, &mut storage);
    assert_eq!(attachment, Attachment::Centered(EntryId(2)));

    // Scroll the sidebar a bit and follow a link in it
    container.scroll_top = 275;
    navigator.click(ClickTarget::Link, Some(&mut container), &mut storage);
    assert_eq!(storage.get_item("sidebar-scroll"), Some("275".to_string()));

    let mut container = MemoryScrollbox::new();
    let (navigator, attachment) = visit("reference/commands.html", &mut container, &mut storage);
    assert_eq!(attachment, Attachment::Restored(275));
    assert_eq!(container.scroll_top, 275);
    assert_eq!(navigator.active(), Some(EntryId(6)));
    assert!(storage.is_empty());

    // Then use the next chapter button, which isn't part of the sidebar
    let mut container = MemoryScrollbox::new();
    let (_, attachment) = visit("guide/themes.html", &mut container, &mut storage);
    assert_eq!(attachment, Attachment::Centered(EntryId(4)));
    assert_eq!(container.centered, vec![EntryId(4)]);
}

#[test]
fn test_rendered_paths_relative_to_nested_page() {
    let mut container = MemoryScrollbox::new();
    let mut storage = MemoryStorage::new();
    visit("guide/themes.html", &mut container, &mut storage);
    assert!(container.content.contains(r#"href="../intro.html""#));
    assert!(container.content.contains(r#"href="../reference/commands.html""#));
    assert!(!container.content.contains(r#"href="intro.html""#));
}

#[test]
fn test_external_and_anchor_entries_are_left_alone() {
    let tree = NavigationTree::from_toml_str(
        r##"
[[entries]]
label = "Home"
path = "index.html"

[[entries]]
label = "Source"
path = "https://git.example/book"

[[entries]]
label = "Mirror"
path = "//mirror.example/book/"

[[entries]]
label = "Top"
path = "#top"
"##,
    )
    .unwrap();
    let mut navigator = SidebarNavigator::new(tree, SidebarSettings::new("../../"));
    navigator.resolve(&location("a/b/c.html"));
    let html = navigator.render().unwrap();
    assert!(html.contains(r#"href="../../index.html""#));
    assert!(html.contains(r#"href="https://git.example/book""#));
    assert!(html.contains(r#"href="//mirror.example/book/""#));
    assert!(html.contains(r##"href="#top""##));
    assert_eq!(navigator.active(), None);
}

#[test]
fn test_folded_sidebar_only_opens_the_active_path() {
    let settings = SidebarSettings::new("../").set_fold(FoldConfig { enable: true, level: 0 });
    let mut navigator = SidebarNavigator::new(tree(), settings);
    let mut container = MemoryScrollbox::new();
    let mut storage = MemoryStorage::new();
    navigator
        .attach(&location("guide/themes.html"), Some(&mut container), &mut storage)
        .unwrap();

    assert!(container.content.contains(r#"<li class="chapter-item expanded" data-entry="1">"#));
    assert!(container.content.contains(r#"<li class="chapter-item expanded" data-entry="3">"#));
    assert!(container.content.contains(r#"<li class="chapter-item" data-entry="2">"#));

    navigator.click(ClickTarget::Toggle(EntryId(3)), Some(&mut container), &mut storage);
    assert!(!navigator.is_expanded(EntryId(3)));
    assert_eq!(navigator.active(), Some(EntryId(4)));
    assert!(storage.is_empty());
}

#[test]
fn test_example_config_drives_settings() {
    let config = Config::from_file("booknav.toml.example").unwrap();
    let settings = config.settings(paths::path_to_root("guide/index.html"));
    assert_eq!(settings.root_path, "../");
    assert_eq!(settings.fold, FoldConfig { enable: true, level: 1 });
}
