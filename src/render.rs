use std::collections::BTreeSet;

use failure::Error;
use handlebars::Handlebars;

use crate::navigator::SidebarSettings;
use crate::paths;
use crate::tree::{EntryId, EntryKind, NavigationTree};

// Children are rendered in their own list item after their parent's, so a section's markup
// always sits directly after the chapter that owns it.
const SIDEBAR_TEMPLATE: &str = r#"<ol class="chapter">{{#each entries}}{{> entry}}{{/each}}</ol>"#;

const ENTRY_TEMPLATE: &str = concat!(
    r#"{{#if separator}}<li class="spacer"></li>"#,
    r#"{{else}}{{#if part_title}}<li class="part-title">{{label}}</li>"#,
    r#"{{else}}<li class="chapter-item{{#if expanded}} expanded{{/if}}{{#if affix}} affix{{/if}}" data-entry="{{id}}">"#,
    r#"{{#if href}}<a href="{{href}}"{{#if active}} class="active"{{/if}}>{{else}}<div>{{/if}}"#,
    r#"{{#if number}}<strong aria-hidden="true">{{number}}</strong> {{/if}}{{label}}"#,
    r#"{{#if href}}</a>{{else}}</div>{{/if}}"#,
    r#"{{#if toggle}}<a class="toggle" data-entry="{{id}}"><div>❱</div></a>{{/if}}</li>"#,
    r#"{{#if children}}<li class="section-item"><ol class="section">{{#each children}}{{> entry}}{{/each}}</ol></li>{{/if}}"#,
    r#"{{/if}}{{/if}}"#,
);

fn handlebars() -> Result<Handlebars, Error> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars
        .register_template_string("sidebar", SIDEBAR_TEMPLATE)
        .map_err(|e| format_err!("Couldn't parse sidebar template: {}", e))?;
    handlebars
        .register_template_string("entry", ENTRY_TEMPLATE)
        .map_err(|e| format_err!("Couldn't parse entry template: {}", e))?;
    Ok(handlebars)
}

#[derive(Serialize, Debug)]
struct EntryView<'a> {
    id: usize,
    label: &'a str,
    href: Option<String>,
    number: Option<String>,
    active: bool,
    expanded: bool,
    affix: bool,
    toggle: bool,
    part_title: bool,
    separator: bool,
    children: Vec<EntryView<'a>>,
}

#[derive(Serialize, Debug)]
struct SidebarView<'a> {
    entries: Vec<EntryView<'a>>,
}

struct ViewBuilder<'a> {
    tree: &'a NavigationTree,
    settings: &'a SidebarSettings,
    active: Option<EntryId>,
    expanded: &'a BTreeSet<EntryId>,
}

impl<'a> ViewBuilder<'a> {
    fn build(&self, ids: &[EntryId]) -> Vec<EntryView<'a>> {
        let tree: &'a NavigationTree = self.tree;
        ids.iter()
            .filter_map(|id| tree.get(*id))
            .map(|entry| EntryView {
                id: entry.id.0,
                label: &entry.label,
                href: entry
                    .path
                    .as_ref()
                    .map(|path| paths::rewrite_href(&self.settings.root_path, path).into_owned()),
                number: if self.settings.numbered {
                    entry.number.as_ref().map(|n| n.to_string())
                } else {
                    None
                },
                active: self.active == Some(entry.id),
                expanded: self.expanded.contains(&entry.id),
                affix: entry.affix,
                toggle: self.settings.fold.enable && entry.has_children(),
                part_title: entry.kind == EntryKind::part,
                separator: entry.kind == EntryKind::separator,
                children: self.build(entry.children()),
            })
            .collect()
    }
}

/// Render the tree as nested list markup, with `active` and `expanded` markers applied and every
/// relative path rewritten against the settings' root path.
pub fn render_sidebar(
    tree: &NavigationTree,
    settings: &SidebarSettings,
    active: Option<EntryId>,
    expanded: &BTreeSet<EntryId>,
) -> Result<String, Error> {
    let builder = ViewBuilder {
        tree,
        settings,
        active,
        expanded,
    };
    let view = SidebarView {
        entries: builder.build(tree.roots()),
    };
    handlebars()?
        .render("sidebar", &view)
        .map_err(|e| format_err!("Couldn't render sidebar: {}", e))
}
