use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use url::Url;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Storage};

use booknav::config::FoldConfig;
use booknav::scrollbox::Scrollbox;
use booknav::storage::SessionStorage;
use booknav::{ClickTarget, EntryId, NavigationTree, SidebarNavigator, SidebarSettings};

mod utils;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

fn window() -> web_sys::Window {
    web_sys::window().expect("no global `window` exists")
}

fn document() -> web_sys::Document {
    window().document().expect("should have a document on window")
}

fn to_js<E: Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// The sidebar container element.
struct DomScrollbox {
    element: Element,
}

impl DomScrollbox {
    fn entry(&self, id: EntryId) -> Option<Element> {
        let selector = format!("li.chapter-item[data-entry=\"{}\"]", id);
        self.element.query_selector(&selector).ok().and_then(|entry| entry)
    }
}

impl Scrollbox for DomScrollbox {
    fn set_content(&mut self, markup: &str) {
        self.element.set_inner_html(markup);
    }

    fn scroll_top(&self) -> i64 {
        i64::from(self.element.scroll_top())
    }

    fn set_scroll_top(&mut self, offset: i64) {
        let offset = offset.max(0).min(i64::from(i32::MAX)) as i32;
        self.element.set_scroll_top(offset);
    }

    fn center_entry(&mut self, id: EntryId) {
        if let Some(entry) = self.entry(id) {
            let options = ScrollIntoViewOptions::new();
            options.set_block(ScrollLogicalPosition::Center);
            options.set_behavior(ScrollBehavior::Smooth);
            entry.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn set_expanded(&mut self, id: EntryId, expanded: bool) {
        if let Some(entry) = self.entry(id) {
            let _ = entry.class_list().toggle_with_force("expanded", expanded);
        }
    }
}

/// `window.sessionStorage`, if the browser lets us have it.
struct DomStorage {
    storage: Option<Storage>,
}

impl SessionStorage for DomStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok()?
    }

    fn set_item(&mut self, key: &str, value: &str) {
        if let Some(ref storage) = self.storage {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove_item(&mut self, key: &str) {
        if let Some(ref storage) = self.storage {
            let _ = storage.remove_item(key);
        }
    }
}

fn click_target(event: &web_sys::Event) -> ClickTarget {
    let target = match event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
        Some(target) => target,
        None => return ClickTarget::Other,
    };

    // The toggle's glyph is a div inside the anchor
    if let Ok(Some(toggle)) = target.closest("a.toggle") {
        return toggle
            .get_attribute("data-entry")
            .and_then(|id| id.parse().ok())
            .map(|id| ClickTarget::Toggle(EntryId(id)))
            .unwrap_or(ClickTarget::Other);
    }
    match target.closest("a[href]") {
        Ok(Some(_)) => ClickTarget::Link,
        _ => ClickTarget::Other,
    }
}

/// Render the sidebar described by `tree_json` into the page and wire up its event handlers.
/// `root_path` is the relative path from this page back to the root of the site.
#[wasm_bindgen]
pub fn attach_sidebar(tree_json: &str, root_path: &str) -> Result<(), JsValue> {
    attach(tree_json, SidebarSettings::new(root_path))
}

/// As `attach_sidebar`, with sections from `fold_level` down starting out collapsed.
#[wasm_bindgen]
pub fn attach_folded_sidebar(
    tree_json: &str,
    root_path: &str,
    fold_level: u32,
) -> Result<(), JsValue> {
    let fold = FoldConfig {
        enable: true,
        level: fold_level as usize,
    };
    attach(tree_json, SidebarSettings::new(root_path).set_fold(fold))
}

fn attach(tree_json: &str, settings: SidebarSettings) -> Result<(), JsValue> {
    utils::set_panic_hook();

    let tree = NavigationTree::from_json_str(tree_json).map_err(to_js)?;

    let element = match document().get_element_by_id(&settings.container_id) {
        Some(element) => element,
        None => return Ok(()),
    };
    let href = document()
        .location()
        .ok_or("document has no location")?
        .href()?;
    let location = Url::parse(&href).map_err(to_js)?;

    let storage = DomStorage {
        storage: window().session_storage().ok().and_then(|storage| storage),
    };

    let navigator = Rc::new(RefCell::new(SidebarNavigator::new(tree, settings)));
    let container = Rc::new(RefCell::new(DomScrollbox {
        element: element.clone(),
    }));
    let storage = Rc::new(RefCell::new(storage));

    navigator
        .borrow_mut()
        .attach(
            &location,
            Some(&mut *container.borrow_mut()),
            &mut *storage.borrow_mut(),
        )
        .map_err(to_js)?;

    let on_click = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let target = click_target(&event);
        navigator.borrow_mut().click(
            target,
            Some(&mut *container.borrow_mut()),
            &mut *storage.borrow_mut(),
        );
    }) as Box<dyn FnMut(_)>);
    element.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    // The sidebar lives as long as the page does.
    on_click.forget();

    Ok(())
}
