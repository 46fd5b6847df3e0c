use std::borrow::Cow;

use regex::Regex;
use url::Url;

lazy_static! {
    // `scheme:` or a protocol relative `//`
    static ref ABSOLUTE_URL: Regex =
        Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.-]*:|//)").expect("Couldn't compile absolute url pattern");
}

/// In-page anchors, like `#usage`.
pub fn is_fragment(href: &str) -> bool {
    href.starts_with('#')
}

/// ```rust
/// # use booknav::paths::is_absolute_url;
/// assert!(is_absolute_url("https://example.com/"));
/// assert!(is_absolute_url("//cdn.example.com/book/"));
/// assert!(is_absolute_url("mailto:docs@example.com"));
/// assert!(!is_absolute_url("guide/index.html"));
/// ```
pub fn is_absolute_url(href: &str) -> bool {
    ABSOLUTE_URL.is_match(href)
}

/// Prefix `href` with the root-relative path, unless it's an anchor or already absolute.
///
/// ```rust
/// # use booknav::paths::rewrite_href;
/// assert_eq!(rewrite_href("../", "guide/index.html"), "../guide/index.html");
/// assert_eq!(rewrite_href("../", "#top"), "#top");
/// assert_eq!(rewrite_href("../", "https://example.com/"), "https://example.com/");
/// ```
pub fn rewrite_href<'a>(root_path: &str, href: &'a str) -> Cow<'a, str> {
    if is_fragment(href) || is_absolute_url(href) {
        Cow::Borrowed(href)
    } else {
        Cow::Owned(format!("{}{}", root_path, href))
    }
}

/// The relative path from a page back to the root of the site.
///
/// ```rust
/// # use booknav::paths::path_to_root;
/// assert_eq!(path_to_root("index.html"), "");
/// assert_eq!(path_to_root("guide/themes/dark.html"), "../../");
/// ```
pub fn path_to_root(page: &str) -> String {
    let page = page.trim_start_matches('/');
    let depth = page.matches('/').count();
    "../".repeat(depth)
}

/// The location that entries are compared against: no query, no fragment, and directory urls
/// pointing at their default document.
pub fn current_page(location: &Url, default_document: &str) -> Url {
    let mut page = location.clone();
    page.set_query(None);
    page.set_fragment(None);
    if page.path().ends_with('/') {
        let path = format!("{}{}", page.path(), default_document);
        page.set_path(&path);
    }
    page
}

/// Resolve an already rewritten href against the page's location, the way a browser would.
pub fn resolve(location: &Url, href: &str) -> Option<Url> {
    match location.join(href) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("Couldn't resolve {:?} against {}: {}", href, location, e);
            None
        }
    }
}
