use tempfile;
use url::Url;
use walkdir;

use std::fs;
use std::path::PathBuf;

use crate::tree::NavigationTree;

lazy_static! {
    static ref TEST_DATA: PathBuf = PathBuf::from("test-data");
}

/// Copy data from the test-data directory to a tempdir, then return the owned TestDir object to
/// the caller for use in tests that will modify the filesystem.
pub(crate) fn test_data(suffix: &str) -> tempfile::TempDir {
    let source = tempfile::tempdir().unwrap();
    let root = TEST_DATA.join(suffix);
    for entry in walkdir::WalkDir::new(&root) {
        let entry = entry.unwrap();
        let target = source
            .path()
            .join(entry.path().strip_prefix(&root).unwrap());
        if entry.file_type().is_dir() {
            let _ = fs::create_dir(&target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
    source
}

/// The tree in test-data/book. In document order:
///
/// ```text
/// 0 Introduction (affix)      intro.html
/// 1 1. Guide                  guide/index.html
/// 2   1.1. Installing         guide/installing.html
/// 3   1.2. Configuring        guide/configuring.html
/// 4     1.2.1. Themes         guide/themes.html
/// 5 Reference (part title)
/// 6 2. Commands               reference/commands.html
/// 7 3. Roadmap (draft)
/// 8 (separator)
/// 9 Contributors (affix)      contributors.html
/// ```
pub(crate) fn fixture_tree() -> NavigationTree {
    NavigationTree::from_file(TEST_DATA.join("book").join("toc.toml")).unwrap()
}

/// Where `page` would be served from.
pub(crate) fn location(page: &str) -> Url {
    Url::parse("http://docs.example/").unwrap().join(page).unwrap()
}
