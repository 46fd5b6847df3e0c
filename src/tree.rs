use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use failure::Error;
use serde_json;
use toml;

/// Position of an entry in a document order walk of the tree. The first entry is `EntryId(0)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub struct EntryId(pub usize);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum EntryKind {
    chapter,
    part,
    separator,
}

impl Default for EntryKind {
    fn default() -> Self {
        EntryKind::chapter
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryKind::chapter => "chapter",
            EntryKind::part => "part title",
            EntryKind::separator => "separator",
        };
        f.write_str(name)
    }
}

/// A section number, eg `2.1.`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SectionNumber(pub Vec<u32>);

impl fmt::Display for SectionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.0 {
            write!(f, "{}.", part)?;
        }
        Ok(())
    }
}

#[derive(Fail, Debug, Eq, PartialEq)]
pub enum TreeError {
    #[fail(display = "{}: chapters need a label", _0)]
    EmptyLabel(String),
    #[fail(display = "{}: path is empty, leave it out for a draft chapter", _0)]
    EmptyPath(String),
    #[fail(display = "{}: a {} cannot have {}", location, kind, field)]
    UnexpectedField {
        location: String,
        kind: EntryKind,
        field: &'static str,
    },
    #[fail(display = "{}: a {} can only appear at the top level", location, kind)]
    NotTopLevel { location: String, kind: EntryKind },
}

/// An entry as it's written in a tree file.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EntrySource {
    #[serde(default)]
    pub kind: EntryKind,
    #[serde(default)]
    pub label: String,
    pub path: Option<String>,
    /// Prefix and suffix chapters don't get a section number.
    #[serde(default)]
    pub affix: bool,
    #[serde(default)]
    pub children: Vec<EntrySource>,
}

impl EntrySource {
    pub fn chapter<S: Into<String>>(label: S, path: S) -> EntrySource {
        EntrySource {
            label: label.into(),
            path: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: Vec<EntrySource>) -> Self {
        self.children = children;
        self
    }

    fn validate(&self, depth: usize, location: &str) -> Result<(), TreeError> {
        let unexpected = |field| TreeError::UnexpectedField {
            location: location.to_string(),
            kind: self.kind,
            field,
        };

        match self.kind {
            EntryKind::chapter => {
                if self.label.trim().is_empty() {
                    return Err(TreeError::EmptyLabel(location.to_string()));
                }
                if let Some(ref path) = self.path {
                    if path.trim().is_empty() {
                        return Err(TreeError::EmptyPath(location.to_string()));
                    }
                }
            }
            EntryKind::part | EntryKind::separator => {
                if depth > 0 {
                    return Err(TreeError::NotTopLevel {
                        location: location.to_string(),
                        kind: self.kind,
                    });
                }
                if self.path.is_some() {
                    return Err(unexpected("a path"));
                }
                if !self.children.is_empty() {
                    return Err(unexpected("children"));
                }
                if self.kind == EntryKind::part && self.label.trim().is_empty() {
                    return Err(TreeError::EmptyLabel(location.to_string()));
                }
                if self.kind == EntryKind::separator && !self.label.is_empty() {
                    return Err(unexpected("a label"));
                }
            }
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug)]
struct TreeSource {
    #[serde(default)]
    entries: Vec<EntrySource>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationEntry {
    pub id: EntryId,
    pub kind: EntryKind,
    pub label: String,
    /// Relative to the root of the site. `None` for drafts, part titles and separators.
    pub path: Option<String>,
    pub affix: bool,
    pub depth: usize,
    pub number: Option<SectionNumber>,
    parent: Option<EntryId>,
    children: Vec<EntryId>,
}

impl NavigationEntry {
    /// Whether this entry renders as a link.
    pub fn is_link(&self) -> bool {
        self.kind == EntryKind::chapter && self.path.is_some()
    }

    pub fn is_draft(&self) -> bool {
        self.kind == EntryKind::chapter && self.path.is_none()
    }

    pub fn parent(&self) -> Option<EntryId> {
        self.parent
    }

    pub fn children(&self) -> &[EntryId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// The table of contents for a site. Entries are stored flat in document order, with each one
/// pointing at its parent and children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationTree {
    entries: Vec<NavigationEntry>,
    roots: Vec<EntryId>,
}

impl NavigationTree {
    pub fn from_entries(sources: &[EntrySource]) -> Result<NavigationTree, TreeError> {
        let mut tree = NavigationTree::default();
        tree.insert(sources, None, 0, &[], true, "entries")?;
        Ok(tree)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<NavigationTree, Error> {
        let path = path.as_ref();
        let mut fh = File::open(path)
            .map_err(|e| format_err!("Couldn't open tree file {:?}: {}", path, e))?;
        let mut contents = String::new();
        fh.read_to_string(&mut contents)?;

        debug!("Loading navigation tree from {:?}", path);
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => NavigationTree::from_json_str(&contents),
            _ => NavigationTree::from_toml_str(&contents),
        }
    }

    pub fn from_toml_str(body: &str) -> Result<NavigationTree, Error> {
        let source: TreeSource = match toml::from_str(body) {
            Ok(source) => source,
            Err(e) => return Err(format_err!("Couldn't parse tree: {}", e)),
        };
        Ok(NavigationTree::from_entries(&source.entries)?)
    }

    pub fn from_json_str(body: &str) -> Result<NavigationTree, Error> {
        let source: TreeSource = match serde_json::from_str(body) {
            Ok(source) => source,
            Err(e) => return Err(format_err!("Couldn't parse tree: {}", e)),
        };
        Ok(NavigationTree::from_entries(&source.entries)?)
    }

    fn insert(
        &mut self,
        sources: &[EntrySource],
        parent: Option<EntryId>,
        depth: usize,
        prefix: &[u32],
        numbered: bool,
        location: &str,
    ) -> Result<(), TreeError> {
        let mut counter = 0;
        for (index, source) in sources.iter().enumerate() {
            let location = format!("{}[{}]", location, index);
            source.validate(depth, &location)?;

            let number = if numbered && source.kind == EntryKind::chapter && !source.affix {
                counter += 1;
                let mut number = prefix.to_vec();
                number.push(counter);
                Some(SectionNumber(number))
            } else {
                None
            };

            let id = EntryId(self.entries.len());
            self.entries.push(NavigationEntry {
                id,
                kind: source.kind,
                label: source.label.clone(),
                path: source.path.clone(),
                affix: source.affix,
                depth,
                number: number.clone(),
                parent,
                children: vec![],
            });
            match parent {
                Some(parent) => self.entries[parent.0].children.push(id),
                None => self.roots.push(id),
            }

            // Everything below an unnumbered chapter stays unnumbered.
            let child_prefix = number.as_ref().map(|n| n.0.clone()).unwrap_or_default();
            self.insert(
                &source.children,
                Some(id),
                depth + 1,
                &child_prefix,
                number.is_some(),
                &format!("{}.children", location),
            )?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&NavigationEntry> {
        self.entries.get(id.0)
    }

    /// Top level entries, in order.
    pub fn roots(&self) -> &[EntryId] {
        &self.roots
    }

    /// Every entry in document order.
    pub fn iter(&self) -> impl Iterator<Item = &NavigationEntry> {
        self.entries.iter()
    }

    /// Every entry that renders as a link, in document order.
    pub fn links(&self) -> impl Iterator<Item = &NavigationEntry> {
        self.entries.iter().filter(|e| e.is_link())
    }

    /// Ancestors of `id`, nearest first. Empty for top level entries and unknown ids.
    pub fn ancestors(&self, id: EntryId) -> Vec<EntryId> {
        let mut ancestors = vec![];
        let mut current = self.get(id).and_then(|e| e.parent);
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.entries[parent.0].parent;
        }
        ancestors
    }
}
