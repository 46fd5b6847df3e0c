use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use failure::Error;
use toml;

use crate::navigator::{self, SidebarSettings};
use crate::tree::NavigationTree;

#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone)]
pub struct Config {
    sidebar: SidebarConfig,
    fold: Option<FoldConfig>,
    /// Directory the config was loaded from, relative tree paths are resolved against it.
    #[serde(skip)]
    base: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone)]
pub struct SidebarConfig {
    tree: PathBuf,
    container_id: Option<String>,
    storage_key: Option<String>,
    default_document: Option<String>,
    numbered: Option<bool>,
}

/// Whether nested sections start out collapsed.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone, Copy, Default)]
pub struct FoldConfig {
    #[serde(default)]
    pub enable: bool,
    /// Entries shallower than this start out expanded when folding is enabled.
    #[serde(default)]
    pub level: usize,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, Error> {
        let path = path.as_ref();
        let mut fh = File::open(path)
            .map_err(|e| format_err!("Couldn't open config {:?}: {}", path, e))?;
        let mut contents = String::new();
        fh.read_to_string(&mut contents)?;

        let mut config = Config::from_str(&contents)?;
        config.base = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn from_str(body: &str) -> Result<Config, Error> {
        match toml::from_str(body) {
            Ok(config) => Ok(config),
            Err(e) => Err(format_err!("Couldn't parse config: {}", e)),
        }
    }

    /// Returns the tree file's path, expanded to be absolute
    pub fn tree_path(&self) -> Result<PathBuf, Error> {
        let tree = &self.sidebar.tree;
        if tree.is_absolute() {
            return Ok(tree.clone());
        }
        let mut absolute_path = match self.base {
            Some(ref base) if base.is_absolute() => base.clone(),
            Some(ref base) => env::current_dir()?.join(base),
            None => env::current_dir()?,
        };
        absolute_path.push(tree);
        Ok(absolute_path)
    }

    pub fn load_tree(&self) -> Result<NavigationTree, Error> {
        let path = self.tree_path()?;
        info!("Loading navigation tree from {:?}", &path);
        NavigationTree::from_file(&path)
    }

    pub fn container_id(&self) -> &str {
        self.sidebar
            .container_id
            .as_ref()
            .map(String::as_str)
            .unwrap_or(navigator::DEFAULT_CONTAINER_ID)
    }

    pub fn storage_key(&self) -> &str {
        self.sidebar
            .storage_key
            .as_ref()
            .map(String::as_str)
            .unwrap_or(navigator::DEFAULT_STORAGE_KEY)
    }

    pub fn default_document(&self) -> &str {
        self.sidebar
            .default_document
            .as_ref()
            .map(String::as_str)
            .unwrap_or(navigator::DEFAULT_DOCUMENT)
    }

    pub fn numbered(&self) -> bool {
        self.sidebar.numbered.unwrap_or(true)
    }

    pub fn fold(&self) -> FoldConfig {
        self.fold.unwrap_or_default()
    }

    /// Settings for a page `root_path` away from the root of the site.
    pub fn settings<S: Into<String>>(&self, root_path: S) -> SidebarSettings {
        SidebarSettings::new(root_path)
            .set_container_id(self.container_id())
            .set_storage_key(self.storage_key())
            .set_default_document(self.default_document())
            .set_numbered(self.numbered())
            .set_fold(self.fold())
    }
}
