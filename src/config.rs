use crate::constants::{
    DEFAULT_ARCHIVE_BASE, DEFAULT_COURSES_ROOT, DEFAULT_OUTPUT, DEFAULT_PATH_PREFIX,
    DEFAULT_PLACEHOLDER_NAME, DEFAULT_RAW_BASE, DEFAULT_TREE_BASE,
};
use crate::error::{Error, Result};
use crate::links::LinkBuilder;
use crate::loader;
use crate::names::{NameResolver, UnknownCoursePolicy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanSettings,
    #[serde(default)]
    pub links: LinkSettings,
    #[serde(default)]
    pub names: NameSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSettings {
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkSettings {
    #[serde(default = "default_raw_base")]
    pub raw_base: String,

    #[serde(default = "default_archive_base")]
    pub archive_base: String,

    #[serde(default = "default_tree_base")]
    pub tree_base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameSettings {
    /// External table, relative paths resolve against the config file
    #[serde(default)]
    pub file: Option<PathBuf>,

    #[serde(default)]
    pub unknown: UnknownCoursePolicy,

    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Inline entries, applied over the external table
    #[serde(default)]
    pub courses: HashMap<String, String>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;

        let mut config: Config = toml::from_str(&content)?;
        config.anchor_paths(path.parent().unwrap_or(Path::new("")));
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else the default file when present, else defaults
    pub fn discover(path: Option<&Path>, default_file: &Path) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if default_file.is_file() => Self::load(default_file),
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Resolve a relative name-table path against the config file's directory
    fn anchor_paths(&mut self, base: &Path) {
        if let Some(file) = self.names.file.as_mut() {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.links.raw_base.trim().is_empty() {
            return Err(Error::Config("links.raw_base cannot be empty".to_string()));
        }
        if self.links.archive_base.trim().is_empty() {
            return Err(Error::Config("links.archive_base cannot be empty".to_string()));
        }
        if self.links.tree_base.trim().is_empty() {
            return Err(Error::Config("links.tree_base cannot be empty".to_string()));
        }
        if self.names.unknown == UnknownCoursePolicy::Placeholder
            && self.names.placeholder.trim().is_empty()
        {
            return Err(Error::Config("names.placeholder cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn link_builder(&self) -> LinkBuilder {
        LinkBuilder::new(
            &self.links.raw_base,
            &self.links.archive_base,
            &self.links.tree_base,
            &self.scan.path_prefix,
        )
    }

    /// Build the name resolver: external table first, inline entries on top
    pub fn name_resolver(&self) -> Result<NameResolver> {
        let mut table = match &self.names.file {
            Some(path) => loader::load_name_table(path)?,
            None => HashMap::new(),
        };
        table.extend(
            self.names
                .courses
                .iter()
                .map(|(code, title)| (code.clone(), title.clone())),
        );

        Ok(NameResolver::new(
            table,
            self.names.unknown,
            &self.names.placeholder,
        ))
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            root: default_root(),
            output: default_output(),
            path_prefix: default_path_prefix(),
        }
    }
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            raw_base: default_raw_base(),
            archive_base: default_archive_base(),
            tree_base: default_tree_base(),
        }
    }
}

impl Default for NameSettings {
    fn default() -> Self {
        Self {
            file: None,
            unknown: UnknownCoursePolicy::default(),
            placeholder: default_placeholder(),
            courses: HashMap::new(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_COURSES_ROOT)
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_path_prefix() -> String {
    DEFAULT_PATH_PREFIX.to_string()
}

fn default_raw_base() -> String {
    DEFAULT_RAW_BASE.to_string()
}

fn default_archive_base() -> String {
    DEFAULT_ARCHIVE_BASE.to_string()
}

fn default_tree_base() -> String {
    DEFAULT_TREE_BASE.to_string()
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER_NAME.to_string()
}
