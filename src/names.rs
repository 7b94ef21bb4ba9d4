use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What to show for a course code missing from the name table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownCoursePolicy {
    /// Use the configured placeholder literal
    #[default]
    Placeholder,
    /// Use the raw course folder name
    FolderName,
}

/// Maps course codes to human-readable titles.
///
/// The table is injected from configuration at start-up; nothing here
/// knows any course by heart.
#[derive(Debug, Clone)]
pub struct NameResolver {
    table: HashMap<String, String>,
    policy: UnknownCoursePolicy,
    placeholder: String,
}

impl NameResolver {
    pub fn new(
        table: HashMap<String, String>,
        policy: UnknownCoursePolicy,
        placeholder: &str,
    ) -> Self {
        Self {
            table,
            policy,
            placeholder: placeholder.to_string(),
        }
    }

    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.table.get(code).map(String::as_str)
    }

    /// Title for `code`; unknown codes fall back per policy, using
    /// `folder_name` under [`UnknownCoursePolicy::FolderName`]
    pub fn resolve(&self, code: &str, folder_name: &str) -> String {
        if let Some(title) = self.lookup(code) {
            return title.to_string();
        }
        match self.policy {
            UnknownCoursePolicy::Placeholder => self.placeholder.clone(),
            UnknownCoursePolicy::FolderName => folder_name.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
}
