use crate::constants::{has_extension, ARCHIVE_EXTENSION};
use crate::models::FileRef;

/// Builds repository-relative paths and download URLs for scanned files.
///
/// Archives are served through the archive base, every other document
/// through the raw base, and course folders through the tree base. Each path
/// segment is percent-encoded on its own.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    raw_base: String,
    archive_base: String,
    tree_base: String,
    path_prefix: String,
}

impl LinkBuilder {
    pub fn new(raw_base: &str, archive_base: &str, tree_base: &str, path_prefix: &str) -> Self {
        Self {
            raw_base: raw_base.trim_end_matches('/').to_string(),
            archive_base: archive_base.trim_end_matches('/').to_string(),
            tree_base: tree_base.trim_end_matches('/').to_string(),
            path_prefix: path_prefix.trim_matches('/').to_string(),
        }
    }

    fn prefix(&self) -> Option<&str> {
        (!self.path_prefix.is_empty()).then_some(self.path_prefix.as_str())
    }

    fn segments<'a>(
        &'a self,
        course_folder: &'a str,
        subfolder: Option<&'a str>,
        file: &'a str,
    ) -> impl Iterator<Item = &'a str> {
        self.prefix()
            .into_iter()
            .chain(std::iter::once(course_folder))
            .chain(subfolder)
            .chain(std::iter::once(file))
    }

    pub fn relative_path(
        &self,
        course_folder: &str,
        subfolder: Option<&str>,
        file: &str,
    ) -> String {
        self.segments(course_folder, subfolder, file)
            .collect::<Vec<_>>()
            .join("/")
    }

    fn url(&self, base: &str, course_folder: &str, subfolder: Option<&str>, file: &str) -> String {
        let encoded: Vec<_> = self
            .segments(course_folder, subfolder, file)
            .map(urlencoding::encode)
            .collect();
        format!("{}/{}", base, encoded.join("/"))
    }

    pub fn raw_url(&self, course_folder: &str, subfolder: Option<&str>, file: &str) -> String {
        self.url(&self.raw_base, course_folder, subfolder, file)
    }

    pub fn archive_url(&self, course_folder: &str, subfolder: Option<&str>, file: &str) -> String {
        self.url(&self.archive_base, course_folder, subfolder, file)
    }

    /// Browsable page of a whole course folder
    pub fn folder_url(&self, course_folder: &str) -> String {
        let encoded: Vec<_> = self
            .prefix()
            .into_iter()
            .chain(std::iter::once(course_folder))
            .map(urlencoding::encode)
            .collect();
        format!("{}/{}", self.tree_base, encoded.join("/"))
    }

    /// Build a `FileRef`, picking the template from the file's extension
    pub fn file_ref(&self, course_folder: &str, subfolder: Option<&str>, file: &str) -> FileRef {
        let download_url = if has_extension(file, ARCHIVE_EXTENSION) {
            self.archive_url(course_folder, subfolder, file)
        } else {
            self.raw_url(course_folder, subfolder, file)
        };

        FileRef {
            name: file.to_string(),
            path: self.relative_path(course_folder, subfolder, file),
            download_url,
            kind: None,
        }
    }
}
