use crate::error::Result;
use crate::filename::MaterialKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Manifest Schema
// ============================================================================

/// A single downloadable document or archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    pub name: String,
    /// Repository-relative location
    pub path: String,
    pub download_url: String,
    /// Subtype, recorded only for entries in year and practice buckets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MaterialKind>,
}

impl FileRef {
    pub fn with_kind(mut self, kind: Option<MaterialKind>) -> Self {
        self.kind = kind;
        self
    }
}

/// One academic year of a finals or midterms sitting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamYear {
    #[serde(default)]
    pub papers: Vec<FileRef>,
    #[serde(default)]
    pub solutions: Vec<FileRef>,
    #[serde(default)]
    pub reports: Vec<FileRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeSet {
    #[serde(default)]
    pub papers: Vec<FileRef>,
    #[serde(default)]
    pub solutions: Vec<FileRef>,
}

/// Everything collected for one course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Materials {
    #[serde(default)]
    pub finals: BTreeMap<String, ExamYear>,
    #[serde(default)]
    pub midterms: BTreeMap<String, ExamYear>,
    #[serde(default)]
    pub revision_notes: Vec<FileRef>,
    #[serde(default)]
    pub past_year_zips: Vec<FileRef>,
    #[serde(default)]
    pub problem_sheets: Vec<FileRef>,
    #[serde(default)]
    pub lecture_notes: Vec<FileRef>,
    #[serde(default)]
    pub practice_materials: BTreeMap<String, PracticeSet>,
}

impl Materials {
    pub fn is_empty(&self) -> bool {
        self.finals.is_empty()
            && self.midterms.is_empty()
            && self.revision_notes.is_empty()
            && self.past_year_zips.is_empty()
            && self.problem_sheets.is_empty()
            && self.lecture_notes.is_empty()
            && self.practice_materials.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub code: String,
    pub name: String,
    /// First on-disk folder that carried this code
    #[serde(default)]
    pub folder_name: String,
    /// Browsable page of that folder
    #[serde(default)]
    pub github_url: String,
    pub materials: Materials,
}

/// The generated document consumed by the catalog page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub courses: Vec<CourseRecord>,
    pub generated_at: DateTime<Utc>,
}

impl Manifest {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
