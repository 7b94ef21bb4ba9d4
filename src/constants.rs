use crate::filename::MaterialKind;
use crate::folder::{FolderRole, Sitting};

// ============================================================================
// Scan Defaults
// ============================================================================

/// Default courses root, relative to the working directory
pub const DEFAULT_COURSES_ROOT: &str = "Notes";

/// Default manifest location
pub const DEFAULT_OUTPUT: &str = "courses.json";

/// Repository-relative prefix of the courses root, used in `path` fields
pub const DEFAULT_PATH_PREFIX: &str = "Notes";

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "qrs-manifest.toml";

/// Base for direct-view documents
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com/yuhesui/QRSNTU/main";

/// Base for bulk archives
pub const DEFAULT_ARCHIVE_BASE: &str = "https://github.com/yuhesui/QRSNTU/raw/main";

/// Base for browsing a course folder
pub const DEFAULT_TREE_BASE: &str = "https://github.com/yuhesui/QRSNTU/tree/main";

/// Title used for codes missing from the name table
pub const DEFAULT_PLACEHOLDER_NAME: &str = "Unknown Course";

// ============================================================================
// Filename Markers
// ============================================================================

pub const PDF_EXTENSION: &str = "pdf";
pub const ARCHIVE_EXTENSION: &str = "zip";

pub const REVISION_NOTE_MARKER: &str = "RevisionNotes";

pub const QUESTION_PAPER_MARKERS: &[&str] = &["QuestionPaper"];
pub const EXAMINER_REPORT_MARKERS: &[&str] = &["Examiner's Report", "ExaminersReport"];
pub const SOLUTION_MARKERS: &[&str] = &["Solution"];

/// Refinements of a solution, checked in order; no hit means an official solution
pub const SOLUTION_SOURCE_MARKERS: &[(&str, MaterialKind)] = &[
    ("by QRS", MaterialKind::SolutionByQrs),
    ("Unofficial", MaterialKind::SolutionUnofficial),
    ("Handwritten", MaterialKind::SolutionHandwritten),
];

/// Label for sheets and notes without a recognisable week/sheet token
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Label for practice files without a set number
pub const UNNUMBERED_PRACTICE_LABEL: &str = "Practice";

// ============================================================================
// Folder Roles
// ============================================================================

/// Folder-name markers, first hit wins.
///
/// Practice comes before the exam sittings so "Finals - Practice" folders are
/// never counted as exam history.
pub const FOLDER_ROLE_MARKERS: &[(&str, FolderRole)] = &[
    ("Practice", FolderRole::Practice),
    ("Finals", FolderRole::Exam(Sitting::Finals)),
    ("Midterm", FolderRole::Exam(Sitting::Midterms)),
    ("Problem Sheets", FolderRole::ProblemSheets),
    ("Lecture Notes", FolderRole::LectureNotes),
];

/// Check whether a file name carries the given extension, ignoring ASCII case
pub fn has_extension(name: &str, extension: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case(extension))
}

/// Check whether a name contains any of the markers
pub fn contains_any(name: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| name.contains(marker))
}
