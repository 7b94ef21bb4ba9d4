//! Filename classification: academic year, material subtype and grouping labels.
//!
//! Every function here is total: a name that matches nothing yields `None`
//! or a fallback label, never an error.

use crate::constants::{
    contains_any, EXAMINER_REPORT_MARKERS, QUESTION_PAPER_MARKERS, REVISION_NOTE_MARKER,
    SOLUTION_MARKERS, SOLUTION_SOURCE_MARKERS, UNCATEGORIZED_LABEL, UNNUMBERED_PRACTICE_LABEL,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_([0-9]{2}-[0-9]{2})_")
        .unwrap_or_else(|err| panic!("invalid YEAR_RE regex: {err}"))
});

static PRACTICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_Practice\s*([0-9]+)[_. ]")
        .unwrap_or_else(|err| panic!("invalid PRACTICE_RE regex: {err}"))
});

static SHEET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_(Week [0-9]+|Problem[_ ]?Sheet[_ ]?[0-9]+|Lecture[_ ]?[0-9]+|[0-9]+)_")
        .unwrap_or_else(|err| panic!("invalid SHEET_RE regex: {err}"))
});

static PATH_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(AY([0-9]{2}-[0-9]{2})\)")
        .unwrap_or_else(|err| panic!("invalid PATH_YEAR_RE regex: {err}"))
});

/// Material subtype of an exam or practice document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    QuestionPaper,
    ExaminerReport,
    SolutionOfficial,
    #[serde(rename = "SolutionByQRS")]
    SolutionByQrs,
    SolutionUnofficial,
    SolutionHandwritten,
}

impl MaterialKind {
    pub fn is_solution(self) -> bool {
        matches!(
            self,
            Self::SolutionOfficial
                | Self::SolutionByQrs
                | Self::SolutionUnofficial
                | Self::SolutionHandwritten
        )
    }

    /// Short tag shown next to a solution link
    pub fn tag(self) -> &'static str {
        match self {
            Self::QuestionPaper => "Question",
            Self::ExaminerReport => "Report",
            Self::SolutionOfficial => "Official",
            Self::SolutionByQrs => "QRS",
            Self::SolutionUnofficial => "Unofficial",
            Self::SolutionHandwritten => "Handwritten",
        }
    }
}

/// What a top-level material rule resolves to once its markers hit
#[derive(Debug, Clone, Copy)]
enum MaterialRule {
    Exact(MaterialKind),
    Solution,
}

/// Ordered first-match-wins rules; a question paper beats a solution
const MATERIAL_RULES: &[(&[&str], MaterialRule)] = &[
    (
        QUESTION_PAPER_MARKERS,
        MaterialRule::Exact(MaterialKind::QuestionPaper),
    ),
    (
        EXAMINER_REPORT_MARKERS,
        MaterialRule::Exact(MaterialKind::ExaminerReport),
    ),
    (SOLUTION_MARKERS, MaterialRule::Solution),
];

/// Extract the academic year label (`"23-24"`) from an `_YY-YY_` token
pub fn extract_year(name: &str) -> Option<&str> {
    YEAR_RE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Classify a filename into a material subtype, `None` for anything else
pub fn classify_material(name: &str) -> Option<MaterialKind> {
    MATERIAL_RULES
        .iter()
        .find(|(markers, _)| contains_any(name, markers))
        .map(|&(_, rule)| match rule {
            MaterialRule::Exact(kind) => kind,
            MaterialRule::Solution => solution_source(name),
        })
}

fn solution_source(name: &str) -> MaterialKind {
    SOLUTION_SOURCE_MARKERS
        .iter()
        .find(|(marker, _)| name.contains(marker))
        .map(|&(_, kind)| kind)
        .unwrap_or(MaterialKind::SolutionOfficial)
}

pub fn is_revision_note(name: &str) -> bool {
    name.contains(REVISION_NOTE_MARKER)
}

/// Practice-set label: `"Practice 3"` for `_Practice3_`, otherwise `"Practice"`
pub fn practice_identifier(name: &str) -> String {
    match PRACTICE_RE.captures(name).and_then(|caps| caps.get(1)) {
        Some(number) => format!("Practice {}", number.as_str()),
        None => UNNUMBERED_PRACTICE_LABEL.to_string(),
    }
}

/// Week/sheet/lecture grouping label for problem sheets and lecture notes
pub fn sheet_identifier(name: &str) -> &str {
    SHEET_RE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(UNCATEGORIZED_LABEL)
}

/// Academic year from an `(AYYY-YY)` folder annotation in a path
pub fn year_from_path(path: &str) -> Option<&str> {
    PATH_YEAR_RE
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
