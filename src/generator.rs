use crate::filename::MaterialKind;
use crate::folder::Sitting;
use crate::models::{CourseRecord, ExamYear, FileRef, Manifest, Materials, PracticeSet};
use crate::scanner::Scanner;
use chrono::Utc;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

// ============================================================================
// Materials Builder
// ============================================================================

/// Accumulates one course's buckets; `build` hands out the finished record.
///
/// Year and practice buckets are only created once a file is routed into
/// them, so a dropped file never leaves an empty bucket behind.
#[derive(Debug, Default)]
pub struct MaterialsBuilder {
    finals: BTreeMap<String, ExamYear>,
    midterms: BTreeMap<String, ExamYear>,
    revision_notes: Vec<FileRef>,
    past_year_zips: Vec<FileRef>,
    problem_sheets: Vec<FileRef>,
    lecture_notes: Vec<FileRef>,
    practice_materials: BTreeMap<String, PracticeSet>,
}

impl MaterialsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route an exam document by its `kind`; returns false when it was dropped
    pub fn add_exam(&mut self, sitting: Sitting, year: &str, file: FileRef) -> bool {
        let Some(kind) = file.kind else {
            debug!("Unclassified exam document skipped: {}", file.path);
            return false;
        };

        let years = match sitting {
            Sitting::Finals => &mut self.finals,
            Sitting::Midterms => &mut self.midterms,
        };

        if kind.is_solution() {
            years.entry(year.to_string()).or_default().solutions.push(file);
        } else if kind == MaterialKind::QuestionPaper {
            years.entry(year.to_string()).or_default().papers.push(file);
        } else if sitting.accepts_reports() {
            years.entry(year.to_string()).or_default().reports.push(file);
        } else {
            debug!("Examiner's report outside finals skipped: {}", file.path);
            return false;
        }
        true
    }

    /// Solutions go to `solutions`, everything else to `papers`
    pub fn add_practice(&mut self, label: String, file: FileRef) {
        let set = self.practice_materials.entry(label).or_default();
        if file.kind.is_some_and(|kind| kind.is_solution()) {
            set.solutions.push(file);
        } else {
            set.papers.push(file);
        }
    }

    pub fn add_revision_note(&mut self, file: FileRef) {
        self.revision_notes.push(file);
    }

    pub fn add_archive(&mut self, file: FileRef) {
        self.past_year_zips.push(file);
    }

    pub fn add_problem_sheet(&mut self, file: FileRef) {
        self.problem_sheets.push(file);
    }

    pub fn add_lecture_note(&mut self, file: FileRef) {
        self.lecture_notes.push(file);
    }

    pub fn build(self) -> Materials {
        Materials {
            finals: self.finals,
            midterms: self.midterms,
            revision_notes: self.revision_notes,
            past_year_zips: self.past_year_zips,
            problem_sheets: self.problem_sheets,
            lecture_notes: self.lecture_notes,
            practice_materials: self.practice_materials,
        }
    }
}

/// A course under construction, identified by the first folder that carried its code
#[derive(Debug)]
pub struct CourseBuilder {
    code: String,
    name: String,
    folder_name: String,
    github_url: String,
    pub materials: MaterialsBuilder,
}

impl CourseBuilder {
    pub fn new(code: String, name: String, folder_name: String, github_url: String) -> Self {
        Self {
            code,
            name,
            folder_name,
            github_url,
            materials: MaterialsBuilder::new(),
        }
    }

    pub fn build(self) -> CourseRecord {
        CourseRecord {
            code: self.code,
            name: self.name,
            folder_name: self.folder_name,
            github_url: self.github_url,
            materials: self.materials.build(),
        }
    }
}

// ============================================================================
// Manifest Generation
// ============================================================================

/// Scan `courses_root` and stamp the result with the current time
pub fn generate(scanner: &Scanner<'_>, courses_root: &Path) -> Manifest {
    Manifest {
        courses: scanner.scan(courses_root),
        generated_at: Utc::now(),
    }
}
