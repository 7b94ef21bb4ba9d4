//! Walks the courses root and routes every recognised file into its bucket.
//!
//! Only two levels are read below each course folder: its direct files and
//! the direct files of its role subfolders. Anything that fails a pattern
//! test is skipped without error. Symbolic links are followed, so a linked
//! course folder or document is indexed like a real one.

use crate::constants::{has_extension, ARCHIVE_EXTENSION, PDF_EXTENSION};
use crate::filename::{classify_material, extract_year, is_revision_note, practice_identifier};
use crate::folder::{classify_folder, FolderRole, Sitting};
use crate::generator::{CourseBuilder, MaterialsBuilder};
use crate::links::LinkBuilder;
use crate::models::{CourseRecord, FileRef};
use crate::names::NameResolver;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

static COURSE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{2}[0-9]{4}")
        .unwrap_or_else(|err| panic!("invalid COURSE_CODE_RE regex: {err}"))
});

/// Course code at the start of a folder name, e.g. `MH1100` from `MH1100 - Calculus I`
pub fn course_code(folder_name: &str) -> Option<&str> {
    COURSE_CODE_RE.find(folder_name).map(|m| m.as_str())
}

/// A direct child of a directory with a UTF-8 name
struct Child {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// List direct children sorted by name, resolving symlinks to their targets.
/// Unreadable entries and dangling links are logged and skipped.
fn children(dir: &Path) -> impl Iterator<Item = Child> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter_map(|entry| {
            let Some(name) = entry.file_name().to_str() else {
                debug!("Skipping non UTF-8 name: {}", entry.path().display());
                return None;
            };
            let file_type = entry.file_type();
            if !file_type.is_file() && !file_type.is_dir() {
                return None;
            }
            Some(Child {
                name: name.to_string(),
                path: entry.path().to_path_buf(),
                is_dir: file_type.is_dir(),
            })
        })
}

fn files(dir: &Path) -> impl Iterator<Item = Child> {
    children(dir).filter(|child| !child.is_dir)
}

pub struct Scanner<'a> {
    resolver: &'a NameResolver,
    links: &'a LinkBuilder,
}

impl<'a> Scanner<'a> {
    pub fn new(resolver: &'a NameResolver, links: &'a LinkBuilder) -> Self {
        Self { resolver, links }
    }

    /// Scan every course folder under `root`, sorted by course code.
    ///
    /// A missing root yields an empty list. Folders sharing a code are merged
    /// into one record named after the first folder seen.
    pub fn scan(&self, root: &Path) -> Vec<CourseRecord> {
        if !root.is_dir() {
            warn!("Courses directory not found: {}", root.display());
            return Vec::new();
        }

        let mut courses: BTreeMap<String, CourseBuilder> = BTreeMap::new();

        for child in children(root).filter(|child| child.is_dir) {
            let Some(code) = course_code(&child.name) else {
                debug!("Not a course folder: {}", child.name);
                continue;
            };

            if self.resolver.lookup(code).is_none() {
                debug!("No title registered for {}", code);
            }

            let course = courses.entry(code.to_string()).or_insert_with(|| {
                CourseBuilder::new(
                    code.to_string(),
                    self.resolver.resolve(code, &child.name),
                    child.name.clone(),
                    self.links.folder_url(&child.name),
                )
            });
            self.scan_course(&child, &mut course.materials);
        }

        let records: Vec<CourseRecord> =
            courses.into_values().map(CourseBuilder::build).collect();
        for record in records.iter().filter(|record| record.materials.is_empty()) {
            debug!("No materials found for {}", record.code);
        }

        info!("Scanned {} courses in {}", records.len(), root.display());
        records
    }

    fn scan_course(&self, course: &Child, materials: &mut MaterialsBuilder) {
        for item in children(&course.path) {
            if !item.is_dir {
                self.scan_course_file(&course.name, &item.name, materials);
                continue;
            }

            match classify_folder(&item.name) {
                Some(FolderRole::Practice) => self.scan_practice(&course.name, &item, materials),
                Some(FolderRole::Exam(sitting)) => {
                    self.scan_exam(&course.name, &item, sitting, materials)
                }
                Some(FolderRole::ProblemSheets) => {
                    for file in self.pdfs(&course.name, &item) {
                        materials.add_problem_sheet(file);
                    }
                }
                Some(FolderRole::LectureNotes) => {
                    for file in self.pdfs(&course.name, &item) {
                        materials.add_lecture_note(file);
                    }
                }
                None => debug!("Skipping folder {}/{}", course.name, item.name),
            }
        }
    }

    fn scan_course_file(&self, course_folder: &str, name: &str, materials: &mut MaterialsBuilder) {
        if is_revision_note(name) {
            materials.add_revision_note(self.links.file_ref(course_folder, None, name));
        } else if has_extension(name, ARCHIVE_EXTENSION) {
            materials.add_archive(self.links.file_ref(course_folder, None, name));
        }
    }

    fn scan_practice(&self, course_folder: &str, folder: &Child, materials: &mut MaterialsBuilder) {
        for file in files(&folder.path) {
            let entry = self.links.file_ref(course_folder, Some(&folder.name), &file.name);
            if has_extension(&file.name, ARCHIVE_EXTENSION) {
                materials.add_archive(entry);
            } else if has_extension(&file.name, PDF_EXTENSION) {
                let kind = classify_material(&file.name);
                materials.add_practice(practice_identifier(&file.name), entry.with_kind(kind));
            }
        }
    }

    fn scan_exam(
        &self,
        course_folder: &str,
        folder: &Child,
        sitting: Sitting,
        materials: &mut MaterialsBuilder,
    ) {
        for file in files(&folder.path) {
            let entry = self.links.file_ref(course_folder, Some(&folder.name), &file.name);
            if has_extension(&file.name, ARCHIVE_EXTENSION) {
                materials.add_archive(entry);
                continue;
            }
            if !has_extension(&file.name, PDF_EXTENSION) {
                continue;
            }

            let Some(year) = extract_year(&file.name) else {
                debug!("No academic year in {}, dropped", entry.path);
                continue;
            };
            let kind = classify_material(&file.name);
            materials.add_exam(sitting, year, entry.with_kind(kind));
        }
    }

    fn pdfs(&self, course_folder: &str, folder: &Child) -> Vec<FileRef> {
        files(&folder.path)
            .filter(|file| has_extension(&file.name, PDF_EXTENSION))
            .map(|file| self.links.file_ref(course_folder, Some(&folder.name), &file.name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{
        DEFAULT_ARCHIVE_BASE, DEFAULT_PATH_PREFIX, DEFAULT_RAW_BASE, DEFAULT_TREE_BASE,
    };
    use crate::filename::MaterialKind;
    use crate::names::UnknownCoursePolicy;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"%PDF").unwrap();
    }

    fn resolver() -> NameResolver {
        let table = HashMap::from([
            ("MH1100".to_string(), "Calculus I".to_string()),
            ("HE1002".to_string(), "Macroeconomics I".to_string()),
        ]);
        NameResolver::new(table, UnknownCoursePolicy::Placeholder, "Unknown Course")
    }

    fn links() -> LinkBuilder {
        LinkBuilder::new(
            DEFAULT_RAW_BASE,
            DEFAULT_ARCHIVE_BASE,
            DEFAULT_TREE_BASE,
            DEFAULT_PATH_PREFIX,
        )
    }

    fn scan(root: &Path) -> Vec<CourseRecord> {
        let resolver = resolver();
        let links = links();
        Scanner::new(&resolver, &links).scan(root)
    }

    #[test]
    fn test_course_code() {
        assert_eq!(course_code("MH1100"), Some("MH1100"));
        assert_eq!(course_code("HE1002 - Macroeconomics I"), Some("HE1002"));
        assert_eq!(course_code("mh1100"), None);
        assert_eq!(course_code("Archive MH1100"), None);
        assert_eq!(course_code("MH110"), None);
        assert_eq!(course_code("MH１１００"), None);
        assert_eq!(course_code("MH١١٠٠"), None);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(scan(&dir.path().join("Notes")).is_empty());
    }

    #[test]
    fn test_non_course_folders_are_ignored() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Templates/MH1100_RevisionNotes.pdf");
        touch(dir.path(), "README.md");
        fs::create_dir(dir.path().join("MH1100")).unwrap();

        let courses = scan(dir.path());
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].code, "MH1100");
        assert_eq!(courses[0].name, "Calculus I");
        assert_eq!(courses[0].folder_name, "MH1100");
        assert_eq!(
            courses[0].github_url,
            "https://github.com/yuhesui/QRSNTU/tree/main/Notes/MH1100"
        );
        assert!(courses[0].materials.is_empty());
    }

    #[test]
    fn test_fullwidth_digits_are_not_course_codes_or_years() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "MH１１００/Finals/MH１１００_23-24_Finals_QuestionPaper.pdf");
        touch(dir.path(), "MH1100/Finals/MH1100_２３-２４_Finals_QuestionPaper.pdf");

        let courses = scan(dir.path());
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].code, "MH1100");
        assert!(courses[0].materials.finals.is_empty());
    }

    #[test]
    fn test_finals_papers_and_qrs_solution() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "MH1100/Finals/MH1100_23-24_Finals_QuestionPaper.pdf");
        touch(dir.path(), "MH1100/Finals/MH1100_23-24_Finals_Solution by QRS.pdf");

        let courses = scan(dir.path());
        let year = &courses[0].materials.finals["23-24"];
        assert_eq!(year.papers.len(), 1);
        assert_eq!(year.solutions.len(), 1);
        assert_eq!(year.solutions[0].kind, Some(MaterialKind::SolutionByQrs));
        assert_eq!(
            year.solutions[0].download_url,
            "https://raw.githubusercontent.com/yuhesui/QRSNTU/main/Notes/MH1100/Finals/MH1100_23-24_Finals_Solution%20by%20QRS.pdf"
        );
    }

    #[test]
    fn test_practice_folder_never_feeds_finals() {
        let dir = TempDir::new().unwrap();
        let folder = "HE1002/HE1002 - Macroeconomics I - Finals - Practice";
        touch(
            dir.path(),
            &format!("{folder}/HE1002_MacroeconomicsI_23-24_Finals_Practice1_QuestionPaper.pdf"),
        );
        touch(
            dir.path(),
            &format!("{folder}/HE1002_MacroeconomicsI_23-24_Finals_Practice1_Solution by QRS.pdf"),
        );
        touch(dir.path(), &format!("{folder}/HE1002_Mock_Exam.pdf"));
        touch(dir.path(), &format!("{folder}/Practice Bundle.zip"));

        let courses = scan(dir.path());
        let materials = &courses[0].materials;
        assert!(materials.finals.is_empty());
        assert_eq!(materials.practice_materials["Practice 1"].papers.len(), 1);
        assert_eq!(materials.practice_materials["Practice 1"].solutions.len(), 1);
        assert_eq!(materials.practice_materials["Practice"].papers.len(), 1);
        assert_eq!(materials.past_year_zips.len(), 1);
    }

    #[test]
    fn test_archives_use_archive_template() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "MH1100/MH1100 Past Years.zip");
        touch(dir.path(), "MH1100/MH1100 - Finals/MH1100 Finals.zip");

        let courses = scan(dir.path());
        let materials = &courses[0].materials;
        assert_eq!(materials.past_year_zips.len(), 2);
        assert!(materials.finals.is_empty());

        let root_zip = materials
            .past_year_zips
            .iter()
            .find(|zip| zip.name == "MH1100 Past Years.zip")
            .unwrap();
        assert_eq!(
            root_zip.download_url,
            "https://github.com/yuhesui/QRSNTU/raw/main/Notes/MH1100/MH1100%20Past%20Years.zip"
        );

        let finals_zip = materials
            .past_year_zips
            .iter()
            .find(|zip| zip.name == "MH1100 Finals.zip")
            .unwrap();
        assert_eq!(finals_zip.path, "Notes/MH1100/MH1100 - Finals/MH1100 Finals.zip");
        assert!(finals_zip
            .download_url
            .starts_with("https://github.com/yuhesui/QRSNTU/raw/main/"));
    }

    #[test]
    fn test_exam_folder_edge_cases() {
        let dir = TempDir::new().unwrap();
        // no year token
        touch(dir.path(), "MH1100/Finals/MH1100_Finals_QuestionPaper.pdf");
        // not a pdf
        touch(dir.path(), "MH1100/Finals/MH1100_23-24_Finals_QuestionPaper.docx");
        // unclassified subtype
        touch(dir.path(), "MH1100/Finals/MH1100_23-24_Finals_Cover.pdf");
        // nested folders are not descended into
        touch(dir.path(), "MH1100/Finals/Drafts/MH1100_22-23_Finals_QuestionPaper.pdf");
        touch(dir.path(), "MH1100/Midterms/MH1100_22-23_Midterms_ExaminersReport.pdf");
        touch(dir.path(), "MH1100/Midterms/MH1100_22-23_Midterms_Solution_Unofficial.pdf");
        touch(dir.path(), "MH1100/Finals/MH1100_21-22_Finals_Examiner's Report.pdf");

        let courses = scan(dir.path());
        let materials = &courses[0].materials;
        assert_eq!(materials.finals.len(), 1);
        assert_eq!(materials.finals["21-22"].reports.len(), 1);
        assert_eq!(materials.midterms["22-23"].reports.len(), 0);
        assert_eq!(materials.midterms["22-23"].solutions.len(), 1);
        assert_eq!(
            materials.midterms["22-23"].solutions[0].kind,
            Some(MaterialKind::SolutionUnofficial)
        );
    }

    #[test]
    fn test_root_files_and_flat_folders() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "MH1200/MH1200_RevisionNotes.pdf");
        touch(dir.path(), "MH1200/notes.txt");
        touch(dir.path(), "MH1200/MH1200 - Problem Sheets (AY23-24)/MH1200_Week 1_Sheet.pdf");
        touch(dir.path(), "MH1200/MH1200 - Problem Sheets (AY23-24)/MH1200_Week 1_Sheet.tex");
        touch(dir.path(), "MH1200/MH1200 - Lecture Notes/MH1200_Lecture1_Notes.pdf");
        touch(dir.path(), "MH1200/Misc/MH1200_RevisionNotes.pdf");

        let courses = scan(dir.path());
        let course = &courses[0];
        assert_eq!(course.name, "Unknown Course");
        assert_eq!(course.materials.revision_notes.len(), 1);
        assert_eq!(course.materials.revision_notes[0].kind, None);
        assert_eq!(course.materials.problem_sheets.len(), 1);
        assert_eq!(course.materials.lecture_notes.len(), 1);
        assert!(course.materials.past_year_zips.is_empty());
    }

    #[test]
    fn test_folders_sharing_a_code_merge() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "MH1100/Finals/MH1100_23-24_Finals_QuestionPaper.pdf");
        touch(dir.path(), "MH1100 - Calculus I/Finals/MH1100_22-23_Finals_QuestionPaper.pdf");
        touch(dir.path(), "HE1002/HE1002_RevisionNotes.pdf");

        let courses = scan(dir.path());
        let codes: Vec<_> = courses.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, ["HE1002", "MH1100"]);
        assert_eq!(courses[1].materials.finals.len(), 2);
        // "MH1100" sorts before "MH1100 - Calculus I" and names the record
        assert_eq!(courses[1].folder_name, "MH1100");
        assert_eq!(
            courses[1].github_url,
            "https://github.com/yuhesui/QRSNTU/tree/main/Notes/MH1100"
        );
        assert_eq!(
            courses[1].materials.finals["22-23"].papers[0].path,
            "Notes/MH1100 - Calculus I/Finals/MH1100_22-23_Finals_QuestionPaper.pdf"
        );
    }

    #[test]
    fn test_suffixed_folder_keeps_its_name_in_links() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "HE1002 - Macroeconomics I/HE1002_RevisionNotes.pdf");

        let courses = scan(dir.path());
        assert_eq!(courses[0].folder_name, "HE1002 - Macroeconomics I");
        assert_eq!(
            courses[0].github_url,
            "https://github.com/yuhesui/QRSNTU/tree/main/Notes/HE1002%20-%20Macroeconomics%20I"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_folders_and_files_are_indexed() {
        use std::os::unix::fs::symlink;

        let store = TempDir::new().unwrap();
        touch(store.path(), "MH1100/Finals/MH1100_23-24_Finals_QuestionPaper.pdf");
        touch(store.path(), "shared/MH1200_RevisionNotes.pdf");

        let dir = TempDir::new().unwrap();
        symlink(store.path().join("MH1100"), dir.path().join("MH1100")).unwrap();
        fs::create_dir(dir.path().join("MH1200")).unwrap();
        symlink(
            store.path().join("shared/MH1200_RevisionNotes.pdf"),
            dir.path().join("MH1200/MH1200_RevisionNotes.pdf"),
        )
        .unwrap();
        // dangling links are skipped
        symlink(dir.path().join("gone"), dir.path().join("MH1300")).unwrap();

        let courses = scan(dir.path());
        let codes: Vec<_> = courses.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, ["MH1100", "MH1200"]);
        assert_eq!(courses[0].materials.finals["23-24"].papers.len(), 1);
        assert_eq!(
            courses[0].materials.finals["23-24"].papers[0].path,
            "Notes/MH1100/Finals/MH1100_23-24_Finals_QuestionPaper.pdf"
        );
        assert_eq!(courses[1].materials.revision_notes.len(), 1);
    }

    #[test]
    fn test_rescan_is_identical() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "MH1100/Finals/MH1100_23-24_Finals_QuestionPaper.pdf");
        touch(dir.path(), "MH1100/Finals/MH1100_23-24_Finals_Solution.pdf");
        touch(dir.path(), "MH1100/Practice/MH1100_Practice2_QuestionPaper.pdf");
        touch(dir.path(), "HE1002/HE1002 Past Years.zip");

        assert_eq!(scan(dir.path()), scan(dir.path()));
    }
}
