//! Read-only views over a generated manifest: the post-generation summary
//! and the plain-text listing behind the `list` command.

use crate::filename::{sheet_identifier, year_from_path};
use crate::models::{CourseRecord, ExamYear, FileRef, Manifest, PracticeSet};
use std::collections::BTreeMap;
use std::fmt::{self, Write};

// ============================================================================
// Summary
// ============================================================================

/// How many courses carry each section
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ManifestSummary {
    pub courses: usize,
    pub finals: usize,
    pub midterms: usize,
    pub revision_notes: usize,
    pub problem_sheets: usize,
    pub lecture_notes: usize,
    pub practice_materials: usize,
    pub archives: usize,
}

impl From<&Manifest> for ManifestSummary {
    fn from(manifest: &Manifest) -> Self {
        let count = |has: fn(&CourseRecord) -> bool| {
            manifest.courses.iter().filter(|c| has(c)).count()
        };

        Self {
            courses: manifest.courses.len(),
            finals: count(|c| !c.materials.finals.is_empty()),
            midterms: count(|c| !c.materials.midterms.is_empty()),
            revision_notes: count(|c| !c.materials.revision_notes.is_empty()),
            problem_sheets: count(|c| !c.materials.problem_sheets.is_empty()),
            lecture_notes: count(|c| !c.materials.lecture_notes.is_empty()),
            practice_materials: count(|c| !c.materials.practice_materials.is_empty()),
            archives: count(|c| !c.materials.past_year_zips.is_empty()),
        }
    }
}

impl fmt::Display for ManifestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} courses", self.courses)?;
        writeln!(f, "  - Finals: {} courses", self.finals)?;
        writeln!(f, "  - Midterms: {} courses", self.midterms)?;
        writeln!(f, "  - Revision Notes: {} courses", self.revision_notes)?;
        writeln!(f, "  - Problem Sheets: {} courses", self.problem_sheets)?;
        writeln!(f, "  - Lecture Notes: {} courses", self.lecture_notes)?;
        writeln!(f, "  - Practice Materials: {} courses", self.practice_materials)?;
        write!(f, "  - Archives: {} courses", self.archives)
    }
}

// ============================================================================
// Listing
// ============================================================================

/// Courses whose code or title contains `query`, ignoring case
pub fn filter_courses<'m>(manifest: &'m Manifest, query: &str) -> Vec<&'m CourseRecord> {
    let query = query.trim().to_lowercase();
    manifest
        .courses
        .iter()
        .filter(|course| {
            query.is_empty()
                || course.code.to_lowercase().contains(&query)
                || course.name.to_lowercase().contains(&query)
        })
        .collect()
}

/// Group flat sheets/notes by their week or sheet label, labels sorted
pub fn group_by_identifier(items: &[FileRef]) -> BTreeMap<&str, Vec<&FileRef>> {
    let mut grouped: BTreeMap<&str, Vec<&FileRef>> = BTreeMap::new();
    for item in items {
        grouped.entry(sheet_identifier(&item.name)).or_default().push(item);
    }
    grouped
}

/// Practice labels with numbered sets in numeric order, then the rest
pub fn ordered_practice_labels(practice: &BTreeMap<String, PracticeSet>) -> Vec<&str> {
    let number = |label: &str| {
        label
            .strip_prefix("Practice ")
            .and_then(|n| n.parse::<u32>().ok())
    };

    let mut numbered: Vec<(u32, &str)> = practice
        .keys()
        .filter_map(|label| number(label).map(|n| (n, label.as_str())))
        .collect();
    numbered.sort();

    numbered
        .into_iter()
        .map(|(_, label)| label)
        .chain(
            practice
                .keys()
                .map(String::as_str)
                .filter(|label| number(label).is_none()),
        )
        .collect()
}

fn file_tag(file: &FileRef) -> &'static str {
    file.kind.map(|kind| kind.tag()).unwrap_or("File")
}

fn render_years(out: &mut String, title: &str, years: &BTreeMap<String, ExamYear>) -> fmt::Result {
    if years.is_empty() {
        return Ok(());
    }
    writeln!(out, "  {} ({})", title, years.len())?;
    for (year, exam) in years.iter().rev() {
        write!(out, "    AY{}:", year)?;
        for file in exam.papers.iter().chain(&exam.solutions).chain(&exam.reports) {
            write!(out, " [{}]", file_tag(file))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn render_flat(out: &mut String, title: &str, items: &[FileRef], grouped: bool) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }

    let year = items
        .first()
        .and_then(|item| year_from_path(&item.path))
        .map(|year| format!(" (AY{})", year))
        .unwrap_or_default();

    if !grouped {
        writeln!(out, "  {}{} ({})", title, year, items.len())?;
        for item in items {
            writeln!(out, "    {}", item.name)?;
        }
        return Ok(());
    }

    let groups = group_by_identifier(items);
    writeln!(out, "  {}{} ({})", title, year, groups.len())?;
    for (label, files) in groups {
        writeln!(out, "    {}: {} file(s)", label, files.len())?;
    }
    Ok(())
}

/// Plain-text card for one course; empty sections are left out
pub fn render_course(course: &CourseRecord) -> Result<String, fmt::Error> {
    let materials = &course.materials;
    let mut out = String::new();

    writeln!(out, "{}  {}", course.code, course.name)?;
    if !course.github_url.is_empty() {
        writeln!(out, "  Folder: {}", course.github_url)?;
    }
    render_years(&mut out, "Finals", &materials.finals)?;
    render_years(&mut out, "Midterms", &materials.midterms)?;
    render_flat(&mut out, "Revision Notes", &materials.revision_notes, false)?;
    render_flat(&mut out, "Problem Sheets", &materials.problem_sheets, true)?;
    render_flat(&mut out, "Lecture Notes", &materials.lecture_notes, true)?;

    if !materials.practice_materials.is_empty() {
        writeln!(out, "  Practice Materials ({})", materials.practice_materials.len())?;
        for label in ordered_practice_labels(&materials.practice_materials) {
            let set = &materials.practice_materials[label];
            write!(out, "    {}:", label)?;
            for _ in &set.papers {
                write!(out, " [Question]")?;
            }
            for solution in &set.solutions {
                write!(out, " [{}]", file_tag(solution))?;
            }
            writeln!(out)?;
        }
    }

    render_flat(&mut out, "Past Year Archives", &materials.past_year_zips, false)?;
    Ok(out)
}
