use crate::constants::FOLDER_ROLE_MARKERS;

/// Which exam sitting a year-keyed folder belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sitting {
    Finals,
    Midterms,
}

impl Sitting {
    /// Examiner's reports are only published for finals
    pub fn accepts_reports(self) -> bool {
        matches!(self, Self::Finals)
    }
}

/// Role of a subfolder directly under a course folder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderRole {
    Practice,
    Exam(Sitting),
    ProblemSheets,
    LectureNotes,
}

/// Classify a subfolder by name; `None` means its children are skipped
pub fn classify_folder(name: &str) -> Option<FolderRole> {
    FOLDER_ROLE_MARKERS
        .iter()
        .find(|(marker, _)| name.contains(marker))
        .map(|&(_, role)| role)
}
