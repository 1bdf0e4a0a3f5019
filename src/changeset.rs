use std::fmt;

/// change type reported by `git diff --raw`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    TypeChanged,
    Unmerged,
    Unknown,
}

impl ChangeStatus {
    /// parse a raw status field such as `M` or `R086` (the similarity score is dropped)
    pub fn parse(field: &str) -> Option<Self> {
        let status = match field.chars().next()? {
            'A' => Self::Added,
            'M' => Self::Modified,
            'D' => Self::Deleted,
            'R' => Self::Renamed,
            'C' => Self::Copied,
            'T' => Self::TypeChanged,
            'U' => Self::Unmerged,
            'X' => Self::Unknown,
            _ => return None,
        };
        Some(status)
    }

    pub fn code(self) -> char {
        match self {
            Self::Added => 'A',
            Self::Modified => 'M',
            Self::Deleted => 'D',
            Self::Renamed => 'R',
            Self::Copied => 'C',
            Self::TypeChanged => 'T',
            Self::Unmerged => 'U',
            Self::Unknown => 'X',
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// what the operator chose for a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Commit,
    Add,
    Skip,
}

/// one reviewable unit: a changed tracked file or an untracked file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub filename: String,
    pub status: Option<ChangeStatus>,
    pub decision: Option<Decision>,
    pub old_path: Option<String>, // source path of a rename or copy
}

impl ChangeRecord {
    /// a tracked change from the diff listing
    pub fn changed(filename: impl Into<String>, status: ChangeStatus) -> Self {
        Self {
            filename: filename.into(),
            status: Some(status),
            decision: None,
            old_path: None,
        }
    }

    /// an untracked path, which has no status
    pub fn untracked(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            status: None,
            decision: None,
            old_path: None,
        }
    }

    /// paths git needs to see to stage this record
    ///
    /// a rename is a deletion plus an addition, so both sides are included
    pub fn paths(&self) -> Vec<&str> {
        match (&self.status, &self.old_path) {
            (Some(ChangeStatus::Renamed), Some(old_path)) => {
                vec![old_path.as_str(), self.filename.as_str()]
            }
            _ => vec![self.filename.as_str()],
        }
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(old_path) = &self.old_path {
            write!(f, "{} → {}", old_path, self.filename)?;
        } else {
            write!(f, "{}", self.filename)?;
        }
        if let Some(status) = self.status {
            write!(f, " {status}")?;
        }
        Ok(())
    }
}
