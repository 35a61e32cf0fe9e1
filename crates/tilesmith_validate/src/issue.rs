//! Findings and the report that collects them

use std::fmt;
use thiserror::Error;

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// What a finding is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Wang tile id not below the tile count
    TileOutOfRange,
    /// Wang ID refers to a color index that is not declared
    UnknownColor,
    /// Representative tile of a color not below the tile count
    ColorTileOutOfRange,
    /// Representative tile of a Wang set not below the tile count
    SetTileOutOfRange,
    DuplicateWangTile,
    /// Color on a slot the set type does not use
    InactivePosition,
    EmptyWangId,
    UnusedColor,
    UnnamedColor,
    DuplicateWangSet,
    InvalidProbability,
    InvalidTileSize,
    /// Tileset has an image but zero columns
    MissingColumns,
    /// Declared grid does not fit in the declared image size
    ImageTooSmall,
    /// More tiles than grid cells in the image
    TileCountExceedsGrid,
    ImageMissing,
    ImageUnreadable,
    ImageSizeMismatch,
    /// Map tileset `firstgid` below 1 or not ascending
    InvalidFirstGid,
    /// Map GID with no tileset
    UnresolvedGid,
    /// Map GID past the end of its tileset
    GidOutOfRange,
    TileSizeMismatch,
}

impl IssueKind {
    /// Severity findings of this kind are reported with
    pub fn severity(self) -> Severity {
        match self {
            IssueKind::InactivePosition
            | IssueKind::EmptyWangId
            | IssueKind::UnusedColor
            | IssueKind::UnnamedColor
            | IssueKind::DuplicateWangSet
            | IssueKind::ImageMissing
            | IssueKind::TileSizeMismatch => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// A single finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub kind: IssueKind,
    /// File and element the finding points at, e.g. `summer.tsx: wangset 'dirt'`
    pub location: String,
    pub message: String,
}

impl Issue {
    pub fn new(kind: IssueKind, location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            location: location.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.location, self.message)
    }
}

/// Returned by [`ValidationReport::into_result`] when the report fails
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("validation failed with {errors} error(s) and {warnings} warning(s)")]
    Errors { errors: usize, warnings: usize },

    #[error("validation found {0} warning(s) and warnings are denied")]
    Warnings(usize),
}

/// All findings of one or more validation passes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Record a finding of the given kind
    pub fn add(&mut self, kind: IssueKind, location: impl Into<String>, message: impl Into<String>) {
        self.push(Issue::new(kind, location, message));
    }

    /// Append the findings of another report
    pub fn merge(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| issue.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| !issue.is_error())
    }

    /// Findings of one kind
    pub fn of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }

    pub fn has(&self, kind: IssueKind) -> bool {
        self.of_kind(kind).next().is_some()
    }

    /// No errors (warnings allowed)
    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none()
    }

    /// No findings at all
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Fail on any error, and on any warning when `deny_warnings` is set
    pub fn into_result(self, deny_warnings: bool) -> Result<(), ValidationError> {
        let errors = self.errors().count();
        let warnings = self.warnings().count();
        if errors > 0 {
            return Err(ValidationError::Errors { errors, warnings });
        }
        if deny_warnings && warnings > 0 {
            return Err(ValidationError::Warnings(warnings));
        }
        Ok(())
    }
}
