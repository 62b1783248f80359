//! Breaking-change report types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Findings keep visit order; nothing here is sorted after the fact.

use serde::{Deserialize, Serialize};

use crate::model::Position;

/// Which side of the comparison a location belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotSide {
    /// The base revision (the prior API)
    Base,
    /// The working tree (the current API)
    Head,
}

/// A declaration's position plus its rendered signature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Located {
    pub snapshot: SnapshotSide,
    pub position: Position,
    pub signature: String,
}

impl Located {
    pub fn base(position: Position, signature: impl Into<String>) -> Self {
        Self {
            snapshot: SnapshotSide::Base,
            position,
            signature: signature.into(),
        }
    }

    pub fn head(position: Position, signature: impl Into<String>) -> Self {
        Self {
            snapshot: SnapshotSide::Head,
            position,
            signature: signature.into(),
        }
    }
}

/// Why a declaration is considered a breaking change.
///
/// The `Display` output is the reason line shown to users.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FindingKind {
    TypeRemoved,
    TypeKindChanged {
        current: String,
    },
    StructFieldRemoved {
        field: String,
    },
    StructFieldTypeChanged {
        field: String,
        prior: String,
        current: String,
    },
    /// An embedded field became a named one; its promoted members are gone.
    StructFieldNoLongerEmbedded {
        field: String,
    },
    TypeDefinitionChanged {
        prior: String,
        current: String,
    },
    ValueRemoved {
        name: String,
    },
    ValueTypeChanged {
        name: String,
        prior: String,
        current: String,
    },
    FunctionRemoved,
    ReceiverChanged,
    ArgumentCountChanged {
        prior: usize,
        current: usize,
    },
    ArgumentTypeChanged {
        index: usize,
        prior: String,
        current: String,
    },
    ResultsAdded,
    ResultsRemoved,
    ResultCountChanged {
        prior: usize,
        current: usize,
    },
    ResultTypeChanged {
        index: usize,
        prior: String,
        current: String,
    },
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FindingKind::TypeRemoved => write!(f, "Type removed"),
            FindingKind::TypeKindChanged { current } => {
                write!(f, "Type kind changed from struct to {}", current)
            }
            FindingKind::StructFieldRemoved { field } => {
                write!(f, "Struct field {:?} removed", field)
            }
            FindingKind::StructFieldTypeChanged {
                field,
                prior,
                current,
            } => write!(
                f,
                "Struct field {:?} type changed from {:?} to {:?}",
                field, prior, current
            ),
            FindingKind::StructFieldNoLongerEmbedded { field } => {
                write!(f, "Struct field {:?} is no longer embedded", field)
            }
            FindingKind::TypeDefinitionChanged { prior, current } => write!(
                f,
                "Type definition changed from {:?} to {:?}",
                prior, current
            ),
            FindingKind::ValueRemoved { name } => write!(f, "Value {:?} removed", name),
            FindingKind::ValueTypeChanged {
                name,
                prior,
                current,
            } => write!(
                f,
                "Value {:?} type changed from {:?} to {:?}",
                name, prior, current
            ),
            FindingKind::FunctionRemoved => write!(f, "Function removed"),
            FindingKind::ReceiverChanged => write!(f, "Receiver changed from value to pointer"),
            FindingKind::ArgumentCountChanged { prior, current } => {
                write!(f, "Argument count changed from {} to {}", prior, current)
            }
            FindingKind::ArgumentTypeChanged {
                index,
                prior,
                current,
            } => write!(
                f,
                "Argument ({}) type changed from {:?} to {:?}",
                index, prior, current
            ),
            FindingKind::ResultsAdded => write!(f, "Return values were added"),
            FindingKind::ResultsRemoved => write!(f, "Return values were removed"),
            FindingKind::ResultCountChanged { prior, current } => {
                write!(f, "Return value count changed from {} to {}", prior, current)
            }
            FindingKind::ResultTypeChanged {
                index,
                prior,
                current,
            } => write!(
                f,
                "Return value ({}) type changed from {:?} to {:?}",
                index, prior, current
            ),
        }
    }
}

/// One breaking change with where it was found.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    pub kind: FindingKind,
    /// The declaration as it was at the base revision
    pub base: Located,
    /// The counterpart in the working tree, when one exists
    pub head: Option<Located>,
}

impl Finding {
    /// The user-facing reason line
    pub fn reason(&self) -> String {
        self.kind.to_string()
    }
}

/// All findings for one package.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    pub package: String,
    pub base_ref: String,
    pub findings: Vec<Finding>,
}

impl Report {
    pub fn new(package: impl Into<String>, base_ref: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            base_ref: base_ref.into(),
            findings: Vec::new(),
        }
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }
}

/// Result of checking one package directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PackageOutcome {
    /// Present on both sides and compared
    Checked(Report),
    /// Present at the base revision only
    Removed { package: String },
    /// Present in the working tree only; nothing to compare
    Added { package: String },
}

impl PackageOutcome {
    pub fn package(&self) -> &str {
        match self {
            PackageOutcome::Checked(report) => &report.package,
            PackageOutcome::Removed { package } | PackageOutcome::Added { package } => package,
        }
    }

    /// Number of breaking findings; a removed package is not counted.
    pub fn finding_count(&self) -> usize {
        match self {
            PackageOutcome::Checked(report) => report.len(),
            _ => 0,
        }
    }

    /// Whether this outcome breaks users of the base revision
    pub fn is_breaking(&self) -> bool {
        match self {
            PackageOutcome::Checked(report) => !report.is_empty(),
            PackageOutcome::Removed { .. } => true,
            PackageOutcome::Added { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_strings() {
        let cases = [
            (FindingKind::TypeRemoved, "Type removed"),
            (
                FindingKind::TypeKindChanged {
                    current: "interface".to_string(),
                },
                "Type kind changed from struct to interface",
            ),
            (
                FindingKind::StructFieldRemoved {
                    field: "Port".to_string(),
                },
                "Struct field \"Port\" removed",
            ),
            (
                FindingKind::StructFieldNoLongerEmbedded {
                    field: "Base".to_string(),
                },
                "Struct field \"Base\" is no longer embedded",
            ),
            (
                FindingKind::ArgumentTypeChanged {
                    index: 1,
                    prior: "int".to_string(),
                    current: "int64".to_string(),
                },
                "Argument (1) type changed from \"int\" to \"int64\"",
            ),
            (
                FindingKind::ArgumentCountChanged {
                    prior: 1,
                    current: 2,
                },
                "Argument count changed from 1 to 2",
            ),
            (FindingKind::ResultsRemoved, "Return values were removed"),
        ];
        for (kind, expected) in cases {
            assert_eq!(kind.to_string(), expected);
        }
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let outcome = PackageOutcome::Removed {
            package: "pkg/old".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "removed");
        assert_eq!(json["package"], "pkg/old");
    }

    #[test]
    fn test_checked_outcome_roundtrip() {
        let mut report = Report::new("api", "HEAD");
        report.push(Finding {
            kind: FindingKind::FunctionRemoved,
            base: Located::base(Position::new("api.go", 7), "func Dial(string)"),
            head: None,
        });
        let outcome = PackageOutcome::Checked(report);

        let json = serde_json::to_string(&outcome).unwrap();
        let back: PackageOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
        assert_eq!(back.finding_count(), 1);
        assert_eq!(back.package(), "api");
    }

    #[test]
    fn test_breaking_outcomes() {
        let clean = PackageOutcome::Checked(Report::new("api", "HEAD"));
        let removed = PackageOutcome::Removed {
            package: "old".to_string(),
        };
        let added = PackageOutcome::Added {
            package: "new".to_string(),
        };
        assert!(!clean.is_breaking());
        assert!(removed.is_breaking());
        assert!(!added.is_breaking());
        assert_eq!(removed.finding_count(), 0);
    }
}
