//! Plain-text rendering of package outcomes.

use crate::diff::model::{Finding, Located, PackageOutcome, Report};

/// Render a list of outcomes in the order given.
///
/// Clean packages and new packages produce no output.
pub fn render_outcomes(outcomes: &[PackageOutcome]) -> String {
    let mut out = String::new();
    for outcome in outcomes {
        match outcome {
            PackageOutcome::Checked(report) => out.push_str(&render_report(report)),
            PackageOutcome::Removed { package } => {
                out.push_str(&format!("{}: package removed\n\n", package));
            }
            PackageOutcome::Added { .. } => {}
        }
    }
    out
}

/// Render one package's findings; empty when there are none.
///
/// ```text
/// api:
///   • Function removed:
///     - client.go:12@HEAD:
///         func Dial(string) (*Conn, error)
/// ```
pub fn render_report(report: &Report) -> String {
    if report.is_empty() {
        return String::new();
    }

    let mut out = format!("{}:\n", report.package);
    for finding in &report.findings {
        render_finding(&mut out, finding, &report.base_ref);
    }
    out.push('\n');
    out
}

fn render_finding(out: &mut String, finding: &Finding, base_ref: &str) {
    out.push_str(&format!("  • {}:\n", finding.kind));
    render_location(out, &finding.base, Some(base_ref));
    if let Some(head) = &finding.head {
        render_location(out, head, None);
    }
}

fn render_location(out: &mut String, loc: &Located, base_ref: Option<&str>) {
    out.push_str(&format!("    - {}", loc.position));
    if let Some(rev) = base_ref {
        out.push('@');
        out.push_str(rev);
    }
    out.push_str(":\n");
    for line in loc.signature.lines() {
        out.push_str("        ");
        out.push_str(line);
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::FindingKind;
    use crate::model::Position;

    #[test]
    fn test_empty_report_renders_nothing() {
        assert_eq!(render_report(&Report::new("api", "HEAD")), "");
    }

    #[test]
    fn test_render_finding_with_both_sides() {
        let mut report = Report::new("api", "v1.2.0");
        report.push(Finding {
            kind: FindingKind::ResultsRemoved,
            base: Located::base(Position::new("api.go", 4), "func Ping() (error)"),
            head: Some(Located::head(Position::new("api.go", 6), "func Ping()")),
        });

        let expected = "api:\n\
                        \x20 • Return values were removed:\n\
                        \x20   - api.go:4@v1.2.0:\n\
                        \x20       func Ping() (error)\n\
                        \x20   - api.go:6:\n\
                        \x20       func Ping()\n\
                        \n";
        assert_eq!(render_report(&report), expected);
    }

    #[test]
    fn test_multiline_signature_is_indented() {
        let mut report = Report::new("geo", "HEAD");
        report.push(Finding {
            kind: FindingKind::TypeRemoved,
            base: Located::base(Position::new("p.go", 1), "type P struct{\n\tX int\n}"),
            head: None,
        });
        let text = render_report(&report);
        assert!(text.contains("        type P struct{\n        \tX int\n        }\n"));
    }

    #[test]
    fn test_removed_and_added_packages() {
        let outcomes = vec![
            PackageOutcome::Removed {
                package: "old".to_string(),
            },
            PackageOutcome::Added {
                package: "new".to_string(),
            },
            PackageOutcome::Checked(Report::new("clean", "HEAD")),
        ];
        assert_eq!(render_outcomes(&outcomes), "old: package removed\n\n");
    }
}
