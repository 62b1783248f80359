//! Structural comparer.
//!
//! Walks the declarations of the base revision and checks each public one
//! against the head [`Summary`]. Anything a caller of the old API could
//! rely on that no longer holds becomes a [`Finding`].

use crate::diff::model::{Finding, FindingKind, Located, Report};
use crate::model::{Decl, FuncDecl, Param, StructField, TypeDecl, TypeExpr, ValueDecl};
use crate::normalize::Normalizer;
use crate::render::DeclPrinter;
use crate::summary::Summary;

/// Shown in place of a type that is inferred from an initialiser.
const INFERRED: &str = "<inferred>";

/// Compares base-revision declarations against a head summary
pub struct Comparer<'a> {
    head: &'a Summary,
    normalizer: Normalizer<'a>,
    printer: DeclPrinter<'a>,
    report: Report,
}

impl<'a> Comparer<'a> {
    pub fn new(head: &'a Summary, package: impl Into<String>, base_ref: impl Into<String>) -> Self {
        let visibility = head.policy().visibility.as_ref();
        Self {
            head,
            normalizer: Normalizer::new(visibility),
            printer: DeclPrinter::new(visibility),
            report: Report::new(package, base_ref),
        }
    }

    /// Check one base declaration. Non-public declarations are ignored.
    pub fn visit(&mut self, decl: &Decl) {
        match decl {
            Decl::Func(func) => self.compare_func(func),
            Decl::Type(ty) => self.compare_type(ty),
            Decl::Value(value) => self.compare_value(value),
        }
    }

    /// Findings so far, in visit order
    pub fn findings(&self) -> &[Finding] {
        &self.report.findings
    }

    pub fn into_report(self) -> Report {
        self.report
    }

    fn emit(&mut self, kind: FindingKind, base: Located, head: Option<Located>) {
        tracing::trace!(
            package = %self.report.package,
            file = %base.position.file,
            line = base.position.line,
            reason = %kind,
            "breaking change"
        );
        self.report.push(Finding { kind, base, head });
    }

    // ----- types -----

    fn compare_type(&mut self, prior: &TypeDecl) {
        if !self.head.policy().is_public(&prior.name) {
            return;
        }
        let base = Located::base(prior.pos.clone(), self.printer.type_decl(prior));
        let summary = self.head;
        let Some(current) = summary.lookup_type(&prior.name) else {
            self.emit(FindingKind::TypeRemoved, base, None);
            return;
        };
        let head = Located::head(current.pos.clone(), self.printer.type_decl(current));

        if let TypeExpr::Struct(prior_fields) = &prior.ty {
            let TypeExpr::Struct(current_fields) = &current.ty else {
                let kind = FindingKind::TypeKindChanged {
                    current: self.normalizer.normalize(&current.ty),
                };
                self.emit(kind, base, Some(head));
                return;
            };
            self.compare_fields(prior_fields, current_fields, &base, &head);
            if prior.alias != current.alias {
                self.emit_definition_change(prior, current, base, head);
            }
            return;
        }

        if prior.alias != current.alias
            || self.normalizer.normalize(&prior.ty) != self.normalizer.normalize(&current.ty)
        {
            self.emit_definition_change(prior, current, base, head);
        }
    }

    fn emit_definition_change(
        &mut self,
        prior: &TypeDecl,
        current: &TypeDecl,
        base: Located,
        head: Located,
    ) {
        let kind = FindingKind::TypeDefinitionChanged {
            prior: self.definition(prior),
            current: self.definition(current),
        };
        self.emit(kind, base, Some(head));
    }

    fn definition(&self, decl: &TypeDecl) -> String {
        let ty = self.normalizer.normalize(&decl.ty);
        if decl.alias {
            format!("= {}", ty)
        } else {
            ty
        }
    }

    /// Every public field of the prior struct must survive with the same
    /// type, and an embedded one must stay embedded. New fields are fine.
    fn compare_fields(
        &mut self,
        prior: &[StructField],
        current: &[StructField],
        base: &Located,
        head: &Located,
    ) {
        for field in prior {
            for name in field.effective_names() {
                if !self.head.policy().is_public(name) {
                    continue;
                }
                let found = current
                    .iter()
                    .find(|f| f.effective_names().contains(&name));
                let kind = match found {
                    None => FindingKind::StructFieldRemoved {
                        field: name.to_string(),
                    },
                    Some(f) => {
                        let before = self.normalizer.normalize(&field.ty);
                        let after = self.normalizer.normalize(&f.ty);
                        if before != after {
                            FindingKind::StructFieldTypeChanged {
                                field: name.to_string(),
                                prior: before,
                                current: after,
                            }
                        } else if field.is_embedded() && !f.is_embedded() {
                            FindingKind::StructFieldNoLongerEmbedded {
                                field: name.to_string(),
                            }
                        } else {
                            continue;
                        }
                    }
                };
                self.emit(kind, base.clone(), Some(head.clone()));
            }
        }
    }

    // ----- values -----

    fn compare_value(&mut self, prior: &ValueDecl) {
        for name in &prior.names {
            if !self.head.policy().is_public(name) {
                continue;
            }
            let base = Located::base(prior.pos.clone(), self.printer.value(prior));
            let summary = self.head;
            let Some(current) = summary.lookup_value(name) else {
                self.emit(FindingKind::ValueRemoved { name: name.clone() }, base, None);
                continue;
            };

            // Inferred types cannot be compared; only explicit ones are.
            let before = prior.ty.as_ref().map(|t| self.normalizer.normalize(t));
            let after = current.ty.as_ref().map(|t| self.normalizer.normalize(t));
            if before != after {
                let kind = FindingKind::ValueTypeChanged {
                    name: name.clone(),
                    prior: before.unwrap_or_else(|| INFERRED.to_string()),
                    current: after.unwrap_or_else(|| INFERRED.to_string()),
                };
                let head = Located::head(current.pos.clone(), self.printer.value(current));
                self.emit(kind, base, Some(head));
            }
        }
    }

    // ----- functions -----

    fn compare_func(&mut self, prior: &FuncDecl) {
        if !self.head.is_public_func(prior) {
            return;
        }
        let base = Located::base(prior.pos.clone(), self.printer.func(prior));
        let summary = self.head;
        let Some(current) = summary.lookup_func(&prior.key()) else {
            self.emit(FindingKind::FunctionRemoved, base, None);
            return;
        };
        if let Some(kind) = self.func_violation(prior, current) {
            let head = Located::head(current.pos.clone(), self.printer.func(current));
            self.emit(kind, base, Some(head));
        }
    }

    /// First incompatibility between two signatures, if any.
    fn func_violation(&self, prior: &FuncDecl, current: &FuncDecl) -> Option<FindingKind> {
        if let (Some(before), Some(after)) = (&prior.receiver, &current.receiver) {
            if !before.pointer && after.pointer {
                return Some(FindingKind::ReceiverChanged);
            }
        }

        let (before, after) = (&prior.params, &current.params);
        if before.len() != after.len() {
            let variadic_tail =
                after.len() == before.len() + 1 && after.last().is_some_and(Param::is_variadic);
            if !variadic_tail {
                return Some(FindingKind::ArgumentCountChanged {
                    prior: before.len(),
                    current: after.len(),
                });
            }
        }
        if let Some((index, prior, current)) = self.first_mismatch(before, after) {
            return Some(FindingKind::ArgumentTypeChanged {
                index,
                prior,
                current,
            });
        }

        let before = prior.results.as_deref().filter(|r| !r.is_empty());
        let after = current.results.as_deref().filter(|r| !r.is_empty());
        match (before, after) {
            (None, None) => None,
            (None, Some(_)) => Some(FindingKind::ResultsAdded),
            (Some(_), None) => Some(FindingKind::ResultsRemoved),
            (Some(before), Some(after)) => {
                if before.len() != after.len() {
                    return Some(FindingKind::ResultCountChanged {
                        prior: before.len(),
                        current: after.len(),
                    });
                }
                self.first_mismatch(before, after)
                    .map(|(index, prior, current)| FindingKind::ResultTypeChanged {
                        index,
                        prior,
                        current,
                    })
            }
        }
    }

    /// Compares the slots `before` has; `after` may be longer.
    fn first_mismatch(&self, before: &[Param], after: &[Param]) -> Option<(usize, String, String)> {
        before.iter().zip(after).enumerate().find_map(|(i, (a, b))| {
            let a = self.normalizer.normalize(&a.ty);
            let b = self.normalizer.normalize(&b.ty);
            (a != b).then_some((i, a, b))
        })
    }
}

/// Compare every base declaration against `head` and collect a report.
pub fn compare_decls<'d, I>(head: &Summary, package: &str, base_ref: &str, base: I) -> Report
where
    I: IntoIterator<Item = &'d Decl>,
{
    let mut comparer = Comparer::new(head, package, base_ref);
    for decl in base {
        comparer.visit(decl);
    }
    comparer.into_report()
}
