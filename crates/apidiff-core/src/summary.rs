//! Index of a package's public declarations in the head snapshot.
//!
//! The summary is filled once from every head file and then only read by
//! the comparer. Absence from a lookup is the normal way removal shows up.

use std::collections::HashMap;

use crate::model::{Decl, FuncDecl, FuncKey, TypeDecl, ValueDecl};
use crate::policy::SurfacePolicy;

/// Public declarations of one package, keyed for O(1) lookup
#[derive(Debug, Clone, Default)]
pub struct Summary {
    policy: SurfacePolicy,
    funcs: HashMap<FuncKey, FuncDecl>,
    types: HashMap<String, TypeDecl>,
    values: HashMap<String, ValueDecl>,
}

impl Summary {
    pub fn new(policy: SurfacePolicy) -> Self {
        Self {
            policy,
            funcs: HashMap::new(),
            types: HashMap::new(),
            values: HashMap::new(),
        }
    }

    /// Build a summary from a sequence of declarations
    pub fn from_decls<I>(policy: SurfacePolicy, decls: I) -> Self
    where
        I: IntoIterator<Item = Decl>,
    {
        let mut summary = Self::new(policy);
        for decl in decls {
            summary.record(decl);
        }
        summary
    }

    pub fn policy(&self) -> &SurfacePolicy {
        &self.policy
    }

    /// Index a declaration if it is part of the public surface.
    ///
    /// A later declaration under the same key replaces an earlier one.
    pub fn record(&mut self, decl: Decl) {
        match decl {
            Decl::Func(func) => {
                if self.is_public_func(&func) {
                    self.funcs.insert(func.key(), func);
                }
            }
            Decl::Type(ty) => {
                if self.policy.is_public(&ty.name) {
                    self.types.insert(ty.name.clone(), ty);
                }
            }
            Decl::Value(value) => {
                for name in &value.names {
                    if self.policy.is_public(name) {
                        self.values.insert(name.clone(), value.clone());
                    }
                }
            }
        }
    }

    /// Whether a function or method belongs to the indexed surface
    pub fn is_public_func(&self, func: &FuncDecl) -> bool {
        if !self.policy.is_public(&func.name) {
            return false;
        }
        match &func.receiver {
            Some(recv) => {
                self.policy.include_unexported_receivers
                    || self.policy.is_public(&recv.type_name)
            }
            None => true,
        }
    }

    pub fn lookup_func(&self, key: &FuncKey) -> Option<&FuncDecl> {
        self.funcs.get(key)
    }

    pub fn lookup_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    /// Look up the spec that declares `name`
    pub fn lookup_value(&self, name: &str) -> Option<&ValueDecl> {
        self.values.get(name)
    }

    /// Number of indexed entries across all three tables
    pub fn len(&self) -> usize {
        self.funcs.len() + self.types.len() + self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Param, Position, Receiver, TypeExpr, ValueKind};

    fn func(name: &str, receiver: Option<Receiver>, line: u32) -> Decl {
        Decl::Func(FuncDecl {
            name: name.to_string(),
            receiver,
            params: vec![Param::new(TypeExpr::ident("int"))],
            results: None,
            pos: Position::new("a.go", line),
        })
    }

    #[test]
    fn test_record_filters_unexported() {
        let summary = Summary::from_decls(
            SurfacePolicy::default(),
            vec![
                func("Public", None, 1),
                func("private", None, 2),
                Decl::Type(TypeDecl {
                    name: "hidden".to_string(),
                    alias: false,
                    ty: TypeExpr::ident("int"),
                    pos: Position::new("a.go", 3),
                }),
            ],
        );

        assert_eq!(summary.len(), 1);
        assert!(summary.lookup_func(&FuncKey::function("Public")).is_some());
        assert!(summary.lookup_func(&FuncKey::function("private")).is_none());
        assert!(summary.lookup_type("hidden").is_none());
    }

    #[test]
    fn test_methods_need_public_receiver() {
        let decls = vec![
            func("Do", Some(Receiver::pointer("worker")), 1),
            func("Do", Some(Receiver::value("Worker")), 2),
        ];

        let strict = Summary::from_decls(SurfacePolicy::default(), decls.clone());
        assert!(strict.lookup_func(&FuncKey::method("worker", "Do")).is_none());
        assert!(strict.lookup_func(&FuncKey::method("Worker", "Do")).is_some());

        let lenient = Summary::from_decls(
            SurfacePolicy::default().with_unexported_receivers(true),
            decls,
        );
        assert!(lenient.lookup_func(&FuncKey::method("worker", "Do")).is_some());
    }

    #[test]
    fn test_last_write_wins() {
        let summary = Summary::from_decls(
            SurfacePolicy::default(),
            vec![func("Run", None, 1), func("Run", None, 9)],
        );
        let found = summary.lookup_func(&FuncKey::function("Run"));
        assert_eq!(found.map(|f| f.pos.line), Some(9));
    }

    #[test]
    fn test_values_index_public_names() {
        let summary = Summary::from_decls(
            SurfacePolicy::default(),
            vec![Decl::Value(ValueDecl {
                kind: ValueKind::Const,
                names: vec!["A".to_string(), "b".to_string()],
                ty: None,
                pos: Position::new("a.go", 4),
            })],
        );
        assert!(summary.lookup_value("A").is_some());
        assert!(summary.lookup_value("b").is_none());
        assert!(!summary.is_empty());
    }
}
