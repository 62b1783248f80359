//! Declarations extracted from one source file.

use serde::{Deserialize, Serialize};

use super::type_expr::{Param, TypeExpr};

/// Where a declaration lives, relative to its package directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub file: String,
    /// 1-based line number
    pub line: u32,
}

impl Position {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A method receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    /// Base type name with any pointer and type arguments stripped.
    pub type_name: String,
    pub pointer: bool,
}

impl Receiver {
    pub fn value(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            pointer: false,
        }
    }

    pub fn pointer(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            pointer: true,
        }
    }
}

/// Lookup key for functions and methods.
///
/// Kept structured so a method `T.M` can never collide with a dotted
/// package-qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FuncKey {
    pub receiver: Option<String>,
    pub name: String,
}

impl FuncKey {
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            receiver: None,
            name: name.into(),
        }
    }

    pub fn method(receiver: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            receiver: Some(receiver.into()),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for FuncKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.receiver {
            Some(recv) => write!(f, "{}.{}", recv, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    pub receiver: Option<Receiver>,
    pub params: Vec<Param>,
    /// `None` means no result list; `Some(vec![])` is an explicit empty one.
    pub results: Option<Vec<Param>>,
    pub pos: Position,
}

impl FuncDecl {
    pub fn key(&self) -> FuncKey {
        FuncKey {
            receiver: self.receiver.as_ref().map(|r| r.type_name.clone()),
            name: self.name.clone(),
        }
    }
}

/// A type declaration (definition or alias).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    /// `type A = B`
    pub alias: bool,
    pub ty: TypeExpr,
    pub pos: Position,
}

/// `const` or `var`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Const,
    Var,
}

impl ValueKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            ValueKind::Const => "const",
            ValueKind::Var => "var",
        }
    }
}

/// One value spec: several names sharing one (possibly inferred) type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDecl {
    pub kind: ValueKind,
    pub names: Vec<String>,
    /// `None` when the type is inferred from the initialiser.
    pub ty: Option<TypeExpr>,
    pub pos: Position,
}

/// Any top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Func(FuncDecl),
    Type(TypeDecl),
    Value(ValueDecl),
}

impl Decl {
    pub fn pos(&self) -> &Position {
        match self {
            Decl::Func(d) => &d.pos,
            Decl::Type(d) => &d.pos,
            Decl::Value(d) => &d.pos,
        }
    }
}

impl From<FuncDecl> for Decl {
    fn from(d: FuncDecl) -> Self {
        Decl::Func(d)
    }
}

impl From<TypeDecl> for Decl {
    fn from(d: TypeDecl) -> Self {
        Decl::Type(d)
    }
}

impl From<ValueDecl> for Decl {
    fn from(d: ValueDecl) -> Self {
        Decl::Value(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_func_key_ignores_receiver_pointer() {
        let by_value = FuncDecl {
            name: "Close".to_string(),
            receiver: Some(Receiver::value("Conn")),
            params: vec![],
            results: None,
            pos: Position::new("conn.go", 10),
        };
        let mut by_pointer = by_value.clone();
        by_pointer.receiver = Some(Receiver::pointer("Conn"));

        assert_eq!(by_value.key(), by_pointer.key());
        assert_eq!(by_value.key(), FuncKey::method("Conn", "Close"));
    }

    #[test]
    fn test_method_key_differs_from_dotted_function_name() {
        assert_ne!(FuncKey::method("Conn", "Close"), FuncKey::function("Conn.Close"));
        assert_eq!(FuncKey::method("Conn", "Close").to_string(), "Conn.Close");
    }
}
