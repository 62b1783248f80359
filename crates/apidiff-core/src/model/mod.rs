pub mod decl;
pub mod type_expr;

pub use decl::{Decl, FuncDecl, FuncKey, Position, Receiver, TypeDecl, ValueDecl, ValueKind};
pub use type_expr::{
    ArrayLen, ChanDir, ConstraintTerm, FuncType, InterfaceElem, Param, StructField, TypeExpr,
};
