use apidiff_core::model::{
    Decl, FuncDecl, Param, Position, Receiver, StructField, TypeDecl, TypeExpr, ValueDecl,
    ValueKind,
};

/// Shorthand for an identifier type
#[allow(dead_code)]
pub fn t(name: &str) -> TypeExpr {
    TypeExpr::ident(name)
}

/// A plain function declaration at `file.go:line`
#[allow(dead_code)]
pub fn func(name: &str, params: Vec<TypeExpr>, results: Option<Vec<TypeExpr>>) -> FuncDecl {
    FuncDecl {
        name: name.to_string(),
        receiver: None,
        params: params.into_iter().map(Param::new).collect(),
        results: results.map(|r| r.into_iter().map(Param::new).collect()),
        pos: Position::new("file.go", 1),
    }
}

/// A method declaration
#[allow(dead_code)]
pub fn method(
    receiver: Receiver,
    name: &str,
    params: Vec<TypeExpr>,
    results: Option<Vec<TypeExpr>>,
) -> FuncDecl {
    FuncDecl {
        receiver: Some(receiver),
        ..func(name, params, results)
    }
}

/// A struct type declaration with one named field per `(name, type)` pair
#[allow(dead_code)]
pub fn struct_type(name: &str, fields: &[(&str, &str)]) -> TypeDecl {
    TypeDecl {
        name: name.to_string(),
        alias: false,
        ty: TypeExpr::Struct(
            fields
                .iter()
                .map(|(field, ty)| StructField::named([*field], t(ty)))
                .collect(),
        ),
        pos: Position::new("types.go", 1),
    }
}

/// A non-struct type definition
#[allow(dead_code)]
pub fn named_type(name: &str, ty: TypeExpr) -> TypeDecl {
    TypeDecl {
        name: name.to_string(),
        alias: false,
        ty,
        pos: Position::new("types.go", 1),
    }
}

/// A value spec with the given names
#[allow(dead_code)]
pub fn value(kind: ValueKind, names: &[&str], ty: Option<TypeExpr>) -> ValueDecl {
    ValueDecl {
        kind,
        names: names.iter().map(|n| n.to_string()).collect(),
        ty,
        pos: Position::new("values.go", 1),
    }
}

/// Move a declaration to a different position
#[allow(dead_code)]
pub fn at(mut decl: Decl, file: &str, line: u32) -> Decl {
    let pos = Position::new(file, line);
    match &mut decl {
        Decl::Func(d) => d.pos = pos,
        Decl::Type(d) => d.pos = pos,
        Decl::Value(d) => d.pos = pos,
    }
    decl
}
