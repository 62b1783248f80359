//! Go declaration extraction with tree-sitter.
//!
//! Only top-level declarations are read: functions, methods, type specs
//! and const/var specs. Bodies and initialisers are never inspected, and
//! type parameters are not part of the extracted surface.

mod types;

use apidiff_core::model::{
    Decl, FuncDecl, Position, Receiver, TypeDecl, TypeExpr, ValueDecl, ValueKind,
};
use tree_sitter::{Language, Node, Parser};

use crate::errors::{self, Result};
use types::{field_children, line_of, named_children, TypeMapper};

/// A reusable Go parser
///
/// Not `Sync`; create one per thread.
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    /// # Errors
    ///
    /// Returns `Internal` if the bundled grammar cannot be loaded.
    pub fn new() -> Result<Self> {
        let language: Language = tree_sitter_go::LANGUAGE.into();
        let mut parser = Parser::new();
        parser.set_language(&language).map_err(|e| {
            apidiff_core::ExError::new(apidiff_core::ExErrorKind::Internal)
                .with_op("load_grammar")
                .with_message(e.to_string())
        })?;
        Ok(Self { parser })
    }

    /// Extract the declarations of one file
    ///
    /// `path` is only used for positions and error messages.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for non-UTF-8 input or a syntax error, and
    /// `UnsupportedSyntax` for a type form with no model mapping.
    pub fn parse_file(&mut self, path: &str, source: &[u8]) -> Result<Vec<Decl>> {
        let text = std::str::from_utf8(source).map_err(|e| {
            let line = source[..e.valid_up_to()]
                .iter()
                .filter(|b| **b == b'\n')
                .count()
                + 1;
            errors::parse_error(
                path,
                u32::try_from(line).unwrap_or(u32::MAX),
                "source is not valid UTF-8",
            )
        })?;

        let tree = self
            .parser
            .parse(text, None)
            .ok_or_else(|| errors::parse_error(path, 1, "parser produced no tree"))?;
        let root = tree.root_node();
        if root.has_error() {
            let bad = first_error(root).unwrap_or(root);
            let message = if bad.is_missing() {
                format!("missing {}", bad.kind())
            } else {
                "syntax error".to_string()
            };
            return Err(errors::parse_error(path, line_of(bad), message));
        }

        let extractor = Extractor {
            types: TypeMapper { source: text, path },
        };
        let mut decls = Vec::new();
        for node in named_children(root) {
            extractor.top_level(node, &mut decls)?;
        }
        tracing::trace!(file = path, decl_count = decls.len(), "parsed");
        Ok(decls)
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error() || c.is_missing())
        .find_map(first_error)
}

struct Extractor<'s> {
    types: TypeMapper<'s>,
}

impl<'s> Extractor<'s> {
    fn position(&self, node: Node<'_>) -> Position {
        Position::new(self.types.path, line_of(node))
    }

    fn text(&self, node: Node<'_>) -> String {
        self.types.text(node).to_string()
    }

    fn top_level(&self, node: Node<'_>, out: &mut Vec<Decl>) -> Result<()> {
        match node.kind() {
            "function_declaration" => out.push(Decl::Func(self.function(node, None)?)),
            "method_declaration" => {
                let receiver = self.receiver(node)?;
                out.push(Decl::Func(self.function(node, Some(receiver))?));
            }
            "type_declaration" => {
                for spec in named_children(node) {
                    out.push(Decl::Type(self.type_spec(spec)?));
                }
            }
            "const_declaration" => self.value_specs(node, ValueKind::Const, out)?,
            "var_declaration" => self.value_specs(node, ValueKind::Var, out)?,
            _ => {}
        }
        Ok(())
    }

    fn function(&self, node: Node<'_>, receiver: Option<Receiver>) -> Result<FuncDecl> {
        let name = node
            .child_by_field_name("name")
            .ok_or_else(|| self.types.unsupported(node))?;
        let sig = self.types.signature(node)?;
        Ok(FuncDecl {
            name: self.text(name),
            receiver,
            params: sig.params,
            results: sig.results,
            pos: self.position(node),
        })
    }

    fn receiver(&self, node: Node<'_>) -> Result<Receiver> {
        let list = node
            .child_by_field_name("receiver")
            .ok_or_else(|| self.types.unsupported(node))?;
        let param = named_children(list)
            .into_iter()
            .next()
            .ok_or_else(|| self.types.unsupported(list))?;
        let ty = param
            .child_by_field_name("type")
            .ok_or_else(|| self.types.unsupported(param))?;

        // Generic receivers like `*List[T]` are keyed by the base name
        match self.types.map_type(ty)? {
            TypeExpr::Pointer(inner) => Ok(Receiver::pointer(self.base_name(&inner, ty)?)),
            other => Ok(Receiver::value(self.base_name(&other, ty)?)),
        }
    }

    fn base_name(&self, ty: &TypeExpr, node: Node<'_>) -> Result<String> {
        match ty {
            TypeExpr::Ident(name) => Ok(name.clone()),
            TypeExpr::Generic { base, .. } => self.base_name(base, node),
            _ => Err(self.types.unsupported(node)),
        }
    }

    fn type_spec(&self, spec: Node<'_>) -> Result<TypeDecl> {
        let alias = match spec.kind() {
            "type_spec" => false,
            "type_alias" => true,
            _ => return Err(self.types.unsupported(spec)),
        };
        let name = spec
            .child_by_field_name("name")
            .ok_or_else(|| self.types.unsupported(spec))?;
        let ty = spec
            .child_by_field_name("type")
            .ok_or_else(|| self.types.unsupported(spec))?;
        Ok(TypeDecl {
            name: self.text(name),
            alias,
            ty: self.types.map_type(ty)?,
            pos: self.position(spec),
        })
    }

    /// Flattens grouped specs; some grammar versions nest them in a list node.
    fn value_specs(&self, node: Node<'_>, kind: ValueKind, out: &mut Vec<Decl>) -> Result<()> {
        for child in named_children(node) {
            match child.kind() {
                "const_spec" | "var_spec" => out.push(Decl::Value(self.value_spec(child, kind)?)),
                "var_spec_list" | "const_spec_list" => self.value_specs(child, kind, out)?,
                _ => return Err(self.types.unsupported(child)),
            }
        }
        Ok(())
    }

    fn value_spec(&self, spec: Node<'_>, kind: ValueKind) -> Result<ValueDecl> {
        let names = field_children(spec, "name")
            .into_iter()
            .map(|n| self.text(n))
            .collect();
        let ty = match spec.child_by_field_name("type") {
            Some(ty) => Some(self.types.map_type(ty)?),
            None => None,
        };
        Ok(ValueDecl {
            kind,
            names,
            ty,
            pos: self.position(spec),
        })
    }
}
