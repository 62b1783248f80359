//! Mapping from tree-sitter Go type nodes to `TypeExpr`.

use apidiff_core::model::{
    ArrayLen, ChanDir, ConstraintTerm, FuncType, InterfaceElem, Param, StructField, TypeExpr,
};
use apidiff_core::ExError;
use tree_sitter::Node;

use crate::errors::{self, Result};

/// Named children of a node, without comments
pub(crate) fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect()
}

/// All children of a node, anonymous tokens included
pub(crate) fn children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Children under a repeated field such as `name`
pub(crate) fn field_children<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

pub(crate) fn line_of(node: Node<'_>) -> u32 {
    u32::try_from(node.start_position().row + 1).unwrap_or(u32::MAX)
}

/// Converts type syntax of one file
pub(crate) struct TypeMapper<'s> {
    pub(crate) source: &'s str,
    pub(crate) path: &'s str,
}

impl<'s> TypeMapper<'s> {
    pub(crate) fn text(&self, node: Node<'_>) -> &'s str {
        &self.source[node.byte_range()]
    }

    pub(crate) fn unsupported(&self, node: Node<'_>) -> ExError {
        errors::unsupported(self.path, line_of(node), node.kind())
    }

    fn required<'t>(&self, node: Node<'t>, field: &str) -> Result<Node<'t>> {
        node.child_by_field_name(field)
            .ok_or_else(|| self.unsupported(node))
    }

    /// The single named child of wrapper nodes like `pointer_type`
    fn only_child<'t>(&self, node: Node<'t>) -> Result<Node<'t>> {
        named_children(node)
            .into_iter()
            .next()
            .ok_or_else(|| self.unsupported(node))
    }

    pub(crate) fn map_type(&self, node: Node<'_>) -> Result<TypeExpr> {
        match node.kind() {
            "type_identifier" | "identifier" | "field_identifier" => {
                Ok(TypeExpr::ident(self.text(node)))
            }
            "qualified_type" => Ok(TypeExpr::qualified(
                self.text(self.required(node, "package")?),
                self.text(self.required(node, "name")?),
            )),
            "pointer_type" => Ok(TypeExpr::pointer(self.map_type(self.only_child(node)?)?)),
            "parenthesized_type" => self.map_type(self.only_child(node)?),
            "slice_type" => Ok(TypeExpr::slice(
                self.map_type(self.required(node, "element")?)?,
            )),
            "array_type" => Ok(TypeExpr::Array {
                len: self.array_len(self.required(node, "length")?),
                elem: Box::new(self.map_type(self.required(node, "element")?)?),
            }),
            "implicit_length_array_type" => Ok(TypeExpr::Array {
                len: ArrayLen::Ellipsis,
                elem: Box::new(self.map_type(self.required(node, "element")?)?),
            }),
            "map_type" => Ok(TypeExpr::map(
                self.map_type(self.required(node, "key")?)?,
                self.map_type(self.required(node, "value")?)?,
            )),
            "channel_type" => self.channel(node),
            "function_type" => Ok(TypeExpr::Func(self.signature(node)?)),
            "struct_type" => self.struct_type(node),
            "interface_type" => self.interface_type(node),
            "generic_type" => self.generic(node),
            // The grammar accepts `~T` in any type position
            _ => Err(self.unsupported(node)),
        }
    }

    fn array_len(&self, node: Node<'_>) -> ArrayLen {
        match node.kind() {
            "int_literal" => ArrayLen::Literal(self.text(node).to_string()),
            "identifier" => ArrayLen::Ident(self.text(node).to_string()),
            "selector_expression" => {
                match (
                    node.child_by_field_name("operand"),
                    node.child_by_field_name("field"),
                ) {
                    (Some(pkg), Some(name)) if pkg.kind() == "identifier" => ArrayLen::Qualified {
                        package: self.text(pkg).to_string(),
                        name: self.text(name).to_string(),
                    },
                    _ => ArrayLen::Opaque,
                }
            }
            _ => ArrayLen::Opaque,
        }
    }

    fn channel(&self, node: Node<'_>) -> Result<TypeExpr> {
        let tokens = children(node);
        let dir = match (tokens.first().map(|n| n.kind()), tokens.get(1).map(|n| n.kind())) {
            (Some("<-"), _) => ChanDir::Recv,
            (_, Some("<-")) => ChanDir::Send,
            _ => ChanDir::Both,
        };
        Ok(TypeExpr::Chan {
            dir,
            elem: Box::new(self.map_type(self.required(node, "value")?)?),
        })
    }

    fn generic(&self, node: Node<'_>) -> Result<TypeExpr> {
        let base = self.map_type(self.required(node, "type")?)?;
        let args_node = self.required(node, "type_arguments")?;
        let mut args = Vec::new();
        for arg in named_children(args_node) {
            // Newer grammars wrap each argument in a single-term `type_elem`
            let arg = if arg.kind() == "type_elem" {
                self.only_child(arg)?
            } else {
                arg
            };
            args.push(self.map_type(arg)?);
        }
        Ok(TypeExpr::Generic {
            base: Box::new(base),
            args,
        })
    }

    /// Parameters and results of anything with `parameters`/`result` fields
    pub(crate) fn signature(&self, node: Node<'_>) -> Result<FuncType> {
        let params = self.params(self.required(node, "parameters")?)?;
        let results = match node.child_by_field_name("result") {
            None => None,
            Some(result) if result.kind() == "parameter_list" => Some(self.params(result)?),
            Some(result) => Some(vec![Param::new(self.map_type(result)?)]),
        };
        Ok(FuncType::new(params, results))
    }

    /// One `Param` per declared name; unnamed parameters count once.
    pub(crate) fn params(&self, list: Node<'_>) -> Result<Vec<Param>> {
        let mut params = Vec::new();
        for decl in named_children(list) {
            match decl.kind() {
                "parameter_declaration" => {
                    let ty = self.map_type(self.required(decl, "type")?)?;
                    let count = field_children(decl, "name").len().max(1);
                    params.extend(std::iter::repeat(Param::new(ty)).take(count));
                }
                "variadic_parameter_declaration" => {
                    let ty = self.map_type(self.required(decl, "type")?)?;
                    params.push(Param::new(TypeExpr::ellipsis(ty)));
                }
                _ => return Err(self.unsupported(decl)),
            }
        }
        Ok(params)
    }

    fn struct_type(&self, node: Node<'_>) -> Result<TypeExpr> {
        let mut fields = Vec::new();
        let Some(list) = named_children(node)
            .into_iter()
            .find(|n| n.kind() == "field_declaration_list")
        else {
            return Ok(TypeExpr::Struct(fields));
        };

        for decl in named_children(list) {
            if decl.kind() != "field_declaration" {
                return Err(self.unsupported(decl));
            }
            let mut ty = self.map_type(self.required(decl, "type")?)?;
            let names: Vec<String> = field_children(decl, "name")
                .into_iter()
                .map(|n| self.text(n).to_string())
                .collect();
            if names.is_empty() {
                // `*T` embedding: the star is an anonymous token
                if children(decl).iter().any(|n| n.kind() == "*") {
                    ty = TypeExpr::pointer(ty);
                }
                fields.push(StructField::embedded(ty));
            } else {
                fields.push(StructField { names, ty });
            }
        }
        Ok(TypeExpr::Struct(fields))
    }

    fn interface_type(&self, node: Node<'_>) -> Result<TypeExpr> {
        let mut elems = Vec::new();
        for elem in named_children(node) {
            match elem.kind() {
                "method_elem" | "method_spec" => elems.push(InterfaceElem::Method {
                    name: self.text(self.required(elem, "name")?).to_string(),
                    sig: self.signature(elem)?,
                }),
                "type_elem" | "constraint_elem" => {
                    let mut terms = Vec::new();
                    for term in named_children(elem) {
                        terms.push(self.constraint_term(term)?);
                    }
                    elems.push(InterfaceElem::Embed(terms));
                }
                // Older grammars list embedded interfaces directly
                "type_identifier" | "qualified_type" | "generic_type" => {
                    elems.push(InterfaceElem::Embed(vec![ConstraintTerm::exact(
                        self.map_type(elem)?,
                    )]));
                }
                _ => return Err(self.unsupported(elem)),
            }
        }
        Ok(TypeExpr::Interface(elems))
    }

    fn constraint_term(&self, node: Node<'_>) -> Result<ConstraintTerm> {
        if node.kind() == "negated_type" {
            Ok(ConstraintTerm::approx(self.map_type(self.only_child(node)?)?))
        } else {
            Ok(ConstraintTerm::exact(self.map_type(node)?))
        }
    }
}
