//! Canonical text for type expressions.
//!
//! Two type expressions are API-compatible exactly when their normalised
//! strings are equal, so every rule here is part of the comparison
//! semantics. Unexported struct fields and interface methods are left out:
//! adding or changing them cannot break an importer.

use crate::model::{
    ArrayLen, ChanDir, ConstraintTerm, FuncType, InterfaceElem, Param, Receiver, StructField,
    TypeExpr,
};
use crate::policy::{GoExported, Visibility};

/// Normalise with Go's export rule.
///
/// # Example
/// ```
/// use apidiff_core::model::TypeExpr;
/// use apidiff_core::normalize::normalize;
///
/// let ty = TypeExpr::map(TypeExpr::ident("string"), TypeExpr::slice(TypeExpr::ident("int")));
/// assert_eq!(normalize(&ty), "map[string][]int");
/// ```
pub fn normalize(ty: &TypeExpr) -> String {
    Normalizer::new(&GoExported).normalize(ty)
}

/// Renders type expressions to their canonical text.
#[derive(Clone, Copy)]
pub struct Normalizer<'a> {
    visibility: &'a dyn Visibility,
}

impl<'a> Normalizer<'a> {
    pub fn new(visibility: &'a dyn Visibility) -> Self {
        Self { visibility }
    }

    pub fn normalize(&self, ty: &TypeExpr) -> String {
        match ty {
            TypeExpr::Ident(name) => name.clone(),
            TypeExpr::Pointer(inner) => format!("*{}", self.normalize(inner)),
            TypeExpr::Slice(elem) => format!("[]{}", self.normalize(elem)),
            TypeExpr::Array { len, elem } => {
                format!("[{}]{}", array_len(len), self.normalize(elem))
            }
            TypeExpr::Map { key, value } => {
                format!("map[{}]{}", self.normalize(key), self.normalize(value))
            }
            TypeExpr::Chan { dir, elem } => {
                let prefix = match dir {
                    ChanDir::Both => "chan",
                    ChanDir::Send => "chan<-",
                    ChanDir::Recv => "<-chan",
                };
                format!("{} {}", prefix, self.normalize(elem))
            }
            TypeExpr::Func(sig) => self.func_type(sig),
            TypeExpr::Struct(fields) => self.struct_type(fields),
            TypeExpr::Interface(elems) => self.interface_type(elems),
            TypeExpr::Qualified { package, name } => format!("{}.{}", package, name),
            TypeExpr::Ellipsis(elem) => format!("...{}", self.normalize(elem)),
            TypeExpr::Generic { base, args } => {
                format!("{}[{}]", self.normalize(base), self.join(args.iter()))
            }
        }
    }

    /// Comma-joined normalised parameter types, order preserved.
    pub fn param_list(&self, params: &[Param]) -> String {
        self.join(params.iter().map(|p| &p.ty))
    }

    /// A named signature in declaration form: `func (*T) Name(A, B) (R)`.
    ///
    /// Shared by the declaration printer and interface method lines so both
    /// show a method the same way.
    pub fn signature(
        &self,
        receiver: Option<&Receiver>,
        name: &str,
        params: &[Param],
        results: Option<&[Param]>,
    ) -> String {
        let mut out = String::from("func ");
        if let Some(recv) = receiver {
            out.push('(');
            if recv.pointer {
                out.push('*');
            }
            out.push_str(&recv.type_name);
            out.push_str(") ");
        }
        out.push_str(name);
        out.push('(');
        out.push_str(&self.param_list(params));
        out.push(')');
        if let Some(results) = results.filter(|r| !r.is_empty()) {
            out.push_str(" (");
            out.push_str(&self.param_list(results));
            out.push(')');
        }
        out
    }

    fn join<'t>(&self, types: impl Iterator<Item = &'t TypeExpr>) -> String {
        types
            .map(|t| self.normalize(t))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn func_type(&self, sig: &FuncType) -> String {
        let params = self.param_list(&sig.params);
        match sig.visible_results() {
            Some(results) => format!("F({}) ({})", params, self.param_list(results)),
            None => format!("func({})", params),
        }
    }

    fn struct_type(&self, fields: &[StructField]) -> String {
        let lines: Vec<String> = fields.iter().filter_map(|f| self.field_line(f)).collect();
        if lines.is_empty() {
            return "struct{}".to_string();
        }
        let mut out = String::from("struct{\n");
        for line in lines {
            out.push('\t');
            out.push_str(&line);
            out.push('\n');
        }
        out.push('}');
        out
    }

    fn field_line(&self, field: &StructField) -> Option<String> {
        let ty = self.normalize(&field.ty);
        if field.is_embedded() {
            let name = field.ty.implicit_field_name()?;
            return self.visibility.is_public(name).then_some(ty);
        }
        let public: Vec<&str> = field
            .names
            .iter()
            .map(String::as_str)
            .filter(|n| self.visibility.is_public(n))
            .collect();
        if public.is_empty() {
            return None;
        }
        Some(format!("{} {}", public.join(", "), ty))
    }

    fn interface_type(&self, elems: &[InterfaceElem]) -> String {
        let lines: Vec<String> = elems
            .iter()
            .filter_map(|elem| match elem {
                InterfaceElem::Method { name, sig } => self.visibility.is_public(name).then(|| {
                    self.signature(None, name, &sig.params, sig.results.as_deref())
                }),
                InterfaceElem::Embed(terms) => Some(self.terms(terms)),
            })
            .collect();
        if lines.is_empty() {
            return "interface{}".to_string();
        }
        let mut out = String::from("interface{\n");
        for line in lines {
            out.push('\t');
            out.push_str(&line);
            out.push('\n');
        }
        out.push('}');
        out
    }

    fn terms(&self, terms: &[ConstraintTerm]) -> String {
        terms
            .iter()
            .map(|term| {
                let ty = self.normalize(&term.ty);
                if term.tilde {
                    format!("~{}", ty)
                } else {
                    ty
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

fn array_len(len: &ArrayLen) -> String {
    match len {
        ArrayLen::Literal(text) | ArrayLen::Ident(text) => text.clone(),
        ArrayLen::Qualified { package, name } => format!("{}.{}", package, name),
        // Unknown lengths compare as equal to each other.
        ArrayLen::Ellipsis | ArrayLen::Opaque => "...".to_string(),
    }
}
