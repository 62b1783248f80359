use crate::model::{Decl, FuncDecl, TypeDecl, ValueDecl};
use crate::normalize::Normalizer;
use crate::policy::{GoExported, Visibility};

/// Render a declaration as a one-line signature for reports
///
/// Uses Go's export rule; see [`DeclPrinter`] to inject another policy.
///
/// # Example
/// ```
/// use apidiff_core::model::{FuncDecl, Param, Position, Receiver, TypeExpr};
/// use apidiff_core::render::render_func;
///
/// let decl = FuncDecl {
///     name: "Close".to_string(),
///     receiver: Some(Receiver::pointer("Conn")),
///     params: vec![],
///     results: Some(vec![Param::new(TypeExpr::ident("error"))]),
///     pos: Position::new("conn.go", 3),
/// };
/// assert_eq!(render_func(&decl), "func (*Conn) Close() (error)");
/// ```
pub fn render_decl(decl: &Decl) -> String {
    DeclPrinter::new(&GoExported).render(decl)
}

/// Render a function or method declaration
pub fn render_func(decl: &FuncDecl) -> String {
    DeclPrinter::new(&GoExported).func(decl)
}

/// Render a type declaration
pub fn render_type(decl: &TypeDecl) -> String {
    DeclPrinter::new(&GoExported).type_decl(decl)
}

/// Render a const or var spec; empty when no name is public
pub fn render_value(decl: &ValueDecl) -> String {
    DeclPrinter::new(&GoExported).value(decl)
}

/// Declaration printer bound to a visibility policy
#[derive(Clone, Copy)]
pub struct DeclPrinter<'a> {
    visibility: &'a dyn Visibility,
    normalizer: Normalizer<'a>,
}

impl<'a> DeclPrinter<'a> {
    pub fn new(visibility: &'a dyn Visibility) -> Self {
        Self {
            visibility,
            normalizer: Normalizer::new(visibility),
        }
    }

    pub fn render(&self, decl: &Decl) -> String {
        match decl {
            Decl::Func(d) => self.func(d),
            Decl::Type(d) => self.type_decl(d),
            Decl::Value(d) => self.value(d),
        }
    }

    pub fn func(&self, decl: &FuncDecl) -> String {
        self.normalizer.signature(
            decl.receiver.as_ref(),
            &decl.name,
            &decl.params,
            decl.results.as_deref(),
        )
    }

    pub fn type_decl(&self, decl: &TypeDecl) -> String {
        let sep = if decl.alias { " = " } else { " " };
        format!(
            "type {}{}{}",
            decl.name,
            sep,
            self.normalizer.normalize(&decl.ty)
        )
    }

    pub fn value(&self, decl: &ValueDecl) -> String {
        let names: Vec<&str> = decl
            .names
            .iter()
            .map(String::as_str)
            .filter(|n| self.visibility.is_public(n))
            .collect();
        if names.is_empty() {
            return String::new();
        }

        let mut output = format!("{} {}", decl.kind.keyword(), names.join(", "));
        if let Some(ty) = &decl.ty {
            output.push(' ');
            output.push_str(&self.normalizer.normalize(ty));
        }
        output
    }
}
