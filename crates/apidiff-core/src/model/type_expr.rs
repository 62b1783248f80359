//! Type expressions as they appear in declarations.
//!
//! The set of variants is closed: the normaliser matches on it exhaustively,
//! so adding a variant forces every rendering rule to be revisited.

/// A type expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A bare identifier such as `int` or `Config`.
    Ident(String),
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T`
    Slice(Box<TypeExpr>),
    /// `[N]T`
    Array { len: ArrayLen, elem: Box<TypeExpr> },
    /// `map[K]V`
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// `chan T`, `chan<- T`, `<-chan T`
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    /// `func(P...) (R...)`
    Func(FuncType),
    /// `struct { ... }`
    Struct(Vec<StructField>),
    /// `interface { ... }`
    Interface(Vec<InterfaceElem>),
    /// `pkg.Name`
    Qualified { package: String, name: String },
    /// `...T`, only valid as the type of a trailing parameter.
    Ellipsis(Box<TypeExpr>),
    /// `Base[A, B]`
    Generic {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
}

impl TypeExpr {
    /// Shorthand for [`TypeExpr::Ident`].
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident(name.into())
    }

    /// Shorthand for [`TypeExpr::Pointer`].
    pub fn pointer(inner: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(inner))
    }

    /// Shorthand for [`TypeExpr::Slice`].
    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Slice(Box::new(elem))
    }

    /// Shorthand for [`TypeExpr::Ellipsis`].
    pub fn ellipsis(elem: TypeExpr) -> Self {
        TypeExpr::Ellipsis(Box::new(elem))
    }

    /// Shorthand for [`TypeExpr::Map`].
    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Shorthand for [`TypeExpr::Qualified`].
    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    /// True for a variadic `...T` parameter type.
    pub fn is_variadic(&self) -> bool {
        matches!(self, TypeExpr::Ellipsis(_))
    }

    /// The identifier an embedded field of this type is known by.
    ///
    /// `*pkg.Reader` and `Reader[T]` are both known as `Reader`.
    pub fn implicit_field_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Ident(name) => Some(name),
            TypeExpr::Qualified { name, .. } => Some(name),
            TypeExpr::Pointer(inner) => inner.implicit_field_name(),
            TypeExpr::Generic { base, .. } => base.implicit_field_name(),
            _ => None,
        }
    }
}

/// Length of a fixed-size array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayLen {
    /// Literal text, e.g. `16` or `0x10`.
    Literal(String),
    /// A constant identifier.
    Ident(String),
    /// A package-qualified constant, e.g. `sha256.Size`.
    Qualified { package: String, name: String },
    /// `[...]T`, length taken from a composite literal.
    Ellipsis,
    /// Any other constant expression; compared as a wildcard.
    Opaque,
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// A function signature without a name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuncType {
    pub params: Vec<Param>,
    /// `None` when the signature declares no result list at all.
    pub results: Option<Vec<Param>>,
}

impl FuncType {
    pub fn new(params: Vec<Param>, results: Option<Vec<Param>>) -> Self {
        Self { params, results }
    }

    /// Results that would be rendered: present and non-empty.
    pub fn visible_results(&self) -> Option<&[Param]> {
        self.results.as_deref().filter(|r| !r.is_empty())
    }
}

/// One parameter or result slot. Names are not part of the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: TypeExpr,
}

impl Param {
    pub fn new(ty: TypeExpr) -> Self {
        Self { ty }
    }

    pub fn is_variadic(&self) -> bool {
        self.ty.is_variadic()
    }
}

impl From<TypeExpr> for Param {
    fn from(ty: TypeExpr) -> Self {
        Param::new(ty)
    }
}

/// One line of a struct body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    /// Declared names; empty for an embedded field.
    pub names: Vec<String>,
    pub ty: TypeExpr,
}

impl StructField {
    /// A field line declaring one or more names of the same type.
    pub fn named<I, S>(names: I, ty: TypeExpr) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ty,
        }
    }

    /// An embedded (anonymous) field.
    pub fn embedded(ty: TypeExpr) -> Self {
        Self {
            names: Vec::new(),
            ty,
        }
    }

    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }

    /// Names this field line introduces, with embedded fields contributing
    /// their implicit name.
    pub fn effective_names(&self) -> Vec<&str> {
        if self.is_embedded() {
            self.ty.implicit_field_name().into_iter().collect()
        } else {
            self.names.iter().map(String::as_str).collect()
        }
    }
}

/// One element of an interface body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceElem {
    Method { name: String, sig: FuncType },
    /// An embedded interface or a type-set line such as `~int | ~string`.
    Embed(Vec<ConstraintTerm>),
}

/// One term of an embedded interface element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintTerm {
    /// `~T` rather than `T`.
    pub tilde: bool,
    pub ty: TypeExpr,
}

impl ConstraintTerm {
    pub fn exact(ty: TypeExpr) -> Self {
        Self { tilde: false, ty }
    }

    pub fn approx(ty: TypeExpr) -> Self {
        Self { tilde: true, ty }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implicit_field_name_strips_pointer_and_package() {
        let ty = TypeExpr::pointer(TypeExpr::qualified("io", "Reader"));
        assert_eq!(ty.implicit_field_name(), Some("Reader"));

        let generic = TypeExpr::Generic {
            base: Box::new(TypeExpr::ident("List")),
            args: vec![TypeExpr::ident("int")],
        };
        assert_eq!(generic.implicit_field_name(), Some("List"));

        assert_eq!(TypeExpr::slice(TypeExpr::ident("int")).implicit_field_name(), None);
    }

    #[test]
    fn test_visible_results_hides_empty_list() {
        let none = FuncType::new(vec![], None);
        let empty = FuncType::new(vec![], Some(vec![]));
        let one = FuncType::new(vec![], Some(vec![TypeExpr::ident("error").into()]));

        assert!(none.visible_results().is_none());
        assert!(empty.visible_results().is_none());
        assert_eq!(one.visible_results().map(<[Param]>::len), Some(1));
    }

    #[test]
    fn test_effective_names() {
        let named = StructField::named(["A", "b"], TypeExpr::ident("int"));
        assert_eq!(named.effective_names(), vec!["A", "b"]);

        let embedded = StructField::embedded(TypeExpr::pointer(TypeExpr::ident("Base")));
        assert!(embedded.is_embedded());
        assert_eq!(embedded.effective_names(), vec!["Base"]);
    }
}
