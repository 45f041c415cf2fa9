//! Individual declaration records.

/// Access level of a class member, or of a nested class in its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
}

/// How a record type was declared.
///
/// Drives the default property-access policy: plain `struct` declarations
/// default to read-write data members, `class` declarations to read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassKind {
    #[default]
    Class,
    Struct,
}

/// A function or constructor parameter.
#[derive(Debug, Clone, Default)]
pub struct ParamDecl {
    /// Declared name; may be empty for unnamed parameters
    pub name: String,
    /// Base type without qualifiers (e.g. `int`, `frc::Pose2d`)
    pub raw_type: String,
    /// Resolved enum name if the parameter type is an enum
    pub enum_type: Option<String>,
    /// Resolved class qualname if the parameter type is a class
    pub class_type: Option<String>,
    /// Whether the front end considers the base type fundamental
    pub fundamental: bool,
    /// `const` qualified
    pub is_const: bool,
    /// `volatile` qualified
    pub is_volatile: bool,
    /// Number of `&` in the declarator
    pub references: u32,
    /// Number of `*` in the declarator
    pub pointers: u32,
    /// Declared with array syntax
    pub array: bool,
    /// Array extent, if the array has a fixed size
    pub array_size: Option<usize>,
    /// Default-argument expression, verbatim from the header
    pub default: Option<String>,
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            ..Default::default()
        }
    }
}

/// A free function, method, or constructor.
#[derive(Debug, Clone, Default)]
pub struct FunctionDecl {
    pub name: String,
    /// Enclosing namespace (`""` for the global namespace)
    pub namespace: String,
    /// Return type string; `"void"` when the function returns nothing
    pub return_type: String,
    pub params: Vec<ParamDecl>,
    /// Member access; `Public` for free functions
    pub access: Access,
    /// `const` member function
    pub is_const: bool,
    pub is_vararg: bool,
    pub is_constructor: bool,
    pub is_destructor: bool,
    /// `= delete`
    pub is_deleted: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub is_final: bool,
    pub is_pure_virtual: bool,
    /// Operator token (e.g. `==`) if this declares an operator overload
    pub operator: Option<String>,
    /// Function template
    pub is_template: bool,
    /// Raw structured comment attached to the declaration
    pub doc: Option<String>,
}

impl FunctionDecl {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            ..Default::default()
        }
    }
}

/// A class data member, or a global variable at header scope.
#[derive(Debug, Clone, Default)]
pub struct PropertyDecl {
    pub name: String,
    /// Base type without qualifiers
    pub raw_type: String,
    /// Type string as declared (qualifiers included)
    pub full_type: String,
    pub access: Access,
    pub fundamental: bool,
    pub is_const: bool,
    pub is_constexpr: bool,
    pub is_static: bool,
    pub is_reference: bool,
    pub array: bool,
    pub array_size: Option<usize>,
    pub doc: Option<String>,
}

impl PropertyDecl {
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        let raw_type = raw_type.into();
        Self {
            name: name.into(),
            full_type: raw_type.clone(),
            raw_type,
            ..Default::default()
        }
    }
}

/// A single enum value.
#[derive(Debug, Clone, Default)]
pub struct EnumeratorDecl {
    pub name: String,
    pub doc: Option<String>,
}

impl EnumeratorDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
        }
    }
}

/// An enum declaration; `name` is `None` for anonymous enums.
#[derive(Debug, Clone, Default)]
pub struct EnumDecl {
    pub name: Option<String>,
    /// Enclosing namespace (`""` for the global namespace)
    pub namespace: String,
    pub access: Access,
    pub values: Vec<EnumeratorDecl>,
    pub doc: Option<String>,
}

/// A base-class entry in a class's inheritance list.
#[derive(Debug, Clone, Default)]
pub struct BaseDecl {
    /// Bare class name as written (lookup key for overrides)
    pub name: String,
    /// Name as declared, possibly namespace-qualified
    pub decl_name: String,
    pub access: Access,
    pub is_virtual: bool,
    /// Template arguments this base takes from the derived class's own
    /// template parameter list
    pub decl_params: Vec<String>,
}

/// A class or struct declaration.
#[derive(Debug, Clone, Default)]
pub struct ClassDecl {
    pub name: String,
    /// Enclosing namespace (`""` for the global namespace)
    pub namespace: String,
    pub kind: ClassKind,
    pub is_final: bool,
    /// Class template (template parameter substitution is configured via
    /// overrides, not carried in the IR)
    pub is_template: bool,
    /// Access of this class within its enclosing class; `Public` for
    /// top-level classes
    pub access_in_parent: Access,
    pub bases: Vec<BaseDecl>,
    pub methods: Vec<FunctionDecl>,
    pub properties: Vec<PropertyDecl>,
    pub enums: Vec<EnumDecl>,
    /// Nested class declarations, in source order
    pub nested: Vec<ClassDecl>,
    /// Raw types named by `using` declarations inside the class
    pub using_types: Vec<String>,
    pub doc: Option<String>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Default::default()
        }
    }
}
