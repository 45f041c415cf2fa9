//! Output context model consumed by the external renderer.
//!
//! Where possible the logic lives in the transformers that produce this
//! data instead of in the templates, so the fields here are mostly final
//! strings and flags. Contexts are built once per declaration and never
//! mutated afterwards.

use indexmap::IndexMap;

/// Formatted documentation: one quoted string literal per line, or absent
/// when there is no text at all (so renderers can omit doc attachments
/// entirely).
pub type Documentation = Option<Vec<String>>;

/// One enum value.
#[derive(Debug, Clone)]
pub struct EnumeratorContext {
    /// Scope-qualified name in C++
    pub cpp_name: String,
    /// Name in Python
    pub py_name: String,
    pub doc: Documentation,
}

/// One wrapped enum.
#[derive(Debug, Clone)]
pub struct EnumContext {
    /// Name of the enclosing scope's variable in the initializer
    pub scope_var: String,
    /// Name of this enum's variable in the initializer
    pub var_name: String,
    /// C++ name including namespace/classname; empty for anonymous enums
    pub full_cpp_name: String,
    /// Python name; empty for anonymous enums
    pub py_name: String,
    pub values: Vec<EnumeratorContext>,
    pub doc: Documentation,
}

/// One classified function parameter.
#[derive(Debug, Clone)]
pub struct ParamContext {
    /// Exposed type with const and reference/pointer markers
    pub full_cpp_type: String,
    /// Exposed type (const included, declarators excluded)
    pub cpp_type: String,
    /// Original type without const, used in signature computation
    pub cpp_type_no_const: String,
    /// Resolved default expression, if any
    pub default: Option<String>,
    /// Type + name declaration string
    pub decl: String,
    /// Parameter name in C++ (used for temporaries and return slots)
    pub cpp_name: String,
    /// Parameter name in Python
    pub py_name: String,
    /// `py::arg(...)` expression, default included
    pub py_arg: String,
    /// Expression passed to the wrapped function
    pub call_name: String,
    pub is_const: bool,
    pub is_volatile: bool,
    pub array: bool,
    pub array_size: Option<usize>,
    /// Number of `&`
    pub references: u32,
    /// Number of `*`
    pub pointers: u32,
}

/// One slot of the aggregated return value.
#[derive(Debug, Clone)]
pub struct ReturnSlot {
    /// Local variable returned through this slot
    pub name: String,
    pub cpp_type: String,
}

/// One wrapped function or method.
#[derive(Debug, Clone)]
pub struct FunctionContext {
    /// C++ name of the function
    pub cpp_name: String,
    /// Name in Python
    pub py_name: String,
    pub doc: Documentation,
    /// Every parameter
    pub all_params: Vec<ParamContext>,
    /// Every parameter except ignored ones
    pub filtered_params: Vec<ParamContext>,
    /// Input parameters (buffers included)
    pub in_params: Vec<ParamContext>,
    /// Output parameters
    pub out_params: Vec<ParamContext>,
    /// Aggregated return: primary value first, then out parameters in
    /// declaration order
    pub rets: Vec<ReturnSlot>,
    /// `(nurse, patient)` keep-alive argument indices
    pub keepalives: Vec<(u32, u32)>,
    /// pybind11 return-value-policy suffix, or empty for automatic
    pub return_value_policy: String,
    /// The call must be wrapped in a lambda adapter
    pub genlambda: bool,
    /// Statement prefix capturing the call result, or empty
    pub call_start: String,
    /// Statements before the call: temporaries, then buffer handling
    pub lambda_pre: Vec<String>,
    /// Statements after the call
    pub lambda_post: Vec<String>,
    /// Statement suffix after the call, or empty
    pub call_end: String,
    /// Final return statement, or empty for void
    pub wrap_return: String,
    /// Marked const
    pub is_const: bool,
    /// Has vararg parameters
    pub is_vararg: bool,
    pub has_buffers: bool,
    /// Overload-disambiguation signature
    pub signature: String,
    /// If true, don't wrap, but provide a pure virtual implementation
    pub ignore_pure: bool,
    /// Use this code instead of the generated code
    pub cpp_code: Option<String>,
    /// Generate this in an `#ifdef`
    pub ifdef: Option<String>,
    /// Generate this in an `#ifndef`
    pub ifndef: Option<String>,
    /// Release the GIL while calling
    pub release_gil: bool,
    /// Template instantiation argument lists
    pub template_impls: Option<Vec<Vec<String>>>,
    /// Replacement expression for virtual dispatch
    pub virtual_xform: Option<String>,
}

/// One exposed data member.
#[derive(Debug, Clone)]
pub struct PropContext {
    pub py_name: String,
    pub cpp_name: String,
    /// Declared type string; used for array binding
    pub cpp_type: String,
    pub readonly: bool,
    pub doc: Documentation,
    pub array_size: Option<usize>,
    /// An array of incomplete size cannot be sensibly wrapped
    pub array: bool,
    pub reference: bool,
    pub is_static: bool,
}

/// One resolved base-class entry.
#[derive(Debug, Clone)]
pub struct BaseClassContext {
    /// C++ name, including namespace/classname
    pub full_cpp_name: String,
    /// Translated C++ name suitable for use as an identifier; `:<>=` are
    /// turned into underscores
    pub full_cpp_name_identifier: String,
    /// Comma-separated template parameters for this base, or empty
    pub template_params: String,
}

/// Virtual-dispatch shim descriptor.
#[derive(Debug, Clone)]
pub struct TrampolineContext {
    /// Fully parameterized shim type
    pub name: String,
    /// Shim variable name
    pub var: String,
    /// User code inserted into the shim definition
    pub inline_code: Option<String>,
}

/// One wrapped class.
#[derive(Debug, Clone)]
pub struct ClassContext {
    /// Index of the enclosing class's context in
    /// [`HeaderContext::classes`], for nested classes
    pub parent: Option<usize>,
    /// C++ name, including namespace/classname and template arguments
    pub full_cpp_name: String,
    /// Translated C++ name suitable for use as an identifier; `:<>=` are
    /// turned into underscores
    pub full_cpp_name_identifier: String,
    pub py_name: String,
    /// Name of the enclosing scope's variable in the initializer
    pub scope_var: String,
    /// Name of this class's variable in the initializer
    pub var_name: String,
    /// False signals the renderer to synthesize a default constructor
    pub has_constructor: bool,
    /// If the object shouldn't be deleted by Python; disables implicit
    /// constructors
    pub nodelete: bool,
    /// Suppress the synthesized default constructor
    pub force_no_default_constructor: bool,
    pub is_final: bool,
    pub doc: Documentation,
    pub bases: Vec<BaseClassContext>,
    /// Present iff the class requires a virtual-dispatch shim
    pub trampoline: Option<TrampolineContext>,
    pub public_methods: Vec<FunctionContext>,
    /// Only reachable through the shim; empty without one
    pub protected_methods: Vec<FunctionContext>,
    pub public_properties: Vec<PropContext>,
    /// Only reachable through the shim; empty without one
    pub protected_properties: Vec<PropContext>,
    pub enums: Vec<EnumContext>,
    /// `N, ..`: template arguments shared with base classes
    pub pybase_args: String,
    /// `typename N, ..`: template parameters shared with base classes
    pub pybase_params: String,
    /// `typename N, ..`, or empty for non-template classes
    pub template_parameter_list: String,
    /// C++ code inserted into the template binding definition
    pub template_inline_code: String,
    /// Extra `using` directives for the shim and wrapping scope
    pub typealias: Vec<String>,
    /// Extra `constexpr` definitions for the shim and wrapping scope
    pub constants: Vec<String>,
}

/// One bound template instantiation.
#[derive(Debug, Clone)]
pub struct TemplateInstanceContext {
    pub scope_var: String,
    pub var_name: String,
    pub py_name: String,
    /// Generated binding function object
    pub binding_object: String,
    /// Generated per-template header name
    pub header_name: String,
    /// Template arguments for this instance
    pub params: Vec<String>,
    /// Replacement documentation
    pub doc_set: Documentation,
    /// Appended documentation
    pub doc_add: Documentation,
}

/// Everything produced from one header, consumed read-only by the
/// renderer.
#[derive(Debug, Clone, Default)]
pub struct HeaderContext {
    /// Header path relative to the project root
    pub rel_fname: String,
    /// Includes emitted before the wrapped header
    pub extra_includes_first: Vec<String>,
    /// Includes emitted after the wrapped header
    pub extra_includes: Vec<String>,
    /// C++ code inserted at module scope
    pub inline_code: Option<String>,
    /// True if `<pybind11/operators.h>` is needed
    pub need_operators_h: bool,
    pub enums: Vec<EnumContext>,
    pub classes: Vec<ClassContext>,
    pub functions: Vec<FunctionContext>,
    pub template_instances: Vec<TemplateInstanceContext>,
    /// Deduplicated caster includes, resolved once after all declarations
    /// are visited
    pub type_caster_includes: Vec<String>,
    /// Subpackage name → module variable, in first-use order
    pub subpackages: IndexMap<String, String>,
    /// Class qualname → qualnames it depends on, in declaration order
    pub class_hierarchy: IndexMap<String, Vec<String>>,
}
