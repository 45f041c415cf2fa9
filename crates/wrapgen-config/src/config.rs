//! Override record types.
//!
//! One record per declaration key; a missing record means "wrap with
//! defaults". Field names match what configuration authors write, so every
//! struct is deserialized with `#[serde(default)]` and absent fields fall
//! back to `Default`.

use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;

/// pybind11 return-value policy selection for a wrapped function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnValuePolicy {
    TakeOwnership,
    Copy,
    Move,
    Reference,
    ReferenceInternal,
    #[default]
    Automatic,
    AutomaticReference,
}

/// Direction of a buffer parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferMode {
    /// Read-only buffer view is requested
    In,
    /// Writable buffer view is requested
    Out,
    /// Writable buffer view, data is read and written
    InOut,
}

/// Maps a pointer+length parameter pair onto the Python buffer protocol.
#[derive(Debug, Clone, Deserialize)]
pub struct BufferSpec {
    pub mode: BufferMode,
    /// Name of the data-pointer parameter
    pub src: String,
    /// Name of the length parameter
    pub len: String,
    /// Minimum buffer size to accept, validated before the call
    #[serde(default)]
    pub min_size: Option<usize>,
}

/// Per-parameter override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParamOverride {
    /// Suppress the parameter from the exposed signature
    pub ignore: bool,
    /// Exposed (Python) name for the parameter
    pub name: Option<String>,
    /// Replace the exposed type
    pub force_type: Option<String>,
    /// Replace the default-argument expression
    pub default: Option<String>,
    /// Always treat the parameter as an output
    pub force_out: bool,
    /// Skip the type-caster cast on the default argument, even when a
    /// caster claims the type
    pub disable_default_cast: bool,
}

/// Per-function (or per-method) override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FunctionConfig {
    /// Don't wrap this function at all
    pub ignore: bool,
    /// Exposed name, used verbatim
    pub rename: Option<String>,
    /// Expose with a leading underscore
    pub internal: bool,
    /// Replacement documentation text
    pub doc: Option<String>,
    /// Text appended after the primary documentation
    pub doc_append: Option<String>,
    /// Use this C++ code instead of the generated call
    pub cpp_code: Option<String>,
    /// Generate inside `#ifdef`
    pub ifdef: Option<String>,
    /// Generate inside `#ifndef`
    pub ifndef: Option<String>,
    /// Hold the GIL during the call. Unset means "decide automatically":
    /// released, unless replacement code or an operator makes that unsafe
    pub no_release_gil: Option<bool>,
    /// Keep-alive relationships, replacing any inferred ones
    pub keepalive: Option<Vec<(u32, u32)>>,
    pub return_value_policy: ReturnValuePolicy,
    /// Buffer-protocol parameter specs
    pub buffers: Vec<BufferSpec>,
    /// Per-parameter overrides, keyed by declared parameter name
    pub params: HashMap<String, ParamOverride>,
    /// Don't wrap, but still emit a pure-virtual implementation hook
    pub ignore_pure: bool,
    /// Template instantiations, one argument list per instance
    pub template_impls: Option<Vec<Vec<String>>>,
    /// Replacement expression for virtual dispatch
    pub virtual_xform: Option<String>,
    /// Route the binding into a submodule
    pub subpackage: Option<String>,
    /// Per-overload overrides, keyed by the computed overload signature
    pub overloads: HashMap<String, FunctionConfig>,
}

/// Per-enum-value override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnumValueConfig {
    pub rename: Option<String>,
    pub doc: Option<String>,
    pub doc_append: Option<String>,
}

/// Per-enum override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnumConfig {
    pub ignore: bool,
    pub rename: Option<String>,
    /// Prefix to strip from enumerator names; defaults to the enum's own
    /// name
    pub value_prefix: Option<String>,
    pub doc: Option<String>,
    pub doc_append: Option<String>,
    pub subpackage: Option<String>,
    /// Per-value overrides, keyed by enumerator name
    pub values: HashMap<String, EnumValueConfig>,
}

/// Exposure policy for a data member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropAccess {
    /// Derive from constness, declaration kind, and type
    #[default]
    Automatic,
    ReadOnly,
    ReadWrite,
}

/// Per-property (data member) override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PropConfig {
    pub rename: Option<String>,
    pub doc: Option<String>,
    pub doc_append: Option<String>,
    pub access: PropAccess,
}

/// One template instantiation to bind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TemplateInstanceConfig {
    /// Qualified name of the class template
    pub qualname: String,
    /// Template arguments for this instance
    pub params: Vec<String>,
    pub doc: Option<String>,
    pub doc_append: Option<String>,
    pub subpackage: Option<String>,
}

/// Per-class override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassConfig {
    /// Don't wrap this class at all
    pub ignore: bool,
    pub rename: Option<String>,
    pub doc: Option<String>,
    pub doc_append: Option<String>,
    /// Force polymorphic treatment even without detected virtual methods
    pub is_polymorphic: bool,
    /// Never generate a virtual-dispatch shim for this class
    pub force_no_trampoline: bool,
    /// C++ code inserted into the generated shim
    pub trampoline_inline_code: Option<String>,
    /// Bases to pretend don't exist
    pub ignored_bases: Vec<String>,
    /// Replacement qualified names for bases, keyed by bare base name
    pub base_qualnames: HashMap<String, String>,
    /// Template parameters (`"name"` or `"kind name"`); required for class
    /// templates, forbidden otherwise
    pub template_params: Option<Vec<String>>,
    /// C++ code inserted into the template binding definition
    pub template_inline_code: Option<String>,
    pub subpackage: Option<String>,
    /// Never let Python delete instances; disables implicit constructors
    pub nodelete: bool,
    /// Suppress the synthesized default constructor
    pub force_no_default_constructor: bool,
    /// Extra types to register with the caster registry
    pub force_type_casters: Vec<String>,
    /// Extra entries for the class-hierarchy map
    pub force_depends: Vec<String>,
    /// Extra `using` directives for the shim and wrapping scope
    pub typealias: Vec<String>,
    /// Extra `constexpr` definitions for the shim and wrapping scope
    pub constants: Vec<String>,
    /// Data-member overrides, keyed by member name
    pub attributes: HashMap<String, PropConfig>,
    /// Nested-enum overrides, keyed by enum name
    pub enums: HashMap<String, EnumConfig>,
    /// Method overrides, keyed by method name
    pub methods: HashMap<String, FunctionConfig>,
}

/// Per-header configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WrapConfig {
    /// Prefixes stripped when deriving exposed names
    pub strip_prefixes: Vec<String>,
    /// Includes emitted after the wrapped header
    pub extra_includes: Vec<String>,
    /// Includes emitted before the wrapped header
    pub extra_includes_first: Vec<String>,
    /// C++ code inserted at module scope
    pub inline_code: Option<String>,
    /// Free-function overrides, keyed by function name
    pub functions: HashMap<String, FunctionConfig>,
    /// Class overrides, keyed by `::`-joined class name chain
    pub classes: HashMap<String, ClassConfig>,
    /// Header-scope enum overrides, keyed by enum name
    pub enums: HashMap<String, EnumConfig>,
    /// Global-variable overrides, keyed by variable name
    pub attributes: HashMap<String, PropConfig>,
    /// Template instantiations to bind, keyed by exposed name. Order is
    /// preserved; it determines binding order
    pub templates: IndexMap<String, TemplateInstanceConfig>,
}

/// A registered type converter.
#[derive(Debug, Clone, Deserialize)]
pub struct CasterEntry {
    /// Include path providing the caster
    pub header: String,
    /// Type name used when casting default arguments
    #[serde(default)]
    pub typename: Option<String>,
    /// Whether default arguments of this type need an explicit cast
    #[serde(default)]
    pub default_arg_cast: bool,
}

/// Caster table, keyed by native type name.
pub type CasterTable = HashMap<String, CasterEntry>;
