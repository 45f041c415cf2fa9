//! Parameter classification.
//!
//! Every parameter lands in exactly one class (buffer, out, ignored, or
//! in), decided in that precedence order. The decision drives call
//! assembly, temporary declarations, and return aggregation downstream.

use rustc_hash::FxHashMap;
use std::collections::HashMap;

use crate::casters::TypeCasterRegistry;
use crate::context::ParamContext;
use crate::defaults::{apply_default_cast, resolve_default};
use crate::error::{Result, WrapError};
use wrapgen_config::{BufferMode, BufferSpec, CasterTable, FunctionConfig, ParamOverride};
use wrapgen_ir::{ClassDecl, ParamDecl};

/// Fixed-width integer aliases treated as fundamental even when the front
/// end doesn't flag them.
const FIXED_WIDTH_INTS: &[&str] = &[
    "int8_t",
    "int16_t",
    "int32_t",
    "int64_t",
    "uint8_t",
    "uint16_t",
    "uint32_t",
    "uint64_t",
    "int_fast8_t",
    "int_fast16_t",
    "int_fast32_t",
    "int_fast64_t",
    "uint_fast8_t",
    "uint_fast16_t",
    "uint_fast32_t",
    "uint_fast64_t",
    "int_least8_t",
    "int_least16_t",
    "int_least32_t",
    "int_least64_t",
    "uint_least8_t",
    "uint_least16_t",
    "uint_least32_t",
    "uint_least64_t",
    "intmax_t",
    "uintmax_t",
];

/// Passing class of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParamCategory {
    /// Plain input
    In,
    /// Folded into the aggregated return value
    Out,
    /// Dropped from the exposed signature and the return value
    Ignored,
    /// Exposed through the buffer protocol
    Buffer,
}

/// A local variable declared before the wrapped call.
#[derive(Debug, Clone)]
struct TempDecl {
    cpp_type: String,
    name: String,
    default: Option<String>,
}

/// One classified parameter.
#[derive(Debug)]
pub(crate) struct ClassifiedParam {
    pub ctx: ParamContext,
    pub category: ParamCategory,
    /// Suppressed from the exposed signature via override
    pub ignored: bool,
}

/// Per-function classification state.
pub(crate) struct ParamClassifier<'c> {
    /// Pending buffer specs, keyed by source parameter name
    buffers: FxHashMap<String, &'c BufferSpec>,
    /// Pending buffer specs, keyed by length parameter name
    buffer_lens: FxHashMap<String, &'c BufferSpec>,
    lambda_pre: Vec<String>,
    temps: Vec<TempDecl>,
    pub keepalives: Vec<(u32, u32)>,
    pub genlambda: bool,
    pub has_buffers: bool,
}

impl<'c> ParamClassifier<'c> {
    pub fn new(cfg: &'c FunctionConfig) -> Result<Self> {
        let mut buffers = FxHashMap::default();
        let mut buffer_lens = FxHashMap::default();
        for spec in &cfg.buffers {
            if spec.src == spec.len {
                return Err(WrapError::config(format!(
                    "buffer src ({}) and len ({}) cannot be the same",
                    spec.src, spec.len
                )));
            }
            buffers.insert(spec.src.clone(), spec);
            buffer_lens.insert(spec.len.clone(), spec);
        }
        Ok(Self {
            buffers,
            buffer_lens,
            lambda_pre: Vec::new(),
            temps: Vec::new(),
            keepalives: Vec::new(),
            genlambda: false,
            has_buffers: false,
        })
    }

    /// Classify one parameter, in declaration order.
    #[allow(clippy::too_many_arguments)]
    pub fn classify(
        &mut self,
        index: usize,
        param: &ParamDecl,
        is_constructor: bool,
        parent: Option<&ClassDecl>,
        overrides: &HashMap<String, ParamOverride>,
        casters: &CasterTable,
        registry: &mut TypeCasterRegistry,
    ) -> Result<ClassifiedParam> {
        // Constructor arguments taken by reference must outlive the
        // instance
        if is_constructor && param.references == 1 {
            self.keepalives.push((1, index as u32 + 2));
        }

        let fundamental =
            param.fundamental || FIXED_WIDTH_INTS.contains(&param.raw_type.as_str());

        let cpp_type_no_const = param
            .enum_type
            .clone()
            .unwrap_or_else(|| param.raw_type.clone());
        let mut cpp_type = cpp_type_no_const.clone();

        let cpp_name = if param.name.is_empty() {
            format!("param{index}")
        } else {
            param.name.clone()
        };
        let mut py_name = cpp_name.clone();
        let mut call_name = cpp_name.clone();

        let default_po = ParamOverride::default();
        let po = overrides.get(&cpp_name).unwrap_or(&default_po);

        // Buffer classification is strictly higher precedence; a
        // conflicting force_out is an authoring bug
        if po.force_out && self.buffers.contains_key(&cpp_name) {
            return Err(WrapError::config(format!(
                "{cpp_name}: cannot combine force_out with a buffer source"
            )));
        }

        if let Some(name) = &po.name {
            py_name = name.clone();
        }
        if let Some(ty) = &po.force_type {
            cpp_type = ty.clone();
        }

        let mut default = po.default.clone().or_else(|| param.default.clone());
        if let Some(expr) = default.take() {
            let resolved = resolve_default(parent, param, &expr, &cpp_type);
            let resolved = apply_default_cast(
                casters,
                &cpp_name,
                po.disable_default_cast,
                resolved,
                &cpp_type,
            )?;
            default = Some(resolved);
        }

        let mut py_arg = format!("py::arg(\"{py_name}\")");
        if let Some(d) = &default {
            py_arg = format!("{py_arg} = {d}");
        }

        let mut is_const = param.is_const;
        let mut references = param.references;
        let mut pointers = param.pointers;

        let buflen = self.buffer_lens.remove(&cpp_name);

        let category = if let Some(buf) = self.buffers.remove(&cpp_name) {
            self.genlambda = true;
            self.has_buffers = true;
            let bname = format!("__{}", buf.src);
            call_name = format!("({cpp_type}*){bname}.ptr");
            cpp_type = "py::buffer".to_string();
            is_const = true;
            references = 1;
            pointers = 0;

            let writable = !matches!(buf.mode, BufferMode::In);
            self.lambda_pre
                .push(format!("auto {bname} = {cpp_name}.request({writable})"));
            self.lambda_pre
                .push(format!("{} = {bname}.size * {bname}.itemsize", buf.len));
            if let Some(min_size) = buf.min_size {
                self.lambda_pre.push(format!(
                    "if ({} < {min_size}) throw py::value_error(\"{py_name}: minimum buffer size is {min_size}\")",
                    buf.len
                ));
            }
            ParamCategory::Buffer
        } else if let Some(buf) = buflen {
            if param.pointers > 0 {
                // The call can report the length written back through it
                call_name = format!("&{}", buf.len);
                ParamCategory::Out
            } else {
                // Passed by value: the call can't communicate through it,
                // so drop it into a temporary
                call_name = buf.len.clone();
                self.temps.push(TempDecl {
                    cpp_type: cpp_type.clone(),
                    name: cpp_name.clone(),
                    default: default.clone(),
                });
                ParamCategory::Ignored
            }
        } else if po.force_out
            || ((param.pointers > 0 || param.references == 1) && !param.is_const && fundamental)
        {
            if param.pointers > 0 {
                call_name = format!("&{call_name}");
            }
            ParamCategory::Out
        } else if param.array {
            if let Some(size) = param.array_size {
                cpp_type = format!("std::array<{cpp_type}, {size}>");
                call_name = format!("{call_name}.data()");
                if default.is_none() {
                    default = Some("{}".to_string());
                }
            }
            ParamCategory::Out
        } else {
            ParamCategory::In
        };

        registry.register(&cpp_type);

        if is_const {
            cpp_type = format!("const {cpp_type}");
        }

        let mut full_cpp_type = cpp_type.clone();
        full_cpp_type.push_str(&"&".repeat(references as usize));
        full_cpp_type.push_str(&"*".repeat(pointers as usize));
        let decl = format!("{full_cpp_type} {cpp_name}");

        let ctx = ParamContext {
            full_cpp_type,
            cpp_type,
            cpp_type_no_const,
            default,
            decl,
            cpp_name,
            py_name,
            py_arg,
            call_name,
            is_const,
            is_volatile: param.is_volatile,
            array: param.array,
            array_size: param.array_size,
            references,
            pointers,
        };

        if category == ParamCategory::Out {
            self.temps.push(TempDecl {
                cpp_type: ctx.cpp_type.clone(),
                name: ctx.cpp_name.clone(),
                default: ctx.default.clone(),
            });
        }

        Ok(ClassifiedParam {
            ctx,
            category,
            ignored: po.ignore,
        })
    }

    /// Validate leftovers and assemble the pre-call statements:
    /// temporaries in reverse classification order, then buffer handling.
    pub fn finish(mut self) -> Result<(Vec<String>, Vec<(u32, u32)>, bool, bool)> {
        if !self.buffers.is_empty() {
            let mut names: Vec<&str> = self.buffers.keys().map(String::as_str).collect();
            names.sort_unstable();
            return Err(WrapError::config(format!(
                "incorrect buffer param names '{}'",
                names.join("', '")
            )));
        }

        let mut pre: Vec<String> = self.temps.iter().rev().map(render_temp).collect();
        pre.append(&mut self.lambda_pre);
        Ok((pre, self.keepalives, self.genlambda, self.has_buffers))
    }
}

fn render_temp(t: &TempDecl) -> String {
    match &t.default {
        None => format!("{} {}", t.cpp_type, t.name),
        Some(d) if d.starts_with('{') => format!("{} {}{}", t.cpp_type, t.name, d),
        Some(d) => format!("{} {} = {}", t.cpp_type, t.name, d),
    }
}
