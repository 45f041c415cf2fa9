//! Function and method transformation.

use crate::context::{FunctionContext, ParamContext, ReturnSlot};
use crate::error::{Result, WrapError};
use crate::naming;
use crate::params::{ParamCategory, ParamClassifier};
use crate::processor::Processor;
use crate::signature::overload_signature;
use crate::doc;
use wrapgen_config::{FunctionConfig, ReturnValuePolicy};
use wrapgen_ir::{ClassDecl, FunctionDecl};

/// Python's `str[:2].isupper()`: the first two characters contain an
/// uppercase letter and no lowercase letter. Names passing this are kept
/// verbatim as acronyms.
fn leading_acronym(name: &str) -> bool {
    let prefix: Vec<char> = name.chars().take(2).collect();
    let has_upper = prefix.iter().any(|c| c.is_uppercase());
    let has_lower = prefix.iter().any(|c| c.is_lowercase());
    has_upper && !has_lower
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn policy_suffix(policy: ReturnValuePolicy) -> &'static str {
    match policy {
        ReturnValuePolicy::TakeOwnership => ", py::return_value_policy::take_ownership",
        ReturnValuePolicy::Copy => ", py::return_value_policy::copy",
        ReturnValuePolicy::Move => ", py::return_value_policy::move",
        ReturnValuePolicy::Reference => ", py::return_value_policy::reference",
        ReturnValuePolicy::ReferenceInternal => ", py::return_value_policy::reference_internal",
        ReturnValuePolicy::Automatic => "",
        ReturnValuePolicy::AutomaticReference => ", py::return_value_policy::automatic_reference",
    }
}

impl<'a> Processor<'a> {
    /// Transform one function or method into its binding context.
    ///
    /// `internal` marks names exposed at non-public access; they receive a
    /// leading underscore.
    pub(crate) fn transform_function(
        &mut self,
        decl: &FunctionDecl,
        cfg: FunctionConfig,
        parent: Option<&ClassDecl>,
        internal: bool,
    ) -> Result<FunctionContext> {
        if !self.report_only {
            if decl.is_template {
                if cfg.template_impls.is_none() && cfg.cpp_code.is_none() {
                    return Err(WrapError::config(format!(
                        "function template {} must specify template_impls or cpp_code",
                        decl.name
                    )));
                }
            } else if cfg.template_impls.is_some() {
                return Err(WrapError::config(format!(
                    "{} is not a function template, cannot specify template_impls",
                    decl.name
                )));
            }
            if cfg.ignore_pure && !decl.is_pure_virtual {
                return Err(WrapError::config(format!(
                    "{} is not pure virtual, cannot specify ignore_pure",
                    decl.name
                )));
            }
        }

        self.registry.register(&decl.return_type);

        let mut classifier = ParamClassifier::new(&cfg)?;
        let mut all_params: Vec<ParamContext> = Vec::new();
        let mut filtered_params = Vec::new();
        let mut in_params = Vec::new();
        let mut out_params = Vec::new();

        for (i, param) in decl.params.iter().enumerate() {
            let classified = classifier.classify(
                i,
                param,
                decl.is_constructor,
                parent,
                &cfg.params,
                self.casters,
                &mut self.registry,
            )?;
            if !classified.ignored {
                filtered_params.push(classified.ctx.clone());
                match classified.category {
                    ParamCategory::In | ParamCategory::Buffer => {
                        in_params.push(classified.ctx.clone())
                    }
                    ParamCategory::Out => out_params.push(classified.ctx.clone()),
                    ParamCategory::Ignored => {}
                }
            } else if classified.category == ParamCategory::Out {
                // Still aggregated into the return value, just not
                // accepted from the caller
                out_params.push(classified.ctx.clone());
            }
            all_params.push(classified.ctx);
        }

        let (lambda_pre, inferred_keepalives, buffers_genlambda, has_buffers) =
            classifier.finish()?;
        let genlambda = buffers_genlambda || !out_params.is_empty();

        let mut rets: Vec<ReturnSlot> = out_params
            .iter()
            .map(|p| ReturnSlot {
                name: p.cpp_name.clone(),
                cpp_type: p.cpp_type.clone(),
            })
            .collect();
        let mut call_start = String::new();
        if decl.return_type != "void" && !decl.is_constructor {
            call_start = "auto __ret =".to_string();
            rets.insert(
                0,
                ReturnSlot {
                    name: "__ret".to_string(),
                    cpp_type: decl.return_type.clone(),
                },
            );
        }

        let wrap_return = match rets.len() {
            0 => String::new(),
            1 => format!("return {};", rets[0].name),
            _ => {
                let names: Vec<&str> = rets.iter().map(|r| r.name.as_str()).collect();
                format!("return std::make_tuple({});", names.join(", "))
            }
        };

        let py_name = if let Some(rename) = &cfg.rename {
            rename.clone()
        } else if decl.is_constructor {
            "__init__".to_string()
        } else {
            let mut name = naming::resolve_name(
                &decl.name,
                None,
                &self.gendata.config().strip_prefixes,
                decl.operator.is_some(),
                self.report_only,
                &mut self.reporter,
            )?;
            if !leading_acronym(&name) {
                name = lower_first(&name);
            }
            if cfg.internal || internal {
                name = format!("_{name}");
            }
            name
        };

        // Replacement code's thread safety cannot be inferred, so hold the
        // GIL for it unless told otherwise
        let no_release_gil = match cfg.no_release_gil {
            Some(explicit) => explicit,
            None => cfg.cpp_code.is_some(),
        };

        let keepalives = cfg.keepalive.unwrap_or(inferred_keepalives);

        Ok(FunctionContext {
            cpp_name: decl.name.clone(),
            py_name,
            doc: doc::process_doc(
                decl.doc.as_deref(),
                cfg.doc.as_deref(),
                cfg.doc_append.as_deref(),
                "",
            ),
            all_params,
            filtered_params,
            in_params,
            out_params,
            rets,
            keepalives,
            return_value_policy: policy_suffix(cfg.return_value_policy).to_string(),
            genlambda,
            call_start,
            lambda_pre,
            lambda_post: Vec::new(),
            call_end: String::new(),
            wrap_return,
            is_const: decl.is_const,
            is_vararg: decl.is_vararg,
            has_buffers,
            signature: overload_signature(decl),
            ignore_pure: cfg.ignore_pure,
            cpp_code: cfg.cpp_code,
            ifdef: cfg.ifdef,
            ifndef: cfg.ifndef,
            release_gil: !no_release_gil,
            template_impls: cfg.template_impls,
            virtual_xform: cfg.virtual_xform,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrapgen_config::{CasterTable, WrapConfig};
    use wrapgen_ir::ParamDecl;

    fn transform(
        decl: &FunctionDecl,
        cfg: FunctionConfig,
        config: WrapConfig,
    ) -> Result<FunctionContext> {
        let table = CasterTable::default();
        let mut processor = Processor::new(config, &table, false);
        processor.transform_function(decl, cfg, None, false)
    }

    #[test]
    fn test_lower_first_casing() {
        let decl = FunctionDecl::new("GetAngle", "double");
        let fctx = transform(&decl, FunctionConfig::default(), WrapConfig::default()).unwrap();
        assert_eq!(fctx.py_name, "getAngle");
    }

    #[test]
    fn test_acronym_preserved() {
        let decl = FunctionDecl::new("DSGetData", "void");
        let fctx = transform(&decl, FunctionConfig::default(), WrapConfig::default()).unwrap();
        assert_eq!(fctx.py_name, "DSGetData");

        // Two-letter names hit the acronym rule too; pinned on purpose
        let decl = FunctionDecl::new("IO", "void");
        let fctx = transform(&decl, FunctionConfig::default(), WrapConfig::default()).unwrap();
        assert_eq!(fctx.py_name, "IO");

        let decl = FunctionDecl::new("Go", "void");
        let fctx = transform(&decl, FunctionConfig::default(), WrapConfig::default()).unwrap();
        assert_eq!(fctx.py_name, "go");
    }

    #[test]
    fn test_rename_skips_casing() {
        let decl = FunctionDecl::new("GetAngle", "double");
        let cfg = FunctionConfig {
            rename: Some("GetAngleRaw".to_string()),
            ..Default::default()
        };
        let fctx = transform(&decl, cfg, WrapConfig::default()).unwrap();
        assert_eq!(fctx.py_name, "GetAngleRaw");
    }

    #[test]
    fn test_internal_marker() {
        let decl = FunctionDecl::new("Helper", "void");
        let fctx = transform(&decl, FunctionConfig::default(), WrapConfig::default());
        assert_eq!(fctx.unwrap().py_name, "helper");

        let decl = FunctionDecl::new("Helper", "void");
        let cfg = FunctionConfig {
            internal: true,
            ..Default::default()
        };
        let fctx = transform(&decl, cfg, WrapConfig::default()).unwrap();
        assert_eq!(fctx.py_name, "_helper");
    }

    #[test]
    fn test_constructor_name_fixed() {
        let mut decl = FunctionDecl::new("Gyro", "");
        decl.is_constructor = true;
        let fctx = transform(&decl, FunctionConfig::default(), WrapConfig::default()).unwrap();
        assert_eq!(fctx.py_name, "__init__");
        assert!(fctx.rets.is_empty());
        assert_eq!(fctx.call_start, "");
    }

    #[test]
    fn test_void_no_outs_has_no_return() {
        let decl = FunctionDecl::new("Reset", "void");
        let fctx = transform(&decl, FunctionConfig::default(), WrapConfig::default()).unwrap();
        assert!(!fctx.genlambda);
        assert!(fctx.rets.is_empty());
        assert_eq!(fctx.wrap_return, "");
        assert!(fctx.release_gil);
    }

    #[test]
    fn test_single_out_param_void_return() {
        let mut status = ParamDecl::new("status", "int32_t");
        status.pointers = 1;
        let mut decl = FunctionDecl::new("GetStatus", "void");
        decl.params.push(status);

        let fctx = transform(&decl, FunctionConfig::default(), WrapConfig::default()).unwrap();
        assert!(fctx.genlambda);
        assert_eq!(fctx.call_start, "");
        assert_eq!(fctx.rets.len(), 1);
        assert_eq!(fctx.rets[0].name, "status");
        assert_eq!(fctx.wrap_return, "return status;");
        assert_eq!(fctx.lambda_pre, vec!["int32_t status".to_string()]);
        assert_eq!(fctx.in_params.len(), 0);
    }

    #[test]
    fn test_tuple_return_orders_primary_first() {
        let mut count = ParamDecl::new("count", "int");
        count.fundamental = true;
        count.pointers = 1;
        let mut decl = FunctionDecl::new("Read", "double");
        decl.params.push(count);

        let fctx = transform(&decl, FunctionConfig::default(), WrapConfig::default()).unwrap();
        assert_eq!(fctx.call_start, "auto __ret =");
        assert_eq!(fctx.rets.len(), 2);
        assert_eq!(fctx.rets[0].name, "__ret");
        assert_eq!(fctx.rets[0].cpp_type, "double");
        assert_eq!(fctx.rets[1].name, "count");
        assert_eq!(fctx.wrap_return, "return std::make_tuple(__ret, count);");
    }

    #[test]
    fn test_ignored_out_param_still_aggregated() {
        let mut status = ParamDecl::new("status", "int32_t");
        status.pointers = 1;
        let mut decl = FunctionDecl::new("GetValue", "double");
        decl.params.push(status);

        let mut cfg = FunctionConfig::default();
        cfg.params.insert(
            "status".to_string(),
            wrapgen_config::ParamOverride {
                ignore: true,
                ..Default::default()
            },
        );
        let fctx = transform(&decl, cfg, WrapConfig::default()).unwrap();
        assert!(fctx.filtered_params.is_empty());
        assert_eq!(fctx.out_params.len(), 1);
        assert_eq!(fctx.wrap_return, "return std::make_tuple(__ret, status);");
        assert_eq!(fctx.lambda_pre, vec!["int32_t status".to_string()]);
    }

    #[test]
    fn test_cpp_code_holds_gil_by_default() {
        let decl = FunctionDecl::new("Custom", "void");
        let cfg = FunctionConfig {
            cpp_code: Some("return 42;".to_string()),
            ..Default::default()
        };
        let fctx = transform(&decl, cfg, WrapConfig::default()).unwrap();
        assert!(!fctx.release_gil);

        let decl = FunctionDecl::new("Custom", "void");
        let cfg = FunctionConfig {
            cpp_code: Some("return 42;".to_string()),
            no_release_gil: Some(false),
            ..Default::default()
        };
        let fctx = transform(&decl, cfg, WrapConfig::default()).unwrap();
        assert!(fctx.release_gil);
    }

    #[test]
    fn test_explicit_keepalive_replaces_inferred() {
        let mut source = ParamDecl::new("source", "Gyro");
        source.references = 1;
        let mut decl = FunctionDecl::new("Follower", "");
        decl.is_constructor = true;
        decl.params.push(source);

        let fctx = transform(&decl, FunctionConfig::default(), WrapConfig::default()).unwrap();
        assert_eq!(fctx.keepalives, vec![(1, 2)]);

        let mut decl = FunctionDecl::new("Follower", "");
        decl.is_constructor = true;
        let mut source = ParamDecl::new("source", "Gyro");
        source.references = 1;
        decl.params.push(source);
        let cfg = FunctionConfig {
            keepalive: Some(vec![(1, 3)]),
            ..Default::default()
        };
        let fctx = transform(&decl, cfg, WrapConfig::default()).unwrap();
        assert_eq!(fctx.keepalives, vec![(1, 3)]);
    }

    #[test]
    fn test_return_value_policy_suffix() {
        let decl = FunctionDecl::new("GetRef", "Widget");
        let cfg = FunctionConfig {
            return_value_policy: ReturnValuePolicy::ReferenceInternal,
            ..Default::default()
        };
        let fctx = transform(&decl, cfg, WrapConfig::default()).unwrap();
        assert_eq!(
            fctx.return_value_policy,
            ", py::return_value_policy::reference_internal"
        );

        let decl = FunctionDecl::new("GetVal", "int");
        let fctx = transform(&decl, FunctionConfig::default(), WrapConfig::default()).unwrap();
        assert_eq!(fctx.return_value_policy, "");
    }

    #[test]
    fn test_template_requires_impls() {
        let mut decl = FunctionDecl::new("Convert", "T");
        decl.is_template = true;
        let err = transform(&decl, FunctionConfig::default(), WrapConfig::default()).unwrap_err();
        assert!(matches!(err, WrapError::Config(_)));

        let mut decl = FunctionDecl::new("Convert", "T");
        decl.is_template = true;
        let cfg = FunctionConfig {
            template_impls: Some(vec![vec!["int".to_string()]]),
            ..Default::default()
        };
        let fctx = transform(&decl, cfg, WrapConfig::default()).unwrap();
        assert_eq!(
            fctx.template_impls,
            Some(vec![vec!["int".to_string()]])
        );
    }

    #[test]
    fn test_impls_on_non_template_rejected() {
        let decl = FunctionDecl::new("Plain", "void");
        let cfg = FunctionConfig {
            template_impls: Some(vec![vec!["int".to_string()]]),
            ..Default::default()
        };
        let err = transform(&decl, cfg, WrapConfig::default()).unwrap_err();
        assert!(matches!(err, WrapError::Config(_)));
    }

    #[test]
    fn test_ignore_pure_on_concrete_rejected() {
        let decl = FunctionDecl::new("Plain", "void");
        let cfg = FunctionConfig {
            ignore_pure: true,
            ..Default::default()
        };
        let err = transform(&decl, cfg, WrapConfig::default()).unwrap_err();
        assert!(matches!(err, WrapError::Config(_)));
    }

    #[test]
    fn test_keyword_method_escaped() {
        let decl = FunctionDecl::new("lambda", "void");
        let fctx = transform(&decl, FunctionConfig::default(), WrapConfig::default()).unwrap();
        assert_eq!(fctx.py_name, "lambda_");
    }
}
