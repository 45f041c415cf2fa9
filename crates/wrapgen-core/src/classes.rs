//! Class transformation.
//!
//! Orchestrates inheritance resolution, member partitioning, the
//! trampoline decision, and nested-class recursion. The resulting
//! contexts land in the run's [`HeaderContext`] in declaration order,
//! parents before their nested classes.
//!
//! [`HeaderContext`]: crate::context::HeaderContext

use crate::context::{
    BaseClassContext, ClassContext, EnumContext, FunctionContext, PropContext, TrampolineContext,
};
use crate::error::{Result, WrapError};
use crate::naming::{self, qualname_identifier};
use crate::processor::{scoped, Processor};
use crate::signature::overload_signature;
use crate::doc;
use wrapgen_config::PropAccess;
use wrapgen_ir::{Access, ClassDecl, ClassKind};

/// Operator tokens with a binding equivalent. Overloads of anything else
/// are skipped.
const ALLOWED_OPERATORS: &[&str] = &[
    "-", "+", "*", "/", "%", "&", "^", "==", "!=", "|", ">", ">=", "<", "<=",
    "+=", "-=", "*=", "/=", "%=", "&=", "^=", "|=",
];

/// Identity of the enclosing class while recursing into nested classes.
struct ParentInfo {
    /// Index of the parent's context in the header's class list
    index: usize,
    /// `::`-joined class name chain, namespace excluded
    cls_key: String,
    /// Fully qualified C++ name, template arguments included
    qualname: String,
}

impl<'a> Processor<'a> {
    /// Transform one top-level class and all of its nested classes.
    pub(crate) fn process_class(&mut self, decl: &ClassDecl) -> Result<()> {
        self.process_class_impl(decl, None)
    }

    fn process_class_impl(&mut self, decl: &ClassDecl, parent: Option<&ParentInfo>) -> Result<()> {
        // A privately nested class is unreachable from outside
        if parent.is_some() && decl.access_in_parent == Access::Private {
            return Ok(());
        }

        let cls_key = match parent {
            Some(p) => format!("{}::{}", p.cls_key, decl.name),
            None => decl.name.clone(),
        };
        let cfg = self.gendata.class_config(&cls_key, &mut self.reporter);
        if cfg.ignore {
            return Ok(());
        }

        for typename in &decl.using_types {
            self.registry.register(typename);
        }
        for typename in &cfg.force_type_casters {
            self.registry.register(typename);
        }

        let scope_var = self.module_var(cfg.subpackage.as_deref());
        let var_name = format!("cls_{}", decl.name);

        let simple_qualname = scoped(&decl.namespace, &decl.name);
        let mut qualname = match parent {
            Some(p) => format!("{}::{}", p.qualname, decl.name),
            None => simple_qualname.clone(),
        };
        // Identifier derives from the name without template arguments
        let cpp_identifier = qualname_identifier(&qualname);

        let mut enums: Vec<EnumContext> = Vec::new();
        for (i, e) in decl.enums.iter().filter(|e| e.access == Access::Public).enumerate() {
            let ecfg = self.gendata.class_enum_config(&cls_key, e.name.as_deref(), &mut self.reporter);
            if ecfg.ignore {
                continue;
            }
            let scope = format!("{qualname}::");
            let enum_var = format!("{var_name}_enum{i}");
            enums.push(self.transform_enum(&scope, &var_name, &enum_var, e, &ecfg)?);
        }

        // Inheritance resolution
        let mut pending_ignored = cfg.ignored_bases.clone();
        let mut pybase_names: Vec<&str> = Vec::new();
        let mut bases: Vec<BaseClassContext> = Vec::new();

        for base in &decl.bases {
            if let Some(pos) = pending_ignored.iter().position(|b| b == &base.name) {
                pending_ignored.remove(pos);
                continue;
            }
            if base.access == Access::Private {
                continue;
            }

            let full_cpp_name = match cfg.base_qualnames.get(&base.name) {
                Some(bqual) => bqual.clone(),
                None if !base.decl_name.contains("::") => {
                    scoped(&decl.namespace, &base.decl_name)
                }
                None => base.decl_name.clone(),
            };

            for param in &base.decl_params {
                if !pybase_names.contains(&param.as_str()) {
                    pybase_names.push(param);
                }
            }

            bases.push(BaseClassContext {
                full_cpp_name_identifier: qualname_identifier(&full_cpp_name),
                full_cpp_name,
                template_params: base.decl_params.join(", "),
            });
        }

        if !self.report_only && !pending_ignored.is_empty() {
            let valid: Vec<&str> = decl.bases.iter().map(|b| b.name.as_str()).collect();
            return Err(WrapError::config(format!(
                "{}: ignored_bases contains nonexistent bases {}; valid bases are {}",
                decl.name,
                pending_ignored.join(", "),
                valid.join(", ")
            )));
        }

        let mut hierarchy: Vec<String> = bases.iter().map(|b| b.full_cpp_name.clone()).collect();
        hierarchy.extend(cfg.force_depends.iter().cloned());
        self.hctx.class_hierarchy.insert(simple_qualname.clone(), hierarchy);

        // Template parameter handling
        let mut template_argument_list = String::new();
        let mut template_parameter_list = String::new();
        let mut pybase_args = String::new();
        let mut pybase_params = String::new();

        if let Some(template_params) = &cfg.template_params {
            if cfg.subpackage.is_some() {
                return Err(WrapError::config(format!(
                    "{}: classes with subpackages must define subpackage on template instantiation",
                    decl.name
                )));
            }

            let mut args = Vec::new();
            let mut params = Vec::new();
            let mut base_args = Vec::new();
            let mut base_params = Vec::new();

            for entry in template_params {
                let (param, arg) = match entry.split_once(' ') {
                    Some((_, arg)) => (entry.clone(), arg.to_string()),
                    None => (format!("typename {entry}"), entry.clone()),
                };
                if pybase_names.contains(&arg.as_str()) {
                    base_args.push(arg.clone());
                    base_params.push(param.clone());
                }
                args.push(arg);
                params.push(param);
            }

            template_argument_list = args.join(", ");
            template_parameter_list = params.join(", ");
            pybase_args = base_args.join(", ");
            pybase_params = base_params.join(", ");

            qualname = format!("{qualname}<{template_argument_list}>");
        }

        if !self.report_only {
            if decl.is_template && template_parameter_list.is_empty() {
                return Err(WrapError::config(format!(
                    "{}: must specify template_params for templated class, or ignore it",
                    decl.name
                )));
            }
            if !decl.is_template && !template_parameter_list.is_empty() {
                return Err(WrapError::config(format!(
                    "{}: cannot specify template_params for non-template class",
                    decl.name
                )));
            }
        }

        // Member partitioning
        let mut has_constructor = false;
        let mut is_polymorphic = cfg.is_polymorphic || !decl.bases.is_empty();
        let mut public_methods: Vec<FunctionContext> = Vec::new();
        let mut protected_methods: Vec<FunctionContext> = Vec::new();

        for access in [Access::Public, Access::Protected, Access::Private] {
            for method in decl.methods.iter().filter(|m| m.access == access) {
                if method.is_constructor {
                    has_constructor = true;
                }
                if method.is_virtual || method.is_override {
                    is_polymorphic = true;
                }

                let is_copy_or_move_ctor = method.is_constructor
                    && method
                        .params
                        .first()
                        .and_then(|p| p.class_type.as_deref())
                        .is_some_and(|c| c == simple_qualname);
                let bad_operator = method
                    .operator
                    .as_deref()
                    .is_some_and(|op| !ALLOWED_OPERATORS.contains(&op));

                if bad_operator || method.is_destructor || is_copy_or_move_ctor || method.is_deleted
                {
                    continue;
                }

                // Overload bookkeeping happens even for private methods
                let is_private = access == Access::Private;
                let signature = overload_signature(method);
                let mut mcfg = self.gendata.method_config(
                    &cls_key,
                    &method.name,
                    &signature,
                    is_private,
                    &mut self.reporter,
                );
                if is_private || mcfg.ignore {
                    continue;
                }

                if method.operator.is_some() {
                    self.hctx.need_operators_h = true;
                    // Operator thread safety on boxed values is pybind11's
                    // problem, not the callee's; hold the GIL
                    if mcfg.no_release_gil.is_none() {
                        mcfg.no_release_gil = Some(true);
                    }
                }

                let internal = access != Access::Public;
                let fctx = self
                    .transform_function(method, mcfg, Some(decl), internal)
                    .map_err(|source| WrapError::member(format!("{cls_key}::{}", method.name), source))?;
                match access {
                    Access::Public => public_methods.push(fctx),
                    _ => protected_methods.push(fctx),
                }
            }
        }

        let has_trampoline = is_polymorphic && !decl.is_final && !cfg.force_no_trampoline;

        // Protected members are only reachable through the trampoline
        let mut public_properties: Vec<PropContext> = Vec::new();
        let mut protected_properties: Vec<PropContext> = Vec::new();
        for access in [Access::Public, Access::Protected] {
            if access == Access::Protected && !has_trampoline {
                continue;
            }
            for prop in decl.properties.iter().filter(|p| p.access == access) {
                let pcfg = self.gendata.class_prop_config(&cls_key, &prop.name, &mut self.reporter);
                self.registry.register(&prop.raw_type);

                let py_name = match pcfg.rename {
                    Some(rename) => rename,
                    None if access == Access::Protected => format!("_{}", prop.name),
                    None => prop.name.clone(),
                };
                let readonly = match pcfg.access {
                    PropAccess::Automatic => {
                        if prop.is_const || prop.is_constexpr {
                            true
                        } else if decl.kind == ClassKind::Struct {
                            // Structs intentionally expose read-write data
                            false
                        } else {
                            !prop.fundamental && !prop.is_reference
                        }
                    }
                    PropAccess::ReadOnly => true,
                    PropAccess::ReadWrite => false,
                };

                let pctx = PropContext {
                    py_name,
                    cpp_name: prop.name.clone(),
                    cpp_type: prop.full_type.clone(),
                    readonly,
                    doc: doc::process_doc(
                        prop.doc.as_deref(),
                        pcfg.doc.as_deref(),
                        pcfg.doc_append.as_deref(),
                        "",
                    ),
                    array_size: prop.array_size,
                    array: prop.array,
                    reference: prop.is_reference,
                    is_static: prop.is_static,
                };
                match access {
                    Access::Public => public_properties.push(pctx),
                    _ => protected_properties.push(pctx),
                }
            }
        }

        let trampoline = if has_trampoline {
            let tmpl = if template_argument_list.is_empty() {
                String::new()
            } else {
                format!(", {template_argument_list}")
            };
            let cfg_type =
                format!("rpygen::PyTrampolineCfg_{cpp_identifier}<{template_argument_list}>");
            Some(TrampolineContext {
                name: format!(
                    "rpygen::PyTrampoline_{cpp_identifier}<typename {qualname}{tmpl}, typename {cfg_type}>"
                ),
                var: format!("{}_Trampoline", decl.name),
                inline_code: cfg.trampoline_inline_code.clone(),
            })
        } else if cfg.trampoline_inline_code.is_some() {
            return Err(WrapError::config(format!(
                "{cls_key} has trampoline_inline_code specified, but there is no trampoline"
            )));
        } else {
            None
        };

        let py_name = naming::resolve_name(
            &decl.name,
            cfg.rename.as_deref(),
            &self.gendata.config().strip_prefixes,
            false,
            self.report_only,
            &mut self.reporter,
        )?;

        let cctx = ClassContext {
            parent: parent.map(|p| p.index),
            full_cpp_name: qualname.clone(),
            full_cpp_name_identifier: cpp_identifier,
            py_name,
            scope_var,
            var_name,
            has_constructor,
            nodelete: cfg.nodelete,
            force_no_default_constructor: cfg.force_no_default_constructor,
            is_final: decl.is_final,
            doc: doc::process_doc(
                decl.doc.as_deref(),
                cfg.doc.as_deref(),
                cfg.doc_append.as_deref(),
                "",
            ),
            bases,
            trampoline,
            public_methods,
            protected_methods,
            public_properties,
            protected_properties,
            enums,
            pybase_args,
            pybase_params,
            template_parameter_list,
            template_inline_code: cfg.template_inline_code.clone().unwrap_or_default(),
            typealias: cfg.typealias.clone(),
            constants: cfg.constants.clone(),
        };

        let index = self.hctx.classes.len();
        self.hctx.classes.push(cctx);

        let info = ParentInfo {
            index,
            cls_key,
            qualname,
        };
        for nested in &decl.nested {
            self.process_class_impl(nested, Some(&info))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::HeaderContext;
    use crate::error::WrapError;
    use wrapgen_config::{CasterTable, ClassConfig, FunctionConfig, PropConfig, WrapConfig};
    use wrapgen_ir::{BaseDecl, EnumDecl, EnumeratorDecl, FunctionDecl, ParamDecl, PropertyDecl};

    fn process(decl: &ClassDecl, config: WrapConfig) -> Result<HeaderContext> {
        let table = CasterTable::default();
        let mut processor = Processor::new(config, &table, false);
        processor.process_class(decl)?;
        let (hctx, _) = processor.finish();
        Ok(hctx)
    }

    fn config_for(name: &str, cfg: ClassConfig) -> WrapConfig {
        let mut config = WrapConfig::default();
        config.classes.insert(name.to_string(), cfg);
        config
    }

    fn virtual_method(name: &str) -> FunctionDecl {
        let mut m = FunctionDecl::new(name, "void");
        m.is_virtual = true;
        m
    }

    #[test]
    fn test_plain_class_has_no_trampoline() {
        let mut decl = ClassDecl::new("Point", "geom");
        decl.methods.push(FunctionDecl::new("Norm", "double"));
        let hctx = process(&decl, WrapConfig::default()).unwrap();

        let cls = &hctx.classes[0];
        assert_eq!(cls.full_cpp_name, "geom::Point");
        assert_eq!(cls.full_cpp_name_identifier, "geom__Point");
        assert!(cls.trampoline.is_none());
        assert!(!cls.has_constructor);
        assert_eq!(cls.public_methods[0].py_name, "norm");
    }

    #[test]
    fn test_virtual_method_forces_trampoline() {
        let mut decl = ClassDecl::new("Gyro", "frc");
        decl.methods.push(virtual_method("Calibrate"));
        let hctx = process(&decl, WrapConfig::default()).unwrap();

        let t = hctx.classes[0].trampoline.as_ref().unwrap();
        assert_eq!(t.var, "Gyro_Trampoline");
        assert_eq!(
            t.name,
            "rpygen::PyTrampoline_frc__Gyro<typename frc::Gyro, typename rpygen::PyTrampolineCfg_frc__Gyro<>>"
        );
    }

    #[test]
    fn test_base_forces_trampoline_without_virtuals() {
        let mut decl = ClassDecl::new("AnalogGyro", "frc");
        decl.bases.push(BaseDecl {
            name: "Gyro".to_string(),
            decl_name: "Gyro".to_string(),
            ..Default::default()
        });
        let hctx = process(&decl, WrapConfig::default()).unwrap();

        let cls = &hctx.classes[0];
        assert!(cls.trampoline.is_some());
        assert_eq!(cls.bases[0].full_cpp_name, "frc::Gyro");
        assert_eq!(
            hctx.class_hierarchy.get("frc::AnalogGyro"),
            Some(&vec!["frc::Gyro".to_string()])
        );
    }

    #[test]
    fn test_final_class_never_gets_trampoline() {
        let mut decl = ClassDecl::new("Sealed", "frc");
        decl.is_final = true;
        decl.methods.push(virtual_method("Poll"));
        let hctx = process(&decl, WrapConfig::default()).unwrap();
        let cls = &hctx.classes[0];
        assert!(cls.is_final);
        assert!(cls.trampoline.is_none());
    }

    #[test]
    fn test_force_no_trampoline() {
        let mut decl = ClassDecl::new("Gyro", "frc");
        decl.methods.push(virtual_method("Poll"));
        let config = config_for(
            "Gyro",
            ClassConfig {
                force_no_trampoline: true,
                ..Default::default()
            },
        );
        let hctx = process(&decl, config).unwrap();
        assert!(hctx.classes[0].trampoline.is_none());
    }

    #[test]
    fn test_inline_code_without_trampoline_rejected() {
        let decl = ClassDecl::new("Plain", "frc");
        let config = config_for(
            "Plain",
            ClassConfig {
                trampoline_inline_code: Some("int x;".to_string()),
                ..Default::default()
            },
        );
        let err = process(&decl, config).unwrap_err();
        assert!(matches!(err, WrapError::Config(_)));
    }

    #[test]
    fn test_ignored_class_skipped() {
        let decl = ClassDecl::new("Internal", "frc");
        let config = config_for(
            "Internal",
            ClassConfig {
                ignore: true,
                ..Default::default()
            },
        );
        let hctx = process(&decl, config).unwrap();
        assert!(hctx.classes.is_empty());
    }

    #[test]
    fn test_private_nested_class_skipped() {
        let mut inner = ClassDecl::new("Impl", "frc");
        inner.access_in_parent = Access::Private;
        let mut outer = ClassDecl::new("Widget", "frc");
        outer.nested.push(inner);

        let hctx = process(&outer, WrapConfig::default()).unwrap();
        assert_eq!(hctx.classes.len(), 1);
    }

    #[test]
    fn test_nested_class_chain() {
        let inner = ClassDecl::new("Config", "frc");
        let mut outer = ClassDecl::new("Widget", "frc");
        outer.nested.push(inner);

        let hctx = process(&outer, WrapConfig::default()).unwrap();
        assert_eq!(hctx.classes.len(), 2);
        let nested = &hctx.classes[1];
        assert_eq!(nested.parent, Some(0));
        assert_eq!(nested.full_cpp_name, "frc::Widget::Config");
        assert_eq!(nested.full_cpp_name_identifier, "frc__Widget__Config");
    }

    #[test]
    fn test_copy_constructor_skipped() {
        let mut decl = ClassDecl::new("Pose", "geom");
        let mut ctor = FunctionDecl::new("Pose", "");
        ctor.is_constructor = true;
        let mut other = ParamDecl::new("other", "Pose");
        other.class_type = Some("geom::Pose".to_string());
        other.references = 1;
        other.is_const = true;
        ctor.params.push(other);
        decl.methods.push(ctor);

        let hctx = process(&decl, WrapConfig::default()).unwrap();
        let cls = &hctx.classes[0];
        // Counted for constructor synthesis, but not wrapped
        assert!(cls.has_constructor);
        assert!(cls.public_methods.is_empty());
    }

    #[test]
    fn test_operator_allow_list() {
        let mut eq = FunctionDecl::new("operator==", "bool");
        eq.operator = Some("==".to_string());
        let mut call = FunctionDecl::new("operator()", "int");
        call.operator = Some("()".to_string());
        let mut decl = ClassDecl::new("Pose", "geom");
        decl.methods.push(eq);
        decl.methods.push(call);

        let hctx = process(&decl, WrapConfig::default()).unwrap();
        let cls = &hctx.classes[0];
        assert_eq!(cls.public_methods.len(), 1);
        assert_eq!(cls.public_methods[0].cpp_name, "operator==");
        // Boxed-value operators hold the GIL unless told otherwise
        assert!(!cls.public_methods[0].release_gil);
        assert!(hctx.need_operators_h);
    }

    #[test]
    fn test_private_methods_not_exposed() {
        let mut helper = FunctionDecl::new("HelperImpl", "void");
        helper.access = Access::Private;
        let mut decl = ClassDecl::new("Widget", "frc");
        decl.methods.push(helper);

        let hctx = process(&decl, WrapConfig::default()).unwrap();
        let cls = &hctx.classes[0];
        assert!(cls.public_methods.is_empty());
        assert!(cls.protected_methods.is_empty());
    }

    #[test]
    fn test_protected_method_marked_internal() {
        let mut m = FunctionDecl::new("Update", "void");
        m.access = Access::Protected;
        m.is_virtual = true;
        let mut decl = ClassDecl::new("Widget", "frc");
        decl.methods.push(m);

        let hctx = process(&decl, WrapConfig::default()).unwrap();
        let cls = &hctx.classes[0];
        assert_eq!(cls.protected_methods[0].py_name, "_update");
    }

    #[test]
    fn test_member_error_names_owner() {
        let mut m = FunctionDecl::new("Plain", "void");
        m.access = Access::Public;
        let mut decl = ClassDecl::new("Widget", "frc");
        decl.methods.push(m);

        let mut cls_cfg = ClassConfig::default();
        cls_cfg.methods.insert(
            "Plain".to_string(),
            FunctionConfig {
                ignore_pure: true,
                ..Default::default()
            },
        );
        let err = process(&decl, config_for("Widget", cls_cfg)).unwrap_err();
        match err {
            WrapError::Member { scope, .. } => assert_eq!(scope, "Widget::Plain"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_struct_properties_readwrite() {
        let mut decl = ClassDecl::new("Telemetry", "frc");
        decl.kind = ClassKind::Struct;
        decl.properties.push(PropertyDecl::new("pose", "Pose"));
        let hctx = process(&decl, WrapConfig::default()).unwrap();
        assert!(!hctx.classes[0].public_properties[0].readonly);
    }

    #[test]
    fn test_class_property_policy() {
        let mut decl = ClassDecl::new("Widget", "frc");
        let mut count = PropertyDecl::new("count", "int");
        count.fundamental = true;
        decl.properties.push(count);
        decl.properties.push(PropertyDecl::new("pose", "Pose"));
        let mut limit = PropertyDecl::new("kLimit", "int");
        limit.fundamental = true;
        limit.is_constexpr = true;
        decl.properties.push(limit);

        let hctx = process(&decl, WrapConfig::default()).unwrap();
        let props = &hctx.classes[0].public_properties;
        assert!(!props[0].readonly);
        assert!(props[1].readonly);
        assert!(props[2].readonly);
    }

    #[test]
    fn test_property_access_override() {
        let mut decl = ClassDecl::new("Widget", "frc");
        decl.properties.push(PropertyDecl::new("pose", "Pose"));
        let mut cls_cfg = ClassConfig::default();
        cls_cfg.attributes.insert(
            "pose".to_string(),
            PropConfig {
                access: PropAccess::ReadWrite,
                ..Default::default()
            },
        );
        let hctx = process(&decl, config_for("Widget", cls_cfg)).unwrap();
        assert!(!hctx.classes[0].public_properties[0].readonly);
    }

    #[test]
    fn test_protected_properties_require_trampoline() {
        let mut prop = PropertyDecl::new("m_angle", "double");
        prop.access = Access::Protected;
        prop.fundamental = true;

        let mut plain = ClassDecl::new("Plain", "frc");
        plain.properties.push(prop.clone());
        let hctx = process(&plain, WrapConfig::default()).unwrap();
        assert!(hctx.classes[0].protected_properties.is_empty());

        let mut poly = ClassDecl::new("Poly", "frc");
        poly.properties.push(prop);
        poly.methods.push(virtual_method("Poll"));
        let hctx = process(&poly, WrapConfig::default()).unwrap();
        let props = &hctx.classes[0].protected_properties;
        assert_eq!(props[0].py_name, "_m_angle");
    }

    #[test]
    fn test_ignored_base_skipped_and_validated() {
        let mut decl = ClassDecl::new("Widget", "frc");
        decl.bases.push(BaseDecl {
            name: "ErrorBase".to_string(),
            decl_name: "ErrorBase".to_string(),
            ..Default::default()
        });
        decl.bases.push(BaseDecl {
            name: "Sendable".to_string(),
            decl_name: "wpi::Sendable".to_string(),
            ..Default::default()
        });

        let config = config_for(
            "Widget",
            ClassConfig {
                ignored_bases: vec!["ErrorBase".to_string()],
                ..Default::default()
            },
        );
        let hctx = process(&decl, config).unwrap();
        let cls = &hctx.classes[0];
        assert_eq!(cls.bases.len(), 1);
        assert_eq!(cls.bases[0].full_cpp_name, "wpi::Sendable");
        assert_eq!(cls.bases[0].full_cpp_name_identifier, "wpi__Sendable");

        let mut decl = ClassDecl::new("Widget", "frc");
        decl.bases.push(BaseDecl {
            name: "ErrorBase".to_string(),
            decl_name: "ErrorBase".to_string(),
            ..Default::default()
        });
        let config = config_for(
            "Widget",
            ClassConfig {
                ignored_bases: vec!["NotABase".to_string()],
                ..Default::default()
            },
        );
        let err = process(&decl, config).unwrap_err();
        assert!(matches!(err, WrapError::Config(_)));
    }

    #[test]
    fn test_base_qualname_override() {
        let mut decl = ClassDecl::new("Widget", "frc");
        decl.bases.push(BaseDecl {
            name: "Helper".to_string(),
            decl_name: "Helper".to_string(),
            ..Default::default()
        });
        let mut cls_cfg = ClassConfig::default();
        cls_cfg
            .base_qualnames
            .insert("Helper".to_string(), "wpi::impl::Helper".to_string());
        let hctx = process(&decl, config_for("Widget", cls_cfg)).unwrap();
        assert_eq!(hctx.classes[0].bases[0].full_cpp_name, "wpi::impl::Helper");
    }

    #[test]
    fn test_template_class() {
        let mut decl = ClassDecl::new("Vector", "frc");
        decl.is_template = true;
        decl.bases.push(BaseDecl {
            name: "Storage".to_string(),
            decl_name: "Storage".to_string(),
            decl_params: vec!["T".to_string()],
            ..Default::default()
        });

        let config = config_for(
            "Vector",
            ClassConfig {
                template_params: Some(vec!["T".to_string(), "size_t N".to_string()]),
                ..Default::default()
            },
        );
        let hctx = process(&decl, config).unwrap();
        let cls = &hctx.classes[0];
        assert_eq!(cls.full_cpp_name, "frc::Vector<T, N>");
        assert_eq!(cls.full_cpp_name_identifier, "frc__Vector");
        assert_eq!(cls.template_parameter_list, "typename T, size_t N");
        assert_eq!(cls.pybase_args, "T");
        assert_eq!(cls.pybase_params, "typename T");
        let t = cls.trampoline.as_ref().unwrap();
        assert_eq!(
            t.name,
            "rpygen::PyTrampoline_frc__Vector<typename frc::Vector<T, N>, T, N, typename rpygen::PyTrampolineCfg_frc__Vector<T, N>>"
        );
    }

    #[test]
    fn test_template_class_requires_params() {
        let mut decl = ClassDecl::new("Vector", "frc");
        decl.is_template = true;
        let err = process(&decl, WrapConfig::default()).unwrap_err();
        assert!(matches!(err, WrapError::Config(_)));
    }

    #[test]
    fn test_template_params_on_plain_class_rejected() {
        let decl = ClassDecl::new("Plain", "frc");
        let config = config_for(
            "Plain",
            ClassConfig {
                template_params: Some(vec!["T".to_string()]),
                ..Default::default()
            },
        );
        let err = process(&decl, config).unwrap_err();
        assert!(matches!(err, WrapError::Config(_)));
    }

    #[test]
    fn test_class_enum_scoping() {
        let mut decl = ClassDecl::new("Gyro", "frc");
        decl.enums.push(EnumDecl {
            name: Some("Mode".to_string()),
            values: vec![EnumeratorDecl::new("Mode_Linear")],
            ..Default::default()
        });
        let hctx = process(&decl, WrapConfig::default()).unwrap();
        let e = &hctx.classes[0].enums[0];
        assert_eq!(e.scope_var, "cls_Gyro");
        assert_eq!(e.var_name, "cls_Gyro_enum0");
        assert_eq!(e.full_cpp_name, "frc::Gyro::Mode");
        assert_eq!(e.values[0].cpp_name, "frc::Gyro::Mode::Mode_Linear");
        assert_eq!(e.values[0].py_name, "Linear");
    }

    #[test]
    fn test_subpackage_routes_module_var() {
        let decl = ClassDecl::new("Widget", "frc");
        let config = config_for(
            "Widget",
            ClassConfig {
                subpackage: Some("interfaces".to_string()),
                ..Default::default()
            },
        );
        let hctx = process(&decl, config).unwrap();
        assert_eq!(hctx.classes[0].scope_var, "pkg_interfaces");
        assert_eq!(
            hctx.subpackages.get("interfaces"),
            Some(&"pkg_interfaces".to_string())
        );
    }
}
