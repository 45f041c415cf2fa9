//! The per-run processing object.
//!
//! One [`Processor`] is constructed per header; it owns every piece of
//! mutable run state and is consumed by [`Processor::finish`] when the
//! header's declarations have all been visited. Nothing is shared across
//! runs.

use crate::casters::TypeCasterRegistry;
use crate::context::{HeaderContext, TemplateInstanceContext};
use crate::doc;
use crate::error::Result;
use crate::naming::qualname_identifier;
use crate::signature::overload_signature;
use wrapgen_config::{CasterTable, GeneratorData, Reporter, WrapConfig};
use wrapgen_ir::HeaderDecl;

/// Join a name to its enclosing namespace, tolerating the global
/// namespace.
pub(crate) fn scoped(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}::{name}")
    }
}

/// Drives one header's declarations through the transformers.
pub struct Processor<'a> {
    pub(crate) gendata: GeneratorData,
    pub(crate) casters: &'a CasterTable,
    pub(crate) report_only: bool,
    pub(crate) reporter: Reporter,
    pub(crate) registry: TypeCasterRegistry,
    pub(crate) hctx: HeaderContext,
}

impl<'a> Processor<'a> {
    pub fn new(config: WrapConfig, casters: &'a CasterTable, report_only: bool) -> Self {
        let hctx = HeaderContext {
            extra_includes: config.extra_includes.clone(),
            extra_includes_first: config.extra_includes_first.clone(),
            inline_code: config.inline_code.clone(),
            ..Default::default()
        };
        Self {
            gendata: GeneratorData::new(config),
            casters,
            report_only,
            reporter: Reporter::new(),
            registry: TypeCasterRegistry::new(),
            hctx,
        }
    }

    /// Process every declaration in one header, in declaration order.
    pub fn process_header(&mut self, header: &HeaderDecl) -> Result<()> {
        self.hctx.rel_fname = header.rel_fname.clone();

        for (i, decl) in header.enums.iter().enumerate() {
            let cfg = self.gendata.enum_config(decl.name.as_deref(), &mut self.reporter);
            if cfg.ignore {
                continue;
            }
            let scope_var = self.module_var(cfg.subpackage.as_deref());
            let var_name = format!("enum{i}");
            let scope = if decl.namespace.is_empty() {
                String::new()
            } else {
                format!("{}::", decl.namespace)
            };
            let ectx = self.transform_enum(&scope, &scope_var, &var_name, decl, &cfg)?;
            self.hctx.enums.push(ectx);
        }

        // Global variables aren't wrapped, but they are still audited and
        // their types may need casters
        for variable in &header.variables {
            self.gendata.prop_config(&variable.name, &mut self.reporter);
            self.registry.register(&variable.raw_type);
        }

        for typename in &header.using_types {
            self.registry.register(typename);
        }

        for decl in &header.functions {
            // Free operators aren't rendered
            if decl.operator.is_some() {
                continue;
            }
            let signature = overload_signature(decl);
            let cfg = self
                .gendata
                .function_config(&decl.name, &signature, &mut self.reporter);
            if cfg.ignore {
                continue;
            }
            self.module_var(cfg.subpackage.as_deref());
            let fctx = self.transform_function(decl, cfg, None, false)?;
            self.hctx.functions.push(fctx);
        }

        for decl in &header.classes {
            self.process_class(decl)?;
        }

        self.process_template_instances();
        self.hctx.type_caster_includes = self.registry.resolve_includes(self.casters);
        Ok(())
    }

    /// Bind the template instantiations the config asks for, in config
    /// order.
    fn process_template_instances(&mut self) {
        let templates: Vec<_> = self
            .gendata
            .config()
            .templates
            .iter()
            .map(|(name, cfg)| (name.clone(), cfg.clone()))
            .collect();

        for (i, (py_name, cfg)) in templates.into_iter().enumerate() {
            let mut qualname = cfg.qualname.clone();
            if !qualname.contains("::") {
                qualname = format!("::{qualname}");
            }
            let identifier = qualname_identifier(&qualname);

            let doc_add = cfg.doc_append.as_ref().map(|text| format!("\n{text}"));

            let scope_var = self.module_var(cfg.subpackage.as_deref());
            self.hctx.template_instances.push(TemplateInstanceContext {
                scope_var,
                var_name: format!("tmplCls{i}"),
                py_name,
                binding_object: format!("rpygen::bind_{identifier}"),
                header_name: format!("{identifier}.hpp"),
                params: cfg.params.clone(),
                doc_set: cfg.doc.as_deref().and_then(doc::quote_doc),
                doc_add: doc_add.as_deref().and_then(doc::quote_doc),
            });

            for param in &cfg.params {
                self.registry.register(param);
            }
        }
    }

    /// Module variable for a declaration, registering the subpackage on
    /// first use.
    pub(crate) fn module_var(&mut self, subpackage: Option<&str>) -> String {
        match subpackage {
            Some(subpackage) => {
                let var = format!("pkg_{}", subpackage.replace('.', "_"));
                self.hctx
                    .subpackages
                    .insert(subpackage.to_string(), var.clone());
                var
            }
            None => "m".to_string(),
        }
    }

    /// Consume the run, yielding the finished context and the findings
    /// collected along the way.
    pub fn finish(self) -> (HeaderContext, Reporter) {
        (self.hctx, self.reporter)
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }
}
