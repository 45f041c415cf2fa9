//! Enum transformation.

use crate::context::{EnumContext, EnumeratorContext};
use crate::doc;
use crate::error::Result;
use crate::naming;
use crate::processor::Processor;
use wrapgen_config::EnumConfig;
use wrapgen_ir::EnumDecl;

impl<'a> Processor<'a> {
    /// Transform one enum into its binding context.
    ///
    /// `cpp_scope` is the enclosing scope prefix, `::`-terminated when
    /// non-empty. Anonymous enums wrap their values directly into the
    /// enclosing scope.
    pub(crate) fn transform_enum(
        &mut self,
        cpp_scope: &str,
        scope_var: &str,
        var_name: &str,
        decl: &EnumDecl,
        cfg: &EnumConfig,
    ) -> Result<EnumContext> {
        let (full_cpp_name, py_name) = match decl.name.as_deref() {
            Some(name) => {
                let py_name = naming::resolve_name(
                    name,
                    cfg.rename.as_deref(),
                    &self.gendata.config().strip_prefixes,
                    false,
                    self.report_only,
                    &mut self.reporter,
                )?;
                (format!("{cpp_scope}{name}"), py_name)
            }
            None => (String::new(), String::new()),
        };

        // Enumerator prefix stripping defaults to the enum's own name
        let value_prefix = cfg
            .value_prefix
            .as_deref()
            .or(decl.name.as_deref())
            .unwrap_or("");
        let value_strip = [format!("{value_prefix}_"), value_prefix.to_string()];

        let default_vcfg = wrapgen_config::EnumValueConfig::default();
        let mut values = Vec::with_capacity(decl.values.len());
        for value in &decl.values {
            let vcfg = cfg.values.get(&value.name).unwrap_or(&default_vcfg);
            let py_name = naming::resolve_name(
                &value.name,
                vcfg.rename.as_deref(),
                &value_strip,
                false,
                self.report_only,
                &mut self.reporter,
            )?;
            let cpp_name = if full_cpp_name.is_empty() {
                format!("{cpp_scope}{}", value.name)
            } else {
                format!("{full_cpp_name}::{}", value.name)
            };
            values.push(EnumeratorContext {
                cpp_name,
                py_name,
                doc: doc::process_doc(
                    value.doc.as_deref(),
                    vcfg.doc.as_deref(),
                    vcfg.doc_append.as_deref(),
                    "  ",
                ),
            });
        }

        Ok(EnumContext {
            scope_var: scope_var.to_string(),
            var_name: var_name.to_string(),
            full_cpp_name,
            py_name,
            values,
            doc: doc::process_doc(
                decl.doc.as_deref(),
                cfg.doc.as_deref(),
                cfg.doc_append.as_deref(),
                "",
            ),
        })
    }
}
