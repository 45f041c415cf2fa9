//! Config lookup and missing-entry reporting.

use crate::config::{ClassConfig, EnumConfig, FunctionConfig, PropConfig, WrapConfig};

/// Collects findings that don't abort a run: declarations with no authored
/// override record, and (in report-only mode) names that failed identifier
/// validation.
#[derive(Debug, Default)]
pub struct Reporter {
    missing: Vec<String>,
    invalid_names: Vec<String>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_missing(&mut self, key: impl Into<String>) {
        let key = key.into();
        if !self.missing.contains(&key) {
            self.missing.push(key);
        }
    }

    pub fn add_invalid_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.invalid_names.contains(&name) {
            self.invalid_names.push(name);
        }
    }

    /// Declaration keys that had no override record, in first-seen order.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Names that failed identifier validation, in first-seen order.
    pub fn invalid_names(&self) -> &[String] {
        &self.invalid_names
    }

    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.invalid_names.is_empty()
    }
}

/// Resolves declarations to their override records.
///
/// Lookups never fail: an absent record yields defaults and is noted in the
/// supplied [`Reporter`] so callers can report unaudited declarations.
#[derive(Debug)]
pub struct GeneratorData {
    config: WrapConfig,
}

impl GeneratorData {
    pub fn new(config: WrapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WrapConfig {
        &self.config
    }

    /// Override record for a free function, selected per-overload when the
    /// record carries overload entries.
    pub fn function_config(
        &self,
        name: &str,
        signature: &str,
        reporter: &mut Reporter,
    ) -> FunctionConfig {
        Self::select_function(self.config.functions.get(name), name, signature, reporter)
    }

    /// Override record for a class method. Missing records on private
    /// methods are not reported; they are looked up only for overload
    /// bookkeeping.
    pub fn method_config(
        &self,
        cls_key: &str,
        name: &str,
        signature: &str,
        is_private: bool,
        reporter: &mut Reporter,
    ) -> FunctionConfig {
        let base = self
            .config
            .classes
            .get(cls_key)
            .and_then(|c| c.methods.get(name));
        if is_private {
            let mut scratch = Reporter::new();
            Self::select_function(base, name, signature, &mut scratch)
        } else {
            let key = format!("{cls_key}::{name}");
            Self::select_function(base, &key, signature, reporter)
        }
    }

    fn select_function(
        base: Option<&FunctionConfig>,
        key: &str,
        signature: &str,
        reporter: &mut Reporter,
    ) -> FunctionConfig {
        match base {
            None => {
                reporter.add_missing(key);
                FunctionConfig::default()
            }
            Some(cfg) if !cfg.overloads.is_empty() => match cfg.overloads.get(signature) {
                Some(overload) => overload.clone(),
                None => {
                    reporter.add_missing(format!("{key}[{signature}]"));
                    cfg.clone()
                }
            },
            Some(cfg) => cfg.clone(),
        }
    }

    pub fn class_config(&self, key: &str, reporter: &mut Reporter) -> ClassConfig {
        match self.config.classes.get(key) {
            Some(cfg) => cfg.clone(),
            None => {
                reporter.add_missing(key);
                ClassConfig::default()
            }
        }
    }

    /// Override record for a header-scope enum. Anonymous enums have no
    /// lookup key and always wrap with defaults.
    pub fn enum_config(&self, name: Option<&str>, reporter: &mut Reporter) -> EnumConfig {
        let Some(name) = name else {
            return EnumConfig::default();
        };
        match self.config.enums.get(name) {
            Some(cfg) => cfg.clone(),
            None => {
                reporter.add_missing(name);
                EnumConfig::default()
            }
        }
    }

    pub fn class_enum_config(
        &self,
        cls_key: &str,
        name: Option<&str>,
        reporter: &mut Reporter,
    ) -> EnumConfig {
        let Some(name) = name else {
            return EnumConfig::default();
        };
        match self
            .config
            .classes
            .get(cls_key)
            .and_then(|c| c.enums.get(name))
        {
            Some(cfg) => cfg.clone(),
            None => {
                reporter.add_missing(format!("{cls_key}::{name}"));
                EnumConfig::default()
            }
        }
    }

    pub fn prop_config(&self, name: &str, reporter: &mut Reporter) -> PropConfig {
        match self.config.attributes.get(name) {
            Some(cfg) => cfg.clone(),
            None => {
                reporter.add_missing(name);
                PropConfig::default()
            }
        }
    }

    pub fn class_prop_config(
        &self,
        cls_key: &str,
        name: &str,
        reporter: &mut Reporter,
    ) -> PropConfig {
        match self
            .config
            .classes
            .get(cls_key)
            .and_then(|c| c.attributes.get(name))
        {
            Some(cfg) => cfg.clone(),
            None => {
                reporter.add_missing(format!("{cls_key}::{name}"));
                PropConfig::default()
            }
        }
    }
}
