//! Override configuration for the wrapgen binding generator.
//!
//! This crate provides:
//! - The per-declaration override record schema (rename, ignore, buffer
//!   specs, template instantiation lists, ...), keyed by qualified name
//! - The type-caster table entry format
//! - `GeneratorData`, the lookup layer that resolves a declaration to its
//!   record and reports entries that were never authored
//!
//! Loading the configuration from disk is the caller's concern; every type
//! here derives `Deserialize` so any serde format works.

mod config;
mod lookup;

pub use config::{
    BufferMode, BufferSpec, CasterEntry, CasterTable, ClassConfig, EnumConfig, EnumValueConfig,
    FunctionConfig, ParamOverride, PropAccess, PropConfig, ReturnValuePolicy,
    TemplateInstanceConfig, WrapConfig,
};
pub use lookup::{GeneratorData, Reporter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_config() {
        let toml = r#"
strip_prefixes = ["WPI_"]
extra_includes = ["wpi/extra.h"]

[functions.getStatus]
rename = "get_status"

[functions.getStatus.params.status]
force_out = true

[classes.Robot]
is_polymorphic = true
ignored_bases = ["RobotSecret"]

[enums.Color]
value_prefix = "kColor"
        "#;

        let config: WrapConfig = toml::from_str(toml).expect("Failed to parse config");
        assert_eq!(config.strip_prefixes, vec!["WPI_".to_string()]);
        assert_eq!(
            config.functions["getStatus"].rename.as_deref(),
            Some("get_status")
        );
        assert!(config.functions["getStatus"].params["status"].force_out);
        assert!(config.classes["Robot"].is_polymorphic);
        assert_eq!(
            config.enums["Color"].value_prefix.as_deref(),
            Some("kColor")
        );
    }

    #[test]
    fn test_caster_table() {
        let toml = r#"
["units::second_t"]
header = "wpi_units.h"
typename = "units::second_t"
default_arg_cast = true
        "#;

        let table: CasterTable = toml::from_str(toml).expect("Failed to parse casters");
        let entry = &table["units::second_t"];
        assert_eq!(entry.header, "wpi_units.h");
        assert!(entry.default_arg_cast);
    }
}
