//! Recognised settings
//!
//! Every key the `settings` section may carry is declared once in [`SETTINGS`]
//! together with its default and the function that applies it to a
//! [`Configuration`]. Keys with no apply function (`vfsImpl`, `logImpl`) are
//! consumed by earlier pipeline stages.

use super::configuration::Configuration;
use super::registry::{builtin, ExtensionType, TypeKind};
use crate::adapters::TypeHandler;
use crate::domain::{BuildError, Properties, Result, UnknownSymbol};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Applies a setting value (already defaulted) to a configuration
pub type ApplyFn = fn(&mut Configuration, Option<&str>) -> Result<()>;

/// A recognised settings key
#[derive(Clone, Copy)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: Option<&'static str>,
    apply: Option<ApplyFn>,
}

impl SettingDef {
    /// Whether the key is applied by the settings stage (as opposed to an earlier stage)
    pub fn is_deferred(&self) -> bool {
        self.apply.is_some()
    }
}

macro_rules! setting {
    ($key:literal => consumed_early) => {
        SettingDef {
            key: $key,
            default: None,
            apply: None,
        }
    };
    ($key:literal = $default:expr => |$cfg:ident, $value:ident| $body:expr) => {
        SettingDef {
            key: $key,
            default: Some($default),
            apply: Some({
                fn apply($cfg: &mut Configuration, value: Option<&str>) -> Result<()> {
                    let $value = value.unwrap_or($default);
                    $body;
                    Ok(())
                }
                apply
            }),
        }
    };
    ($key:literal => |$cfg:ident, $value:ident| $body:expr) => {
        SettingDef {
            key: $key,
            default: None,
            apply: Some({
                fn apply($cfg: &mut Configuration, $value: Option<&str>) -> Result<()> {
                    $body;
                    Ok(())
                }
                apply
            }),
        }
    };
}

pub const SETTINGS: &[SettingDef] = &[
    setting!("autoMappingBehavior" = "PARTIAL" => |c, v| {
        c.settings.auto_mapping_behavior = symbol("autoMappingBehavior", v)?
    }),
    setting!("autoMappingUnknownColumnBehavior" = "NONE" => |c, v| {
        c.settings.auto_mapping_unknown_column_behavior =
            symbol("autoMappingUnknownColumnBehavior", v)?
    }),
    setting!("cacheEnabled" = "true" => |c, v| {
        c.settings.cache_enabled = flag("cacheEnabled", v)?
    }),
    setting!("lazyLoadingEnabled" = "false" => |c, v| {
        c.settings.lazy_loading_enabled = flag("lazyLoadingEnabled", v)?
    }),
    setting!("aggressiveLazyLoading" = "false" => |c, v| {
        c.settings.aggressive_lazy_loading = flag("aggressiveLazyLoading", v)?
    }),
    setting!("multipleResultSetsEnabled" = "true" => |c, v| {
        c.settings.multiple_result_sets_enabled = flag("multipleResultSetsEnabled", v)?
    }),
    setting!("useColumnLabel" = "true" => |c, v| {
        c.settings.use_column_label = flag("useColumnLabel", v)?
    }),
    setting!("useGeneratedKeys" = "false" => |c, v| {
        c.settings.use_generated_keys = flag("useGeneratedKeys", v)?
    }),
    setting!("defaultExecutorType" = "SIMPLE" => |c, v| {
        c.settings.default_executor_type = symbol("defaultExecutorType", v)?
    }),
    setting!("defaultStatementTimeout" => |c, v| {
        c.settings.default_statement_timeout =
            v.map(|v| count("defaultStatementTimeout", v)).transpose()?
    }),
    setting!("defaultFetchSize" => |c, v| {
        c.settings.default_fetch_size = v.map(|v| count("defaultFetchSize", v)).transpose()?
    }),
    setting!("defaultResultSetType" => |c, v| {
        c.settings.default_result_set_type =
            v.map(|v| symbol("defaultResultSetType", v)).transpose()?
    }),
    setting!("mapUnderscoreToCamelCase" = "false" => |c, v| {
        c.settings.map_underscore_to_camel_case = flag("mapUnderscoreToCamelCase", v)?
    }),
    setting!("safeRowBoundsEnabled" = "false" => |c, v| {
        c.settings.safe_row_bounds_enabled = flag("safeRowBoundsEnabled", v)?
    }),
    setting!("localCacheScope" = "SESSION" => |c, v| {
        c.settings.local_cache_scope = symbol("localCacheScope", v)?
    }),
    setting!("jdbcTypeForNull" = "OTHER" => |c, v| {
        c.settings.jdbc_type_for_null = symbol("jdbcTypeForNull", v)?
    }),
    setting!("lazyLoadTriggerMethods" = "equals,clone,hashCode,toString" => |c, v| {
        c.settings.lazy_load_trigger_methods = method_set(v)
    }),
    setting!("safeResultHandlerEnabled" = "true" => |c, v| {
        c.settings.safe_result_handler_enabled = flag("safeResultHandlerEnabled", v)?
    }),
    setting!("defaultScriptingLanguage" = "XML" => |c, v| {
        c.settings.default_scripting_language = language_driver(c, v)?
    }),
    setting!("defaultEnumTypeHandler" = builtin::ENUM_TYPE_HANDLER => |c, v| {
        let handler = enum_type_handler(c, v)?;
        c.type_handlers_mut().set_default_enum_handler(handler)
    }),
    setting!("callSettersOnNulls" = "false" => |c, v| {
        c.settings.call_setters_on_nulls = flag("callSettersOnNulls", v)?
    }),
    setting!("useActualParamName" = "true" => |c, v| {
        c.settings.use_actual_param_name = flag("useActualParamName", v)?
    }),
    setting!("returnInstanceForEmptyRow" = "false" => |c, v| {
        c.settings.return_instance_for_empty_row = flag("returnInstanceForEmptyRow", v)?
    }),
    setting!("logPrefix" => |c, v| c.settings.log_prefix = v.map(str::to_string)),
    setting!("vfsImpl" => consumed_early),
    setting!("logImpl" => consumed_early),
];

/// Looks up a recognised key
pub fn find(key: &str) -> Option<&'static SettingDef> {
    SETTINGS.iter().find(|def| def.key == key)
}

/// Fails on the first key that is not recognised
pub fn validate(settings: &Properties) -> Result<()> {
    match settings.keys().find(|key| find(key).is_none()) {
        Some(key) => Err(BuildError::UnknownSetting {
            key: key.to_string(),
        }),
        None => Ok(()),
    }
}

/// Applies every deferred setting, substituting defaults for absent keys
pub fn apply_all(configuration: &mut Configuration, settings: &Properties) -> Result<()> {
    for def in SETTINGS {
        if let Some(apply) = def.apply {
            apply(configuration, settings.get(def.key))?;
        }
    }
    Ok(())
}

fn invalid(key: &str, value: &str, reason: impl fmt::Display) -> BuildError {
    BuildError::InvalidSettingValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(key, value, "expected true or false")),
    }
}

fn count(key: &str, value: &str) -> Result<u32> {
    value.trim().parse().map_err(|e| invalid(key, value, e))
}

fn symbol<T: FromStr<Err = UnknownSymbol>>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|e| invalid(key, value, e))
}

fn method_set(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|method| !method.is_empty())
        .map(String::from)
        .collect()
}

fn language_driver(configuration: &Configuration, value: &str) -> Result<String> {
    let descriptor = configuration.resolver().resolve(value)?;
    match descriptor.kind() {
        TypeKind::LanguageDriver => Ok(descriptor.name().to_string()),
        other => Err(invalid(
            "defaultScriptingLanguage",
            value,
            format!("expected a language driver, found a {}", other.label()),
        )),
    }
}

fn enum_type_handler(configuration: &Configuration, value: &str) -> Result<String> {
    let descriptor = configuration.resolver().resolve(value)?;
    if <dyn TypeHandler>::factory(descriptor.kind()).is_none() {
        return Err(invalid(
            "defaultEnumTypeHandler",
            value,
            format!("expected a type handler, found a {}", descriptor.kind().label()),
        ));
    }
    Ok(descriptor.name().to_string())
}
