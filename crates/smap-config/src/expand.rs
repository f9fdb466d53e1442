//! `${VAR}` expansion for path-valued settings such as `store.snapshot`.

use std::env::VarError;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a configured path.
///
/// Values without `${` are returned untouched. An unset variable without a
/// default is an error naming `field`.
pub(crate) fn expand_path(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let expanded = shellexpand::env_with_context(value, |name| std::env::var(name).map(Some))
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} {}", e.var_name, describe(&e.cause)),
        })?;
    Ok(expanded.into_owned())
}

fn describe(cause: &VarError) -> &'static str {
    match cause {
        VarError::NotPresent => "not set",
        VarError::NotUnicode(_) => "is not valid unicode",
    }
}
