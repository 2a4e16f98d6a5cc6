//! Static field table binding each [`Config`] field to its environment
//! variable suffix, debug label, and value kind.
//!
//! Every namespace pass walks [`FIELDS`]; only the prefix in front of the
//! suffix changes between passes.

use thiserror::Error;

use super::loader::Config;

/// Why a raw environment string could not be stored in a field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoerceError {
    #[error("converting '{0}' to type bool")]
    InvalidBool(String),

    #[error("value is not valid unicode")]
    NotUnicode,
}

/// Read-only view of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    Text(&'a str),
    Flag(bool),
    List(&'a [String]),
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::Text(s)
    }
}

impl<'a> From<&'a bool> for Value<'a> {
    fn from(b: &'a bool) -> Self {
        Value::Flag(*b)
    }
}

impl<'a> From<&'a Vec<String>> for Value<'a> {
    fn from(items: &'a Vec<String>) -> Self {
        Value::List(items)
    }
}

/// Writable handle to a field.
pub enum Slot<'a> {
    Text(&'a mut String),
    Flag(&'a mut bool),
    List(&'a mut Vec<String>),
}

impl Slot<'_> {
    /// Parse `raw` according to the field's kind and overwrite the field.
    pub fn assign(self, raw: String) -> Result<(), CoerceError> {
        match self {
            Slot::Text(s) => *s = raw,
            Slot::Flag(b) => *b = parse_bool(&raw)?,
            Slot::List(items) => *items = split_list(&raw),
        }
        Ok(())
    }
}

/// One row of the field table.
pub struct FieldSpec {
    /// Name used in the debug dump.
    pub label: &'static str,
    /// Variable name without any namespace prefix.
    pub suffix: &'static str,
    /// Whether the value must be hidden in the debug dump.
    pub sensitive: bool,
    pub get: for<'a> fn(&'a Config) -> Value<'a>,
    pub slot: for<'a> fn(&'a mut Config) -> Slot<'a>,
}

macro_rules! field_table {
    ($( $label:literal => $suffix:literal, $field:ident : $kind:ident, $sensitive:literal; )*) => {
        /// All environment-backed fields, in declaration order.
        pub static FIELDS: &[FieldSpec] = &[
            $(
                FieldSpec {
                    label: $label,
                    suffix: $suffix,
                    sensitive: $sensitive,
                    get: |c| Value::from(&c.$field),
                    slot: |c| Slot::$kind(&mut c.$field),
                },
            )*
        ];
    };
}

field_table! {
    "Command"            => "HELM_COMMAND",           command: Text, false;
    "DroneEvent"         => "DRONE_BUILD_EVENT",      drone_event: Text, false;
    "UpdateDependencies" => "UPDATE_DEPENDENCIES",    update_dependencies: Flag, false;
    "AddRepos"           => "HELM_REPOS",             add_repos: List, false;
    "Prefix"             => "PREFIX",                 prefix: Text, false;
    "Debug"              => "DEBUG",                  debug: Flag, false;
    "Values"             => "VALUES",                 values: Text, false;
    "StringValues"       => "STRING_VALUES",          string_values: Text, false;
    "ValuesFiles"        => "VALUES_FILES",           values_files: List, false;
    "Namespace"          => "NAMESPACE",              namespace: Text, false;
    "KubeToken"          => "KUBERNETES_TOKEN",       kube_token: Text, true;
    "SkipTLSVerify"      => "SKIP_TLS_VERIFY",        skip_tls_verify: Flag, false;
    "Certificate"        => "KUBERNETES_CERTIFICATE", certificate: Text, false;
    "APIServer"          => "API_SERVER",             api_server: Text, false;
    "ServiceAccount"     => "SERVICE_ACCOUNT",        service_account: Text, false;
    "ChartVersion"       => "CHART_VERSION",          chart_version: Text, false;
    "DryRun"             => "DRY_RUN",                dry_run: Flag, false;
    "Wait"               => "WAIT",                   wait: Flag, false;
    "ReuseValues"        => "REUSE_VALUES",           reuse_values: Flag, false;
    "Timeout"            => "TIMEOUT",                timeout: Text, false;
    "Chart"              => "CHART",                  chart: Text, false;
    "Release"            => "RELEASE",                release: Text, false;
    "Force"              => "FORCE",                  force: Flag, false;
}

/// Accepts `1`, `t`, `true`, `0`, `f`, `false` in any case.
pub fn parse_bool(raw: &str) -> Result<bool, CoerceError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Ok(true),
        "0" | "f" | "false" => Ok(false),
        _ => Err(CoerceError::InvalidBool(raw.to_string())),
    }
}

/// Comma-separated list; blank input is an empty list. Items are kept as-is.
pub fn split_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(str::to_string).collect()
}
