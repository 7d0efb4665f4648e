//! Sniff presets for common configurations.

use crate::forbidden_functions::{ForbiddenFunctions, ForbiddenFunctionsBuilder, FunctionRule};
use callsniff_core::{Severity, SniffBox};

/// Removed `mysql_*` extension functions; all replaced by PDO.
const MYSQL_FUNCTIONS: &[&str] = &[
    "mysql_affected_rows",
    "mysql_client_encoding",
    "mysql_close",
    "mysql_connect",
    "mysql_create_db",
    "mysql_data_seek",
    "mysql_db_name",
    "mysql_db_query",
    "mysql_drop_db",
    "mysql_errno",
    "mysql_error",
    "mysql_escape_string",
    "mysql_fetch_array",
    "mysql_fetch_assoc",
    "mysql_fetch_field",
    "mysql_fetch_lengths",
    "mysql_fetch_object",
    "mysql_fetch_row",
    "mysql_field_flags",
    "mysql_field_len",
    "mysql_field_name",
    "mysql_field_seek",
    "mysql_field_table",
    "mysql_field_type",
    "mysql_free_result",
    "mysql_get_client_info",
    "mysql_get_host_info",
    "mysql_get_proto_info",
    "mysql_get_server_info",
    "mysql_info",
    "mysql_insert_id",
    "mysql_list_dbs",
    "mysql_list_fields",
    "mysql_list_processes",
    "mysql_list_tables",
    "mysql_num_fields",
    "mysql_num_rows",
    "mysql_pconnect",
    "mysql_ping",
    "mysql_query",
    "mysql_real_escape_string",
    "mysql_result",
    "mysql_select_db",
    "mysql_set_charset",
    "mysql_stat",
    "mysql_tablename",
    "mysql_thread_id",
    "mysql_unbuffered_query",
];

/// Other functions with a known replacement.
const REPLACED_FUNCTIONS: &[(&str, &str)] = &[
    ("range", "Iterator"),
    ("stripslashes", "filter_var()"),
    ("addslashes", "filter_var()"),
    ("ereg", "preg_match()"),
    ("ereg_replace", "preg_replace()"),
    ("eregi_replace", "preg_replace()"),
    ("quotemeta", "filter_var()"),
];

/// Functions that should not be used at all.
const BANNED_FUNCTIONS: &[&str] = &["eval", "phpinfo"];

/// Preset configurations for callsniff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// The default forbidden list, reported as errors.
    Recommended,
    /// The default forbidden list, reported as warnings.
    Advisory,
}

impl Preset {
    /// Looks up a preset by its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "advisory" => Some(Self::Advisory),
            _ => None,
        }
    }

    /// Returns a forbidden-functions builder preloaded for this preset.
    #[must_use]
    pub fn forbidden_functions(self) -> ForbiddenFunctionsBuilder {
        let severity = match self {
            Self::Recommended => Severity::Error,
            Self::Advisory => Severity::Warning,
        };
        ForbiddenFunctions::builder()
            .rules(default_forbidden_functions())
            .severity(severity)
    }

    /// Returns the sniffs for this preset.
    #[must_use]
    pub fn sniffs(self) -> Vec<SniffBox> {
        vec![Box::new(self.forbidden_functions().build())]
    }
}

/// Returns the default forbidden list.
#[must_use]
pub fn default_forbidden_functions() -> Vec<FunctionRule> {
    let banned = BANNED_FUNCTIONS.iter().map(|name| FunctionRule::new(*name));
    let replaced = REPLACED_FUNCTIONS
        .iter()
        .map(|(name, alternative)| FunctionRule::new(*name).with_alternative(*alternative));
    let mysql = MYSQL_FUNCTIONS
        .iter()
        .map(|name| FunctionRule::new(*name).with_alternative("PDO"));

    banned.chain(replaced).chain(mysql).collect()
}

/// Returns the recommended set of sniffs.
#[must_use]
pub fn recommended_sniffs() -> Vec<SniffBox> {
    Preset::Recommended.sniffs()
}

/// Returns the advisory set of sniffs.
#[must_use]
pub fn advisory_sniffs() -> Vec<SniffBox> {
    Preset::Advisory.sniffs()
}
