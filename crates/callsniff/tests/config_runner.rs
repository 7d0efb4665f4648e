//! Integration test: TOML configuration through to diagnostics.

use callsniff::{runner_from_toml, Severity};

const SOURCE: &str = r#"<?php
$rows = mysql_query($sql);
eval($code);
$db->exec("mysql_query()");
foreach (range(1, 3) as $i) {
    echo str_ireplace('a', 'b', $i);
}
"#;

#[test]
fn recommended_preset_by_default() {
    let runner = runner_from_toml("").expect("runner should build");
    let report = runner.check_source("index.php", SOURCE);

    let lines: Vec<String> = report.diagnostics.iter().map(ToString::to_string).collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    2:9: error [forbidden-functions.FoundWithAlternative] The use of function mysql_query() is forbidden; use PDO instead
    3:1: error [forbidden-functions.Found] The use of function eval() is forbidden
    5:10: error [forbidden-functions.FoundWithAlternative] The use of function range() is forbidden; use Iterator instead
    ");
    assert_eq!(report.count_by_severity(), (3, 0));
}

#[test]
fn advisory_preset() {
    let runner = runner_from_toml("preset = \"advisory\"").expect("runner should build");
    let report = runner.check_source("index.php", SOURCE);

    assert!(!report.has_errors());
    assert_eq!(report.count_by_severity(), (0, 3));
}

#[test]
fn configured_functions_replace_the_preset_list() {
    let runner = runner_from_toml(
        r#"
[rules.forbidden-functions]
error = false

[rules.forbidden-functions.functions]
eval = false
str_ireplace = "str_replace()"
"#,
    )
    .expect("runner should build");
    let report = runner.check_source("index.php", SOURCE);

    let codes: Vec<&str> = report.diagnostics.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, vec!["Discouraged", "DiscouragedWithAlternative"]);
    assert_eq!(
        report.diagnostics[1].message(),
        "The use of function str_ireplace() is discouraged; use str_replace() instead"
    );
}

#[test]
fn severity_override_wins_over_error_flag() {
    let runner = runner_from_toml(
        r#"
[rules.forbidden-functions]
severity = "warning"
error = true
"#,
    )
    .expect("runner should build");
    let report = runner.check_source("index.php", SOURCE);

    assert_eq!(report.diagnostics.len(), 3);
    assert!(report.diagnostics.iter().all(|d| d.severity == Severity::Warning));
}

#[test]
fn pattern_order_follows_the_config_file() {
    let runner = runner_from_toml(
        r#"
[rules.forbidden-functions]
pattern_match = true

[rules.forbidden-functions.functions]
"^str_" = "mb_* functions"
"replace$" = "preg_replace()"
"^mysql_" = "PDO"
"#,
    )
    .expect("runner should build");
    let report = runner.check_source("index.php", SOURCE);

    let args: Vec<&[String]> = report.diagnostics.iter().map(|d| d.args.as_slice()).collect();
    assert_eq!(args.len(), 2);
    assert_eq!(args[0], ["mysql_query", "PDO"]);
    assert_eq!(args[1], ["str_ireplace", "mb_* functions"]);
}

#[test]
fn case_variant_keys_name_one_function() {
    let runner = runner_from_toml(
        r#"
[rules.forbidden-functions.functions]
Mysql_Query = false
mysql_query = "PDO"
"#,
    )
    .expect("runner should build");
    let report = runner.check_source("index.php", SOURCE);

    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].code, "FoundWithAlternative");
}

#[test]
fn disabled_sniff_reports_nothing() {
    let runner = runner_from_toml(
        r"
[rules.forbidden-functions]
enabled = false
",
    )
    .expect("runner should build");

    assert_eq!(runner.sniff_count(), 0);
    assert!(runner.check_source("index.php", SOURCE).diagnostics.is_empty());
}

#[test]
fn invalid_alternative_is_rejected() {
    let err = runner_from_toml(
        r"
[rules.forbidden-functions.functions]
eval = 1
",
    )
    .err()
    .map(|e| e.to_string());

    assert_eq!(
        err.as_deref(),
        Some(
            "Invalid options for forbidden-functions: \
             Alternative for `eval` must be a string or false, found integer"
        )
    );
}

#[test]
fn malformed_toml_is_a_config_error() {
    let err = runner_from_toml("preset = ").err();
    assert!(matches!(err, Some(callsniff::SetupError::Config(_))));
}
