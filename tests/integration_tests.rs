//! Integration tests for the formkit CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const PROFILE_FORM: &str = r#"
title: Profile
inputs:
  badge: "[{{ label }}: {{ value }}]"
fields:
  - type: text
    name: name
    rules: { required: true }
    props: { label: Full Name }
  - type: number
    name: age
    props: { unit: years }
  - type: badge
    name: nickname
"#;

const SCHEMA_FORM: &str = r#"
title: Signup
schema:
  type: object
  properties:
    email: { type: string, title: Email, minLength: 3 }
    role: { enum: [admin, user] }
    newsletter: { type: boolean }
  required: [email]
"#;

const UNREGISTERED_FORM: &str = r#"
fields:
  - type: text
    name: name
  - type: email
    name: email
"#;

/// Helper to get a formkit command isolated from the caller's config
fn formkit() -> Command {
    let mut cmd = Command::cargo_bin("formkit").unwrap();
    cmd.env_remove("FORMKIT_LOG")
        .env_remove("FORMKIT_COLOR")
        .env_remove("FORMKIT_OUTPUT");
    cmd
}

/// Helper to write a file into the temp directory
fn write_file(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    formkit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("demo"));
}

#[test]
fn test_version_displays() {
    formkit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("formkit"));
}

#[test]
fn test_unknown_command_fails() {
    formkit()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// Inputs Command Tests
// ============================================================================

#[test]
fn test_inputs_lists_builtins() {
    formkit()
        .arg("inputs")
        .assert()
        .success()
        .stdout(predicate::str::contains("TAG"))
        .stdout(predicate::str::contains("checkbox"))
        .stdout(predicate::str::contains("select"))
        .stdout(predicate::str::contains("builtin"));
}

#[test]
fn test_inputs_includes_form_templates() {
    let tmp = TempDir::new().unwrap();
    let form = write_file(&tmp, "profile.yaml", PROFILE_FORM);

    formkit()
        .arg("inputs")
        .arg("--form")
        .arg(&form)
        .assert()
        .success()
        .stdout(predicate::str::contains("badge"))
        .stdout(predicate::str::contains("template"));
}

// ============================================================================
// Check Command Tests
// ============================================================================

#[test]
fn test_check_passes_when_all_tags_registered() {
    let tmp = TempDir::new().unwrap();
    let form = write_file(&tmp, "profile.yaml", PROFILE_FORM);

    formkit()
        .arg("check")
        .arg(&form)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 field(s)"));
}

#[test]
fn test_check_fails_naming_unregistered_tag() {
    let tmp = TempDir::new().unwrap();
    let form = write_file(&tmp, "broken.yaml", UNREGISTERED_FORM);

    formkit()
        .arg("check")
        .arg(&form)
        .assert()
        .failure()
        .stderr(predicate::str::contains("email"))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_check_rejects_invalid_pattern_rule() {
    let tmp = TempDir::new().unwrap();
    let form = write_file(
        &tmp,
        "pattern.yaml",
        "fields:\n  - type: text\n    name: code\n    rules: { pattern: \"(\" }\n",
    );

    formkit()
        .arg("check")
        .arg(&form)
        .assert()
        .failure()
        .stderr(predicate::str::contains("code"))
        .stderr(predicate::str::contains("invalid pattern"));
}

#[test]
fn test_check_missing_file_fails() {
    formkit()
        .args(["check", "does-not-exist.yaml"])
        .assert()
        .failure();
}

// ============================================================================
// Render Command Tests
// ============================================================================

#[test]
fn test_render_with_values() {
    let tmp = TempDir::new().unwrap();
    let form = write_file(&tmp, "profile.yaml", PROFILE_FORM);
    let values = write_file(&tmp, "values.yaml", "name: Ana\nage: 30\nnickname: ace\n");

    formkit()
        .arg("render")
        .arg(&form)
        .arg("--values")
        .arg(&values)
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile"))
        .stdout(predicate::str::contains("Full Name: [Ana]"))
        .stdout(predicate::str::contains("Age: <30> years"))
        .stdout(predicate::str::contains("[Nickname: ace]"));
}

#[test]
fn test_render_validate_shows_errors_and_fails() {
    let tmp = TempDir::new().unwrap();
    let form = write_file(&tmp, "profile.yaml", PROFILE_FORM);

    formkit()
        .arg("render")
        .arg(&form)
        .arg("--validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Required"))
        .stderr(predicate::str::contains("invalid field"));
}

#[test]
fn test_render_without_validate_shows_no_errors() {
    let tmp = TempDir::new().unwrap();
    let form = write_file(&tmp, "profile.yaml", PROFILE_FORM);

    formkit()
        .arg("render")
        .arg(&form)
        .assert()
        .success()
        .stdout(predicate::str::contains("Required").not());
}

#[test]
fn test_render_schema_derived_fields() {
    let tmp = TempDir::new().unwrap();
    let form = write_file(&tmp, "signup.yaml", SCHEMA_FORM);
    let values = write_file(&tmp, "values.json", r#"{"email": "a@b.c", "role": "user", "newsletter": true}"#);

    formkit()
        .arg("render")
        .arg(&form)
        .arg("--values")
        .arg(&values)
        .arg("--validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Email *: [a@b.c]"))
        .stdout(predicate::str::contains("(*) user"))
        .stdout(predicate::str::contains("[x] Newsletter"));
}

#[test]
fn test_render_rejects_non_mapping_values() {
    let tmp = TempDir::new().unwrap();
    let form = write_file(&tmp, "profile.yaml", PROFILE_FORM);
    let values = write_file(&tmp, "values.yaml", "- Ana\n");

    formkit()
        .arg("render")
        .arg(&form)
        .arg("--values")
        .arg(&values)
        .assert()
        .failure()
        .stderr(predicate::str::contains("mapping"));
}

#[test]
fn test_render_unregistered_tag_fails() {
    let tmp = TempDir::new().unwrap();
    let form = write_file(&tmp, "broken.yaml", UNREGISTERED_FORM);

    formkit()
        .arg("render")
        .arg(&form)
        .assert()
        .failure()
        .stderr(predicate::str::contains("email"));
}

// ============================================================================
// Fill Command Tests
// ============================================================================

#[test]
fn test_fill_checks_tags_before_prompting() {
    let tmp = TempDir::new().unwrap();
    let form = write_file(&tmp, "broken.yaml", UNREGISTERED_FORM);

    formkit()
        .arg("fill")
        .arg(&form)
        .assert()
        .failure()
        .stderr(predicate::str::contains("email"));
}

// ============================================================================
// Demo Command Tests
// ============================================================================

#[test]
fn test_demo_without_values_shows_errors() {
    formkit()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<input type="text" aaa=1 name="name" seila="" value=null>"#,
        ))
        .stdout(predicate::str::contains(r#"livro="aaa""#))
        .stdout(predicate::str::contains("<p>Required</p>"))
        .stdout(predicate::str::contains("submit blocked"));
}

#[test]
fn test_demo_with_values_submits() {
    let tmp = TempDir::new().unwrap();
    let values = write_file(&tmp, "values.yaml", "name: Ana\nage: 30\n");

    formkit()
        .arg("demo")
        .arg("--values")
        .arg(&values)
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>").not())
        .stdout(predicate::str::contains(r#""name": "Ana""#));
}

#[test]
fn test_demo_minimum_violation() {
    let tmp = TempDir::new().unwrap();
    let values = write_file(&tmp, "values.yaml", "name: Ana\nage: 0\n");

    formkit()
        .arg("demo")
        .arg("--values")
        .arg(&values)
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>Must be at least 1</p>"));
}

// ============================================================================
// Completions Tests
// ============================================================================

#[test]
fn test_completions_bash() {
    formkit()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("formkit"));
}
