//! Developer tasks (schema generation, fixture conformance, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::PathBuf;

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            // Fallback: assume we're in xtask dir or use current dir
            std::env::current_dir().expect("Cannot determine current directory")
        });

    // If we're in the xtask directory, go up one level
    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .expect("xtask has no parent")
            .to_path_buf()
    } else {
        manifest_dir
    }
}

/// Get the schemas directory path.
fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

/// Get the tests/fixtures directory path.
fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

/// Generate the result envelope schema.
fn generate_result_schema() -> schemars::Schema {
    schema_for!(regelguard_types::ResultEnvelope)
}

/// Generate the subsumsjon audit record schema.
fn generate_audit_schema() -> schemars::Schema {
    schema_for!(regelguard_types::AuditRecord)
}

/// Generate the RegelguardConfigV1 schema.
fn generate_config_schema() -> schemars::Schema {
    schema_for!(regelguard_settings::RegelguardConfigV1)
}

/// List of schemas to generate.
fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "regelguard.result.v1.json",
            generate: generate_result_schema,
        },
        SchemaSpec {
            filename: "regelguard.subsumsjon.v1.json",
            generate: generate_audit_schema,
        },
        SchemaSpec {
            filename: "regelguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Compile a generated schema into a validator.
fn compile_schema(spec: &SchemaSpec) -> anyhow::Result<jsonschema::Validator> {
    let schema = (spec.generate)();
    let schema_value = serde_json::to_value(&schema).context("Failed to convert schema to JSON")?;
    jsonschema::validator_for(&schema_value)
        .map_err(|e| anyhow::anyhow!("Failed to compile {}: {}", spec.filename, e))
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();

    // Ensure schemas directory exists
    if !dir.exists() {
        fs::create_dir_all(&dir).context("Failed to create schemas directory")?;
    }

    for spec in schema_specs() {
        let schema = (spec.generate)();
        let json = serialize_schema(&schema)?;
        let path = dir.join(spec.filename);

        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;

        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
/// Returns Ok(()) if all schemas match, Err otherwise.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut all_match = true;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);

        if !path.exists() {
            missing.push(spec.filename);
            all_match = false;
            continue;
        }

        let schema = (spec.generate)();
        let expected = serialize_schema(&schema)?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        if expected != actual {
            mismatched.push(spec.filename);
            all_match = false;
        }
    }

    if all_match {
        println!("All schemas are up to date.");
        Ok(())
    } else {
        if !missing.is_empty() {
            eprintln!("Missing schemas:");
            for name in &missing {
                eprintln!("  - {}", name);
            }
        }
        if !mismatched.is_empty() {
            eprintln!("Schemas out of date:");
            for name in &mismatched {
                eprintln!("  - {}", name);
            }
        }
        eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
        bail!("Schema validation failed")
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate fixture goldens against the result and subsumsjon schemas");
    eprintln!("  conform-full      Full conformance: fixture goldens + regelguard output validation");
    eprintln!("  explain-coverage  Validate all tree keys and rule tags have explanations");
}

/// Rule tags are SCREAMING_SNAKE_CASE.
fn is_valid_tag(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Fingerprints are lowercase hex SHA-256 digests.
fn is_hex_fingerprint(s: &str) -> bool {
    s.len() == 64
        && s.chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

/// Collect the fixture directories under tests/fixtures/.
/// A fixture is any directory carrying a certificate.json.
fn fixture_dirs() -> anyhow::Result<Vec<PathBuf>> {
    let dir = fixtures_dir();
    if !dir.exists() {
        bail!(
            "tests/fixtures/ not found at {}\n\n\
            Create test fixtures first.",
            dir.display()
        );
    }

    let mut dirs = Vec::new();
    for entry in fs::read_dir(&dir).context("Failed to read tests/fixtures/")? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() && path.join("certificate.json").exists() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn fixture_name(dir: &std::path::Path) -> String {
    dir.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Validate fixture goldens against the generated schemas.
///
/// This checks:
/// 1. Schema validation: expected.result.json validates against
///    regelguard.result.v1, expected.audit.ndjson records against
///    regelguard.subsumsjon.v1
/// 2. Tag hygiene: rule_hits[].rule_name is a known tag and fingerprints
///    are sha256 hex digests
/// 3. Record hygiene: audit records carry the subsumsjon event name and version
/// 4. Config hygiene: any fixture regelguard.toml parses and resolves
fn conform() -> anyhow::Result<()> {
    let specs = schema_specs();
    let result_validator = compile_schema(&specs[0])?;
    let audit_validator = compile_schema(&specs[1])?;

    println!("✓ regelguard.result.v1 schema compiles");
    println!("✓ regelguard.subsumsjon.v1 schema compiles");

    let known_tags = regelguard_types::explain::all_tags();
    let mut fixture_count = 0;
    let mut errors = Vec::new();

    for dir in fixture_dirs()? {
        let name = fixture_name(&dir);

        let result_path = dir.join("expected.result.json");
        if !result_path.exists() {
            errors.push(format!("{}: missing expected.result.json", name));
            continue;
        }

        let content = fs::read_to_string(&result_path)
            .with_context(|| format!("Failed to read {}/expected.result.json", name))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}/expected.result.json", name))?;

        // 1. Schema validation
        for err in result_validator.iter_errors(&value) {
            errors.push(format!("{}: result schema: {}", name, err));
        }

        // 2. Tag hygiene
        if let Some(hits) = value
            .get("result")
            .and_then(|v| v.get("rule_hits"))
            .and_then(|v| v.as_array())
        {
            for (i, hit) in hits.iter().enumerate() {
                if let Some(tag) = hit.get("rule_name").and_then(|v| v.as_str()) {
                    if !known_tags.contains(&tag) {
                        errors.push(format!(
                            "{}: rule_hits[{}].rule_name '{}' is not a known tag",
                            name, i, tag
                        ));
                    }
                }
                if let Some(fp) = hit.get("fingerprint").and_then(|v| v.as_str()) {
                    if !is_hex_fingerprint(fp) {
                        errors.push(format!(
                            "{}: rule_hits[{}].fingerprint '{}' is not a sha256 hex digest",
                            name, i, fp
                        ));
                    }
                }
            }
        }

        // 3. Audit golden, when the fixture has one
        let audit_path = dir.join("expected.audit.ndjson");
        if audit_path.exists() {
            let audit_text = fs::read_to_string(&audit_path)
                .with_context(|| format!("Failed to read {}/expected.audit.ndjson", name))?;
            for (i, line) in audit_text
                .lines()
                .filter(|l| !l.trim().is_empty())
                .enumerate()
            {
                let record: serde_json::Value = serde_json::from_str(line).with_context(|| {
                    format!(
                        "Failed to parse {}/expected.audit.ndjson line {}",
                        name,
                        i + 1
                    )
                })?;
                for err in audit_validator.iter_errors(&record) {
                    errors.push(format!("{}: audit record[{}]: {}", name, i, err));
                }
                if record.get("event_name").and_then(|v| v.as_str())
                    != Some(regelguard_types::AUDIT_EVENT_NAME)
                {
                    errors.push(format!(
                        "{}: audit record[{}] is not a subsumsjon event",
                        name, i
                    ));
                }
                if record.get("version").and_then(|v| v.as_str())
                    != Some(regelguard_types::AUDIT_EVENT_VERSION)
                {
                    errors.push(format!(
                        "{}: audit record[{}] has the wrong event version",
                        name, i
                    ));
                }
            }
        }

        // 4. Fixture config, when present
        let config_path = dir.join("regelguard.toml");
        if config_path.exists() {
            let config_text = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}/regelguard.toml", name))?;
            let resolved = regelguard_settings::parse_config_toml(&config_text).and_then(|cfg| {
                regelguard_settings::resolve_config(cfg, regelguard_settings::Overrides::default())
            });
            if let Err(e) = resolved {
                errors.push(format!("{}: regelguard.toml does not resolve: {:#}", name, e));
            }
        }

        fixture_count += 1;
        println!("  ✓ {} validates", name);
    }

    if fixture_count == 0 {
        bail!("No fixtures found in {}", fixtures_dir().display());
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {} fixtures pass conformance checks!", fixture_count);
    Ok(())
}

/// Full conformance: fixture goldens + regelguard binary output validation.
///
/// This extends `conform()` by also:
/// 1. Running the built regelguard binary on every fixture
/// 2. Validating the produced artifacts against the generated schemas
/// 3. Comparing against golden files (id/version/timestamp-normalized)
fn conform_full() -> anyhow::Result<()> {
    // First run the basic conformance checks
    conform()?;

    println!("\n--- Full conformance: regelguard binary output ---\n");

    let specs = schema_specs();
    let result_validator = compile_schema(&specs[0])?;
    let audit_validator = compile_schema(&specs[1])?;

    // Find the regelguard binary
    let regelguard_bin = project_root()
        .join("target")
        .join("debug")
        .join("regelguard");

    #[cfg(target_os = "windows")]
    let regelguard_bin = regelguard_bin.with_extension("exe");

    if !regelguard_bin.exists() {
        bail!(
            "regelguard binary not found at {}.\n\
            Run `cargo build -p regelguard-cli` first.",
            regelguard_bin.display()
        );
    }

    let mut errors = Vec::new();

    for dir in fixture_dirs()? {
        let name = fixture_name(&dir);

        let golden_content = fs::read_to_string(dir.join("expected.result.json"))?;
        let golden_value: serde_json::Value = serde_json::from_str(&golden_content)?;
        let expected_code = match golden_value
            .pointer("/result/status")
            .and_then(|v| v.as_str())
        {
            Some("INVALID") => 2,
            _ => 0,
        };

        let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let result_out = temp_dir.path().join("result.json");
        let audit_out = temp_dir.path().join("audit.ndjson");

        // A missing fixture config is fine; the CLI falls back to preset defaults.
        let output = std::process::Command::new(&regelguard_bin)
            .args([
                "--config",
                dir.join("regelguard.toml").to_str().unwrap_or_default(),
                "validate",
                "--certificate",
                dir.join("certificate.json").to_str().unwrap_or_default(),
                "--metadata",
                dir.join("metadata.json").to_str().unwrap_or_default(),
                "--result-out",
                result_out.to_str().unwrap_or_default(),
                "--audit-out",
                audit_out.to_str().unwrap_or_default(),
            ])
            .output()
            .with_context(|| format!("Failed to run regelguard on fixture '{}'", name))?;

        if output.status.code() != Some(expected_code) {
            errors.push(format!(
                "fixture '{}': regelguard exited with {:?}, expected {}: {}",
                name,
                output.status.code(),
                expected_code,
                String::from_utf8_lossy(&output.stderr)
            ));
            continue;
        }

        if !result_out.exists() {
            errors.push(format!("fixture '{}': no result output generated", name));
            continue;
        }

        let result_content = fs::read_to_string(&result_out)?;
        let result_value: serde_json::Value = serde_json::from_str(&result_content)
            .with_context(|| format!("Failed to parse result for fixture '{}'", name))?;

        for err in result_validator.iter_errors(&result_value) {
            errors.push(format!("fixture '{}': result schema: {}", name, err));
        }

        let normalized = regelguard_test_util::normalize_nondeterministic(result_value);
        let normalized_golden = regelguard_test_util::normalize_nondeterministic(golden_value);
        if normalized != normalized_golden {
            errors.push(format!(
                "fixture '{}': output differs from golden file expected.result.json",
                name
            ));
        } else {
            println!("  ✓ fixture '{}' matches golden result", name);
        }

        // Audit artifact: compare against the golden when one exists,
        // otherwise schema-validate whatever was produced.
        let audit_golden_path = dir.join("expected.audit.ndjson");
        if audit_golden_path.exists() {
            if !audit_out.exists() {
                errors.push(format!(
                    "fixture '{}': no audit output generated but a golden exists",
                    name
                ));
                continue;
            }
            let actual = regelguard_test_util::normalize_ndjson(&fs::read_to_string(&audit_out)?)
                .with_context(|| format!("Failed to parse audit output for fixture '{}'", name))?;
            let golden =
                regelguard_test_util::normalize_ndjson(&fs::read_to_string(&audit_golden_path)?)?;
            if actual != golden {
                errors.push(format!(
                    "fixture '{}': audit output differs from golden file expected.audit.ndjson",
                    name
                ));
            } else {
                println!("  ✓ fixture '{}' matches golden audit records", name);
            }
        } else if audit_out.exists() {
            let audit_text = fs::read_to_string(&audit_out)?;
            for (i, line) in audit_text
                .lines()
                .filter(|l| !l.trim().is_empty())
                .enumerate()
            {
                let record: serde_json::Value = serde_json::from_str(line)?;
                for err in audit_validator.iter_errors(&record) {
                    errors.push(format!("fixture '{}': audit record[{}]: {}", name, i, err));
                }
            }
        }
    }

    if !errors.is_empty() {
        eprintln!("\nFull conformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!(
            "Full conformance validation failed with {} errors",
            errors.len()
        );
    }

    println!("\n✓ Full conformance checks passed!");
    Ok(())
}

/// Validate that all tree keys and rule tags have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let tree_keys = regelguard_types::explain::all_tree_keys();
    let tags = regelguard_types::explain::all_tags();

    let mut errors = Vec::new();

    // Validate tree keys
    for key in tree_keys {
        if !key.contains('.') {
            errors.push(format!("Tree key '{}' is not dotted", key));
        }
        match regelguard_types::explain::lookup_explanation(key) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Tree key '{}' has empty title", key));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Tree key '{}' has empty description", key));
                }
                if exp.guidance.is_empty() {
                    errors.push(format!("Tree key '{}' has empty guidance", key));
                }
            }
            None => {
                errors.push(format!("Tree key '{}' has no explanation", key));
            }
        }
    }

    // Validate rule tags
    for tag in tags {
        if !is_valid_tag(tag) {
            errors.push(format!("Tag '{}' is not SCREAMING_SNAKE_CASE", tag));
        }
        match regelguard_types::explain::lookup_explanation(tag) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Tag '{}' has empty title", tag));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Tag '{}' has empty description", tag));
                }
                if exp.guidance.is_empty() {
                    errors.push(format!("Tag '{}' has empty guidance", tag));
                }
            }
            None => {
                errors.push(format!("Tag '{}' has no explanation", tag));
            }
        }
    }

    if errors.is_empty() {
        println!("✓ {} tree keys have explanations", tree_keys.len());
        println!("✓ {} rule tags have explanations", tags.len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "conform-full" => conform_full(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            // List all schema IDs for reference
            for spec in schema_specs() {
                let name = spec.filename.trim_end_matches(".json");
                println!("{}", name);
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
