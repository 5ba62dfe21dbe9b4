//! Developer tasks (schema generation, conformance checks).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// Get the schemas directory path.
fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

/// Get the test fixtures directory path.
fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(trendguard_types::TrendguardReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(trendguard_settings::TrendguardConfigV1)
}

/// List of schemas to generate.
fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "trendguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "trendguard.config.v1.json",
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

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
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

/// Validate every golden `expected.report.json` under tests/fixtures against the report schema.
fn conform() -> anyhow::Result<()> {
    let schema_value = serde_json::to_value(generate_report_schema())
        .context("Failed to convert report schema to JSON")?;
    let compiled = jsonschema::draft7::new(&schema_value)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))?;

    let mut goldens = Vec::new();
    collect_goldens(&fixtures_dir(), &mut goldens)?;
    goldens.sort();
    if goldens.is_empty() {
        bail!("no expected.report.json files under {}", fixtures_dir().display());
    }

    let mut errors = Vec::new();
    for path in &goldens {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        for err in compiled.iter_errors(&value) {
            errors.push(format!("{}: {} at {}", path.display(), err, err.instance_path()));
        }
        println!("checked {}", path.display());
    }

    if errors.is_empty() {
        println!("\n✓ {} golden reports conform", goldens.len());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!("Conformance failed with {} errors", errors.len())
    }
}

fn collect_goldens(dir: &Path, out: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            collect_goldens(&path, out)?;
        } else if path.file_name().is_some_and(|n| n == "expected.report.json") {
            out.push(path);
        }
    }
    Ok(())
}

/// Validate that all check IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    use trendguard_types::explain;

    let check_ids = explain::all_check_ids();
    let codes = explain::all_codes();
    let mut errors = Vec::new();

    for id in check_ids.iter().chain(codes) {
        match explain::lookup_explanation(id) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("'{}' has empty title", id));
                }
                if exp.description.is_empty() {
                    errors.push(format!("'{}' has empty description", id));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("'{}' has empty remediation", id));
                }
            }
            None => errors.push(format!("'{}' has no explanation", id)),
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", check_ids.len());
        println!("✓ {} codes have explanations", codes.len());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!("Explain coverage validation failed with {} errors", errors.len())
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate golden fixture reports against the report schema");
    eprintln!("  explain-coverage  Validate all check IDs and codes have explanations");
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
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
