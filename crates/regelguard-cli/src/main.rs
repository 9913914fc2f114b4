//! CLI entry point for regelguard.
//!
//! This module is intentionally thin: it handles argument parsing, file I/O,
//! and exit codes. All business logic lives in the `regelguard-app` crate.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use regelguard_app::{
    audit_records_ndjson, format_explanation, format_not_found, format_summary, run_explain,
    run_validate, serialize_result, verdict_exit_code, ExplainOutput, ValidateInput,
};
use regelguard_settings::Overrides;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "regelguard",
    version,
    about = "Rule-tree validation for sick-leave certificates"
)]
struct Cli {
    /// Path to regelguard config TOML.
    #[arg(long, default_value = "regelguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (standard|dryrun).
    #[arg(long)]
    profile: Option<String>,

    /// Force subsumsjon record emission on or off.
    #[arg(long)]
    audit: Option<bool>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a certificate against every enabled rule tree and write artifacts.
    Validate {
        /// Path to the decoded certificate JSON.
        #[arg(long)]
        certificate: Utf8PathBuf,

        /// Path to the rule metadata JSON (registry extract: birth date,
        /// suspension status, prior certificates). Omit to run without
        /// registry data.
        #[arg(long)]
        metadata: Option<Utf8PathBuf>,

        /// Where to write the JSON result envelope.
        #[arg(long, default_value = "artifacts/regelguard/result.json")]
        result_out: Utf8PathBuf,

        /// Where to write subsumsjon records as NDJSON. Not written when
        /// audit emission is off.
        #[arg(long, default_value = "artifacts/regelguard/audit.ndjson")]
        audit_out: Utf8PathBuf,
    },

    /// Explain a rule tree key or rule tag with statutory guidance.
    Explain {
        /// The tree key (e.g., "sykmelding.tilbakedatering") or rule tag
        /// (e.g., "TILBAKEDATERT_MER_ENN_3_AR") to explain.
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging goes to stderr; RUST_LOG overrides the default filter.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(config = %cli.config, "regelguard starting");

    match cli.cmd {
        Commands::Validate {
            ref certificate,
            ref metadata,
            ref result_out,
            ref audit_out,
        } => cmd_validate(
            &cli,
            certificate.clone(),
            metadata.clone(),
            result_out.clone(),
            audit_out.clone(),
        ),
        Commands::Explain { identifier } => cmd_explain(&identifier),
    }
}

fn cmd_validate(
    cli: &Cli,
    certificate: Utf8PathBuf,
    metadata: Option<Utf8PathBuf>,
    result_out: Utf8PathBuf,
    audit_out: Utf8PathBuf,
) -> anyhow::Result<()> {
    let certificate_json = std::fs::read_to_string(&certificate)
        .with_context(|| format!("read certificate: {certificate}"))?;

    let metadata_json = match &metadata {
        Some(path) => {
            Some(std::fs::read_to_string(path).with_context(|| format!("read metadata: {path}"))?)
        }
        None => None,
    };

    // Load config if present; missing file is allowed (preset defaults apply).
    let config_text = std::fs::read_to_string(&cli.config).unwrap_or_default();

    let overrides = Overrides {
        profile: cli.profile.clone(),
        audit: cli.audit,
    };

    let input = ValidateInput {
        certificate_json: &certificate_json,
        metadata_json: metadata_json.as_deref(),
        config_text: &config_text,
        overrides,
        now: None,
    };

    let output = run_validate(input)?;

    let result_bytes = serialize_result(&output.envelope)?;
    write_bytes_file(&result_out, &result_bytes).context("write result json")?;

    if output.resolved_config.effective.audit.enabled {
        let ndjson = audit_records_ndjson(&output.audit_records)?;
        write_bytes_file(&audit_out, &ndjson).context("write audit ndjson")?;
    }

    print!("{}", format_summary(&output));

    let code = verdict_exit_code(output.envelope.result.status);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn write_bytes_file(path: &camino::Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, data).with_context(|| format!("write file: {}", path))?;
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_tree_keys,
            available_tags,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_tree_keys, available_tags)
            );
            std::process::exit(1);
        }
    }
}
