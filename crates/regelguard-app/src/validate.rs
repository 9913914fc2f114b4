//! The `validate` use case: evaluate every rule tree and produce the
//! result envelope plus audit records.

use anyhow::Context;
use regelguard_audit::{publish_all, to_audit_records, NdjsonWriter};
use regelguard_domain::model::{RuleMetadata, Sykmelding};
use regelguard_domain::{run_all, trees, LogTrace};
use regelguard_settings::{Overrides, ResolvedConfig};
use regelguard_types::{
    AuditRecord, ResultEnvelope, RunSummary, ToolMeta, Verdict, SCHEMA_RESULT_V1,
};
use time::OffsetDateTime;

/// Input for the validate use case.
#[derive(Clone, Debug)]
pub struct ValidateInput<'a> {
    /// Certificate JSON.
    pub certificate_json: &'a str,
    /// Rule metadata JSON; `None` means no registry data is available and
    /// every metadata-dependent rule stays quiet.
    pub metadata_json: Option<&'a str>,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Fixed timestamp for reproducible runs; `None` means the wall clock.
    pub now: Option<OffsetDateTime>,
}

/// Output from the validate use case.
#[derive(Clone, Debug)]
pub struct ValidateOutput {
    /// The result envelope the CLI writes.
    pub envelope: ResultEnvelope,
    /// Audit records, empty when audit emission is off.
    pub audit_records: Vec<AuditRecord>,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the validate use case: parse inputs, resolve config, evaluate every
/// enabled tree, bind audit records, assemble the envelope.
pub fn run_validate(input: ValidateInput<'_>) -> anyhow::Result<ValidateOutput> {
    let started_at = input.now.unwrap_or_else(OffsetDateTime::now_utc);

    let sykmelding: Sykmelding =
        serde_json::from_str(input.certificate_json).context("parse certificate")?;
    let meta: RuleMetadata = match input.metadata_json {
        Some(text) => serde_json::from_str(text).context("parse metadata")?,
        None => RuleMetadata::default(),
    };

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        regelguard_settings::RegelguardConfigV1::default()
    } else {
        regelguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved =
        regelguard_settings::resolve_config(cfg, input.overrides.clone()).context("resolve config")?;

    let trees = trees::standard_trees();
    let outcome = run_all(&trees, &resolved.effective, &sykmelding, &meta, &mut LogTrace);
    tracing::info!(
        status = ?outcome.status,
        trees = outcome.runs.len(),
        skipped = outcome.skipped.len(),
        "validation finished"
    );

    let finished_at = input.now.unwrap_or_else(OffsetDateTime::now_utc);

    let audit_records = if resolved.effective.audit.enabled {
        to_audit_records(
            &outcome.runs,
            &sykmelding.pasient_ident,
            &resolved.effective.audit.kilde,
            finished_at,
        )
    } else {
        Vec::new()
    };

    let envelope = ResultEnvelope {
        schema: SCHEMA_RESULT_V1.to_string(),
        tool: ToolMeta {
            name: "regelguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        result: outcome.result(),
        data: RunSummary {
            profile: resolved.effective.profile.clone(),
            trees_evaluated: outcome.runs.len() as u32,
            trees_skipped: outcome.skipped.len() as u32,
            audit_records: audit_records.len() as u32,
        },
    };

    Ok(ValidateOutput {
        envelope,
        audit_records,
        resolved_config: resolved,
    })
}

pub fn serialize_result(envelope: &ResultEnvelope) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(envelope).context("serialize result")
}

/// One JSON object per line, ready for the audit artifact file.
pub fn audit_records_ndjson(records: &[AuditRecord]) -> anyhow::Result<Vec<u8>> {
    let mut writer = NdjsonWriter::new(Vec::new());
    publish_all(&mut writer, records).context("serialize audit records")?;
    Ok(writer.into_inner())
}

/// Map status to exit code: 0 = usable (possibly after manual review), 2 = invalid.
pub fn verdict_exit_code(status: Verdict) -> i32 {
    match status {
        Verdict::Ok => 0,
        Verdict::ManualProcessing => 0,
        Verdict::Invalid => 2,
    }
}
