//! Plain-text summary of a validation run for terminal display.

use crate::validate::ValidateOutput;
use regelguard_types::Verdict;

fn status_label(status: Verdict) -> &'static str {
    match status {
        Verdict::Ok => "OK",
        Verdict::ManualProcessing => "MANUAL_PROCESSING",
        Verdict::Invalid => "INVALID",
    }
}

/// Render the short human summary printed after `validate`.
pub fn format_summary(output: &ValidateOutput) -> String {
    let mut out = String::new();
    let result = &output.envelope.result;
    let data = &output.envelope.data;

    out.push_str(&format!(
        "regelguard: {} (profile {})\n",
        status_label(result.status),
        data.profile
    ));
    out.push_str(&format!(
        "{} trees evaluated, {} skipped, {} audit records\n",
        data.trees_evaluated, data.trees_skipped, data.audit_records
    ));

    if !result.rule_hits.is_empty() {
        out.push_str("\ntriggered rules:\n");
        for hit in &result.rule_hits {
            out.push_str(&format!("  {}: {}\n", hit.rule_name, hit.message_for_sender));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{run_validate, ValidateInput};
    use regelguard_domain::test_support;
    use regelguard_settings::Overrides;
    use time::macros::datetime;

    fn validate_with(metadata: &regelguard_domain::model::RuleMetadata) -> ValidateOutput {
        let certificate = serde_json::to_string(&test_support::sykmelding_enkel()).unwrap();
        let metadata = serde_json::to_string(metadata).unwrap();
        run_validate(ValidateInput {
            certificate_json: &certificate,
            metadata_json: Some(&metadata),
            config_text: "",
            overrides: Overrides::default(),
            now: Some(datetime!(2026-02-10 12:00:00 UTC)),
        })
        .expect("run_validate")
    }

    #[test]
    fn ok_summary_is_two_lines() {
        let output = validate_with(&test_support::metadata());
        insta::assert_snapshot!(format_summary(&output), @r"
        regelguard: OK (profile standard)
        5 trees evaluated, 0 skipped, 4 audit records
        ");
    }

    #[test]
    fn invalid_summary_lists_the_triggered_rules() {
        let mut meta = test_support::metadata();
        meta.behandler_suspendert = true;
        let summary = format_summary(&validate_with(&meta));
        assert!(summary.contains("regelguard: INVALID"));
        assert!(summary.contains("triggered rules:"));
        assert!(summary.contains("  BEHANDLER_SUSPENDERT: Behandler er suspendert av NAV."));
    }

    #[test]
    fn manual_review_is_its_own_status() {
        let mut sykmelding = test_support::sykmelding_enkel();
        sykmelding.behandlet_dato = time::macros::date!(2026 - 02 - 13);
        sykmelding.begrunnelse_ikke_kontakt = Some("Pasienten var innlagt.".to_string());
        let certificate = serde_json::to_string(&sykmelding).unwrap();
        let metadata = serde_json::to_string(&test_support::metadata()).unwrap();
        let output = run_validate(ValidateInput {
            certificate_json: &certificate,
            metadata_json: Some(&metadata),
            config_text: "",
            overrides: Overrides::default(),
            now: Some(datetime!(2026-02-14 12:00:00 UTC)),
        })
        .expect("run_validate");
        let summary = format_summary(&output);
        assert!(summary.contains("regelguard: MANUAL_PROCESSING"));
        assert!(summary.contains("TILBAKEDATERT_MED_BEGRUNNELSE"));
    }
}
