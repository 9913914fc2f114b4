//! Building subsumsjon records from evaluated tree runs.

use regelguard_domain::TreeRun;
use regelguard_types::{
    AuditRecord, LegalOutcome, AUDIT_EVENT_NAME, AUDIT_EVENT_VERSION,
};
use std::collections::BTreeMap;
use time::OffsetDateTime;
use uuid::Uuid;

/// One record per citation-bearing run, in run order. The record's inputs
/// are the union of the named inputs along the realized path; on key
/// collisions the entry closer to the leaf wins.
pub fn to_audit_records(
    runs: &[TreeRun],
    person_ident: &str,
    kilde: &str,
    now: OffsetDateTime,
) -> Vec<AuditRecord> {
    let records: Vec<AuditRecord> = runs
        .iter()
        .filter_map(|run| {
            let henvisning = run.citation.clone()?;
            let mut input = BTreeMap::new();
            for entry in &run.evaluation.path {
                for (key, value) in &entry.inputs {
                    input.insert(key.clone(), value.clone());
                }
            }
            Some(AuditRecord {
                id: Uuid::new_v4(),
                event_name: AUDIT_EVENT_NAME.to_string(),
                version: AUDIT_EVENT_VERSION.to_string(),
                kilde: kilde.to_string(),
                person_ident: person_ident.to_string(),
                henvisning,
                input,
                utfall: LegalOutcome::from_verdict(run.evaluation.verdict),
                tidsstempel: now,
            })
        })
        .collect();
    tracing::debug!(count = records.len(), "subsumsjon records built");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use regelguard_domain::test_support::{config_all_enabled, metadata, sykmelding_enkel};
    use regelguard_domain::{run_all, trees, NoopTrace, PathRecord, TreeEvaluation};
    use regelguard_types::{JuridiskHenvisning, Lovverk, Verdict};
    use serde_json::Value as JsonValue;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2026-02-10 12:00:00 UTC);

    fn standard_runs(
        sykmelding: &regelguard_domain::model::Sykmelding,
        meta: &regelguard_domain::model::RuleMetadata,
    ) -> Vec<TreeRun> {
        run_all(
            &trees::standard_trees(),
            &config_all_enabled(),
            sykmelding,
            meta,
            &mut NoopTrace,
        )
        .runs
    }

    #[test]
    fn one_record_per_cited_tree_and_none_for_uncited() {
        let runs = standard_runs(&sykmelding_enkel(), &metadata());
        let records = to_audit_records(&runs, "12345678901", "regelguard", NOW);
        // the period tree carries no citation, the other four do
        assert_eq!(runs.len(), 5);
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.event_name == "subsumsjon"));
        assert!(records.iter().all(|r| r.person_ident == "12345678901"));
        assert!(records.iter().all(|r| r.tidsstempel == NOW));
    }

    #[test]
    fn passing_conditions_classify_as_fulfilled() {
        let runs = standard_runs(&sykmelding_enkel(), &metadata());
        let records = to_audit_records(&runs, "12345678901", "regelguard", NOW);
        assert!(records
            .iter()
            .all(|r| r.utfall == LegalOutcome::VilkarOppfylt));
    }

    #[test]
    fn a_failed_condition_classifies_as_not_fulfilled() {
        let mut meta = metadata();
        meta.behandler_suspendert = true;
        let runs = standard_runs(&sykmelding_enkel(), &meta);
        let records = to_audit_records(&runs, "12345678901", "regelguard", NOW);
        let suspension = records
            .iter()
            .find(|r| r.henvisning == JuridiskHenvisning::ny(Lovverk::Folketrygdloven, "8-7").med_ledd(1))
            .unwrap();
        assert_eq!(suspension.utfall, LegalOutcome::VilkarIkkeOppfylt);
        assert_eq!(suspension.input["behandler_suspendert"], true);
    }

    #[test]
    fn record_ids_are_unique() {
        let runs = standard_runs(&sykmelding_enkel(), &metadata());
        let records = to_audit_records(&runs, "12345678901", "regelguard", NOW);
        let mut ids: Vec<Uuid> = records.iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn inputs_merge_along_the_path_with_later_writes_winning() {
        let run = TreeRun {
            key: "test.tre",
            citation: Some(JuridiskHenvisning::ny(Lovverk::Folketrygdloven, "8-4")),
            evaluation: TreeEvaluation {
                path: vec![
                    PathRecord {
                        tag: "FORSTE",
                        outcome: false,
                        inputs: BTreeMap::from([
                            ("dato".to_string(), JsonValue::from("2026-01-01")),
                            ("antall".to_string(), JsonValue::from(1)),
                        ]),
                    },
                    PathRecord {
                        tag: "ANDRE",
                        outcome: true,
                        inputs: BTreeMap::from([(
                            "dato".to_string(),
                            JsonValue::from("2026-02-01"),
                        )]),
                    },
                ],
                verdict: Verdict::ManualProcessing,
                rule_hit: None,
            },
        };
        let records = to_audit_records(&[run], "12345678901", "regelguard", NOW);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].input["dato"], "2026-02-01");
        assert_eq!(records[0].input["antall"], 1);
        assert_eq!(records[0].utfall, LegalOutcome::VilkarUavklart);
    }
}
