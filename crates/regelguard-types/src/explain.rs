//! Explain registry for rule trees and rule tags.
//!
//! Maps tree keys and rule tags to human-readable explanations: what the
//! rule checks, its statutory basis, and what the submitter can do about a
//! hit.

use crate::tags;

/// Explanation entry for a tree or tag.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the rule.
    pub title: &'static str,
    /// What the rule checks and why it exists.
    pub description: &'static str,
    /// Statutory basis, empty for purely administrative rules.
    pub hjemmel: &'static str,
    /// What the submitting practitioner can do when the rule triggers.
    pub guidance: &'static str,
}

/// Look up an explanation by tree key or rule tag.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    // Try tree keys first, then tags
    match identifier {
        // Tree keys
        tags::TREE_PASIENTALDER => Some(explain_pasientalder()),
        tags::TREE_GRADERING => Some(explain_gradering()),
        tags::TREE_PERIODE => Some(explain_periode()),
        tags::TREE_TILBAKEDATERING => Some(explain_tilbakedatering()),
        tags::TREE_BEHANDLER => Some(explain_behandler()),

        // Tags
        tags::REGEL_PASIENT_ELDRE_ENN_70 => Some(explain_pasient_eldre_enn_70()),
        tags::REGEL_GRADE_BELOW_20 => Some(explain_grade_below_20()),
        tags::REGEL_PERIODER_MANGLER => Some(explain_perioder_mangler()),
        tags::REGEL_FRADATO_ETTER_TILDATO => Some(explain_fradato_etter_tildato()),
        tags::REGEL_OVERLAPPENDE_PERIODER => Some(explain_overlappende_perioder()),
        tags::REGEL_OPPHOLD_MELLOM_PERIODER => Some(explain_opphold_mellom_perioder()),
        tags::REGEL_TOTAL_VARIGHET_OVER_ETT_AR => Some(explain_total_varighet()),
        tags::REGEL_ETTERSENDING => Some(explain_ettersending()),
        tags::REGEL_TILBAKEDATERT_MER_ENN_3_AR => Some(explain_tilbakedatert_3_ar()),
        tags::REGEL_FORLENGELSE => Some(explain_forlengelse()),
        tags::REGEL_TILBAKEDATERT_INNTIL_8_DAGER => Some(explain_tilbakedatert_8_dager()),
        tags::REGEL_TILBAKEDATERT_MED_BEGRUNNELSE => Some(explain_tilbakedatert_begrunnelse()),
        tags::REGEL_BEHANDLER_SUSPENDERT => Some(explain_behandler_suspendert()),

        _ => None,
    }
}

/// List all known tree keys.
pub fn all_tree_keys() -> &'static [&'static str] {
    &[
        tags::TREE_PASIENTALDER,
        tags::TREE_GRADERING,
        tags::TREE_PERIODE,
        tags::TREE_TILBAKEDATERING,
        tags::TREE_BEHANDLER,
    ]
}

/// List all known rule tags.
pub fn all_tags() -> &'static [&'static str] {
    &[
        tags::REGEL_PASIENT_ELDRE_ENN_70,
        tags::REGEL_GRADE_BELOW_20,
        tags::REGEL_PERIODER_MANGLER,
        tags::REGEL_FRADATO_ETTER_TILDATO,
        tags::REGEL_OVERLAPPENDE_PERIODER,
        tags::REGEL_OPPHOLD_MELLOM_PERIODER,
        tags::REGEL_TOTAL_VARIGHET_OVER_ETT_AR,
        tags::REGEL_ETTERSENDING,
        tags::REGEL_TILBAKEDATERT_MER_ENN_3_AR,
        tags::REGEL_FORLENGELSE,
        tags::REGEL_TILBAKEDATERT_INNTIL_8_DAGER,
        tags::REGEL_TILBAKEDATERT_MED_BEGRUNNELSE,
        tags::REGEL_BEHANDLER_SUSPENDERT,
    ]
}

// --- Tree-level explanations ---

fn explain_pasientalder() -> Explanation {
    Explanation {
        title: "Patient Age",
        description: "\
Checks the patient's age against the entitlement limit for sickness
benefit. A certificate whose absence starts after the patient has turned
70 cannot lead to a payout, so it is rejected up front rather than failing
silently later in case processing.

The comparison is strict: a certificate starting on the 70th birthday
itself still passes. Patients born on 29 February are treated as turning
70 on 28 February in non-leap years.",
        hjemmel: "Folketrygdloven § 8-3 første ledd",
        guidance: "\
Sickness benefit is not payable for absence starting after the patient
turned 70. If the start date is wrong, correct it and resubmit. Patients
above the limit may have other support schemes available; the certificate
itself cannot be fixed.",
    }
}

fn explain_gradering() -> Explanation {
    Explanation {
        title: "Grading",
        description: "\
Checks that every graded absence period certifies at least 20 % reduced
working capacity. A lower grade does not qualify for sickness benefit.

Exactly 20 % passes. Periods without an explicit grade count as full
absence and always pass this rule.",
        hjemmel: "Folketrygdloven § 8-13 første ledd",
        guidance: "\
If the patient's working capacity is reduced by less than 20 %, sickness
benefit does not apply. Re-assess the grade; if the reduction is genuinely
at least 20 %, correct the period's grade and resubmit.",
    }
}

fn explain_periode() -> Explanation {
    Explanation {
        title: "Absence Periods",
        description: "\
Structural checks on the certificate's absence periods: at least one
period must be present, every period must end on or after it starts,
periods must not overlap, must not leave gaps between them, and the total
span must not exceed one year.

These are administrative consistency rules; a certificate failing them is
not interpretable, whatever the medical content.",
        hjemmel: "",
        guidance: "\
Review the period list in the submitting system. Merge or adjust
overlapping periods, close gaps, and split continuations longer than a
year into separate certificates.",
    }
}

fn explain_tilbakedatering() -> Explanation {
    Explanation {
        title: "Backdating",
        description: "\
Checks how far back the certificate reaches relative to the consultation
date. Certificates are normally issued from the day the practitioner saw
the patient; documenting absence that started earlier needs justification.

Resubmissions and direct continuations of an earlier certificate are not
backdating. Up to 8 days back is accepted outright. Beyond that, a
certificate with a written justification for the late contact goes to
manual review; one without is rejected, as is anything reaching more than
3 years back.",
        hjemmel: "Folketrygdloven § 8-7 andre ledd",
        guidance: "\
Add a justification for why the patient could not be seen earlier
(begrunnelse for ikke kontakt) and resubmit, or correct the period start
if it is a typo. Contact the local office for absence more than 3 years
back.",
    }
}

fn explain_behandler() -> Explanation {
    Explanation {
        title: "Practitioner Authorization",
        description: "\
Checks that the treating practitioner was not suspended from issuing
certificates at the time of the consultation. The suspension status is
resolved against the practitioner registry before evaluation; this rule
only reads the resolved flag.",
        hjemmel: "Folketrygdloven § 8-7 første ledd",
        guidance: "\
A suspended practitioner cannot document incapacity for work. The patient
must obtain a certificate from another practitioner.",
    }
}

// --- Tag-level explanations ---

fn explain_pasient_eldre_enn_70() -> Explanation {
    let mut exp = explain_pasientalder();
    exp.title = "Patient Older Than 70";
    exp
}

fn explain_grade_below_20() -> Explanation {
    let mut exp = explain_gradering();
    exp.title = "Grade Below 20 %";
    exp
}

fn explain_perioder_mangler() -> Explanation {
    Explanation {
        title: "No Absence Periods",
        description: "\
The certificate contains no absence periods at all. Every other rule
needs at least one period to reason about, so this is checked first and
rejects the certificate outright.",
        hjemmel: "",
        guidance: "Add at least one absence period and resubmit.",
    }
}

fn explain_fradato_etter_tildato() -> Explanation {
    Explanation {
        title: "Start After End",
        description: "\
An absence period ends before it starts (fom after tom). Usually a typo
or a field swap in the submitting system.",
        hjemmel: "",
        guidance: "Swap or correct the period's start and end dates and resubmit.",
    }
}

fn explain_overlappende_perioder() -> Explanation {
    let mut exp = explain_periode();
    exp.title = "Overlapping Periods";
    exp
}

fn explain_opphold_mellom_perioder() -> Explanation {
    let mut exp = explain_periode();
    exp.title = "Gap Between Periods";
    exp
}

fn explain_total_varighet() -> Explanation {
    let mut exp = explain_periode();
    exp.title = "Total Duration Over One Year";
    exp
}

fn explain_ettersending() -> Explanation {
    let mut exp = explain_tilbakedatering();
    exp.title = "Resubmission";
    exp
}

fn explain_tilbakedatert_3_ar() -> Explanation {
    let mut exp = explain_tilbakedatering();
    exp.title = "Backdated More Than 3 Years";
    exp
}

fn explain_forlengelse() -> Explanation {
    let mut exp = explain_tilbakedatering();
    exp.title = "Continuation of Prior Certificate";
    exp
}

fn explain_tilbakedatert_8_dager() -> Explanation {
    let mut exp = explain_tilbakedatering();
    exp.title = "Backdated Up To 8 Days";
    exp
}

fn explain_tilbakedatert_begrunnelse() -> Explanation {
    Explanation {
        title: "Backdated With Justification",
        description: "\
The certificate is backdated more than 8 days and carries a written
justification for the late contact. Such certificates are never accepted
or rejected automatically; a caseworker decides whether the justification
holds.",
        hjemmel: "Folketrygdloven § 8-7 andre ledd",
        guidance: "\
No action needed from the submitter; the certificate is queued for manual
review. Processing takes longer than an automatic acceptance.",
    }
}

fn explain_behandler_suspendert() -> Explanation {
    let mut exp = explain_behandler();
    exp.title = "Practitioner Suspended";
    exp
}
