//! Statutory references (juridiske henvisninger).
//!
//! A citation points at one statutory condition: act, paragraph, and
//! optionally ledd, punktum and bokstav. At most one is bound per rule
//! tree; it is what makes the tree's outcome auditable.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The acts regelguard can cite. Closed on purpose: citing an act the
/// registry of explanations does not know about is a programming error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Lovverk {
    Folketrygdloven,
    Forvaltningsloven,
}

impl Lovverk {
    /// Conventional short form used in running text ("ftrl. § 8-7").
    pub fn kortnavn(self) -> &'static str {
        match self {
            Lovverk::Folketrygdloven => "ftrl.",
            Lovverk::Forvaltningsloven => "fvl.",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct JuridiskHenvisning {
    pub lovverk: Lovverk,
    pub paragraf: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledd: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub punktum: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bokstav: Option<char>,
}

impl JuridiskHenvisning {
    pub fn ny(lovverk: Lovverk, paragraf: &str) -> Self {
        JuridiskHenvisning {
            lovverk,
            paragraf: paragraf.to_string(),
            ledd: None,
            punktum: None,
            bokstav: None,
        }
    }

    pub fn med_ledd(mut self, ledd: u8) -> Self {
        self.ledd = Some(ledd);
        self
    }

    pub fn med_punktum(mut self, punktum: u8) -> Self {
        self.punktum = Some(punktum);
        self
    }

    pub fn med_bokstav(mut self, bokstav: char) -> Self {
        self.bokstav = Some(bokstav);
        self
    }
}

impl fmt::Display for JuridiskHenvisning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} § {}", self.lovverk.kortnavn(), self.paragraf)?;
        if let Some(ledd) = self.ledd {
            write!(f, " {ledd}. ledd")?;
        }
        if let Some(punktum) = self.punktum {
            write!(f, " {punktum}. punktum")?;
        }
        if let Some(bokstav) = self.bokstav {
            write!(f, " bokstav {bokstav}")?;
        }
        Ok(())
    }
}
