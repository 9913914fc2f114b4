use crate::model::Periode;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, Month};

const ISO: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// ISO `yyyy-mm-dd`, the form input snapshots use.
pub fn iso_dato(date: Date) -> String {
    date.format(ISO).unwrap_or_else(|_| date.to_string())
}

/// The period starting first; input order wins ties.
pub fn forste_periode(perioder: &[Periode]) -> Option<&Periode> {
    perioder.iter().fold(None, |best: Option<&Periode>, p| match best {
        Some(b) if b.fom <= p.fom => Some(b),
        _ => Some(p),
    })
}

/// The period ending last; input order wins ties.
pub fn siste_periode(perioder: &[Periode]) -> Option<&Periode> {
    perioder.iter().fold(None, |best: Option<&Periode>, p| match best {
        Some(b) if p.tom <= b.tom => Some(b),
        _ => Some(p),
    })
}

/// `date` plus `years`, clamping 29 February to 28 February in non-leap
/// years.
pub fn pluss_ar(date: Date, years: i32) -> Date {
    let year = date.year() + years;
    match Date::from_calendar_date(year, date.month(), date.day()) {
        Ok(d) => d,
        Err(_) => Date::from_calendar_date(year, Month::February, 28).unwrap_or(date),
    }
}

pub fn pluss_dager(date: Date, days: i64) -> Date {
    date.saturating_add(Duration::days(days))
}

/// Whole days from `fra` to `til`; negative when `til` is earlier.
pub fn dager_mellom(fra: Date, til: Date) -> i64 {
    (til - fra).whole_days()
}

/// Periods as refs, stably sorted by start date.
pub fn sortert_etter_fom(perioder: &[Periode]) -> Vec<&Periode> {
    let mut sorted: Vec<&Periode> = perioder.iter().collect();
    sorted.sort_by_key(|p| p.fom);
    sorted
}

pub fn har_overlapp(perioder: &[Periode]) -> bool {
    let sorted = sortert_etter_fom(perioder);
    sorted.windows(2).any(|w| w[1].fom <= w[0].tom)
}

/// A gap is more than one calendar day between a period's end and the
/// next period's start; back-to-back periods (tom + 1 day = fom) are
/// contiguous.
pub fn har_opphold(perioder: &[Periode]) -> bool {
    let sorted = sortert_etter_fom(perioder);
    sorted.windows(2).any(|w| dager_mellom(w[0].tom, w[1].fom) > 1)
}
