//! US State reference data
//!
//! Static table of the 50 states that make up the shipping zone domain.
//! Every zone lookup is validated against this table.

use serde::Serialize;

/// A US state (code + display name)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsState {
    pub code: &'static str,
    pub name: &'static str,
}

const fn state(code: &'static str, name: &'static str) -> UsState {
    UsState { code, name }
}

/// The 50 US states, ordered by code
pub static US_STATES: [UsState; 50] = [
    state("AK", "Alaska"),
    state("AL", "Alabama"),
    state("AR", "Arkansas"),
    state("AZ", "Arizona"),
    state("CA", "California"),
    state("CO", "Colorado"),
    state("CT", "Connecticut"),
    state("DE", "Delaware"),
    state("FL", "Florida"),
    state("GA", "Georgia"),
    state("HI", "Hawaii"),
    state("IA", "Iowa"),
    state("ID", "Idaho"),
    state("IL", "Illinois"),
    state("IN", "Indiana"),
    state("KS", "Kansas"),
    state("KY", "Kentucky"),
    state("LA", "Louisiana"),
    state("MA", "Massachusetts"),
    state("MD", "Maryland"),
    state("ME", "Maine"),
    state("MI", "Michigan"),
    state("MN", "Minnesota"),
    state("MO", "Missouri"),
    state("MS", "Mississippi"),
    state("MT", "Montana"),
    state("NC", "North Carolina"),
    state("ND", "North Dakota"),
    state("NE", "Nebraska"),
    state("NH", "New Hampshire"),
    state("NJ", "New Jersey"),
    state("NM", "New Mexico"),
    state("NV", "Nevada"),
    state("NY", "New York"),
    state("OH", "Ohio"),
    state("OK", "Oklahoma"),
    state("OR", "Oregon"),
    state("PA", "Pennsylvania"),
    state("RI", "Rhode Island"),
    state("SC", "South Carolina"),
    state("SD", "South Dakota"),
    state("TN", "Tennessee"),
    state("TX", "Texas"),
    state("UT", "Utah"),
    state("VA", "Virginia"),
    state("VT", "Vermont"),
    state("WA", "Washington"),
    state("WI", "Wisconsin"),
    state("WV", "West Virginia"),
    state("WY", "Wyoming"),
];

/// Resolve a raw state code (surrounding whitespace and case are ignored).
///
/// Returns `None` for anything outside the 50-state domain, including DC and
/// territories.
pub fn find_state(raw: &str) -> Option<&'static UsState> {
    let code = raw.trim();
    if code.len() != 2 {
        return None;
    }
    let upper = code.to_ascii_uppercase();
    US_STATES
        .binary_search_by(|s| s.code.cmp(upper.as_str()))
        .ok()
        .map(|idx| &US_STATES[idx])
}
