//! Transit agency registry.
//!
//! Maps agency display names, as they appear in directions responses,
//! to the operator codes the stop-catalogue service is keyed by.

use crate::domain::OperatorCode;

/// Known agency display names (lowercase) and their operator codes.
const AGENCY_OPERATORS: &[(&str, &str)] = &[
    ("tri delta transit", "3D"),
    ("ac transit", "AC"),
    ("capital corridor joint powers authority", "AM"),
    ("bay area rapid transit", "BA"),
    ("county connection", "CC"),
    ("altamont corridor express", "CE"),
    ("commute.org shuttles", "CM"),
    ("caltrain", "CT"),
    ("dumbarton express consortium", "DE"),
    ("emery go-round", "EM"),
    ("fairfield and suisun transit", "FS"),
    ("golden gate ferry", "GF"),
    ("golden gate transit", "GG"),
    ("marin transit", "MA"),
    ("petaluma", "PE"),
    ("regional gtfs", "RG"),
    ("rio vista delta breeze", "RV"),
    ("sonoma marin area rail transit", "SA"),
    ("san francisco bay ferry", "SB"),
    ("vta", "SC"),
    ("san francisco municipal transportation agency", "SF"),
    ("san francisco international airport", "SI"),
    ("samtrans", "SM"),
    ("sonoma county transit", "SO"),
    ("santa rosa citybus", "SR"),
    ("city of south san francisco", "SS"),
    ("soltrans", "ST"),
    ("tideline water taxi", "TD"),
    ("union city transit", "UC"),
    ("vacaville city coach", "VC"),
    ("vine transit", "VN"),
    ("westcat (western contra consta)", "WC"),
    ("livermore amador valley transit authority", "WH"),
];

/// Resolve an agency display name to its operator code.
///
/// Matching is a case-insensitive exact comparison against the registry;
/// there is no fuzzy matching. Unknown names resolve to `None`.
pub fn resolve(agency_name: &str) -> Option<OperatorCode> {
    let name = agency_name.to_lowercase();
    AGENCY_OPERATORS
        .iter()
        .find(|(known, _)| *known == name)
        .and_then(|(_, code)| OperatorCode::parse(code).ok())
}
