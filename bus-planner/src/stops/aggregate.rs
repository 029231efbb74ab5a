//! Ridden-range computation over a line's stop catalogue.

use crate::domain::Stop;

/// Compute the contiguous sub-range of `catalogue` actually ridden.
///
/// One linear scan tracks the *last* stop whose name equals `departure`
/// and the *last* whose name equals `arrival`; when a name repeats, the
/// later occurrence wins. Comparisons are exact and case-sensitive.
///
/// - Both ends found: the inclusive range between them, regardless of
///   which comes first in the catalogue.
/// - One end found: if its position already exceeds `expected_count`,
///   the ride is assumed to continue to the end of the catalogue;
///   otherwise it is assumed to have started at the beginning.
/// - Neither found: empty.
///
/// The single-endpoint fallback does not generalize to lines traveled in
/// reverse catalogue direction; its behavior is kept as-is for
/// compatibility with the stop data consumers already see.
pub fn ridden_range(
    catalogue: &[Stop],
    departure: &str,
    arrival: &str,
    expected_count: u32,
) -> Vec<Stop> {
    let mut dep_idx = None;
    let mut arr_idx = None;

    for (index, stop) in catalogue.iter().enumerate() {
        if stop.name == departure {
            dep_idx = Some(index);
        }
        if stop.name == arrival {
            arr_idx = Some(index);
        }
    }

    let expected = expected_count as usize;

    match (dep_idx, arr_idx) {
        (Some(dep), Some(arr)) => {
            let (first, last) = if dep < arr { (dep, arr) } else { (arr, dep) };
            catalogue[first..=last].to_vec()
        }
        (Some(dep), None) => {
            if dep + 1 > expected {
                catalogue[dep..].to_vec()
            } else {
                catalogue[..=dep].to_vec()
            }
        }
        (None, Some(arr)) => {
            if arr + 1 > expected {
                catalogue[arr..].to_vec()
            } else {
                catalogue[..=arr].to_vec()
            }
        }
        (None, None) => Vec::new(),
    }
}
