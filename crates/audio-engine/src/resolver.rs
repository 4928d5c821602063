//! Device name resolution.
//!
//! Maps a user-typed name onto one of the devices the backend reported. The
//! tiers are applied strictly in order and the first hit wins:
//!
//! 1. [`exact_match`]: equal ignoring case.
//! 2. [`substring_match`]: the query is contained in the name, ignoring case;
//!    the shortest containing name wins.
//! 3. [`fuzzy_match`]: best [`similarity`] score at or above [`FUZZY_CUTOFF`].
//!
//! Each tier is a pure function of the query and the device list.

use tracing::debug;

use crate::{NotFound, similarity::similarity};

/// Minimum similarity a fuzzy candidate needs to be accepted.
pub const FUZZY_CUTOFF: f64 = 0.3;

/// Maximum number of fuzzy candidates considered.
pub const FUZZY_CANDIDATES: usize = 3;

/// Which resolution tier produced a match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    /// Equal to the query, ignoring case.
    Exact,
    /// Contains the query, ignoring case.
    Substring,
    /// Similar to the query.
    Fuzzy {
        /// Similarity score in `[FUZZY_CUTOFF, 1.0]`.
        score: f64,
    },
}

/// A resolved device name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'a> {
    /// The device name exactly as the backend reported it.
    pub name: &'a str,
    /// How the name was found.
    pub kind: MatchKind,
}

/// Resolve `query` against `devices`.
///
/// On failure the full device list is returned inside [`NotFound`] so the
/// caller can show the user what is available.
pub fn resolve<'a>(query: &str, devices: &'a [String]) -> Result<Resolved<'a>, NotFound> {
    let resolved = exact_match(query, devices)
        .map(|name| Resolved {
            name,
            kind: MatchKind::Exact,
        })
        .or_else(|| {
            substring_match(query, devices).map(|name| Resolved {
                name,
                kind: MatchKind::Substring,
            })
        })
        .or_else(|| {
            fuzzy_match(query, devices).map(|(name, score)| Resolved {
                name,
                kind: MatchKind::Fuzzy { score },
            })
        });
    match resolved {
        Some(r) => {
            debug!(query, device = r.name, kind = ?r.kind, "resolved");
            Ok(r)
        }
        None => {
            debug!(query, candidates = devices.len(), "no device matched");
            Err(NotFound {
                query: query.to_string(),
                devices: devices.to_vec(),
            })
        }
    }
}

/// Tier 1: a device equal to `query` ignoring case.
///
/// A byte-for-byte equal name beats one that only differs by case; otherwise
/// the first case-insensitive match in list order is returned.
pub fn exact_match<'a>(query: &str, devices: &'a [String]) -> Option<&'a str> {
    if let Some(verbatim) = devices.iter().find(|d| *d == query) {
        return Some(verbatim.as_str());
    }
    let needle = query.to_lowercase();
    devices
        .iter()
        .find(|d| d.to_lowercase() == needle)
        .map(String::as_str)
}

/// Tier 2: the shortest device whose name contains `query`, ignoring case.
///
/// Length is measured in characters. Ties go to the device listed first.
pub fn substring_match<'a>(query: &str, devices: &'a [String]) -> Option<&'a str> {
    let needle = query.to_lowercase();
    devices
        .iter()
        .filter(|d| d.to_lowercase().contains(&needle))
        .min_by_key(|d| d.chars().count())
        .map(String::as_str)
}

/// Up to `limit` devices scoring at least `cutoff` against `query`, best first.
///
/// Scores are case-sensitive. Equal scores are ordered by descending name.
pub fn fuzzy_candidates<'a>(
    query: &str,
    devices: &'a [String],
    limit: usize,
    cutoff: f64,
) -> Vec<(&'a str, f64)> {
    let mut scored: Vec<(&str, f64)> = devices
        .iter()
        .map(|d| (d.as_str(), similarity(d, query)))
        .filter(|(_, score)| *score >= cutoff)
        .collect();
    scored.sort_by(|(a_name, a_score), (b_name, b_score)| {
        b_score.total_cmp(a_score).then_with(|| b_name.cmp(a_name))
    });
    scored.truncate(limit);
    scored
}

/// Tier 3: the most similar device, if any clears [`FUZZY_CUTOFF`].
pub fn fuzzy_match<'a>(query: &str, devices: &'a [String]) -> Option<(&'a str, f64)> {
    fuzzy_candidates(query, devices, FUZZY_CANDIDATES, FUZZY_CUTOFF)
        .into_iter()
        .next()
}
