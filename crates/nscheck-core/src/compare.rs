//! Declared vs live nameserver set comparison.
//!
//! Pure and deterministic: names are normalized with [`crate::name::normalize`]
//! and compared as sets, so order, duplicates, letter case and trailing
//! dots never produce a difference on their own.

use std::collections::BTreeSet;

use crate::error::{ResolutionError, ResolutionFailure};
use crate::name::normalize;

/// A live NS answer: the served host names, or why there are none
pub type NameserverAnswer = std::result::Result<Vec<String>, ResolutionError>;

/// Outcome of comparing a declared NS record set with a live answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonVerdict {
    /// Both sides name the same nameservers
    Match,
    /// The sides differ
    Mismatch {
        /// Served live but not declared by the zone
        extraneous: BTreeSet<String>,
        /// Declared by the zone but not served live
        missing: BTreeSet<String>,
    },
    /// The live resolver produced no answer
    Unresolved {
        /// Why the lookup failed
        cause: ResolutionFailure,
    },
}

impl ComparisonVerdict {
    /// Returns true for [`ComparisonVerdict::Match`]
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Compare declared nameservers against the live answer.
///
/// `missing = declared - live`, `extraneous = live - declared`.
#[must_use]
pub fn compare<D, L>(declared: &[D], live: &[L]) -> ComparisonVerdict
where
    D: AsRef<str>,
    L: AsRef<str>,
{
    let declared = to_set(declared);
    let live = to_set(live);

    if declared == live {
        return ComparisonVerdict::Match;
    }

    ComparisonVerdict::Mismatch {
        extraneous: live.difference(&declared).cloned().collect(),
        missing: declared.difference(&live).cloned().collect(),
    }
}

/// Evaluate a declared NS record set against a live answer, failed or not.
#[must_use]
pub fn evaluate<D: AsRef<str>>(declared: &[D], answer: &NameserverAnswer) -> ComparisonVerdict {
    match answer {
        Ok(live) => compare(declared, live),
        Err(err) => ComparisonVerdict::Unresolved {
            cause: err.cause.clone(),
        },
    }
}

fn to_set<S: AsRef<str>>(names: &[S]) -> BTreeSet<String> {
    names.iter().map(|n| normalize(n.as_ref())).collect()
}
