//! Domain name normalization.
//!
//! Hosting APIs and resolvers disagree on letter case and on whether a
//! name carries its trailing root dot. Every name that takes part in a
//! comparison or acts as a map key goes through [`normalize`] first.

/// Normalize a domain or host name: trimmed, lower-case, one trailing dot.
///
/// The empty name and `"."` both normalize to the root, `"."`.
#[must_use]
pub fn normalize(name: &str) -> String {
    let trimmed = name.trim().trim_end_matches('.');
    let mut normalized = trimmed.to_ascii_lowercase();
    normalized.push('.');
    normalized
}
