//! Species-name normalization and well-formedness checks.
//!
//! All indices key on [`normalize`]d names; everything user-facing goes
//! through [`format_species_name`]. Comparing a raw string against an index
//! key is a bug: normalize first.

/// Canonical index key for a species name.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// First whitespace token of a (normalized) species key.
pub fn genus_of(species: &str) -> &str {
    species.split_whitespace().next().unwrap_or(species)
}

/// Display form of a normalized species key: genus capitalized, every
/// epithet lower-case. `"anax parthenope"` → `"Anax parthenope"`.
pub fn format_species_name(normalized: &str) -> String {
    let mut parts = normalized.split_whitespace();
    let genus = match parts.next() {
        Some(g) => g,
        None => return normalized.to_string(),
    };

    let mut chars = genus.chars();
    let mut out = match chars.next() {
        Some(first) => {
            let mut s = first.to_uppercase().collect::<String>();
            s.push_str(chars.as_str());
            s
        }
        None => String::new(),
    };

    for epithet in parts {
        out.push(' ');
        out.push_str(epithet);
    }
    out
}

/// Substrings that disqualify a name from being a Linnean binomial:
/// open nomenclature markers and sequence/cluster code prefixes.
const NON_BINOMIAL_MARKERS: &[&str] = &[
    "sp.", "sp ", " sp",
    "cf.", "cf ", " cf",
    "aff.", "aff ", " aff",
    "DNAS", "BOLD:",
];

/// Whether a name is a proper Linnean binomial (or trinomial).
///
/// Rejects open nomenclature (`Gammarus sp.`, `Gammarus cf. fossarum`),
/// names carrying identifiers (`Enallagma sp. DNAS-283-223485`), anything
/// with a digit, wrong token counts, and wrong capitalization.
pub fn is_well_formed_binomial(name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() {
        return false;
    }

    if NON_BINOMIAL_MARKERS.iter().any(|m| name.contains(m)) {
        return false;
    }

    if name.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    let parts: Vec<&str> = name.split_whitespace().collect();
    if parts.len() < 2 || parts.len() > 3 {
        return false;
    }

    let mut genus_chars = parts[0].chars();
    match genus_chars.next() {
        Some(c) if c.is_uppercase() => {}
        _ => return false,
    }

    for epithet in &parts[1..] {
        match epithet.chars().next() {
            Some(c) if c.is_lowercase() => {}
            _ => return false,
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Anax Parthenope "), "anax parthenope");
    }

    #[test]
    fn genus_is_first_token() {
        assert_eq!(genus_of("anax parthenope"), "anax");
        assert_eq!(genus_of("anax"), "anax");
    }

    #[test]
    fn format_capitalizes_genus_only() {
        assert_eq!(format_species_name("anax parthenope"), "Anax parthenope");
        assert_eq!(format_species_name("acisoma inflatum"), "Acisoma inflatum");
        assert_eq!(format_species_name("anax"), "Anax");
        assert_eq!(
            format_species_name("coenagrion puella puella"),
            "Coenagrion puella puella"
        );
    }

    #[test]
    fn binomials_accepted() {
        assert!(is_well_formed_binomial("Gammarus fossarum"));
        assert!(is_well_formed_binomial("Coenagrion puella puella"));
    }

    #[test]
    fn open_nomenclature_rejected() {
        assert!(!is_well_formed_binomial("Gammarus sp."));
        assert!(!is_well_formed_binomial("Gammarus cf. fossarum"));
        assert!(!is_well_formed_binomial("Gammarus aff. fossarum"));
        assert!(!is_well_formed_binomial("Enallagma sp. DNAS-283-223485"));
    }

    #[test]
    fn codes_and_digits_rejected() {
        assert!(!is_well_formed_binomial("Gammarus BOLD:AAA1234"));
        assert!(!is_well_formed_binomial("Gammarus fossarum 2118c"));
    }

    #[test]
    fn token_counts_enforced() {
        assert!(!is_well_formed_binomial("Gammarus"));
        assert!(!is_well_formed_binomial("Too many name parts here"));
        assert!(!is_well_formed_binomial(""));
        assert!(!is_well_formed_binomial("   "));
    }

    #[test]
    fn capitalization_enforced() {
        assert!(!is_well_formed_binomial("gammarus fossarum"));
        assert!(!is_well_formed_binomial("Gammarus Fossarum"));
    }
}
