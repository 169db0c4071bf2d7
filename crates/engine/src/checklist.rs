//! Checklist Registry — the curated target species list.
//!
//! Format: one entry per line, `;`-separated. Field 0 is the valid name,
//! every further field a synonym. Blank lines are skipped; a line with an
//! empty first field is skipped with a warning.

use std::collections::BTreeMap;

use crate::names::normalize;

/// One checklist line: valid name (normalized key + original spelling) and
/// its synonyms in declaration order, original case.
#[derive(Debug, Clone)]
pub struct ChecklistEntry {
    pub valid: String,
    pub display: String,
    pub synonyms: Vec<String>,
}

/// Bidirectional valid-name ↔ synonym mapping over the checklist.
/// Built once by [`ChecklistRegistry::parse`], immutable afterwards.
#[derive(Debug, Default)]
pub struct ChecklistRegistry {
    /// Entries in file order. A valid name declared twice keeps its original
    /// position; the later declaration's synonyms win.
    pub entries: Vec<ChecklistEntry>,
    /// synonym (normalized) → valid name (normalized)
    pub synonym_to_valid: BTreeMap<String, String>,
    /// Non-fatal parse findings, for the caller to surface.
    pub warnings: Vec<String>,

    by_valid: BTreeMap<String, usize>,
}

impl ChecklistRegistry {
    pub fn parse(content: &str) -> ChecklistRegistry {
        let mut registry = ChecklistRegistry::default();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split(';');
            let display = fields.next().unwrap_or("").trim();
            if display.is_empty() {
                registry
                    .warnings
                    .push(format!("line {}: empty species name, skipping", line_num + 1));
                continue;
            }

            let valid = normalize(display);
            let synonyms: Vec<String> = fields
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();

            for syn in &synonyms {
                registry.synonym_to_valid.insert(normalize(syn), valid.clone());
            }

            match registry.by_valid.get(&valid) {
                Some(&idx) => {
                    registry
                        .warnings
                        .push(format!("line {}: duplicate species \"{display}\"", line_num + 1));
                    registry.entries[idx] = ChecklistEntry {
                        valid: valid.clone(),
                        display: display.to_string(),
                        synonyms,
                    };
                }
                None => {
                    registry.by_valid.insert(valid.clone(), registry.entries.len());
                    registry.entries.push(ChecklistEntry {
                        valid,
                        display: display.to_string(),
                        synonyms,
                    });
                }
            }
        }

        registry
    }

    /// Whether the normalized name is a checklist valid name.
    pub fn is_valid_name(&self, normalized: &str) -> bool {
        self.by_valid.contains_key(normalized)
    }

    /// Whether the normalized name is a known synonym of any valid name.
    pub fn is_synonym(&self, normalized: &str) -> bool {
        self.synonym_to_valid.contains_key(normalized)
    }

    /// Whether the normalized name appears on the checklist at all.
    pub fn is_listed(&self, normalized: &str) -> bool {
        self.is_valid_name(normalized) || self.is_synonym(normalized)
    }

    /// The valid name a synonym resolves to.
    pub fn resolve_synonym(&self, normalized: &str) -> Option<&str> {
        self.synonym_to_valid.get(normalized).map(String::as_str)
    }

    pub fn synonyms_of(&self, valid_normalized: &str) -> Option<&[String]> {
        self.by_valid
            .get(valid_normalized)
            .map(|&idx| self.entries[idx].synonyms.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_synonyms(&self) -> usize {
        self.entries.iter().map(|e| e.synonyms.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_valid_and_synonyms() {
        let registry =
            ChecklistRegistry::parse("Genus species;Genus synonym1;Genus synonym2\n");
        assert_eq!(registry.len(), 1);
        let entry = &registry.entries[0];
        assert_eq!(entry.valid, "genus species");
        assert_eq!(entry.display, "Genus species");
        assert_eq!(entry.synonyms, vec!["Genus synonym1", "Genus synonym2"]);
        assert_eq!(registry.resolve_synonym("genus synonym1"), Some("genus species"));
        assert_eq!(registry.resolve_synonym("genus synonym2"), Some("genus species"));
    }

    #[test]
    fn blank_lines_skipped_silently() {
        let registry = ChecklistRegistry::parse("\n\nAnax parthenope\n\n");
        assert_eq!(registry.len(), 1);
        assert!(registry.warnings.is_empty());
    }

    #[test]
    fn empty_valid_name_warns_and_skips() {
        let registry = ChecklistRegistry::parse(";Orphan synonym\nAnax parthenope\n");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.warnings.len(), 1);
        assert!(registry.warnings[0].contains("line 1"));
    }

    #[test]
    fn duplicate_valid_name_last_wins_with_warning() {
        let registry = ChecklistRegistry::parse(
            "Anax parthenope;Old synonym\nAnax ephippiger\nAnax parthenope;New synonym\n",
        );
        assert_eq!(registry.len(), 2);
        // Original position kept, synonyms replaced
        assert_eq!(registry.entries[0].valid, "anax parthenope");
        assert_eq!(registry.entries[0].synonyms, vec!["New synonym"]);
        assert_eq!(registry.warnings.len(), 1);
        assert!(registry.warnings[0].contains("duplicate"));
    }

    #[test]
    fn synonym_collision_last_declaration_wins() {
        let registry = ChecklistRegistry::parse(
            "Anax parthenope;Shared name\nAnax ephippiger;Shared name\n",
        );
        assert_eq!(registry.resolve_synonym("shared name"), Some("anax ephippiger"));
        assert!(registry.warnings.is_empty());
    }

    #[test]
    fn lookup_helpers() {
        let registry = ChecklistRegistry::parse("Anax parthenope;Anax parthenope julius\n");
        assert!(registry.is_valid_name("anax parthenope"));
        assert!(!registry.is_valid_name("anax parthenope julius"));
        assert!(registry.is_synonym("anax parthenope julius"));
        assert!(registry.is_listed("anax parthenope julius"));
        assert!(!registry.is_listed("anax imperator"));
        assert_eq!(
            registry.synonyms_of("anax parthenope").unwrap(),
            &["Anax parthenope julius".to_string()]
        );
        assert_eq!(registry.total_synonyms(), 1);
    }
}
