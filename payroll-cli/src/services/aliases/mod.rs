// Alias resolution service
//
// Maps arbitrary client column headers onto canonical fields using a fixed
// synonym table plus any aliases supplied in the config file.

pub mod core;
pub mod models;

// Re-export commonly used types
pub use self::core::normalize_header;
pub use models::{AliasEntry, AliasMatch, MatchKind};

use std::collections::HashMap;

use crate::consolidate::Field;

/// Immutable header -> field lookup, built once per run
#[derive(Debug, Clone)]
pub struct AliasResolver {
    lookup: HashMap<String, AliasMatch>,
    entries: Vec<(Field, AliasEntry)>,
}

impl AliasResolver {
    /// Resolver with only the built-in table
    #[cfg(test)]
    pub fn builtin() -> Self {
        Self::with_custom(&[])
    }

    /// Resolver with the built-in table followed by custom aliases.
    ///
    /// Registration order: output labels, built-in synonyms, then custom
    /// aliases. The first registration of a normalized key wins.
    pub fn with_custom(custom: &[(Field, Vec<String>)]) -> Self {
        let mut resolver = Self {
            lookup: HashMap::new(),
            entries: Vec::new(),
        };

        for field in Field::OUTPUT {
            resolver.register(field, field.label(), MatchKind::Canonical);
        }

        for (field, synonyms) in core::BUILTIN_SYNONYMS {
            for synonym in *synonyms {
                resolver.register(*field, synonym, MatchKind::Synonym);
            }
        }

        for (field, aliases) in custom {
            for alias in aliases {
                resolver.register(*field, alias, MatchKind::Custom);
            }
        }

        resolver
    }

    fn register(&mut self, field: Field, label: &str, kind: MatchKind) {
        let key = normalize_header(label);
        if key.is_empty() {
            log::debug!("Ignoring blank alias for {}", field.key());
            return;
        }

        let active = !self.lookup.contains_key(&key);
        if active {
            self.lookup.insert(key, AliasMatch::new(field, kind));
        } else if kind != MatchKind::Canonical {
            log::debug!(
                "Alias '{}' for {} shadowed by an earlier registration",
                label,
                field.key()
            );
        }

        self.entries.push((
            field,
            AliasEntry {
                label: label.to_string(),
                kind,
                active,
            },
        ));
    }

    /// Resolve a raw header. Unrecognized headers yield `None`, never an error.
    pub fn resolve(&self, header: &str) -> Option<AliasMatch> {
        self.lookup.get(&normalize_header(header)).copied()
    }

    /// All registered aliases for a field, in registration order
    pub fn aliases_for(&self, field: Field) -> Vec<&AliasEntry> {
        self.entries
            .iter()
            .filter(|(f, _)| *f == field)
            .map(|(_, entry)| entry)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_resolves_from_its_aliases() {
        let resolver = AliasResolver::builtin();
        for field in Field::ALL {
            let entries = resolver.aliases_for(field);
            assert!(
                entries.iter().any(|e| e.active),
                "{} has no active alias",
                field.key()
            );
            for entry in entries.iter().filter(|e| e.active) {
                assert_eq!(resolver.resolve(&entry.label).map(|m| m.field), Some(field));
            }
        }
    }

    #[test]
    fn test_output_labels_resolve_canonically() {
        let resolver = AliasResolver::builtin();
        assert_eq!(
            resolver.resolve("Fecha de Ingreso"),
            Some(AliasMatch::new(Field::HireDate, MatchKind::Canonical))
        );
        assert_eq!(
            resolver.resolve("AREA"),
            Some(AliasMatch::new(Field::Area, MatchKind::Canonical))
        );
    }

    #[test]
    fn test_synonyms_are_case_and_accent_insensitive() {
        let resolver = AliasResolver::builtin();
        assert_eq!(resolver.resolve(" Correo Electrónico ").map(|m| m.field), Some(Field::Email));
        assert_eq!(resolver.resolve("R.U.T.").map(|m| m.field), Some(Field::Rut));
        assert_eq!(resolver.resolve("RBD").map(|m| m.field), Some(Field::WorkplaceCode));
        assert_eq!(resolver.resolve("Colegio").map(|m| m.field), Some(Field::WorkplaceName));
        assert_eq!(resolver.resolve("Nombre Completo").map(|m| m.field), Some(Field::FullName));
    }

    #[test]
    fn test_unknown_header_is_unmapped() {
        let resolver = AliasResolver::builtin();
        assert_eq!(resolver.resolve("sueldo base"), None);
        assert_eq!(resolver.resolve(""), None);
        assert_eq!(resolver.resolve("rutificador"), None);
    }

    #[test]
    fn test_custom_aliases_cannot_override_builtins() {
        let custom = vec![
            (Field::Phone, vec!["correo".to_string(), "movil".to_string()]),
        ];
        let resolver = AliasResolver::with_custom(&custom);

        assert_eq!(resolver.resolve("correo").map(|m| m.field), Some(Field::Email));
        assert_eq!(
            resolver.resolve("Móvil"),
            Some(AliasMatch::new(Field::Phone, MatchKind::Custom))
        );

        let shadowed = resolver
            .aliases_for(Field::Phone)
            .into_iter()
            .find(|e| e.label == "correo")
            .map(|e| e.active);
        assert_eq!(shadowed, Some(false));
    }
}
