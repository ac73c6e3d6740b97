use std::collections::BTreeSet;

use super::record::Record;

/// Sentinel source selection that disables source filtering
pub const ALL_SOURCES: &str = "All Sources";

/// Fold diacritics (Turkish letters in particular) to their closest
/// ASCII form and lowercase the result, so `"oyun"` matches `"Oyün"`.
pub fn fold_diacritics(text: &str) -> String {
    fn fold_char(c: char) -> char {
        match c {
            'ç' | 'Ç' => 'c',
            'ğ' | 'Ğ' => 'g',
            'ı' | 'İ' => 'i',
            'ö' | 'Ö' | 'ô' | 'ó' | 'ò' => 'o',
            'ş' | 'Ş' => 's',
            'ü' | 'Ü' | 'û' | 'Û' | 'ú' | 'ù' => 'u',
            'â' | 'Â' | 'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'Î' | 'í' | 'ì' | 'ï' => 'i',
            other => other,
        }
    }

    text.chars().map(fold_char).collect::<String>().to_lowercase()
}

/// Derive the filtered view of the catalog.
///
/// A record passes when the folded query is a substring of its folded
/// name or folded category list, and its source matches the selector
/// exactly ([`ALL_SOURCES`] matches everything). Input order is kept.
pub fn filter_records(records: &[Record], query: &str, source: &str) -> Vec<Record> {
    let folded_query = fold_diacritics(query.trim());

    records
        .iter()
        .filter(|record| {
            let text_matches = folded_query.is_empty()
                || fold_diacritics(&record.name).contains(&folded_query)
                || fold_diacritics(&record.categories.join(", ")).contains(&folded_query);
            let source_matches = source == ALL_SOURCES || record.source == source;
            text_matches && source_matches
        })
        .cloned()
        .collect()
}

/// Sorted unique sources for the dropdown, without the sentinel
pub fn source_options(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.source.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, categories: &[&str], source: &str) -> Record {
        Record {
            name: name.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            source: source.to_string(),
            filename: format!("{}.zip", name.to_lowercase()),
            favorite: false,
        }
    }

    #[test]
    fn empty_query_and_all_sources_returns_everything_in_order() {
        let records = vec![
            record("Zelda", &["Adventure"], "SNES"),
            record("Asteroids", &["Arcade"], "MAME"),
        ];
        assert_eq!(filter_records(&records, "", ALL_SOURCES), records);
    }

    #[test]
    fn matches_name_or_category() {
        let records = vec![
            record("Pac Man", &["Arcade", "Classic"], "MAME"),
            record("Doom", &["Shooter"], "DOS"),
        ];

        let by_name = filter_records(&records, "pac", ALL_SOURCES);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Pac Man");

        let by_category = filter_records(&records, "shooter", ALL_SOURCES);
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].name, "Doom");
    }

    #[test]
    fn text_and_source_predicates_are_conjunctive() {
        let records = vec![
            record("Pac Man", &["Arcade"], "MAME"),
            record("Pac Land", &["Arcade"], "SNES"),
        ];

        let filtered = filter_records(&records, "pac", "SNES");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Pac Land");
    }

    #[test]
    fn source_selector_is_exact() {
        let records = vec![record("Doom", &["Shooter"], "DOS")];
        assert!(filter_records(&records, "", "DO").is_empty());
        assert_eq!(filter_records(&records, "", "DOS").len(), 1);
    }

    #[test]
    fn query_folds_turkish_diacritics() {
        let records = vec![record("Oyün Salonu", &["Klasik"], "unknown")];
        assert_eq!(filter_records(&records, "oyun", ALL_SOURCES).len(), 1);
        assert_eq!(filter_records(&records, "OYÜN", ALL_SOURCES).len(), 1);
    }

    #[test]
    fn folding_covers_both_cases() {
        assert_eq!(fold_diacritics("Şöför İĞÇÜ"), "sofor igcu");
        assert_eq!(fold_diacritics("Café"), "cafe");
    }

    #[test]
    fn source_options_are_sorted_and_unique() {
        let records = vec![
            record("A", &[], "SNES"),
            record("B", &[], "MAME"),
            record("C", &[], "SNES"),
        ];
        assert_eq!(source_options(&records), vec!["MAME", "SNES"]);
    }
}
