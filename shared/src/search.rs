// Accent- and case-insensitive substring search over check-in records.
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// One searchable value of a record.
#[derive(Debug, Clone, Copy)]
pub enum SearchField<'a> {
    Text(&'a str),
    /// Plates are compared with hyphens removed on both sides.
    Plate(&'a str),
}

pub trait Searchable {
    fn search_fields(&self) -> Vec<SearchField<'_>>;
}

/// Lowercase, decompose (NFD) and drop combining marks: "João" -> "joao".
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase().nfd().filter(|c| !is_combining_mark(*c)).collect()
}

fn strip_hyphens(text: &str) -> String {
    text.replace('-', "")
}

/// True when any field of `record` contains `term` after normalization.
/// A blank term matches everything.
pub fn matches<R: Searchable>(record: &R, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let needle = normalize_text(term);
    let plate_needle = strip_hyphens(&needle);

    record.search_fields().into_iter().any(|field| match field {
        SearchField::Text(value) => normalize_text(value).contains(&needle),
        SearchField::Plate(value) => strip_hyphens(&normalize_text(value)).contains(&plate_needle),
    })
}

/// Records matching `term`, in their original order.
pub fn search<R: Searchable + Clone>(records: &[R], term: &str) -> Vec<R> {
    if term.trim().is_empty() {
        return records.to_vec();
    }
    records.iter().filter(|record| matches(*record, term)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PersonRecord, VehicleRecord};

    fn vehicle(driver: &str, plate: &str, model: &str) -> VehicleRecord {
        VehicleRecord {
            driver: driver.to_string(),
            plate: plate.to_string(),
            model: model.to_string(),
            ..VehicleRecord::default()
        }
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("João"), "joao");
        assert_eq!(normalize_text("CAMINHÃO Açaí"), "caminhao acai");
    }

    #[test]
    fn test_blank_term_returns_everything() {
        let records = vec![vehicle("Ana", "ABC1234", "Gol"), vehicle("Bia", "XYZ9876", "Uno")];
        assert_eq!(search(&records, ""), records);
        assert_eq!(search(&records, "   "), records);
    }

    #[test]
    fn test_accent_insensitive() {
        let records = vec![vehicle("João", "ABC1234", "Gol"), vehicle("Maria", "XYZ9876", "Uno")];
        let found = search(&records, "joao");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].driver, "João");
        assert_eq!(search(&records, "JOÃO").len(), 1);
    }

    #[test]
    fn test_substring_and_plate_hyphens() {
        let records = vec![vehicle("Ana", "ABC1234", "Gol"), vehicle("Bia", "XYZ9876", "Onix")];
        assert_eq!(search(&records, "abc-12").len(), 1);
        assert_eq!(search(&records, "C12").len(), 1);
        assert_eq!(search(&records, "oni")[0].driver, "Bia");
        assert!(search(&records, "zzz").is_empty());
    }

    #[test]
    fn test_preserves_order() {
        let records = vec![
            vehicle("Ana Souza", "AAA1111", "Gol"),
            vehicle("Bia", "BBB2222", "Gol"),
            vehicle("Carla Souza", "CCC3333", "Uno"),
        ];
        let found: Vec<String> = search(&records, "souza").into_iter().map(|v| v.driver).collect();
        assert_eq!(found, vec!["Ana Souza", "Carla Souza"]);
    }

    #[test]
    fn test_person_fields() {
        let person = PersonRecord {
            name: "Zé Ramalho".to_string(),
            document: "123.456".to_string(),
            profession: "Músico".to_string(),
            ..PersonRecord::default()
        };
        assert!(matches(&person, "ze"));
        assert!(matches(&person, "musico"));
        assert!(matches(&person, "123."));
        assert!(!matches(&person, "engenheiro"));
    }
}
