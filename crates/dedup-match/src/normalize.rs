//! Field normalization ahead of comparison.

use dedup_model::{Record, Role, Schema};

/// Normalize a person or company name for fuzzy comparison.
///
/// - Converts to lowercase
/// - Spells out `&` as `and`
/// - Collapses whitespace runs and trims
pub fn normalize_name(raw: &str) -> String {
    raw.to_lowercase()
        .replace('&', " and ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join the non-blank, trimmed address lines of `record` with `", "`.
///
/// Lines are taken in the schema's declaration order.
pub fn concat_address(record: &Record, schema: &Schema) -> String {
    (0..schema.address_lines.len())
        .map(|index| schema.value(record, Role::AddressLine(index)).trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Leading run of ASCII digits (the house number), if the address starts with one.
pub fn leading_number(address: &str) -> Option<&str> {
    let end = address.bytes().take_while(u8::is_ascii_digit).count();
    (end > 0).then(|| &address[..end])
}

/// Split an email cell on commas into trimmed, lower-cased, non-empty addresses.
pub fn split_emails(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_spells_out_ampersand() {
        assert_eq!(normalize_name("  Smith &Jones  LLC "), "smith and jones llc");
        assert_eq!(normalize_name("A&B"), "a and b");
    }

    #[test]
    fn name_collapses_tabs_and_newlines() {
        assert_eq!(normalize_name("John\t\n  SMITH"), "john smith");
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn address_skips_blank_lines() {
        let schema = Schema::small_default();
        let record = Record::from_pairs([
            ("Address 1", " 12 Main St "),
            ("Address 2", "   "),
            ("Address 3", "Suite 4"),
        ]);
        assert_eq!(concat_address(&record, &schema), "12 Main St, Suite 4");
    }

    #[test]
    fn address_of_record_without_lines_is_empty() {
        let schema = Schema::master_default();
        assert_eq!(concat_address(&Record::new(), &schema), "");
    }

    #[test]
    fn leading_number_requires_leading_digit() {
        assert_eq!(leading_number("221b baker street"), Some("221"));
        assert_eq!(leading_number("baker street 221"), None);
        assert_eq!(leading_number(" 221 baker street"), None);
        assert_eq!(leading_number(""), None);
    }

    #[test]
    fn emails_split_on_commas() {
        let emails: Vec<String> = split_emails(" A@X.com, ,b@y.org,").collect();
        assert_eq!(emails, vec!["a@x.com", "b@y.org"]);
    }
}
