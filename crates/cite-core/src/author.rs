//! Author string handling

/// Extract the first author's surname from a free-form author string.
///
/// The author field is expected in "Surname, First" form. Everything before
/// the first comma is the surname; without a comma the whole string is used.
/// Surrounding whitespace is trimmed either way.
///
/// ```
/// use cite_core::first_author_surname;
/// assert_eq!(first_author_surname("Smith, John"), "Smith");
/// assert_eq!(first_author_surname("Smith"), "Smith");
/// ```
pub fn first_author_surname(author: &str) -> &str {
    match author.split_once(',') {
        Some((surname, _)) => surname.trim(),
        None => author.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surname_before_comma() {
        assert_eq!(first_author_surname("Smith, John"), "Smith");
    }

    #[test]
    fn test_surname_without_comma() {
        assert_eq!(first_author_surname("Smith"), "Smith");
    }

    #[test]
    fn test_surname_trims_whitespace() {
        assert_eq!(first_author_surname("  van Dijk ,  Anna"), "van Dijk");
        assert_eq!(first_author_surname("  Plato  "), "Plato");
    }

    #[test]
    fn test_only_first_comma_splits() {
        // Multiple authors: only the first comma matters
        assert_eq!(first_author_surname("Smith, J., Jones, K."), "Smith");
    }

    #[test]
    fn test_no_comma_keeps_full_name() {
        // "First Last" form is not reordered
        assert_eq!(first_author_surname("John Smith"), "John Smith");
    }

    #[test]
    fn test_leading_comma_gives_empty_surname() {
        assert_eq!(first_author_surname(", John"), "");
    }
}
