//! Identifier word splitting.
//!
//! Splits `camelCase` and `PascalCase` identifiers into their words so that
//! `singleImageElement` is findable by `image` or `element`.

/// Split `s` into words at every uppercase letter after the first character.
///
/// A character counts as uppercase when it is a cased letter whose uppercase
/// form is itself. The concatenation of the returned words is always `s`, and
/// no returned word is empty.
///
/// # Example
///
/// ```rust
/// use valsearch_core::case::split_on_case;
///
/// assert_eq!(split_on_case("singleImageElement"), vec!["single", "Image", "Element"]);
/// ```
pub fn split_on_case(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, c) in s.chars().enumerate() {
        if i > 0 && is_upper(c) {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn is_upper(c: char) -> bool {
    c.to_uppercase().eq(std::iter::once(c)) && !c.to_lowercase().eq(std::iter::once(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(
            split_on_case("singleImageElement"),
            vec!["single", "Image", "Element"]
        );
    }

    #[test]
    fn test_leading_uppercase_is_not_a_boundary() {
        assert_eq!(split_on_case("HeroBanner"), vec!["Hero", "Banner"]);
    }

    #[test]
    fn test_consecutive_uppercase() {
        assert_eq!(split_on_case("myURL"), vec!["my", "U", "R", "L"]);
    }

    #[test]
    fn test_no_uppercase() {
        assert_eq!(split_on_case("basic.val.ts"), vec!["basic.val.ts"]);
    }

    #[test]
    fn test_empty() {
        assert!(split_on_case("").is_empty());
    }

    #[test]
    fn test_uncased_characters_never_split() {
        assert_eq!(split_on_case("a1_2-3"), vec!["a1_2-3"]);
        assert_eq!(split_on_case("日本語"), vec!["日本語"]);
    }

    #[test]
    fn test_non_ascii_uppercase() {
        assert_eq!(split_on_case("smørÅge"), vec!["smør", "Åge"]);
    }

    #[test]
    fn test_concatenation_restores_input() {
        for s in [
            "",
            "a",
            "A",
            "AbC",
            "alreadyCamelCased",
            "/content/heroBanner.val.ts",
            "ÉtéÀParis",
            "x\"Y.z",
        ] {
            let words = split_on_case(s);
            assert_eq!(words.concat(), s);
            assert!(words.iter().all(|w| !w.is_empty()), "empty word in {:?}", s);
        }
    }
}
