//! Case conversion for derived names.
//!
//! Model names are written in PascalCase (`UtilisateurProfil`), domain names
//! in CONSTANT_CASE (`DO_ID`). Both split into the same words so any style
//! can be produced from either.

/// Split an identifier into words.
///
/// Word boundaries are separators (`_`, `-`, `.`, spaces and any non
/// identifier character), a lowercase letter or digit followed by an
/// uppercase letter, and the last capital of an acronym followed by a
/// lowercase letter (`HTTPServer` → `HTTP`, `Server`).
pub fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || !unicode_ident::is_xid_continue(c) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if !current.is_empty() && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `UtilisateurProfil` → `UTILISATEUR_PROFIL`
pub fn to_constant_case(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// `UtilisateurProfil` → `utilisateur_profil`
pub fn to_snake_case(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// `DO_CODE_LIST` → `DoCodeList`
pub fn to_pascal_case(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|w| upper_first(&w.to_lowercase()))
        .collect()
}

/// `UtilisateurProfil` → `utilisateurProfil`
pub fn to_camel_case(input: &str) -> String {
    lower_first(&to_pascal_case(input))
}

pub fn upper_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lower_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// English plural of the last word of a PascalCase name.
pub fn pluralize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let lower = input.to_lowercase();
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{input}es");
    }

    if let Some(stem) = input.strip_suffix('y') {
        let before = stem.chars().last();
        if before.is_some_and(|c| !"aeiouAEIOU".contains(c)) {
            return format!("{stem}ies");
        }
    }

    format!("{input}s")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Foo", "FOO")]
    #[case("UtilisateurProfil", "UTILISATEUR_PROFIL")]
    #[case("DO_ID", "DO_ID")]
    #[case("HTTPServer", "HTTP_SERVER")]
    #[case("Adresse2Ligne", "ADRESSE2_LIGNE")]
    #[case("typeUtilisateurCode", "TYPE_UTILISATEUR_CODE")]
    fn test_constant_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(to_constant_case(input), expected);
    }

    #[rstest]
    #[case("DO_CODE_LIST", "DoCodeList")]
    #[case("profil", "Profil")]
    #[case("UtilisateurId", "UtilisateurId")]
    fn test_pascal_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(to_pascal_case(input), expected);
    }

    #[test]
    fn test_camel_and_snake() {
        assert_eq!(to_camel_case("UtilisateurProfil"), "utilisateurProfil");
        assert_eq!(to_snake_case("UtilisateurProfil"), "utilisateur_profil");
        assert_eq!(lower_first("Securite"), "securite");
        assert_eq!(upper_first("securite"), "Securite");
    }

    #[rstest]
    #[case("Profil", "Profils")]
    #[case("Adresse", "Adresses")]
    #[case("Statut", "Statuts")]
    #[case("Category", "Categories")]
    #[case("Key", "Keys")]
    #[case("Box", "Boxes")]
    #[case("Status", "Statuses")]
    fn test_pluralize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(pluralize(input), expected);
    }
}
