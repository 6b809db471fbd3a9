//! Casing helpers for labels shown in reports and model names.

/// Capitalize the first letter of each word, lowercase the rest
pub fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(head) => head.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `date_pairing_problem` -> `Date_Pairing_Problem`
pub fn title_snake(name: &str) -> String {
    name.split('_').map(title_case).collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("non binary"), "Non Binary");
        assert_eq!(title_case("WOMAN"), "Woman");
        assert_eq!(title_case("friday"), "Friday");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_snake() {
        assert_eq!(title_snake("date_pairing_problem"), "Date_Pairing_Problem");
        assert_eq!(title_snake("speed_DATING"), "Speed_Dating");
    }
}
