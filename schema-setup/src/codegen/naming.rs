//! Naming and literal helpers for the generated PHP source

use heck::ToTitleCase;

/// Human-readable label for a table or column name
/// e.g., "customer_entity" -> "Customer Entity"
pub fn to_label(name: &str) -> String {
    name.to_title_case()
}

/// Quote a value as a single-quoted PHP string literal
pub fn php_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if ch == '\\' || ch == '\'' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

/// PHP array literal of quoted strings, e.g. `['a', 'b']`
pub fn php_string_list(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| php_string(v)).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_label() {
        assert_eq!(to_label("customer_entity"), "Customer Entity");
        assert_eq!(to_label("entity_id"), "Entity Id");
        assert_eq!(to_label("storeId"), "Store Id");
    }

    #[test]
    fn test_php_string() {
        assert_eq!(php_string("plain"), "'plain'");
        assert_eq!(php_string("it's"), r"'it\'s'");
        assert_eq!(php_string(r"Acme\Sales"), r"'Acme\\Sales'");
    }

    #[test]
    fn test_php_string_list() {
        assert_eq!(
            php_string_list(&["email".to_string(), "website_id".to_string()]),
            "['email', 'website_id']"
        );
        assert_eq!(php_string_list(&[]), "[]");
    }
}
