/// Upper-case acronyms that are kept fully capitalized in generated identifiers.
pub const COMMON_INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID",
    "IP", "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS",
    "TTL", "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XMPP", "XSRF", "XSS",
];

const DIGIT_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// True when `word` (in any case) is one of [`COMMON_INITIALISMS`].
pub fn is_common_initialism(word: &str) -> bool {
    let upper = word.to_uppercase();
    COMMON_INITIALISMS.contains(&upper.as_str())
}

/// Return the identifier without surrounding double quotes or backticks.
pub fn unquote_identifier(ident: &str) -> &str {
    ident
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| ident.strip_prefix('`').and_then(|s| s.strip_suffix('`')))
        .unwrap_or(ident)
}

/// Normalize an identifier for case-insensitive matching.
///
/// Trims whitespace, removes surrounding quotes on a single identifier,
/// and lowercases the result.
pub fn normalize_identifier(ident: &str) -> String {
    unquote_identifier(ident.trim()).to_ascii_lowercase()
}

/// Split a potentially schema-qualified name into `(schema, relation)`.
///
/// Handles dots inside quoted identifiers, e.g. `` `my.schema`.`table.name` ``.
pub fn split_schema_and_relation(name: &str) -> Option<(String, String)> {
    let mut quote: Option<char> = None;
    let mut start = 0usize;
    let mut parts: Vec<&str> = Vec::new();

    for (idx, ch) in name.char_indices() {
        match (ch, quote) {
            ('"' | '`', None) => quote = Some(ch),
            (c, Some(open)) if c == open => quote = None,
            ('.', None) => {
                parts.push(name[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(name[start..].trim());

    if parts.len() < 2 {
        return None;
    }

    let schema = unquote_identifier(parts[parts.len() - 2]).to_string();
    let relation = unquote_identifier(parts[parts.len() - 1]).to_string();
    Some((schema, relation))
}

/// Terminal relation name of a possibly schema-qualified, quoted table name,
/// with its original case preserved.
///
/// Examples:
/// - `"shop.orders"` -> `"orders"`
/// - ``"`shop`.`Orders`"`` -> `"Orders"`
pub fn relation_name(name: &str) -> String {
    if let Some((_, relation)) = split_schema_and_relation(name.trim()) {
        return relation;
    }
    unquote_identifier(name.trim()).to_string()
}

/// Replace a leading ASCII digit with its English word and an underscore.
///
/// `1stringColumn` becomes `one_stringColumn`, which the normalizer then turns
/// into `OneStringColumn`. Names that do not start with a digit are returned
/// unchanged.
pub fn spell_leading_digit(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next().and_then(|c| c.to_digit(10)) {
        Some(digit) => format!("{}_{}", DIGIT_WORDS[digit as usize], chars.as_str()),
        None => raw.to_string(),
    }
}

/// Turn a raw column name into an exported Go identifier.
///
/// The name is split into words at underscores (and any other character that
/// cannot appear in a Go identifier) and at every lower-case to non-lower-case
/// transition. Each word is capitalized, common initialisms are
/// upper-cased and the words are joined without separators. A single `_` is
/// kept between two words when it separates two digits, so `1__2` becomes
/// `1_2`. A lone `_` (or any all-underscore name) maps to `_`.
///
/// The result may start with a digit; callers that need a legal identifier
/// should run [`spell_leading_digit`] first.
pub fn normalize_field_name(raw: &str) -> String {
    let words = split_words(raw);
    if words.is_empty() {
        return "_".to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut previous: Option<&str> = None;
    for word in words {
        let digit_boundary = previous
            .and_then(|p| p.chars().last())
            .is_some_and(|c| c.is_ascii_digit())
            && word.starts_with(|c: char| c.is_ascii_digit());
        if digit_boundary {
            out.push('_');
        }
        out.push_str(&lint_word(word));
        previous = Some(word);
    }
    out
}

fn split_words(raw: &str) -> Vec<&str> {
    let mut words = Vec::new();
    for segment in raw
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
    {
        let mut start = 0usize;
        let mut prev_lower = false;
        for (idx, ch) in segment.char_indices() {
            if prev_lower && !ch.is_lowercase() {
                words.push(&segment[start..idx]);
                start = idx;
            }
            prev_lower = ch.is_lowercase();
        }
        words.push(&segment[start..]);
    }
    words
}

fn lint_word(word: &str) -> String {
    if is_common_initialism(word) {
        return word.to_uppercase();
    }

    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = chars.as_str();

    if !word.chars().any(char::is_uppercase) {
        first.to_uppercase().chain(rest.chars()).collect()
    } else if !word.chars().any(char::is_lowercase) {
        std::iter::once(first).chain(rest.to_lowercase().chars()).collect()
    } else {
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_field_name_matches_lint_examples() {
        assert_eq!(normalize_field_name("_"), "_");
        assert_eq!(normalize_field_name("foo_id"), "FooID");
        assert_eq!(normalize_field_name("foo__id"), "FooID");
        assert_eq!(normalize_field_name("1__2"), "1_2");
        assert_eq!(normalize_field_name("_id"), "ID");
        assert_eq!(normalize_field_name("foo"), "Foo");
    }

    #[test]
    fn normalize_field_name_keeps_initialisms_upper_case() {
        assert_eq!(normalize_field_name("API"), "API");
        assert_eq!(normalize_field_name("api_url"), "APIURL");
        assert_eq!(normalize_field_name("userId"), "UserID");
        assert_eq!(normalize_field_name("request_uuid"), "RequestUUID");
    }

    #[test]
    fn normalize_field_name_splits_camel_case_words() {
        assert_eq!(normalize_field_name("stringColumn"), "StringColumn");
        assert_eq!(normalize_field_name("nullStringColumn"), "NullStringColumn");
        assert_eq!(normalize_field_name("TimeStamp"), "TimeStamp");
        assert_eq!(normalize_field_name("VarChar"), "VarChar");
    }

    #[test]
    fn normalize_field_name_title_cases_shouting_words() {
        assert_eq!(normalize_field_name("USER_NAME"), "UserName");
        assert_eq!(normalize_field_name("CREATED_AT"), "CreatedAt");
    }

    #[test]
    fn normalize_field_name_collapses_stray_underscores() {
        assert_eq!(normalize_field_name("__created__at__"), "CreatedAt");
        assert_eq!(normalize_field_name("___"), "_");
        assert_eq!(normalize_field_name(""), "_");
        for raw in ["a_b_c", "foo__bar", "_x_", "order_line_id"] {
            assert!(!normalize_field_name(raw).contains('_'), "{raw}");
        }
    }

    #[test]
    fn normalize_field_name_drops_non_identifier_characters() {
        assert_eq!(normalize_field_name("a`b"), "AB");
        assert_eq!(normalize_field_name(r#"say "hi""#), "SayHi");
        assert_eq!(normalize_field_name("first name"), "FirstName");
        assert_eq!(normalize_field_name("order-id"), "OrderID");
        assert_eq!(normalize_field_name("1-2"), "1_2");
        assert_eq!(normalize_field_name(r#"`""#), "_");
    }

    #[test]
    fn normalize_field_name_keeps_leading_digits() {
        assert_eq!(normalize_field_name("1st_place"), "1stPlace");
        assert_eq!(normalize_field_name("v2_3"), "V2_3");
    }

    #[test]
    fn spell_leading_digit_only_touches_leading_digit() {
        assert_eq!(spell_leading_digit("1stringColumn"), "one_stringColumn");
        assert_eq!(spell_leading_digit("9"), "nine_");
        assert_eq!(spell_leading_digit("column1"), "column1");
        assert_eq!(spell_leading_digit(""), "");
        assert_eq!(
            normalize_field_name(&spell_leading_digit("1stringColumn")),
            "OneStringColumn"
        );
    }

    #[test]
    fn split_schema_and_relation_handles_quoted_dots() {
        assert_eq!(
            split_schema_and_relation(r#""my.schema"."table.name""#),
            Some(("my.schema".to_string(), "table.name".to_string()))
        );
        assert_eq!(
            split_schema_and_relation("`shop`.`order.lines`"),
            Some(("shop".to_string(), "order.lines".to_string()))
        );
        assert_eq!(split_schema_and_relation("orders"), None);
    }

    #[test]
    fn relation_name_strips_schema_and_quotes() {
        assert_eq!(relation_name("shop.orders"), "orders");
        assert_eq!(relation_name("`shop`.`Orders`"), "Orders");
        assert_eq!(relation_name(r#""Orders""#), "Orders");
        assert_eq!(normalize_identifier(" `Orders` "), "orders");
    }
}
