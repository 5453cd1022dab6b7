use crate::error::{Error, Result};

/// PostgreSQL truncates identifiers longer than this many bytes.
const MAX_IDENTIFIER_LEN: usize = 63;

/// Accepts plain SQL identifiers (`[A-Za-z_][A-Za-z0-9_]*`) and returns them
/// double-quoted, ready to be placed into DDL that cannot take bind parameters.
pub fn quote_identifier(name: &str) -> Result<String> {
    let mut chars = name.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid_start || !valid_rest || name.len() > MAX_IDENTIFIER_LEN {
        return Err(Error::Config(format!("Invalid database name: {:?}", name)));
    }
    Ok(format!("\"{}\"", name))
}

/// Trims a search keyword, rejecting blank input. Case is left to the database.
pub fn trim_keyword(keyword: &str) -> Result<&str> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(Error::BadRequest("keyword must not be empty".to_string()));
    }
    Ok(keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_plain_identifier() {
        assert_eq!(quote_identifier("vac").unwrap(), "\"vac\"");
        assert_eq!(quote_identifier("_vac_2").unwrap(), "\"_vac_2\"");
    }

    #[test]
    fn rejects_injection_attempt() {
        assert!(quote_identifier("vac\"; DROP DATABASE postgres; --").is_err());
        assert!(quote_identifier("1vac").is_err());
        assert!(quote_identifier("").is_err());
        assert!(quote_identifier(&"a".repeat(64)).is_err());
    }

    #[test]
    fn keyword_is_trimmed_but_keeps_its_case() {
        assert_eq!(trim_keyword("  Python ").unwrap(), "Python");
        assert_eq!(trim_keyword("МОСКВА").unwrap(), "МОСКВА");
    }

    #[test]
    fn blank_keyword_is_rejected() {
        assert!(matches!(trim_keyword("   "), Err(Error::BadRequest(_))));
    }
}
