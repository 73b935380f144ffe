//! Tokenizer / 分词器
//!
//! Splits field text on any non-alphanumeric character and lowercases, so
//! `"paris.jpg"` indexes as `["paris", "jpg"]` and `"@ann"` as `["ann"]`.
//! Queries and fields go through the same function; an index is only as
//! consistent as its two tokenization paths.

/// Tokenize field text / 对字段文本分词
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
        .collect()
}

/// Tokenize a search query / 对搜索查询分词
///
/// Kept separate from [`tokenize`] as the seam where query-side normalization
/// would diverge; today they are identical on purpose.
pub fn tokenize_query(query: &str) -> Vec<String> {
    tokenize(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases() {
        assert_eq!(tokenize("Travel Photos"), vec!["travel", "photos"]);
    }

    #[test]
    fn test_tokenize_splits_punctuation() {
        assert_eq!(tokenize("paris.jpg"), vec!["paris", "jpg"]);
        assert_eq!(tokenize("@ann"), vec!["ann"]);
        assert_eq!(tokenize("one-two_three"), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_tokenize_empty_and_symbols() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ...  ").is_empty());
    }

    #[test]
    fn test_query_matches_field_tokenization() {
        assert_eq!(tokenize_query("Paris.JPG"), tokenize("paris.jpg"));
    }
}
