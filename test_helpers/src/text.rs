//! Text helpers for behavioural step parameters.

/// Strips one layer of matching single or double quotes from a step
/// parameter.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    trimmed
}

/// Splits a comma-separated step parameter into trimmed, unquoted items.
///
/// An empty parameter yields an empty list.
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    let body = unquote(value);
    if body.trim().is_empty() {
        return Vec::new();
    }
    body.split(',')
        .map(|item| unquote(item).to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{split_list, unquote};

    #[test]
    fn unquote_removes_single_outer_quotes() {
        assert_eq!(unquote("'value'"), "value");
        assert_eq!(unquote(" \"value\" "), "value");
        assert_eq!(unquote("\"'nested'\""), "'nested'");
    }

    #[test]
    fn split_list_handles_empty_and_quoted_items() {
        assert!(split_list("\"\"").is_empty());
        assert_eq!(split_list("\"@a, '@b c'\""), ["@a", "@b c"]);
    }
}
