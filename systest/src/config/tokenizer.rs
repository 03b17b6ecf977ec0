//! Shell-style word splitting for multi-valued settings.
//!
//! Raw values such as `@smoke "@slow and not @flaky"` become
//! `["@smoke", "@slow and not @flaky"]`. Splitting follows POSIX shell rules
//! as implemented by [`shlex`].

use std::sync::Arc;

use super::Tier;
use crate::{SystestError, SystestResult};

/// Split `raw` into tokens.
///
/// Unquoted whitespace separates tokens; single- or double-quoted text is
/// kept verbatim without its quotes. An empty or blank string yields no
/// tokens.
///
/// # Examples
///
/// ```
/// use systest::config::{Tier, tokenize};
///
/// let tokens = tokenize(r#"@smoke "@slow and not @flaky""#, Tier::Environment)?;
/// assert_eq!(tokens, ["@smoke", "@slow and not @flaky"]);
/// # Ok::<_, std::sync::Arc<systest::SystestError>>(())
/// ```
///
/// # Errors
///
/// Returns [`SystestError::Parse`] naming `raw` and `tier` when a quote is
/// left unterminated.
pub fn tokenize(raw: &str, tier: Tier) -> SystestResult<Vec<String>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    shlex::split(raw).ok_or_else(|| {
        Arc::new(SystestError::Parse {
            raw: raw.to_owned(),
            tier,
        })
    })
}

/// Quote `tokens` back into a single raw string accepted by [`tokenize`].
///
/// Returns `None` when a token contains a NUL byte, which cannot be quoted.
#[must_use]
pub fn join<'a, I>(tokens: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    shlex::try_join(tokens).ok()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", &[])]
    #[case("   ", &[])]
    #[case("pretty", &["pretty"])]
    #[case("a b\tc", &["a", "b", "c"])]
    #[case(r#"a "c d" "e""#, &["a", "c d", "e"])]
    #[case("'@slow and not @flaky' @smoke", &["@slow and not @flaky", "@smoke"])]
    #[case(r#"key="a value""#, &["key=a value"])]
    fn splits_shell_words(#[case] raw: &str, #[case] expected: &[&str]) {
        let tokens = tokenize(raw, Tier::Environment).expect("tokenize");
        assert_eq!(tokens, expected);
    }

    #[rstest]
    #[case(r#"a "b c"#)]
    #[case("'unterminated")]
    fn unterminated_quote_is_a_parse_error(#[case] raw: &str) {
        let err = tokenize(raw, Tier::ProjectFile).expect_err("must fail");
        match err.as_ref() {
            SystestError::Parse { raw: reported, tier } => {
                assert_eq!(reported, raw);
                assert_eq!(*tier, Tier::ProjectFile);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("project configuration file"));
    }

    #[test]
    fn tokenize_is_deterministic() {
        let raw = r#"one "two three" 'four'"#;
        let first = tokenize(raw, Tier::UserFile).expect("tokenize");
        let second = tokenize(raw, Tier::UserFile).expect("tokenize");
        assert_eq!(first, second);
    }

    #[rstest]
    #[case(&["plain"])]
    #[case(&["with space", "other"])]
    #[case(&["@slow and not @flaky", "@smoke", "tab\there"])]
    #[case(&["name=value with spaces", "x=1"])]
    #[case(&[])]
    fn join_then_tokenize_restores_tokens(#[case] tokens: &[&str]) {
        let raw = join(tokens.iter().copied()).expect("quotable tokens");
        let restored = tokenize(&raw, Tier::Cli).expect("tokenize joined value");
        assert_eq!(restored, tokens);
    }
}
