//! Built-in markdown grammar.
//!
//! Block constructs (quotes, fenced code, titles, rules, list markers,
//! reference definitions) come first, then inline ones. Emphasis, strike
//! and link text nest the inline rules again.

use std::sync::LazyLock;

use super::grammar::{Grammar, Rule};

static MARKDOWN: LazyLock<Grammar> = LazyLock::new(build_markdown);
static INLINE: LazyLock<Grammar> = LazyLock::new(build_inline);

pub(super) fn markdown() -> &'static Grammar {
    &MARKDOWN
}

fn inline() -> &'static Grammar {
    &INLINE
}

fn rule(name: &str, pattern: &str) -> Rule {
    Rule::new(name, pattern).unwrap()
}

fn punctuation(pattern: &str) -> Grammar {
    Grammar::new().with_rule(rule("punctuation", pattern))
}

fn build_markdown() -> Grammar {
    let code_fence = Grammar::new()
        .with_rule(rule(
            "code-block",
            r"(?s)(?P<lb>^```[^\n]*\n).+?(?P<la>\r?\n```$)",
        ))
        .with_rule(rule("code-language", r"(?P<lb>^```)[^\n]+"))
        .with_rule(rule("punctuation", r"```"));

    let url_reference = Grammar::new()
        .with_rule(rule("variable", r"(?P<lb>^!?\[)[^\]]+"))
        .with_rule(rule(
            "string",
            r#"(?:"(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'|\((?:\\.|[^)\\])*\))$"#,
        ))
        .with_rule(rule("punctuation", r"^[\[\]!:]|[<>]"));

    Grammar::new()
        .with_rule(rule("blockquote", r"(?m)^>(?:[\t ]*>)*").with_alias("punctuation"))
        .with_rule(rule("code", r"(?ms)^```.*?^```$").with_inner(code_fence))
        .with_rule(
            rule("title", r"(?m)\S.*\r?\n(?:==+|--+)(?P<la>[ \t]*$)")
                .with_alias("important")
                .with_inner(punctuation(r"==+$|--+$")),
        )
        .with_rule(
            rule("title", r"(?m)(?P<lb>^\s*)#.+")
                .with_alias("important")
                .with_inner(punctuation(r"^#+|#+$")),
        )
        .with_rule(
            rule(
                "hr",
                r"(?m)(?P<lb>^\s*)(?:\*(?:[\t ]*\*){2,}|-(?:[\t ]*-){2,})(?P<la>\s*$)",
            )
            .with_alias("punctuation"),
        )
        .with_rule(
            rule("list", r"(?m)(?P<lb>^\s*)(?:[*+-]|\d+\.)(?P<la>[\t ].)")
                .with_alias("punctuation"),
        )
        .with_rule(
            rule(
                "url-reference",
                r#"!?\[[^\]]+\]:[\t ]+(?:\S+|<(?:\\.|[^>\\])+>)(?:[\t ]+(?:"(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'|\((?:\\.|[^)\\])*\)))?"#,
            )
            .with_alias("url")
            .with_inner(url_reference),
        )
        .with_rule(bold())
        .with_rule(italic())
        .with_rule(strike())
        .with_rule(code_snippet())
        .with_rule(url())
}

fn build_inline() -> Grammar {
    Grammar::new()
        .with_rule(bold())
        .with_rule(italic())
        .with_rule(strike())
        .with_rule(code_snippet())
        .with_rule(url())
}

fn bold() -> Rule {
    let inner = Grammar::new()
        .with_rule(rule("content", r"(?s)(?P<lb>^..).+?(?P<la>..$)").with_static_inner(inline))
        .with_rule(rule("punctuation", r"\*\*|__"));
    rule(
        "bold",
        r"(?P<lb>^|[^\\])(?:\*\*(?:[^*\n]|\*[^*\n])+?\*\*|__(?:[^_\n]|_[^_\n])+?__)",
    )
    .with_inner(inner)
}

fn italic() -> Rule {
    let inner = Grammar::new()
        .with_rule(rule("content", r"(?s)(?P<lb>^.).+?(?P<la>.$)").with_static_inner(inline))
        .with_rule(rule("punctuation", r"[*_]"));
    rule(
        "italic",
        r"(?P<lb>^|[^\\*])(?:\*(?:[^*\n]|\*\*[^*\n]+\*\*)+?\*|_(?:[^_\n]|__[^_\n]+__)+?_)",
    )
    .with_inner(inner)
}

fn strike() -> Rule {
    let inner = Grammar::new()
        .with_rule(
            rule("content", r"(?s)(?P<lb>^~~?).+?(?P<la>~~?$)").with_static_inner(inline),
        )
        .with_rule(rule("punctuation", r"~~?"));
    rule("strike", r"(?P<lb>^|[^\\])(?:~~[^~\n]+?~~|~[^~\n]+?~)").with_inner(inner)
}

fn code_snippet() -> Rule {
    rule(
        "code-snippet",
        r"(?P<lb>^|[^\\`])(?:``[^`\n]+(?:`[^`\n]+)*``|`[^`\n]+`)",
    )
    .with_alias("keyword")
}

fn url() -> Rule {
    let inner = Grammar::new()
        .with_rule(rule("operator", r"^!"))
        .with_rule(rule("content", r"(?P<lb>^\[)[^\]]+(?P<la>\])").with_static_inner(inline))
        .with_rule(rule("variable", r"(?P<lb>^\][ \t]?\[)[^\]]+(?P<la>\]$)"))
        .with_rule(rule("url", r"(?P<lb>^\]\()[^\s)]+"))
        .with_rule(rule(
            "string",
            r#"(?P<lb>^[ \t]+)"(?:\\.|[^"\\])*"(?P<la>\)$)"#,
        ));
    rule(
        "url",
        r#"!?\[[^\]]+\](?:\([^\s)]+(?:[\t ]+"(?:\\.|[^"\\])*")?\)|[ \t]?\[[^\]\n]*\])"#,
    )
    .with_inner(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorate::{Token, TokenContent};

    fn kinds(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().filter_map(Token::kind).collect()
    }

    fn nested(token: &Token) -> &[Token] {
        match token {
            Token::Typed {
                content: TokenContent::Nested(tokens),
                ..
            } => tokens,
            other => panic!("expected nested token, got {:?}", other),
        }
    }

    #[test]
    fn test_grammars_compile() {
        assert_eq!(markdown().rules().len(), 12);
        assert_eq!(inline().rules().len(), 5);
    }

    #[test]
    fn test_atx_title() {
        let tokens = markdown().tokenize("# Title");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), Some("title"));
        assert_eq!(kinds(nested(&tokens[0])), vec!["punctuation"]);
    }

    #[test]
    fn test_setext_title() {
        let tokens = markdown().tokenize("Title\n=====");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), Some("title"));
    }

    #[test]
    fn test_bold_nests_inline_rules() {
        let tokens = markdown().tokenize("**a *b* c**");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), Some("bold"));

        let parts = nested(&tokens[0]);
        assert_eq!(kinds(parts), vec!["punctuation", "content", "punctuation"]);
        assert_eq!(kinds(nested(&parts[1])), vec!["italic"]);
    }

    #[test]
    fn test_link_parts() {
        let tokens = markdown().tokenize("[docs](https://example.com)");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), Some("url"));
        assert_eq!(kinds(nested(&tokens[0])), vec!["content", "url"]);
    }

    #[test]
    fn test_fenced_code() {
        let text = "```rust\nlet x = 1;\n```";
        let tokens = markdown().tokenize(text);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), Some("code"));
        assert_eq!(
            kinds(nested(&tokens[0])),
            vec!["punctuation", "code-language", "code-block", "punctuation"]
        );
    }

    #[test]
    fn test_escaped_emphasis_is_plain() {
        let tokens = markdown().tokenize(r"\*not italic\*");
        assert!(tokens.iter().all(|t| !t.is_typed()));
    }
}
