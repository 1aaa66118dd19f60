//! Lexer for the rule definition notation.
//!
//! Tokenization via logos: whitespace and the cosmetic parentheses are
//! skipped; `[`, `]`, and `:` are structural; everything else must be a
//! scale-name token. Every token carries its byte span for diagnostics.

use logos::Logos;
use std::ops::Range;

use super::ParseError;

/// One token of the rule notation.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n()]+")]
pub enum Token {
    /// `[`: opens the movable slide group.
    #[token("[")]
    GroupOpen,

    /// `]`: closes the slide group.
    #[token("]")]
    GroupClose,

    /// `:`: separates the front side from the back side.
    #[token(":")]
    SideSeparator,

    /// A scale name, resolved against the registry.
    #[regex("[A-Za-z][A-Za-z0-9]*", |lex| lex.slice().to_string())]
    Name(String),
}

/// Tokenizes a complete definition string, pairing each token with its
/// byte span. Fails on the first character no rule matches.
pub fn tokenize(input: &str) -> Result<Vec<(Token, Range<usize>)>, ParseError> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                return Err(ParseError::UnexpectedCharacter {
                    fragment: lexer.slice().to_string(),
                    span: lexer.span(),
                });
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_structural_characters() {
        let tokens = tokenize("DF [ CF ] D").unwrap();
        let kinds: Vec<&Token> = tokens.iter().map(|(t, _)| t).collect();
        assert_eq!(
            kinds,
            vec![
                &Token::Name("DF".into()),
                &Token::GroupOpen,
                &Token::Name("CF".into()),
                &Token::GroupClose,
                &Token::Name("D".into()),
            ]
        );
    }

    #[test]
    fn test_parens_are_cosmetic() {
        let with = tokenize("(A [ B ] C)").unwrap();
        let without = tokenize("A [ B ] C").unwrap();
        let strip = |v: Vec<(Token, Range<usize>)>| -> Vec<Token> {
            v.into_iter().map(|(t, _)| t).collect()
        };
        assert_eq!(strip(with), strip(without));
    }

    #[test]
    fn test_structural_characters_need_no_whitespace() {
        let tokens = tokenize("A[B]C:D[CI]K").unwrap();
        assert_eq!(tokens.len(), 11);
        assert_eq!(tokens[1].0, Token::GroupOpen);
        assert_eq!(tokens[5].0, Token::SideSeparator);
    }

    #[test]
    fn test_spans_point_into_the_input() {
        let input = "DF [ CF ] D";
        let tokens = tokenize(input).unwrap();
        for (token, span) in &tokens {
            if let Token::Name(name) = token {
                assert_eq!(&input[span.clone()], name);
            }
        }
    }

    #[test]
    fn test_unlexable_character_is_rejected_with_span() {
        let err = tokenize("DF { C").unwrap_err();
        match err {
            ParseError::UnexpectedCharacter { fragment, span } => {
                assert_eq!(fragment, "{");
                assert_eq!(span, 3..4);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
