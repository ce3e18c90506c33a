use logos::Logos;
use std::fmt;

/// Markup tokens. Everything between tags is a single `Text` run, so the
/// token ranges tile the source with no gaps.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token<'src> {
    #[regex(r"<!--([^-]|-[^-])*-->", |lex| lex.slice())]
    Comment(&'src str),

    #[regex(r"<!\[CDATA\[([^\]]|\][^\]]|\]\][^>])*\]\]>", |lex| lex.slice())]
    CData(&'src str),

    #[regex(r"<![A-Za-z][^>]*>", |lex| lex.slice())]
    Declaration(&'src str),

    #[regex(r"<\?[^>]*>", |lex| lex.slice())]
    ProcessingInstruction(&'src str),

    #[regex(r#"<[A-Za-z_:][^<>"']*(("[^"]*"|'[^']*')[^<>"']*)*>"#, |lex| lex.slice())]
    StartTag(&'src str),

    #[regex(r"</[A-Za-z_:][^<>]*>", |lex| lex.slice())]
    EndTag(&'src str),

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),
}

impl<'src> Token<'src> {
    /// Raw source text of the token.
    pub fn slice(&self) -> &'src str {
        match self {
            Token::Comment(s)
            | Token::CData(s)
            | Token::Declaration(s)
            | Token::ProcessingInstruction(s)
            | Token::StartTag(s)
            | Token::EndTag(s)
            | Token::Text(s) => s,
        }
    }
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Comment(_) => write!(f, "comment"),
            Token::CData(_) => write!(f, "CDATA section"),
            Token::Declaration(s) => write!(f, "declaration {}", s),
            Token::ProcessingInstruction(s) => write!(f, "processing instruction {}", s),
            Token::StartTag(s) => write!(f, "start tag {}", s),
            Token::EndTag(s) => write!(f, "end tag {}", s),
            Token::Text(_) => write!(f, "text"),
        }
    }
}

/// Tokenize a source string.
///
/// Returns the first byte offset the lexer could not match as the error
/// value (for example a lone `<` followed by a space).
pub fn tokenize(source: &str) -> Result<Vec<(Token<'_>, std::ops::Range<usize>)>, usize> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(source).spanned() {
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => return Err(span.start),
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_and_text() {
        let tokens = tokenize("<a id=\"1\">hi</a>").unwrap();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].0, Token::StartTag("<a id=\"1\">"));
        assert_eq!(tokens[1].0, Token::Text("hi"));
        assert_eq!(tokens[2].0, Token::EndTag("</a>"));
        assert_eq!(tokens[2].1, 12..16);
    }

    #[test]
    fn test_quoted_angle_bracket_stays_in_tag() {
        let tokens = tokenize("<a title='x > y'/>").unwrap();

        assert_eq!(tokens.len(), 1);
        assert!(matches!(tokens[0].0, Token::StartTag(_)));
    }

    #[test]
    fn test_doctype_comment_and_pi() {
        let source = "<?xml version=\"1.0\"?><!DOCTYPE book SYSTEM \"b.dtd\"><!-- c --><book/>";
        let tokens = tokenize(source).unwrap();

        assert!(matches!(tokens[0].0, Token::ProcessingInstruction(_)));
        assert_eq!(tokens[1].0, Token::Declaration("<!DOCTYPE book SYSTEM \"b.dtd\">"));
        assert_eq!(tokens[2].0, Token::Comment("<!-- c -->"));
        assert_eq!(tokens[3].0, Token::StartTag("<book/>"));
    }

    #[test]
    fn test_cdata_is_one_token() {
        let tokens = tokenize("<![CDATA[<not-a-tag>]]>").unwrap();

        assert_eq!(tokens.len(), 1);
        assert!(matches!(tokens[0].0, Token::CData(_)));
    }

    #[test]
    fn test_ranges_cover_source() {
        let source = "<list>\n  <item name=\"b\"/>\n</list>\n";
        let tokens = tokenize(source).unwrap();

        let mut expected_start = 0;
        for (_, range) in &tokens {
            assert_eq!(range.start, expected_start);
            expected_start = range.end;
        }
        assert_eq!(expected_start, source.len());
    }

    #[test]
    fn test_lone_angle_bracket_is_an_error() {
        assert_eq!(tokenize("a < b"), Err(2));
    }
}
