use crate::span::Span;
use logos::Logos;

/// Tokens of the exponent arithmetic grammar
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    Error,
}

fn parse_number(lex: &mut logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Token::Number(n) => return write!(f, "{}", n),
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Caret => "^",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::Error => "invalid character",
        };
        f.write_str(symbol)
    }
}

/// Exponent expression split into spanned tokens up front
///
/// Characters outside the grammar become [`Token::Error`] rather than
/// ending the stream, so the evaluator can report where they are.
pub struct Lexer<'source> {
    source: &'source str,
    tokens: Vec<(Token, Span)>,
    position: usize,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        let tokens = Token::lexer(source)
            .spanned()
            .map(|(token, range)| (token.unwrap_or(Token::Error), Span::from(range)))
            .collect();
        Lexer {
            source,
            tokens,
            position: 0,
        }
    }

    pub fn next_token(&mut self) -> Option<(Token, Span)> {
        let token = self.peek_token()?;
        self.position += 1;
        Some(token)
    }

    pub fn peek_token(&self) -> Option<(Token, Span)> {
        self.tokens.get(self.position).cloned()
    }

    /// Zero-width span just past the last character
    pub fn eof(&self) -> Span {
        Span::eof(self.source.len())
    }

    pub fn slice(&self, span: Span) -> &'source str {
        &self.source[span.to_range()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        std::iter::from_fn(|| lexer.next_token())
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn test_lex_numbers() {
        assert_eq!(
            lex("1 2.5 3. .5 4e2 1.5E-1"),
            vec![
                Token::Number(1.0),
                Token::Number(2.5),
                Token::Number(3.0),
                Token::Number(0.5),
                Token::Number(400.0),
                Token::Number(0.15),
            ]
        );
    }

    #[test]
    fn test_lex_operators() {
        assert_eq!(
            lex("(1/2+3.14)^-2*5"),
            vec![
                Token::LParen,
                Token::Number(1.0),
                Token::Slash,
                Token::Number(2.0),
                Token::Plus,
                Token::Number(3.14),
                Token::RParen,
                Token::Caret,
                Token::Minus,
                Token::Number(2.0),
                Token::Star,
                Token::Number(5.0),
            ]
        );
    }

    #[test]
    fn test_lex_invalid() {
        assert!(lex("2e").contains(&Token::Error));
        assert_eq!(lex("x"), vec![Token::Error]);
    }

    #[test]
    fn test_spans() {
        let mut lexer = Lexer::new("12 + 3");
        let (_, first) = lexer.next_token().unwrap();
        assert_eq!(first, Span::new(0, 2));
        let (_, plus) = lexer.peek_token().unwrap();
        assert_eq!(lexer.slice(plus), "+");
        assert_eq!(lexer.eof(), Span::new(6, 6));
    }
}
