//! Evaluator for the numeric expressions allowed in unit exponents
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/') unary)*
//! unary := ('+' | '-') unary | power
//! power := atom ('^' unary)?
//! atom  := number | '(' expr ')'
//! ```
//!
//! Exponentiation is right-associative and binds tighter than a leading
//! sign, so `-2^2` is `-4` and `2^3^2` is `512`.

use crate::error::ExprError;
use crate::lexer::{Lexer, Token};
use crate::span::Span;

type Result<T> = std::result::Result<T, ExprError>;

/// Deepest nesting of signs, powers and parentheses accepted
pub const MAX_NESTING_DEPTH: usize = 256;

/// Evaluate an arithmetic expression to a number
///
/// Division by zero follows IEEE semantics and may produce an infinite or
/// NaN result; callers that need a finite value must check for it.
pub fn evaluate(expr: &str) -> Result<f64> {
    let mut evaluator = Evaluator::new(expr);
    if evaluator.peek().is_none() {
        return Err(ExprError::Empty);
    }

    let value = evaluator.parse_expr()?;
    match evaluator.next() {
        None => Ok(value),
        Some((token, span)) => Err(evaluator.unexpected("end of expression", token, span)),
    }
}

struct Evaluator<'source> {
    lexer: Lexer<'source>,
    depth: usize,
}

impl<'source> Evaluator<'source> {
    fn new(source: &'source str) -> Self {
        Evaluator {
            lexer: Lexer::new(source),
            depth: 0,
        }
    }

    fn parse_expr(&mut self) -> Result<f64> {
        let mut value = self.parse_term()?;
        loop {
            match self.peek() {
                Some((Token::Plus, _)) => {
                    self.next();
                    value += self.parse_term()?;
                }
                Some((Token::Minus, _)) => {
                    self.next();
                    value -= self.parse_term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn parse_term(&mut self) -> Result<f64> {
        let mut value = self.parse_unary()?;
        loop {
            match self.peek() {
                Some((Token::Star, _)) => {
                    self.next();
                    value *= self.parse_unary()?;
                }
                Some((Token::Slash, _)) => {
                    self.next();
                    value /= self.parse_unary()?;
                }
                _ => return Ok(value),
            }
        }
    }

    // Every nested sign, exponent and parenthesized group passes through
    // here, so this is where recursion depth is bounded.
    fn parse_unary(&mut self) -> Result<f64> {
        if self.depth == MAX_NESTING_DEPTH {
            let span = self.peek().map_or_else(|| self.eof(), |(_, span)| span);
            return Err(ExprError::TooDeep {
                limit: MAX_NESTING_DEPTH,
                span,
            });
        }

        self.depth += 1;
        let value = self.parse_signed();
        self.depth -= 1;
        value
    }

    fn parse_signed(&mut self) -> Result<f64> {
        match self.peek() {
            Some((Token::Minus, _)) => {
                self.next();
                Ok(-self.parse_unary()?)
            }
            Some((Token::Plus, _)) => {
                self.next();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<f64> {
        let base = self.parse_atom()?;
        if let Some((Token::Caret, _)) = self.peek() {
            self.next();
            let exponent = self.parse_unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn parse_atom(&mut self) -> Result<f64> {
        match self.next() {
            Some((Token::Number(n), _)) => Ok(n),
            Some((Token::LParen, open)) => {
                let value = self.parse_expr()?;
                match self.next() {
                    Some((Token::RParen, _)) => Ok(value),
                    Some((token, span)) => Err(self.unexpected("')'", token, span)),
                    // the span covers the whole unclosed group
                    None => Err(ExprError::unexpected_eof("')'", open.merge(self.eof()))),
                }
            }
            Some((token, span)) => Err(self.unexpected("a number or '('", token, span)),
            None => Err(ExprError::unexpected_eof("a number or '('", self.eof())),
        }
    }

    fn unexpected(&self, expected: &str, token: Token, span: Span) -> ExprError {
        if token == Token::Error {
            return ExprError::InvalidCharacter {
                found: self.lexer.slice(span).to_string(),
                span,
            };
        }
        ExprError::unexpected_token(expected, token.to_string(), span)
    }

    fn eof(&self) -> Span {
        self.lexer.eof()
    }

    fn peek(&self) -> Option<(Token, Span)> {
        self.lexer.peek_token()
    }

    fn next(&mut self) -> Option<(Token, Span)> {
        self.lexer.next_token()
    }
}
