//! Arithmetic expression evaluator for the calculator tool.
//!
//! Grammar (recursive descent, no dynamic evaluation):
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := number | '(' expr ')'
//! ```

use thiserror::Error;

const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character `{ch}` at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("unexpected {found} at position {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("division by zero")]
    DivisionByZero,

    #[error("expression nests too deeply")]
    TooDeep,

    #[error("result is out of range")]
    NonFinite,
}

fn finite(value: f64) -> Result<f64, ExpressionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ExpressionError::NonFinite)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {n}"),
            Token::Plus => "`+`".into(),
            Token::Minus => "`-`".into(),
            Token::Star => "`*`".into(),
            Token::Slash => "`/`".into(),
            Token::LParen => "`(`".into(),
            Token::RParen => "`)`".into(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, ExpressionError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        let token = match ch {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| ExpressionError::InvalidNumber(literal.clone()))?;
                tokens.push((Token::Number(finite(value)?), start));
                continue;
            }
            other => {
                return Err(ExpressionError::UnexpectedCharacter {
                    ch: other,
                    position: i,
                })
            }
        };
        tokens.push((token, i));
        i += 1;
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|(token, _)| *token)
    }

    fn next(&mut self) -> Option<(Token, usize)> {
        let token = self.tokens.get(self.pos).copied();
        self.pos += 1;
        token
    }

    fn expr(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = finite(if op == Token::Plus { value + rhs } else { value - rhs })?;
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = if op == Token::Star {
                finite(value * rhs)?
            } else {
                if rhs == 0.0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                finite(value / rhs)?
            };
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, ExpressionError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExpressionError::TooDeep);
        }
        let value = match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            Some(Token::Minus) => {
                self.pos += 1;
                self.unary().map(|v| -v)
            }
            _ => self.primary(),
        };
        self.depth -= 1;
        value
    }

    fn primary(&mut self) -> Result<f64, ExpressionError> {
        match self.next() {
            Some((Token::Number(value), _)) => Ok(value),
            Some((Token::LParen, _)) => {
                let value = self.expr()?;
                match self.next() {
                    Some((Token::RParen, _)) => Ok(value),
                    Some((token, position)) => Err(ExpressionError::UnexpectedToken {
                        found: token.describe(),
                        position,
                    }),
                    None => Err(ExpressionError::UnexpectedEnd),
                }
            }
            Some((token, position)) => Err(ExpressionError::UnexpectedToken {
                found: token.describe(),
                position,
            }),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }
}

/// Evaluates `+ - * /` with parentheses and unary signs.
pub fn evaluate(input: &str) -> Result<f64, ExpressionError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ExpressionError::Empty);
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some((token, position)) = parser.next() {
        return Err(ExpressionError::UnexpectedToken {
            found: token.describe(),
            position,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_precedence_and_parentheses() {
        assert_eq!(evaluate("2 + 2").unwrap(), 4.0);
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(evaluate("(1 + 2) * 3").unwrap(), 9.0);
        assert_eq!(evaluate("10 - 4 - 3").unwrap(), 3.0);
        assert_eq!(evaluate("7 / 2").unwrap(), 3.5);
        assert_eq!(evaluate("-3 + 5").unwrap(), 2.0);
        assert_eq!(evaluate("-(2 + 3) * -2").unwrap(), 10.0);
        assert_eq!(evaluate(".5 + 1.25").unwrap(), 1.75);
    }

    #[test]
    fn rejects_division_by_zero() {
        assert_eq!(evaluate("1 / 0"), Err(ExpressionError::DivisionByZero));
        assert_eq!(evaluate("4 / (2 - 2)"), Err(ExpressionError::DivisionByZero));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(evaluate(""), Err(ExpressionError::Empty));
        assert_eq!(evaluate("2 +"), Err(ExpressionError::UnexpectedEnd));
        assert_eq!(evaluate("(1 + 2"), Err(ExpressionError::UnexpectedEnd));
        assert!(matches!(
            evaluate("1 2"),
            Err(ExpressionError::UnexpectedToken { position: 2, .. })
        ));
        assert!(matches!(evaluate("1.2.3"), Err(ExpressionError::InvalidNumber(_))));
        assert!(matches!(
            evaluate("__import__('os')"),
            Err(ExpressionError::UnexpectedCharacter { ch: '_', position: 0 })
        ));
    }

    #[test]
    fn limits_nesting() {
        let deep = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(evaluate(&deep), Err(ExpressionError::TooDeep));
        assert_eq!(evaluate(&"-".repeat(100)), Err(ExpressionError::TooDeep));
    }

    #[test]
    fn rejects_overflow() {
        let huge = format!("1{}", "0".repeat(308));
        assert_eq!(
            evaluate(&format!("{huge} * 10")),
            Err(ExpressionError::NonFinite)
        );
        assert_eq!(
            evaluate(&format!("-{huge} - {huge}")),
            Err(ExpressionError::NonFinite)
        );
        assert_eq!(
            evaluate(&format!("{huge}0")),
            Err(ExpressionError::NonFinite)
        );
        assert!(evaluate(&format!("{huge} / 10")).is_ok());
    }
}
