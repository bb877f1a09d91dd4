//! Literal parser behind the scalar coercion rule.
//!
//! Accepted forms: integers (decimal, `0x`/`0o`/`0b`, `_` separators),
//! floats, `True`/`False`/`None`, quoted strings, and `[...]`, `(...)`,
//! `{'k': v}` collections of those. A bare top-level `1, 2` is a tuple.

use super::{Dict, Value};
use thiserror::Error;
use tracing::trace;

/// Deepest bracket nesting accepted in a literal.
pub const MAX_NESTING_DEPTH: usize = 200;

/// Why a text could not be read as a literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    /// The whole text is a single unquoted identifier.
    #[error("'{0}' is a bare name, not a literal")]
    BareName(String),

    /// The text is not valid literal syntax.
    #[error("malformed literal at offset {offset}: {message}")]
    Malformed { offset: usize, message: String },
}

/// Parse `text` as a literal value.
pub fn parse_literal(text: &str) -> Result<Value, LiteralError> {
    let trimmed = text.trim();
    if is_identifier(trimmed) && !matches!(trimmed, "True" | "False" | "None") {
        return Err(LiteralError::BareName(trimmed.to_string()));
    }

    let mut parser = Parser::new(trimmed);
    let value = parser.top()?;
    parser.skip_ws();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(value)
}

/// Apply the scalar coercion rule to one string.
///
/// Literals become their typed value. A bare `true`/`false` in any case
/// becomes a bool. Everything else is kept as the original string.
pub fn coerce_scalar(text: &str) -> Value {
    match parse_literal(text) {
        Ok(value) => value,
        Err(LiteralError::BareName(name)) => {
            if name.eq_ignore_ascii_case("true") {
                Value::Bool(true)
            } else if name.eq_ignore_ascii_case("false") {
                Value::Bool(false)
            } else {
                Value::Str(text.to_string())
            }
        }
        Err(err) => {
            trace!(text, %err, "keeping value as string");
            Value::Str(text.to_string())
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> LiteralError {
        LiteralError::Malformed {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn top(&mut self) -> Result<Value, LiteralError> {
        let first = self.expr()?;
        self.skip_ws();
        if self.peek() != Some(',') {
            return Ok(first);
        }

        let mut items = vec![first];
        while self.peek() == Some(',') {
            self.bump();
            self.skip_ws();
            if self.at_end() {
                break;
            }
            items.push(self.expr()?);
            self.skip_ws();
        }
        Ok(Value::Tuple(items))
    }

    fn expr(&mut self) -> Result<Value, LiteralError> {
        self.skip_ws();
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(open @ ('[' | '(' | '{')) => {
                if self.depth >= MAX_NESTING_DEPTH {
                    return Err(self.error(format!(
                        "more than {MAX_NESTING_DEPTH} nested brackets"
                    )));
                }
                self.depth += 1;
                let value = match open {
                    '[' => self.list(),
                    '(' => self.parenthesized(),
                    _ => self.dict(),
                };
                self.depth -= 1;
                value
            }
            Some('\'' | '"') => self.string(),
            Some(sign @ ('+' | '-')) => {
                self.bump();
                self.skip_ws();
                if !self.at_number() {
                    return Err(self.error("sign must be followed by a number"));
                }
                let value = self.number(sign == '-')?;
                Ok(value)
            }
            Some(_) if self.at_number() => self.number(false),
            Some(c) if c.is_alphabetic() || c == '_' => self.name(),
            Some(c) => Err(self.error(format!("unexpected character '{c}'"))),
        }
    }

    fn at_number(&self) -> bool {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self.peek_at(1).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn name(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        match word.as_str() {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::None),
            _ => Err(LiteralError::Malformed {
                offset: start,
                message: format!("name '{word}' is not a literal"),
            }),
        }
    }

    fn number(&mut self, negative: bool) -> Result<Value, LiteralError> {
        let start = self.pos;
        let mut token = String::new();
        while let Some(c) = self.peek() {
            let exponent_sign = matches!(c, '+' | '-')
                && matches!(token.chars().last(), Some('e' | 'E'))
                && !is_radix_prefixed(&token);
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
                token.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }

        interpret_number(&token, negative).ok_or_else(|| LiteralError::Malformed {
            offset: start,
            message: format!("invalid number '{token}'"),
        })
    }

    fn string(&mut self) -> Result<Value, LiteralError> {
        let mut out = String::new();
        // Adjacent string literals concatenate.
        loop {
            self.quoted(&mut out)?;
            self.skip_ws();
            if !matches!(self.peek(), Some('\'' | '"')) {
                break;
            }
        }
        Ok(Value::Str(out))
    }

    fn quoted(&mut self, out: &mut String) -> Result<(), LiteralError> {
        let quote = self.bump().ok_or_else(|| self.error("expected a quote"))?;
        loop {
            let c = self.bump().ok_or_else(|| self.error("unterminated string"))?;
            match c {
                c if c == quote => return Ok(()),
                '\n' => return Err(self.error("line break inside string")),
                '\\' => {
                    let escaped = self.bump().ok_or_else(|| self.error("unterminated string"))?;
                    match escaped {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        '0' => out.push('\0'),
                        '\\' | '\'' | '"' => out.push(escaped),
                        '\n' => {}
                        other => {
                            out.push('\\');
                            out.push(other);
                        }
                    }
                }
                c => out.push(c),
            }
        }
    }

    fn list(&mut self) -> Result<Value, LiteralError> {
        self.bump();
        let items = self.sequence(']')?;
        Ok(Value::List(items))
    }

    fn parenthesized(&mut self) -> Result<Value, LiteralError> {
        self.bump();
        self.skip_ws();
        if self.peek() == Some(')') {
            self.bump();
            return Ok(Value::Tuple(Vec::new()));
        }

        let first = self.expr()?;
        self.skip_ws();
        match self.bump() {
            Some(')') => Ok(first),
            Some(',') => {
                let mut items = vec![first];
                items.extend(self.sequence(')')?);
                Ok(Value::Tuple(items))
            }
            _ => Err(self.error("expected ',' or ')'")),
        }
    }

    /// Comma-separated items up to `close`, trailing comma allowed.
    fn sequence(&mut self, close: char) -> Result<Vec<Value>, LiteralError> {
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(items);
            }
            items.push(self.expr()?);
            self.skip_ws();
            match self.bump() {
                Some(',') => {}
                Some(c) if c == close => return Ok(items),
                _ => return Err(self.error(format!("expected ',' or '{close}'"))),
            }
        }
    }

    fn dict(&mut self) -> Result<Value, LiteralError> {
        self.bump();
        let dict = Dict::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Value::Dict(dict));
            }

            let key_offset = self.pos;
            let key = match self.expr()? {
                Value::Str(key) => key,
                other => {
                    return Err(LiteralError::Malformed {
                        offset: key_offset,
                        message: format!("dict keys must be strings, not {}", other.type_name()),
                    })
                }
            };
            self.skip_ws();
            if self.bump() != Some(':') {
                return Err(self.error("expected ':' after dict key"));
            }
            let value = self.expr()?;
            dict.insert(key, value);

            self.skip_ws();
            match self.bump() {
                Some(',') => {}
                Some('}') => return Ok(Value::Dict(dict)),
                _ => return Err(self.error("expected ',' or '}'")),
            }
        }
    }
}

fn is_radix_prefixed(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    lower.starts_with("0x") || lower.starts_with("0o") || lower.starts_with("0b")
}

fn interpret_number(token: &str, negative: bool) -> Option<Value> {
    let lower = token.to_ascii_lowercase();

    if is_radix_prefixed(&lower) {
        let radix = match &lower[..2] {
            "0x" => 16,
            "0o" => 8,
            _ => 2,
        };
        let body = &lower[2..];
        let body = body.strip_prefix('_').unwrap_or(body);
        let digits = strip_separators(body, |c| c.is_digit(radix), |c| c.is_digit(radix))?;
        let magnitude = i128::from_str_radix(&digits, radix).ok()?;
        return signed_int(magnitude, negative);
    }

    if lower.contains('.') || lower.contains('e') {
        let digits = strip_separators(
            &lower,
            |c| c.is_ascii_digit() || matches!(c, '.' | 'e' | '+' | '-'),
            |c| c.is_ascii_digit(),
        )?;
        let value: f64 = digits.parse().ok()?;
        return Some(Value::Float(if negative { -value } else { value }));
    }

    let digits = strip_separators(&lower, |c| c.is_ascii_digit(), |c| c.is_ascii_digit())?;
    if digits.len() > 1 && digits.starts_with('0') && digits.chars().any(|c| c != '0') {
        return None;
    }
    let magnitude: i128 = digits.parse().ok()?;
    signed_int(magnitude, negative)
}

fn signed_int(magnitude: i128, negative: bool) -> Option<Value> {
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).ok().map(Value::Int)
}

/// Remove `_` separators, each of which must sit between two digits.
///
/// `allowed` accepts the token's other characters, `digit` the ones a
/// separator may touch.
fn strip_separators(
    token: &str,
    allowed: impl Fn(char) -> bool,
    digit: impl Fn(char) -> bool,
) -> Option<String> {
    let chars: Vec<char> = token.chars().collect();
    if chars.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            let before = i.checked_sub(1).and_then(|j| chars.get(j));
            let after = chars.get(i + 1);
            let between_digits = before.is_some_and(|&c| digit(c))
                && after.is_some_and(|&c| digit(c));
            if !between_digits {
                return None;
            }
        } else if allowed(c) {
            out.push(c);
        } else {
            return None;
        }
    }
    Some(out)
}
