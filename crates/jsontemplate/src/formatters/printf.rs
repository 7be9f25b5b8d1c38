//! printf-style value formatting
//!
//! Supports one conversion per format string: `%d %i %f %F %e %E %s %x %X %o`
//! with flags `-0+ #`, width, and precision. `%%` is a literal percent sign
//! and may appear any number of times.

use serde_json::Value;

use crate::template::engine::helpers::{stringify_value, value_kind};
use crate::template::error::FormatterError;

const DEFAULT_FLOAT_PRECISION: usize = 6;

/// A parsed printf format with exactly one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Printf {
    format: String,
    prefix: String,
    suffix: String,
    spec: Spec,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Spec {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    alternate: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
}

impl Printf {
    /// Parse a format string, `None` unless it has exactly one valid conversion
    pub fn parse(format: &str) -> Option<Self> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut spec = None;
        let mut chars = format.chars().peekable();

        while let Some(c) = chars.next() {
            let literal = if spec.is_some() { &mut suffix } else { &mut prefix };
            if c != '%' {
                literal.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                literal.push('%');
                continue;
            }
            if spec.is_some() {
                return None;
            }

            let mut parsed = Spec::default();
            while let Some(&flag) = chars.peek() {
                match flag {
                    '-' => parsed.left = true,
                    '0' => parsed.zero = true,
                    '+' => parsed.plus = true,
                    ' ' => parsed.space = true,
                    '#' => parsed.alternate = true,
                    _ => break,
                }
                chars.next();
            }
            parsed.width = take_number(&mut chars);
            if chars.peek() == Some(&'.') {
                chars.next();
                parsed.precision = Some(take_number(&mut chars).unwrap_or(0));
            }
            match chars.next() {
                Some(conversion @ ('d' | 'i' | 'f' | 'F' | 'e' | 'E' | 's' | 'x' | 'X' | 'o')) => {
                    parsed.conversion = conversion;
                }
                _ => return None,
            }
            spec = Some(parsed);
        }

        Some(Self {
            format: format.to_string(),
            prefix,
            suffix,
            spec: spec?,
        })
    }

    /// The format string as written
    pub fn as_str(&self) -> &str {
        &self.format
    }

    /// Format a value
    pub fn apply(&self, value: &Value) -> Result<String, FormatterError> {
        let spec = &self.spec;
        let (sign, body) = match spec.conversion {
            'd' | 'i' => {
                let (negative, magnitude) = self.integer(value)?;
                let digits = magnitude.to_string();
                (negative, pad_digits(digits, spec.precision))
            }
            'x' | 'X' | 'o' => {
                let (negative, magnitude) = self.integer(value)?;
                let digits = match spec.conversion {
                    'x' => format!("{:x}", magnitude),
                    'X' => format!("{:X}", magnitude),
                    _ => format!("{:o}", magnitude),
                };
                let digits = pad_digits(digits, spec.precision);
                let radix_prefix = match (spec.alternate, spec.conversion) {
                    (false, _) => "",
                    (true, 'x') => "0x",
                    (true, 'X') => "0X",
                    (true, _) => "0o",
                };
                (negative, format!("{}{}", radix_prefix, digits))
            }
            'f' | 'F' => {
                let number = self.float(value)?;
                let precision = spec.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
                let mut body = format!("{:.*}", precision, number.abs());
                if spec.alternate && precision == 0 {
                    body.push('.');
                }
                (number.is_sign_negative() && number != 0.0, body)
            }
            'e' | 'E' => {
                let number = self.float(value)?;
                let precision = spec.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
                let body = exponential(number.abs(), precision, spec.conversion == 'E');
                (number.is_sign_negative() && number != 0.0, body)
            }
            _ => {
                let text = stringify_value(value).ok_or_else(|| self.error("value is null"))?;
                let body = match spec.precision {
                    Some(limit) => text.chars().take(limit).collect(),
                    None => text,
                };
                return Ok(format!(
                    "{}{}{}",
                    self.prefix,
                    pad(String::new(), body, spec.width, spec.left, false),
                    self.suffix
                ));
            }
        };

        let sign = if sign {
            "-"
        } else if spec.plus {
            "+"
        } else if spec.space {
            " "
        } else {
            ""
        };
        // C ignores the 0 flag for integers with an explicit precision
        let zero = spec.zero
            && !spec.left
            && !(matches!(spec.conversion, 'd' | 'i' | 'x' | 'X' | 'o') && spec.precision.is_some());

        Ok(format!(
            "{}{}{}",
            self.prefix,
            pad(sign.to_string(), body, spec.width, spec.left, zero),
            self.suffix
        ))
    }

    fn integer(&self, value: &Value) -> Result<(bool, u128), FormatterError> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok((i < 0, i.unsigned_abs() as u128))
                } else if let Some(u) = n.as_u64() {
                    Ok((false, u as u128))
                } else {
                    let f = n.as_f64().unwrap_or_default().trunc();
                    Ok((f < 0.0, f.abs() as u128))
                }
            }
            Value::Bool(b) => Ok((false, u128::from(*b))),
            other => Err(self.error(format!("expected a number, got {}", value_kind(other)))),
        }
    }

    fn float(&self, value: &Value) -> Result<f64, FormatterError> {
        match value {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| self.error("number is out of range")),
            Value::Bool(b) => Ok(f64::from(u8::from(*b))),
            other => Err(self.error(format!("expected a number, got {}", value_kind(other)))),
        }
    }

    fn error(&self, reason: impl Into<String>) -> FormatterError {
        FormatterError::Printf {
            format: self.format.clone(),
            reason: reason.into(),
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<usize> {
    let mut number: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        number = Some(number.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize));
    }
    number
}

/// Left-pad digits with zeros to at least `precision` digits
fn pad_digits(digits: String, precision: Option<usize>) -> String {
    match precision {
        Some(min) if digits.len() < min => format!("{}{}", "0".repeat(min - digits.len()), digits),
        _ => digits,
    }
}

/// `d.dddddde+XX` with at least two exponent digits
fn exponential(number: f64, precision: usize, upper: bool) -> String {
    let rendered = format!("{:.*e}", precision, number);
    let (mantissa, exponent) = rendered.split_once('e').unwrap_or((&rendered, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    let marker = if upper { 'E' } else { 'e' };
    format!("{}{}{}{:02}", mantissa, marker, sign, exponent.abs())
}

fn pad(sign: String, body: String, width: Option<usize>, left: bool, zero: bool) -> String {
    let len = sign.chars().count() + body.chars().count();
    let fill = width.map_or(0, |w| w.saturating_sub(len));
    if fill == 0 {
        return format!("{}{}", sign, body);
    }
    if left {
        format!("{}{}{}", sign, body, " ".repeat(fill))
    } else if zero {
        format!("{}{}{}", sign, "0".repeat(fill), body)
    } else {
        format!("{}{}{}", " ".repeat(fill), sign, body)
    }
}
