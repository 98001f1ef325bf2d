//! Typed literal values and their EdgeQL encoding.
//!
//! Every literal is rendered with a single outermost cast, e.g.
//! `<array<std::int64>>[1, 2]`, so the server never has to infer its type.

use std::fmt;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Timelike, Utc};

use crate::diagnostic::CodegenError;

/// Static type of a literal, as written inside a cast.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralType {
    /// A scalar by fully qualified name (`std::int64`, `default::Color`, ...).
    Scalar(String),
    Array(Box<LiteralType>),
    Tuple(Vec<LiteralType>),
    NamedTuple(Vec<(String, LiteralType)>),
}

impl LiteralType {
    pub fn scalar(name: impl Into<String>) -> Self {
        LiteralType::Scalar(name.into())
    }

    pub fn array(element: LiteralType) -> Self {
        LiteralType::Array(Box::new(element))
    }

    /// EdgeQL spelling of the type.
    pub fn name(&self) -> String {
        match self {
            LiteralType::Scalar(name) => name.clone(),
            LiteralType::Array(element) => format!("array<{}>", element.name()),
            LiteralType::Tuple(items) => {
                let names: Vec<String> = items.iter().map(LiteralType::name).collect();
                format!("tuple<{}>", names.join(", "))
            }
            LiteralType::NamedTuple(fields) => {
                let names: Vec<String> = fields
                    .iter()
                    .map(|(key, ty)| format!("{}: {}", key, ty.name()))
                    .collect();
                format!("tuple<{}>", names.join(", "))
            }
        }
    }
}

/// Duration with microsecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    micros: i64,
}

impl Duration {
    pub fn from_micros(micros: i64) -> Self {
        Self { micros }
    }

    pub fn from_secs(secs: i64) -> Self {
        Self {
            micros: secs.saturating_mul(1_000_000),
        }
    }

    pub fn as_micros(&self) -> i64 {
        self.micros
    }
}

/// ISO 8601 time-only form: `PT1H30M`, `PT0.5S`, `-PT2M`.
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.micros.unsigned_abs();
        if self.micros < 0 {
            f.write_str("-")?;
        }
        f.write_str("PT")?;

        let hours = total / 3_600_000_000;
        let minutes = (total / 60_000_000) % 60;
        let seconds = (total / 1_000_000) % 60;
        let fraction = total % 1_000_000;

        if hours > 0 {
            write!(f, "{}H", hours)?;
        }
        if minutes > 0 {
            write!(f, "{}M", minutes)?;
        }
        if fraction > 0 {
            let digits = format!("{:06}", fraction);
            write!(f, "{}.{}S", seconds, digits.trim_end_matches('0'))?;
        } else if seconds > 0 || (hours == 0 && minutes == 0) {
            write!(f, "{}S", seconds)?;
        }
        Ok(())
    }
}

/// Arbitrary-precision integer kept in decimal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigInt(String);

impl BigInt {
    /// Accepts an optional leading `-` followed by ASCII digits.
    pub fn parse(digits: &str) -> Option<Self> {
        let unsigned = digits.strip_prefix('-').unwrap_or(digits);
        if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(digits.to_string()))
    }
}

impl From<i128> for BigInt {
    fn from(value: i128) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    BigInt(BigInt),
    Datetime(DateTime<Utc>),
    Duration(Duration),
    LocalDate(NaiveDate),
    LocalTime(NaiveTime),
    LocalDateTime(NaiveDateTime),
    Array(Vec<Value>),
    Tuple(Vec<Value>),
    NamedTuple(Vec<(String, Value)>),
}

impl Value {
    /// Short description used in error messages.
    fn describe(&self) -> &'static str {
        match self {
            Value::Str(_) => "a string",
            Value::Int(_) => "an integer",
            Value::Float(_) => "a float",
            Value::Bool(_) => "a boolean",
            Value::BigInt(_) => "a bigint",
            Value::Datetime(_) => "a datetime",
            Value::Duration(_) => "a duration",
            Value::LocalDate(_) => "a local date",
            Value::LocalTime(_) => "a local time",
            Value::LocalDateTime(_) => "a local datetime",
            Value::Array(_) => "an array",
            Value::Tuple(_) => "a tuple",
            Value::NamedTuple(_) => "a named tuple",
        }
    }
}

/// Category of a built-in scalar, used to reject mismatched values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScalarCategory {
    Int16,
    Int32,
    Int64,
    Float,
    BigInt,
    Decimal,
    Text,
    Bool,
    Datetime,
    Duration,
    LocalDate,
    LocalTime,
    LocalDateTime,
}

fn builtin_category(name: &str) -> Option<ScalarCategory> {
    Some(match name {
        "std::int16" => ScalarCategory::Int16,
        "std::int32" => ScalarCategory::Int32,
        "std::int64" => ScalarCategory::Int64,
        "std::float32" | "std::float64" => ScalarCategory::Float,
        "std::bigint" => ScalarCategory::BigInt,
        "std::decimal" => ScalarCategory::Decimal,
        "std::str" | "std::uuid" | "std::json" => ScalarCategory::Text,
        "std::bool" => ScalarCategory::Bool,
        "std::datetime" => ScalarCategory::Datetime,
        "std::duration" => ScalarCategory::Duration,
        "cal::local_date" => ScalarCategory::LocalDate,
        "cal::local_time" => ScalarCategory::LocalTime,
        "cal::local_datetime" => ScalarCategory::LocalDateTime,
        _ => return None,
    })
}

/// Whether a scalar value may be written as a literal of a built-in category.
fn accepts(category: ScalarCategory, value: &Value) -> bool {
    use ScalarCategory as C;
    match value {
        Value::Str(_) => category == C::Text,
        Value::Int(n) => match category {
            C::Int16 => i16::try_from(*n).is_ok(),
            C::Int32 => i32::try_from(*n).is_ok(),
            C::Int64 | C::Float | C::BigInt | C::Decimal => true,
            _ => false,
        },
        Value::Float(_) => matches!(category, C::Float | C::Decimal),
        Value::BigInt(_) => matches!(category, C::BigInt | C::Decimal),
        Value::Bool(_) => category == C::Bool,
        Value::Datetime(_) => category == C::Datetime,
        Value::Duration(_) => category == C::Duration,
        Value::LocalDate(_) => category == C::LocalDate,
        Value::LocalTime(_) => category == C::LocalTime,
        Value::LocalDateTime(_) => category == C::LocalDateTime,
        Value::Array(_) | Value::Tuple(_) | Value::NamedTuple(_) => false,
    }
}

/// Encodes `value` as a literal of type `ty`, including the outer cast.
pub fn encode_literal(ty: &LiteralType, value: &Value) -> Result<String, CodegenError> {
    Ok(format!("<{}>{}", ty.name(), encode_value(ty, value)?))
}

/// Encodes without a cast; nested collection elements go through here.
fn encode_value(ty: &LiteralType, value: &Value) -> Result<String, CodegenError> {
    let unsupported = || CodegenError::UnsupportedLiteral {
        type_name: ty.name(),
        value: value.describe().to_string(),
    };

    match (ty, value) {
        (LiteralType::Array(element), Value::Array(items)) => {
            let encoded = items
                .iter()
                .map(|item| encode_value(element, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("[{}]", encoded.join(", ")))
        }
        (LiteralType::Tuple(types), Value::Tuple(items)) => {
            if types.len() != items.len() {
                return Err(unsupported());
            }
            let encoded = types
                .iter()
                .zip(items)
                .map(|(ty, item)| encode_value(ty, item))
                .collect::<Result<Vec<_>, _>>()?;
            match encoded.as_slice() {
                [single] => Ok(format!("({},)", single)),
                _ => Ok(format!("({})", encoded.join(", "))),
            }
        }
        (LiteralType::NamedTuple(fields), Value::NamedTuple(items)) => {
            if fields.len() != items.len() {
                return Err(unsupported());
            }
            // Keys must match the declared fields one-to-one; rendered in type order.
            let mut encoded = Vec::with_capacity(fields.len());
            for (name, field_ty) in fields {
                let mut matching = items.iter().filter(|(key, _)| key == name);
                let (Some((_, item)), None) = (matching.next(), matching.next()) else {
                    return Err(unsupported());
                };
                encoded.push(format!("{} := {}", name, encode_value(field_ty, item)?));
            }
            Ok(format!("({})", encoded.join(", ")))
        }
        (LiteralType::Scalar(name), _) => {
            if let Some(category) = builtin_category(name) {
                if !accepts(category, value) {
                    return Err(unsupported());
                }
            }
            encode_scalar(value).ok_or_else(unsupported)
        }
        _ => Err(unsupported()),
    }
}

fn encode_scalar(value: &Value) -> Option<String> {
    Some(match value {
        Value::Str(s) => quote(s),
        Value::Int(n) => n.to_string(),
        Value::Float(x) if x.is_finite() => x.to_string(),
        Value::Float(_) => return None,
        Value::Bool(b) => b.to_string(),
        Value::BigInt(n) => format!("{}n", n),
        Value::Datetime(dt) => {
            let nanos = micros_exact(dt.nanosecond())?;
            let format = if nanos % 1_000_000 == 0 {
                SecondsFormat::Millis
            } else {
                SecondsFormat::Micros
            };
            quote(&dt.to_rfc3339_opts(format, true))
        }
        Value::Duration(d) => quote(&d.to_string()),
        Value::LocalDate(d) => quote(&d.format("%Y-%m-%d").to_string()),
        Value::LocalTime(t) => {
            micros_exact(t.nanosecond())?;
            quote(&t.format("%H:%M:%S%.f").to_string())
        }
        Value::LocalDateTime(dt) => {
            micros_exact(dt.nanosecond())?;
            quote(&dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
        }
        Value::Array(_) | Value::Tuple(_) | Value::NamedTuple(_) => return None,
    })
}

/// Temporal values carry at most microsecond precision; finer values are rejected.
fn micros_exact(nanos: u32) -> Option<u32> {
    (nanos % 1_000 == 0).then_some(nanos)
}

/// Single-quoted EdgeQL string with `\` and `'` escaped.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}
