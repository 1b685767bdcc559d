// Copyright 2025 the Imtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tagged numeric values for numeric text fields.
//!
//! A numeric field edits text, but its host owns a typed number. The closed
//! sum type here carries that number through parse/format/clamp/add without
//! any dynamic dispatch; the field itself is ordinary text editing over the
//! formatted representation.

use smallvec::SmallVec;

/// Inline formatting buffer; large enough for any value of any variant.
pub type NumberChars = SmallVec<[char; 24]>;

/// The numeric type a value carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NumberKind {
    /// `u8`
    U8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `f32`
    F32,
    /// `f64`
    F64,
}

impl NumberKind {
    /// Whether the kind is an integer type.
    pub fn is_integer(self) -> bool {
        matches!(self, Self::U8 | Self::I16 | Self::I32 | Self::I64)
    }
}

/// A number of one of the supported kinds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NumberValue {
    /// `u8`
    U8(u8),
    /// `i16`
    I16(i16),
    /// `i32`
    I32(i32),
    /// `i64`
    I64(i64),
    /// `f32`
    F32(f32),
    /// `f64`
    F64(f64),
}

impl NumberValue {
    /// Zero of the given kind.
    pub fn zero(kind: NumberKind) -> Self {
        match kind {
            NumberKind::U8 => Self::U8(0),
            NumberKind::I16 => Self::I16(0),
            NumberKind::I32 => Self::I32(0),
            NumberKind::I64 => Self::I64(0),
            NumberKind::F32 => Self::F32(0.0),
            NumberKind::F64 => Self::F64(0.0),
        }
    }

    /// The value's kind.
    pub fn kind(self) -> NumberKind {
        match self {
            Self::U8(_) => NumberKind::U8,
            Self::I16(_) => NumberKind::I16,
            Self::I32(_) => NumberKind::I32,
            Self::I64(_) => NumberKind::I64,
            Self::F32(_) => NumberKind::F32,
            Self::F64(_) => NumberKind::F64,
        }
    }

    /// The value widened to `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::U8(v) => f64::from(v),
            Self::I16(v) => f64::from(v),
            Self::I32(v) => f64::from(v),
            Self::I64(v) => v as f64,
            Self::F32(v) => f64::from(v),
            Self::F64(v) => v,
        }
    }

    /// Parses `text` as `kind`. Empty text parses as zero, so a cleared
    /// field reads as a value rather than an error. Float variants accept a
    /// comma as the decimal separator.
    pub fn parse(kind: NumberKind, text: &[char]) -> Option<Self> {
        if text.is_empty() {
            return Some(Self::zero(kind));
        }

        let text: String = text.iter().collect();
        let text = text.trim();

        match kind {
            NumberKind::U8 => text.parse().ok().map(Self::U8),
            NumberKind::I16 => text.parse().ok().map(Self::I16),
            NumberKind::I32 => text.parse().ok().map(Self::I32),
            NumberKind::I64 => text.parse().ok().map(Self::I64),
            NumberKind::F32 => parse_float(text).map(|v| Self::F32(v as f32)),
            NumberKind::F64 => parse_float(text).map(Self::F64),
        }
    }

    /// Formats the value into `out`, replacing its content.
    pub fn format_chars(self, out: &mut NumberChars) {
        out.clear();
        let text = self.to_string();
        out.extend(text.chars());
    }

    /// Adds `delta`, saturating at the variant's range.
    pub fn add(&mut self, delta: f64) {
        match self {
            Self::U8(v) => {
                *v = (f64::from(*v) + delta).clamp(0.0, f64::from(u8::MAX)) as u8;
            }
            Self::I16(v) => {
                *v = (f64::from(*v) + delta).clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16;
            }
            Self::I32(v) => {
                *v = (f64::from(*v) + delta).clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32;
            }
            Self::I64(v) => {
                *v = (*v as f64 + delta).clamp(i64::MIN as f64, i64::MAX as f64) as i64;
            }
            Self::F32(v) => *v = (f64::from(*v) + delta) as f32,
            Self::F64(v) => *v += delta,
        }
    }

    /// Clamps the value into `min..=max`.
    ///
    /// # Panics
    ///
    /// Panics when the three kinds disagree; mixing kinds is a caller bug.
    pub fn clamp(&mut self, min: Self, max: Self) {
        assert!(
            self.kind() == min.kind() && self.kind() == max.kind(),
            "mismatched number kinds"
        );
        match (self, min, max) {
            (Self::U8(v), Self::U8(lo), Self::U8(hi)) => *v = (*v).clamp(lo, hi),
            (Self::I16(v), Self::I16(lo), Self::I16(hi)) => *v = (*v).clamp(lo, hi),
            (Self::I32(v), Self::I32(lo), Self::I32(hi)) => *v = (*v).clamp(lo, hi),
            (Self::I64(v), Self::I64(lo), Self::I64(hi)) => *v = (*v).clamp(lo, hi),
            (Self::F32(v), Self::F32(lo), Self::F32(hi)) => *v = v.clamp(lo, hi),
            (Self::F64(v), Self::F64(lo), Self::F64(hi)) => *v = v.clamp(lo, hi),
            _ => unreachable!("kinds checked above"),
        }
    }
}

impl core::fmt::Display for NumberValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::U8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

fn parse_float(text: &str) -> Option<f64> {
    text.parse()
        .ok()
        .or_else(|| text.replace(',', ".").parse().ok())
}

#[cfg(test)]
mod tests {
    use super::{NumberChars, NumberKind, NumberValue};

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn parse_round_trips() {
        let value = NumberValue::parse(NumberKind::I32, &chars("-42")).unwrap();
        assert_eq!(value, NumberValue::I32(-42));

        let mut out = NumberChars::new();
        value.format_chars(&mut out);
        assert_eq!(out.iter().collect::<String>(), "-42");
    }

    #[test]
    fn empty_text_parses_as_zero() {
        assert_eq!(
            NumberValue::parse(NumberKind::F32, &[]),
            Some(NumberValue::F32(0.0))
        );
    }

    #[test]
    fn comma_is_a_decimal_separator() {
        let value = NumberValue::parse(NumberKind::F64, &chars("3,5")).unwrap();
        assert_eq!(value, NumberValue::F64(3.5));
    }

    #[test]
    fn garbage_does_not_parse() {
        assert_eq!(NumberValue::parse(NumberKind::I64, &chars("12x")), None);
        assert_eq!(NumberValue::parse(NumberKind::U8, &chars("-1")), None);
    }

    #[test]
    fn add_saturates_at_the_type_range() {
        let mut value = NumberValue::U8(250);
        value.add(100.0);
        assert_eq!(value, NumberValue::U8(255));

        let mut value = NumberValue::I16(i16::MIN);
        value.add(-5.0);
        assert_eq!(value, NumberValue::I16(i16::MIN));
    }

    #[test]
    fn clamp_applies_per_variant() {
        let mut value = NumberValue::F32(7.5);
        value.clamp(NumberValue::F32(0.0), NumberValue::F32(5.0));
        assert_eq!(value, NumberValue::F32(5.0));
    }

    #[test]
    #[should_panic(expected = "mismatched number kinds")]
    fn clamp_rejects_mixed_kinds() {
        let mut value = NumberValue::I32(1);
        value.clamp(NumberValue::F32(0.0), NumberValue::F32(5.0));
    }

    #[test]
    fn integer_kinds_know_it() {
        assert!(NumberKind::I64.is_integer());
        assert!(!NumberKind::F64.is_integer());
    }
}
