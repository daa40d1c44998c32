//!
//! Host Numeric Values
//!
//! Script numbers cross into host code as one of ten concrete numeric kinds.
//! Each kind has its own host type (see `types::number_type`), so the
//! coercion layer can widen, narrow and parse between them explicitly.
//!
//! Narrowing is exact-only: `cast` returns `None` instead of truncating or
//! wrapping. Parsing never consults a locale; `.` is always the decimal
//! separator and integer kinds also accept a `0x` prefix.
//!

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl NumberKind {
    pub const ALL: [NumberKind; 10] = [
        NumberKind::I8,
        NumberKind::I16,
        NumberKind::I32,
        NumberKind::I64,
        NumberKind::U8,
        NumberKind::U16,
        NumberKind::U32,
        NumberKind::U64,
        NumberKind::F32,
        NumberKind::F64,
    ];

    /// Host type name of this kind
    pub fn name(self) -> &'static str {
        match self {
            NumberKind::I8 => "i8",
            NumberKind::I16 => "i16",
            NumberKind::I32 => "i32",
            NumberKind::I64 => "i64",
            NumberKind::U8 => "u8",
            NumberKind::U16 => "u16",
            NumberKind::U32 => "u32",
            NumberKind::U64 => "u64",
            NumberKind::F32 => "f32",
            NumberKind::F64 => "f64",
        }
    }

    pub fn from_name(name: &str) -> Option<NumberKind> {
        NumberKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn is_float(self) -> bool {
        matches!(self, NumberKind::F32 | NumberKind::F64)
    }

    /// The zero value of this kind
    pub fn zero(self) -> Number {
        match self {
            NumberKind::I8 => Number::I8(0),
            NumberKind::I16 => Number::I16(0),
            NumberKind::I32 => Number::I32(0),
            NumberKind::I64 => Number::I64(0),
            NumberKind::U8 => Number::U8(0),
            NumberKind::U16 => Number::U16(0),
            NumberKind::U32 => Number::U32(0),
            NumberKind::U64 => Number::U64(0),
            NumberKind::F32 => Number::F32(0.0),
            NumberKind::F64 => Number::F64(0.0),
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl Number {
    pub fn kind(&self) -> NumberKind {
        match self {
            Number::I8(_) => NumberKind::I8,
            Number::I16(_) => NumberKind::I16,
            Number::I32(_) => NumberKind::I32,
            Number::I64(_) => NumberKind::I64,
            Number::U8(_) => NumberKind::U8,
            Number::U16(_) => NumberKind::U16,
            Number::U32(_) => NumberKind::U32,
            Number::U64(_) => NumberKind::U64,
            Number::F32(_) => NumberKind::F32,
            Number::F64(_) => NumberKind::F64,
        }
    }

    /// True iff the value equals zero (`-0.0` included, NaN excluded)
    pub fn is_zero(&self) -> bool {
        match *self {
            Number::F32(v) => v == 0.0,
            Number::F64(v) => v == 0.0,
            _ => self.as_i128() == Some(0),
        }
    }

    /// Integer view of integer kinds; `None` for float kinds
    pub fn as_i128(&self) -> Option<i128> {
        match *self {
            Number::I8(v) => Some(v as i128),
            Number::I16(v) => Some(v as i128),
            Number::I32(v) => Some(v as i128),
            Number::I64(v) => Some(v as i128),
            Number::U8(v) => Some(v as i128),
            Number::U16(v) => Some(v as i128),
            Number::U32(v) => Some(v as i128),
            Number::U64(v) => Some(v as i128),
            Number::F32(_) | Number::F64(_) => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::F32(v) => v as f64,
            Number::F64(v) => v,
            _ => self.as_i128().unwrap_or_default() as f64,
        }
    }

    /// Convert to `to` when the value is exactly representable there.
    ///
    /// Integer to float always succeeds (float rounding is accepted as
    /// widening). Float to integer requires an integral, in-range value.
    pub fn cast(self, to: NumberKind) -> Option<Number> {
        if self.kind() == to {
            return Some(self);
        }
        if let Some(int) = self.as_i128() {
            return Number::from_i128(int, to);
        }

        let float = self.as_f64();
        match to {
            NumberKind::F64 => Some(Number::F64(float)),
            NumberKind::F32 => {
                let narrowed = float as f32;
                (float.is_nan() || narrowed as f64 == float).then_some(Number::F32(narrowed))
            }
            _ => {
                if !float.is_finite() || float.fract() != 0.0 {
                    return None;
                }
                Number::from_i128(float as i128, to)
            }
        }
    }

    pub fn from_i128(value: i128, kind: NumberKind) -> Option<Number> {
        Some(match kind {
            NumberKind::I8 => Number::I8(i8::try_from(value).ok()?),
            NumberKind::I16 => Number::I16(i16::try_from(value).ok()?),
            NumberKind::I32 => Number::I32(i32::try_from(value).ok()?),
            NumberKind::I64 => Number::I64(i64::try_from(value).ok()?),
            NumberKind::U8 => Number::U8(u8::try_from(value).ok()?),
            NumberKind::U16 => Number::U16(u16::try_from(value).ok()?),
            NumberKind::U32 => Number::U32(u32::try_from(value).ok()?),
            NumberKind::U64 => Number::U64(u64::try_from(value).ok()?),
            NumberKind::F32 => Number::F32(value as f32),
            NumberKind::F64 => Number::F64(value as f64),
        })
    }

    /// Parse `text` as a number of the given kind using invariant rules
    pub fn parse(text: &str, kind: NumberKind) -> Option<Number> {
        let text = text.trim();
        match kind {
            NumberKind::F32 => text.parse::<f32>().ok().map(Number::F32),
            NumberKind::F64 => text.parse::<f64>().ok().map(Number::F64),
            _ => Number::from_i128(parse_integer(text)?, kind),
        }
    }
}

fn parse_integer(text: &str) -> Option<i128> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (radix, digits) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, digits),
    };
    if digits.starts_with(['+', '-']) {
        return None;
    }
    let magnitude = i128::from_str_radix(digits, radix).ok()?;

    Some(if negative { -magnitude } else { magnitude })
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I8(v) => write!(f, "{}", v),
            Number::I16(v) => write!(f, "{}", v),
            Number::I32(v) => write!(f, "{}", v),
            Number::I64(v) => write!(f, "{}", v),
            Number::U8(v) => write!(f, "{}", v),
            Number::U16(v) => write!(f, "{}", v),
            Number::U32(v) => write!(f, "{}", v),
            Number::U64(v) => write!(f, "{}", v),
            Number::F32(v) => write!(f, "{}", v),
            Number::F64(v) => write!(f, "{}", v),
        }
    }
}
