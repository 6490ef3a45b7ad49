use core::fmt;

// -----------------------------------------------------------------------------
// Scalar

/// The borrowed scalar form of an opaque leaf value.
///
/// Scalars are what the text serializer writes directly and what map keys
/// must reduce to. [`Display`](fmt::Display) renders the raw literal, with no
/// quoting or escaping applied to strings.
///
/// # Examples
///
/// ```
/// use sg_reflect::{Reflect, Scalar};
///
/// assert!(matches!(3_i32.scalar(), Some(Scalar::I32(3))));
/// assert!(matches!("hi".to_string().scalar(), Some(Scalar::Str("hi"))));
/// assert!(vec![1, 2].scalar().is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar<'a> {
    /// A boolean.
    Bool(bool),
    /// A signed 8-bit integer.
    I8(i8),
    /// A signed 16-bit integer.
    I16(i16),
    /// A signed 32-bit integer.
    I32(i32),
    /// A signed 64-bit integer.
    I64(i64),
    /// An unsigned 8-bit integer.
    U8(u8),
    /// An unsigned 16-bit integer.
    U16(u16),
    /// An unsigned 32-bit integer.
    U32(u32),
    /// An unsigned 64-bit integer.
    U64(u64),
    /// A 32-bit float.
    F32(f32),
    /// A 64-bit float.
    F64(f64),
    /// A character.
    Char(char),
    /// A borrowed string.
    Str(&'a str),
}

impl Scalar<'_> {
    /// Returns `true` for the string and character variants, which require
    /// quoting in textual output.
    pub const fn is_textual(&self) -> bool {
        matches!(self, Self::Str(_) | Self::Char(_))
    }
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::I8(v) => fmt::Display::fmt(v, f),
            Self::I16(v) => fmt::Display::fmt(v, f),
            Self::I32(v) => fmt::Display::fmt(v, f),
            Self::I64(v) => fmt::Display::fmt(v, f),
            Self::U8(v) => fmt::Display::fmt(v, f),
            Self::U16(v) => fmt::Display::fmt(v, f),
            Self::U32(v) => fmt::Display::fmt(v, f),
            Self::U64(v) => fmt::Display::fmt(v, f),
            Self::F32(v) => fmt::Display::fmt(v, f),
            Self::F64(v) => fmt::Display::fmt(v, f),
            Self::Char(v) => fmt::Display::fmt(v, f),
            Self::Str(v) => f.write_str(v),
        }
    }
}
