//! Successor function used by `Sequence::range`.

/// A type with a "next value" used to generate counted ranges.
///
/// `successor` returns `None` past the type's last value; a range stops
/// there even if its count is not used up.
pub trait Step: Clone + 'static {
    fn successor(&self) -> Option<Self>;
}

macro_rules! step_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl Step for $t {
                #[inline]
                fn successor(&self) -> Option<Self> {
                    self.checked_add(1)
                }
            }
        )*
    };
}

step_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Step for f32 {
    #[inline]
    fn successor(&self) -> Option<Self> {
        Some(*self + 1.0)
    }
}

impl Step for f64 {
    #[inline]
    fn successor(&self) -> Option<Self> {
        Some(*self + 1.0)
    }
}

impl Step for char {
    /// Skips the surrogate range; `None` after `char::MAX`.
    fn successor(&self) -> Option<Self> {
        let next = match *self as u32 {
            0xD7FF => 0xE000,
            n => n.checked_add(1)?,
        };
        char::from_u32(next)
    }
}
