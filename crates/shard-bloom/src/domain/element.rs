//! Canonical byte encoding of filter elements
//!
//! Shard routing and offsets are computed over these bytes. Text encodes as
//! UTF-8 and numbers as their decimal text, so `42u64` and `"42"` address the
//! same bits. Callers storing richer types should implement [`Element`] with
//! an encoding that never changes.

use std::borrow::Cow;

/// A value that can be tested against the filter
pub trait Element {
    fn canonical_bytes(&self) -> Cow<'_, [u8]>;
}

impl<T: Element + ?Sized> Element for &T {
    fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        (**self).canonical_bytes()
    }
}

impl Element for str {
    fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl Element for String {
    fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl Element for [u8] {
    fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl Element for Vec<u8> {
    fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<const N: usize> Element for [u8; N] {
    fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl Element for char {
    fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        let mut buf = [0u8; 4];
        Cow::Owned(self.encode_utf8(&mut buf).as_bytes().to_vec())
    }
}

impl Element for bool {
    fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        let text: &'static [u8] = if *self { b"True" } else { b"False" };
        Cow::Borrowed(text)
    }
}

macro_rules! decimal_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                fn canonical_bytes(&self) -> Cow<'_, [u8]> {
                    Cow::Owned(self.to_string().into_bytes())
                }
            }
        )*
    };
}

decimal_element!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
