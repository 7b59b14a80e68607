//! Canonical byte encodings for fingerprinted values
//!
//! Fingerprints are only as stable as the bytes fed to the digest. Values
//! opt in through [`Canonical`], which writes an explicit, tagged encoding
//! that does not depend on memory layout or `Debug` output.

use crate::Result;
use serde::Serialize;
use std::ops::Deref;

const TAG_BOOL: u8 = 0x01;
const TAG_CHAR: u8 = 0x02;
const TAG_UNSIGNED: u8 = 0x03;
const TAG_SIGNED: u8 = 0x04;
const TAG_STR: u8 = 0x05;
const TAG_NONE: u8 = 0x06;
const TAG_SOME: u8 = 0x07;
const TAG_SEQ: u8 = 0x08;
const TAG_TUPLE: u8 = 0x09;
const TAG_SERIALIZED: u8 = 0x0a;

/// A value with a stable canonical byte encoding.
///
/// Two values the caller considers equal must write identical bytes, or
/// lookups will silently miss. `str` and `String` encode the same way, as do
/// integers of the same signedness regardless of width.
pub trait Canonical {
    /// Append the canonical encoding of `self` to `out`
    fn write_canonical(&self, out: &mut Vec<u8>);

    /// The canonical encoding as an owned buffer
    fn canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_canonical(&mut out);
        out
    }
}

fn write_len(out: &mut Vec<u8>, len: usize) {
    out.extend_from_slice(&(len as u64).to_le_bytes());
}

impl Canonical for bool {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        out.push(TAG_BOOL);
        out.push(*self as u8);
    }
}

impl Canonical for char {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        out.push(TAG_CHAR);
        out.extend_from_slice(&(*self as u32).to_le_bytes());
    }
}

macro_rules! impl_canonical_unsigned {
    ($($ty:ty),+) => {
        $(
            impl Canonical for $ty {
                fn write_canonical(&self, out: &mut Vec<u8>) {
                    out.push(TAG_UNSIGNED);
                    out.extend_from_slice(&(*self as u128).to_le_bytes());
                }
            }
        )+
    };
}

macro_rules! impl_canonical_signed {
    ($($ty:ty),+) => {
        $(
            impl Canonical for $ty {
                fn write_canonical(&self, out: &mut Vec<u8>) {
                    out.push(TAG_SIGNED);
                    out.extend_from_slice(&(*self as i128).to_le_bytes());
                }
            }
        )+
    };
}

impl_canonical_unsigned!(u8, u16, u32, u64, u128, usize);
impl_canonical_signed!(i8, i16, i32, i64, i128, isize);

impl Canonical for str {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        out.push(TAG_STR);
        write_len(out, self.len());
        out.extend_from_slice(self.as_bytes());
    }
}

impl Canonical for String {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        self.as_str().write_canonical(out);
    }
}

impl<T: Canonical + ?Sized> Canonical for &T {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        (**self).write_canonical(out);
    }
}

impl<T: Canonical + ?Sized> Canonical for Box<T> {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        (**self).write_canonical(out);
    }
}

impl<T: Canonical> Canonical for Option<T> {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        match self {
            None => out.push(TAG_NONE),
            Some(value) => {
                out.push(TAG_SOME);
                value.write_canonical(out);
            }
        }
    }
}

impl<T: Canonical> Canonical for [T] {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        out.push(TAG_SEQ);
        write_len(out, self.len());
        for item in self {
            item.write_canonical(out);
        }
    }
}

impl<T: Canonical, const N: usize> Canonical for [T; N] {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        self.as_slice().write_canonical(out);
    }
}

impl<T: Canonical> Canonical for Vec<T> {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        self.as_slice().write_canonical(out);
    }
}

macro_rules! impl_canonical_tuple {
    ($arity:expr => $($name:ident),+) => {
        impl<$($name: Canonical),+> Canonical for ($($name,)+) {
            #[allow(non_snake_case)]
            fn write_canonical(&self, out: &mut Vec<u8>) {
                out.push(TAG_TUPLE);
                out.push($arity);
                let ($($name,)+) = self;
                $($name.write_canonical(out);)+
            }
        }
    };
}

impl_canonical_tuple!(1 => A);
impl_canonical_tuple!(2 => A, B);
impl_canonical_tuple!(3 => A, B, C);
impl_canonical_tuple!(4 => A, B, C, D);

/// Any serde value, encoded once with bincode.
///
/// The encoding is computed at construction so that writing it can never
/// fail, and it is kept alongside the value for the value's lifetime.
#[derive(Clone, Debug)]
pub struct Serialized<T> {
    value: T,
    bytes: Vec<u8>,
}

impl<T: Serialize> Serialized<T> {
    /// Wrap a value, computing its bincode encoding
    pub fn new(value: T) -> Result<Self> {
        let bytes = bincode::serialize(&value)?;
        Ok(Serialized { value, bytes })
    }

    /// Unwrap the value
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Deref for Serialized<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: PartialEq> PartialEq for Serialized<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for Serialized<T> {}

impl<T> Canonical for Serialized<T> {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        out.push(TAG_SERIALIZED);
        write_len(out, self.bytes.len());
        out.extend_from_slice(&self.bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_str_and_string_agree() {
        let owned = String::from("alice");
        assert_eq!(owned.canonical_bytes(), "alice".canonical_bytes());
        assert_eq!((&owned).canonical_bytes(), owned.canonical_bytes());
    }

    #[test]
    fn test_integer_width_does_not_matter() {
        assert_eq!(7u8.canonical_bytes(), 7u64.canonical_bytes());
        assert_eq!((-7i16).canonical_bytes(), (-7i64).canonical_bytes());
        assert_ne!(7u32.canonical_bytes(), 7i32.canonical_bytes());
    }

    #[test]
    fn test_types_are_tagged() {
        assert_ne!("1".canonical_bytes(), 1u32.canonical_bytes());
        assert_ne!(true.canonical_bytes(), 1u8.canonical_bytes());
        assert_ne!('a'.canonical_bytes(), "a".canonical_bytes());
        assert_ne!(None::<u8>.canonical_bytes(), Some(0u8).canonical_bytes());
    }

    #[test]
    fn test_lengths_prevent_concatenation_ambiguity() {
        assert_ne!(("ab", "c").canonical_bytes(), ("a", "bc").canonical_bytes());
        assert_ne!(
            vec![vec![1u8], vec![]].canonical_bytes(),
            vec![vec![], vec![1u8]].canonical_bytes()
        );
    }

    #[test]
    fn test_sequences_agree_across_containers() {
        let v = vec![1u32, 2, 3];
        let a = [1u32, 2, 3];
        assert_eq!(v.canonical_bytes(), a.canonical_bytes());
        assert_eq!(v.canonical_bytes(), v.as_slice().canonical_bytes());
    }

    #[test]
    fn test_serialized_is_stable() {
        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Point {
            x: i32,
            y: i32,
        }

        let p1 = Serialized::new(Point { x: 1, y: 2 }).unwrap();
        let p2 = Serialized::new(Point { x: 1, y: 2 }).unwrap();
        let p3 = Serialized::new(Point { x: 2, y: 1 }).unwrap();

        assert_eq!(p1.canonical_bytes(), p2.canonical_bytes());
        assert_ne!(p1.canonical_bytes(), p3.canonical_bytes());
        assert_eq!(p1, p2);
        assert_eq!(p1.x, 1);
        assert_eq!(p3.into_inner(), Point { x: 2, y: 1 });
    }
}
