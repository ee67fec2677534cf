//! Size-limited `Vec` facades matching the JVM's own length-prefix widths.
//!
//! Every list-shaped structure in the classfile format is prefixed by a count
//! of a fixed width (`u8`, `u16` or `u32`). These wrappers keep that width
//! attached to the type so a list can never silently grow past what its
//! on-disk prefix can represent.

use crate::writer::ClassfileWritable;
use std::convert::TryFrom;
use std::io::Write;
use std::iter::FromIterator;
use std::ops::Deref;
use std::slice::Iter;
use thiserror::Error;

/// Raised when a collection would not fit into its classfile-mandated
/// length-prefix width.
#[derive(Error, Debug, Eq, PartialEq)]
#[error("collection of size {size} does not fit into a {max}-capped classfile vec")]
pub struct JvmVecCreateError {
    size: usize,
    max: u64,
}

macro_rules! impl_size_limited_vec {
    ($($name:ident($size_type:ident))*) => {$(
        /// A `Vec` whose length is written as a
        #[doc = concat!("`", stringify!($size_type), "`")]
        /// count before its elements.
        #[derive(Eq, PartialEq, Debug, Clone)]
        pub struct $name<T>(Vec<T>);

        impl<T> $name<T> {
            pub fn new() -> Self {
                Self(Vec::new())
            }

            pub fn push(&mut self, value: T) -> Result<$size_type, JvmVecCreateError> {
                let next_len = self.0.len() + 1;
                $size_type::try_from(next_len).map_err(|_| JvmVecCreateError {
                    size: next_len,
                    max: $size_type::MAX as u64,
                })?;
                self.0.push(value);
                Ok((self.0.len() - 1) as $size_type)
            }

            pub fn iter(&self) -> Iter<'_, T> {
                self.0.iter()
            }

            pub fn len(&self) -> $size_type {
                self.0.len() as $size_type
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl<T> Default for $name<T> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T> Deref for $name<T> {
            type Target = [T];

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl<T> TryFrom<Vec<T>> for $name<T> {
            type Error = JvmVecCreateError;

            fn try_from(value: Vec<T>) -> Result<Self, Self::Error> {
                $size_type::try_from(value.len()).map_err(|_| JvmVecCreateError {
                    size: value.len(),
                    max: $size_type::MAX as u64,
                })?;
                Ok(Self(value))
            }
        }

        impl<T> FromIterator<T> for $name<T> {
            fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
                Self::try_from(iter.into_iter().collect::<Vec<_>>())
                    .expect("too many elements for this classfile vec's length prefix")
            }
        }

        impl<'a, T> IntoIterator for &'a $name<T> {
            type Item = &'a T;
            type IntoIter = Iter<'a, T>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl<T: ClassfileWritable> ClassfileWritable for $name<T> {
            fn write_to_classfile<W: Write>(&self, buffer: &mut W) {
                self.len().write_to_classfile(buffer);
                for element in &self.0 {
                    element.write_to_classfile(buffer);
                }
            }
        }
    )*};
}

impl_size_limited_vec! {
    JvmVecU1(u8)
    JvmVecU2(u16)
    JvmVecU4(u32)
}
