//! The core byte-emission trait shared by every wire-level structure.

use std::io::Write;

/// An object which can be written into a classfile byte stream.
pub trait ClassfileWritable {
    /// Writes the bytes of this object into the given buffer.
    ///
    /// # Arguments
    ///
    /// * `buffer` - classfile byte-buffer into which this object should be written
    fn write_to_classfile<W: Write>(&self, buffer: &mut W);

    /// Creates a new [byte-vector](Vec) from this object.
    fn to_classfile_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        self.write_to_classfile(&mut buffer);

        buffer
    }
}

impl ClassfileWritable for [u8] {
    fn write_to_classfile<W: Write>(&self, buffer: &mut W) {
        buffer.write_all(self).expect("in-memory buffer write failed");
    }
}

impl ClassfileWritable for Vec<u8> {
    fn write_to_classfile<W: Write>(&self, buffer: &mut W) {
        self.as_slice().write_to_classfile(buffer);
    }
}

macro_rules! impl_primitive_classfile_writable {
    ($($numeric:ty)*) => {$(
        impl ClassfileWritable for $numeric {
            fn write_to_classfile<W: Write>(&self, buffer: &mut W) {
                buffer
                    .write_all(self.to_be_bytes().as_ref())
                    .expect("in-memory buffer write failed");
            }
        }
    )*};
}

impl_primitive_classfile_writable!(u8 u16 u32 u64 i8 i16 i32 i64);
