//! `StackMapTable` frames and the verification types they carry
//! (JVMS #4.7.4, #4.10.1.4).

use crate::macros::Tagged;
use crate::pool::{ConstClassInfo, ConstPoolIndex};
use crate::vec::JvmVecU2;
use crate::writer::ClassfileWritable;
use std::io::Write;

/// One entry of a `StackMapTable`, keyed by its `frame_type` discriminator
/// byte. The writer never normalizes or validates `frame_type`: it trusts
/// that e.g. an `AppendFrame`'s tag is consistent with how many additional
/// locals it carries.
#[derive(Eq, PartialEq, Debug)]
pub enum StackMapFrame {
    /// `frame_type` 0..=63
    SameFrame { frame_type: u8 },
    /// `frame_type` 64..=127
    SameLocalsOneStackItem {
        frame_type: u8,
        stack: VerificationTypeInfo,
    },
    /// `frame_type` 247
    SameLocalsOneStackItemExtended {
        offset_delta: u16,
        stack: VerificationTypeInfo,
    },
    /// `frame_type` 248..=250
    ChopFrame { frame_type: u8, offset_delta: u16 },
    /// `frame_type` 251
    SameFrameExtended { offset_delta: u16 },
    /// `frame_type` 252..=254
    AppendFrame {
        frame_type: u8,
        offset_delta: u16,
        locals: Vec<VerificationTypeInfo>,
    },
    /// `frame_type` 255
    FullFrame {
        offset_delta: u16,
        locals: JvmVecU2<VerificationTypeInfo>,
        stack: JvmVecU2<VerificationTypeInfo>,
    },
}

impl Tagged for StackMapFrame {
    type TagType = u8;

    fn tag(&self) -> u8 {
        match self {
            Self::SameFrame { frame_type } => *frame_type,
            Self::SameLocalsOneStackItem { frame_type, .. } => *frame_type,
            Self::SameLocalsOneStackItemExtended { .. } => 247,
            Self::ChopFrame { frame_type, .. } => *frame_type,
            Self::SameFrameExtended { .. } => 251,
            Self::AppendFrame { frame_type, .. } => *frame_type,
            Self::FullFrame { .. } => 255,
        }
    }
}

impl ClassfileWritable for StackMapFrame {
    fn write_to_classfile<W: Write>(&self, buffer: &mut W) {
        self.tag().write_to_classfile(buffer);
        match self {
            Self::SameFrame { .. } => {}
            Self::SameLocalsOneStackItem { stack, .. } => stack.write_to_classfile(buffer),
            Self::SameLocalsOneStackItemExtended {
                offset_delta,
                stack,
            } => {
                offset_delta.write_to_classfile(buffer);
                stack.write_to_classfile(buffer);
            }
            Self::ChopFrame { offset_delta, .. } => offset_delta.write_to_classfile(buffer),
            Self::SameFrameExtended { offset_delta } => offset_delta.write_to_classfile(buffer),
            Self::AppendFrame {
                offset_delta,
                locals,
                ..
            } => {
                offset_delta.write_to_classfile(buffer);
                for local in locals {
                    local.write_to_classfile(buffer);
                }
            }
            Self::FullFrame {
                offset_delta,
                locals,
                stack,
            } => {
                offset_delta.write_to_classfile(buffer);
                locals.write_to_classfile(buffer);
                stack.write_to_classfile(buffer);
            }
        }
    }
}

/// One verification type: a tag byte plus variant-specific payload
/// (JVMS #4.7.4).
#[derive(Eq, PartialEq, Debug)]
pub enum VerificationTypeInfo {
    Top,
    Integer,
    Float,
    Double,
    Long,
    Null,
    UninitializedThis,
    Object { class: ConstPoolIndex<ConstClassInfo> },
    Uninitialized { offset: u16 },
}

impl Tagged for VerificationTypeInfo {
    type TagType = u8;

    fn tag(&self) -> u8 {
        match self {
            Self::Top => 0,
            Self::Integer => 1,
            Self::Float => 2,
            Self::Double => 3,
            Self::Long => 4,
            Self::Null => 5,
            Self::UninitializedThis => 6,
            Self::Object { .. } => 7,
            Self::Uninitialized { .. } => 8,
        }
    }
}

impl ClassfileWritable for VerificationTypeInfo {
    fn write_to_classfile<W: Write>(&self, buffer: &mut W) {
        self.tag().write_to_classfile(buffer);
        match self {
            Self::Object { class } => class.write_to_classfile(buffer),
            Self::Uninitialized { offset } => offset.write_to_classfile(buffer),
            _ => {}
        }
    }
}

/// `StackMapTable`'s body: `u16` frame count followed by each frame.
pub type StackMapTable = JvmVecU2<StackMapFrame>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_type_top_has_no_payload() {
        assert_eq!(VerificationTypeInfo::Top.to_classfile_bytes(), vec![0x00]);
    }

    #[test]
    fn verification_type_object_carries_class_index() {
        let vt = VerificationTypeInfo::Object {
            class: ConstPoolIndex::new(9),
        };
        assert_eq!(vt.to_classfile_bytes(), vec![0x07, 0x00, 0x09]);
    }

    #[test]
    fn verification_type_uninitialized_carries_offset() {
        let vt = VerificationTypeInfo::Uninitialized { offset: 0x10 };
        assert_eq!(vt.to_classfile_bytes(), vec![0x08, 0x00, 0x10]);
    }

    #[test]
    fn same_frame_extended_writes_tag_and_delta() {
        let frame = StackMapFrame::SameFrameExtended { offset_delta: 5 };
        assert_eq!(frame.to_classfile_bytes(), vec![0xFB, 0x00, 0x05]);
    }

    #[test]
    fn full_frame_with_empty_locals_and_stack() {
        let frame = StackMapFrame::FullFrame {
            offset_delta: 0,
            locals: JvmVecU2::new(),
            stack: JvmVecU2::new(),
        };
        assert_eq!(
            frame.to_classfile_bytes(),
            vec![0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn append_frame_writes_each_local_in_order() {
        let frame = StackMapFrame::AppendFrame {
            frame_type: 253,
            offset_delta: 3,
            locals: vec![VerificationTypeInfo::Integer, VerificationTypeInfo::Top],
        };
        assert_eq!(
            frame.to_classfile_bytes(),
            vec![253, 0x00, 0x03, 0x01, 0x00]
        );
    }
}
