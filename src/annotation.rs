//! Annotation and type-annotation trees (JVMS #4.7.16, #4.7.20).
//!
//! These are consumed wholesale by [`crate::attribute`]'s `Runtime*Annotations`
//! and `AnnotationDefault` bodies; encoding the element-value tree itself is
//! this module's concern, not the dispatcher's.

use crate::classfile_writable;
use crate::macros::Tagged;
use crate::pool::{
    ConstDoubleInfo, ConstFloatInfo, ConstIntegerInfo, ConstLongInfo, ConstPoolIndex,
    ConstUtf8Info,
};
use crate::vec::{JvmVecU1, JvmVecU2};
use crate::writer::ClassfileWritable;
use std::io::Write;

classfile_writable! {
    #[derive(Eq, PartialEq, Debug)]
    pub struct Annotation {
        pub type_name: ConstPoolIndex<ConstUtf8Info>,
        pub elements: JvmVecU2<NamedElementValue>,
    }
}

classfile_writable! {
    #[derive(Eq, PartialEq, Debug)]
    pub struct NamedElementValue {
        pub name: ConstPoolIndex<ConstUtf8Info>,
        pub value: ElementValue,
    }
}

/// A single annotation element's value (JVMS #4.7.16.1).
#[derive(Eq, PartialEq, Debug)]
pub enum ElementValue {
    Byte(ConstPoolIndex<ConstIntegerInfo>),
    Char(ConstPoolIndex<ConstIntegerInfo>),
    Double(ConstPoolIndex<ConstDoubleInfo>),
    Float(ConstPoolIndex<ConstFloatInfo>),
    Int(ConstPoolIndex<ConstIntegerInfo>),
    Long(ConstPoolIndex<ConstLongInfo>),
    Short(ConstPoolIndex<ConstIntegerInfo>),
    Boolean(ConstPoolIndex<ConstIntegerInfo>),
    String(ConstPoolIndex<ConstUtf8Info>),
    EnumType {
        type_name: ConstPoolIndex<ConstUtf8Info>,
        const_name: ConstPoolIndex<ConstUtf8Info>,
    },
    Class(ConstPoolIndex<ConstUtf8Info>),
    AnnotationType(Annotation),
    ArrayType(JvmVecU2<ElementValue>),
}

impl Tagged for ElementValue {
    type TagType = u8;

    fn tag(&self) -> u8 {
        (match self {
            Self::Byte(..) => 'B',
            Self::Char(..) => 'C',
            Self::Double(..) => 'D',
            Self::Float(..) => 'F',
            Self::Int(..) => 'I',
            Self::Long(..) => 'J',
            Self::Short(..) => 'S',
            Self::Boolean(..) => 'Z',
            Self::String(..) => 's',
            Self::EnumType { .. } => 'e',
            Self::Class(..) => 'c',
            Self::AnnotationType(..) => '@',
            Self::ArrayType(..) => '[',
        }) as u8
    }
}

impl ClassfileWritable for ElementValue {
    fn write_to_classfile<W: Write>(&self, buffer: &mut W) {
        self.tag().write_to_classfile(buffer);
        match self {
            Self::Byte(index) => index.write_to_classfile(buffer),
            Self::Char(index) => index.write_to_classfile(buffer),
            Self::Double(index) => index.write_to_classfile(buffer),
            Self::Float(index) => index.write_to_classfile(buffer),
            Self::Int(index) => index.write_to_classfile(buffer),
            Self::Long(index) => index.write_to_classfile(buffer),
            Self::Short(index) => index.write_to_classfile(buffer),
            Self::Boolean(index) => index.write_to_classfile(buffer),
            Self::String(index) => index.write_to_classfile(buffer),
            Self::EnumType {
                type_name,
                const_name,
            } => {
                type_name.write_to_classfile(buffer);
                const_name.write_to_classfile(buffer);
            }
            Self::Class(index) => index.write_to_classfile(buffer),
            Self::AnnotationType(annotation) => annotation.write_to_classfile(buffer),
            Self::ArrayType(elements) => elements.write_to_classfile(buffer),
        }
    }
}

classfile_writable! {
    #[derive(Eq, PartialEq, Debug)]
    pub struct TypeAnnotation {
        pub target: TargetInfo,
        pub type_path: TypePath,
        pub annotation: Annotation,
    }
}

classfile_writable! {
    #[derive(Eq, PartialEq, Debug)]
    pub struct TypePath {
        pub path: JvmVecU1<TypePathEntry>,
    }
}

classfile_writable! {
    #[derive(Eq, PartialEq, Debug)]
    pub struct TypePathEntry {
        pub type_path_kind: u8,
        pub type_argument_index: u8,
    }
}

/// A type-annotation target (JVMS #4.7.20.1): a tagged kind byte followed by
/// its kind-specific info record.
#[derive(Eq, PartialEq, Debug)]
pub enum TargetInfo {
    TypeParameter { kind_tag: u8, type_parameter_index: u8 },
    Supertype { supertype_index: u16 },
    TypeParameterBound {
        kind_tag: u8,
        type_parameter_index: u8,
        bound_index: u8,
    },
    Empty { kind_tag: u8 },
    FormalParameter { formal_parameter_index: u8 },
    Throws { throws_type_index: u16 },
    Localvar {
        kind_tag: u8,
        table: JvmVecU2<LocalVarTargetEntry>,
    },
    Catch { exception_table_index: u16 },
    Offset { kind_tag: u8, offset: u16 },
    TypeArgument {
        kind_tag: u8,
        offset: u16,
        type_argument_index: u8,
    },
}

classfile_writable! {
    #[derive(Eq, PartialEq, Debug)]
    pub struct LocalVarTargetEntry {
        pub start_pc: u16,
        pub length: u16,
        pub index: u16,
    }
}

impl ClassfileWritable for TargetInfo {
    fn write_to_classfile<W: Write>(&self, buffer: &mut W) {
        match self {
            Self::TypeParameter {
                kind_tag,
                type_parameter_index,
            } => {
                kind_tag.write_to_classfile(buffer);
                type_parameter_index.write_to_classfile(buffer);
            }
            Self::Supertype { supertype_index } => {
                0x10u8.write_to_classfile(buffer);
                supertype_index.write_to_classfile(buffer);
            }
            Self::TypeParameterBound {
                kind_tag,
                type_parameter_index,
                bound_index,
            } => {
                kind_tag.write_to_classfile(buffer);
                type_parameter_index.write_to_classfile(buffer);
                bound_index.write_to_classfile(buffer);
            }
            Self::Empty { kind_tag } => kind_tag.write_to_classfile(buffer),
            Self::FormalParameter {
                formal_parameter_index,
            } => {
                0x16u8.write_to_classfile(buffer);
                formal_parameter_index.write_to_classfile(buffer);
            }
            Self::Throws { throws_type_index } => {
                0x17u8.write_to_classfile(buffer);
                throws_type_index.write_to_classfile(buffer);
            }
            Self::Localvar { kind_tag, table } => {
                kind_tag.write_to_classfile(buffer);
                table.write_to_classfile(buffer);
            }
            Self::Catch {
                exception_table_index,
            } => {
                0x42u8.write_to_classfile(buffer);
                exception_table_index.write_to_classfile(buffer);
            }
            Self::Offset { kind_tag, offset } => {
                kind_tag.write_to_classfile(buffer);
                offset.write_to_classfile(buffer);
            }
            Self::TypeArgument {
                kind_tag,
                offset,
                type_argument_index,
            } => {
                kind_tag.write_to_classfile(buffer);
                offset.write_to_classfile(buffer);
                type_argument_index.write_to_classfile(buffer);
            }
        }
    }
}
