//! Derivation helpers turning struct/enum declarations straight into their
//! [`ClassfileWritable`](crate::writer::ClassfileWritable) implementation.

/// An object with a single-byte (or otherwise primitive) discriminator tag
/// written ahead of its variant-specific payload, e.g. a verification type's
/// tag or a constant-pool entry's tag.
pub trait Tagged {
    type TagType;

    fn tag(&self) -> Self::TagType;
}

/// Declares a struct whose fields are written out in declaration order, with
/// no other framing -- the struct-level analogue of a fixed-width record.
#[macro_export]
macro_rules! classfile_writable {
    (
        $(#[$struct_attribute:meta])*
        $struct_visibility:vis struct $struct_name:ident {$(
            $(#[$field_attribute:meta])*
            $field_visibility:vis $field:ident: $type:ty
        ),*$(,)?}
    ) => {
        $(#[$struct_attribute])*
        $struct_visibility struct $struct_name {$(
            $(#[$field_attribute])*
            $field_visibility $field: $type,
        )*}

        impl $crate::writer::ClassfileWritable for $struct_name {
            fn write_to_classfile<W: ::std::io::Write>(&self, buffer: &mut W) {
                $(self.$field.write_to_classfile(buffer);)*
            }
        }
    };
    (
        $(#[$struct_attribute:meta])*
        $struct_visibility:vis struct $struct_name:ident;
    ) => {
        $(#[$struct_attribute])*
        $struct_visibility struct $struct_name;

        impl $crate::writer::ClassfileWritable for $struct_name {
            fn write_to_classfile<W: ::std::io::Write>(&self, _buffer: &mut W) {}
        }
    };
}

/// Declares a set of named bit-flag constants (`$flag_name`) alongside a
/// mask-backed container (`$flags_name`) that ORs them together, both
/// writable as a single `$number`.
#[macro_export]
macro_rules! classfile_writable_mask_flags {
    (
        $(#[$flag_attribute:meta])*
        $visibility:vis $flag_name:ident as $number:ty = $default:expr;

        $(#[$flags_attribute:meta])*
        $flags_name:ident => {$(
            $key:ident = $value:expr,
        )*}
    ) => {
        $crate::mask_flags! {
            $(#[$flag_attribute])*
            $visibility $flag_name as $number = $default;

            $(#[$flags_attribute])*
            $flags_name => {$(
                $key = $value,
            )*}
        }

        impl $crate::writer::ClassfileWritable for $flags_name {
            fn write_to_classfile<W: ::std::io::Write>(&self, buffer: &mut W) {
                self.mask().write_to_classfile(buffer);
            }
        }
    };
}
