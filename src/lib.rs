//! Attribute serializer for JVM `.class` files (JVMS #4.7).
//!
//! This crate owns the attribute-writing core of a larger class-file
//! toolkit: attribute dispatch, per-attribute byte layout, the stack-map
//! sub-serializer, the verification-type sub-serializer, recursive
//! sub-attribute embedding, attribute-length computation, and nullable
//! constant-pool-reference handling.
//!
//! Constant-pool construction, instruction-stream encoding, and the
//! enclosing class/method/field writer are external collaborators: this
//! crate only consumes stable pool indices ([`pool::ConstPoolIndex`]) and
//! opaque byte arrays produced elsewhere.

pub mod annotation;
pub mod attribute;
pub mod flag;
pub mod frame;
pub mod macros;
pub mod module;
pub mod pool;
pub mod vec;
pub mod writer;

pub use attribute::{write_attribute, Attribute, AttributeBody, AttributeWriteError};
pub use writer::ClassfileWritable;
