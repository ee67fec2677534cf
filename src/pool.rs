//! Typed references into a constant pool owned elsewhere.
//!
//! Constant-pool *construction* is an external collaborator's job (see the
//! crate-level docs); this module only carries the stable, already-resolved
//! index a pool entry was assigned, tagged with the kind of entry it refers
//! to so attribute bodies cannot mix up e.g. a class reference with a
//! UTF-8 reference at compile time.

use crate::writer::ClassfileWritable;
use std::io::Write;
use std::marker::PhantomData;

/// Marker for a kind of constant-pool entry. Carries no data: dispatch on
/// the pool itself reads the index only, never the marker.
pub trait ConstPoolEntryInfo {}

macro_rules! const_pool_entry_markers {
    ($($(#[$doc:meta])* $name:ident)*) => {$(
        $(#[$doc])*
        #[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
        pub struct $name;

        impl ConstPoolEntryInfo for $name {}
    )*};
}

const_pool_entry_markers! {
    /// `CONSTANT_Utf8_info`
    ConstUtf8Info
    /// `CONSTANT_Class_info`
    ConstClassInfo
    /// `CONSTANT_NameAndType_info`
    ConstNameAndTypeInfo
    /// `CONSTANT_Package_info`
    ConstPackageInfo
    /// `CONSTANT_Module_info`
    ConstModuleInfo
    /// `CONSTANT_MethodHandle_info`
    ConstMethodHandleInfo
    /// `CONSTANT_Integer_info`
    ConstIntegerInfo
    /// `CONSTANT_Float_info`
    ConstFloatInfo
    /// `CONSTANT_Long_info`
    ConstLongInfo
    /// `CONSTANT_Double_info`
    ConstDoubleInfo
    /// Any loadable constant (`CONSTANT_{Integer,Float,Long,Double,Class,String,MethodHandle,MethodType,Dynamic}_info`)
    ConstLoadableInfo
}

/// Typed index of a structure in a constant pool. Index `0` is never
/// produced by a present reference: it is reserved for the "no entry"
/// sentinel written by [`pool_index_or_zero`].
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct ConstPoolIndex<T: ConstPoolEntryInfo>(u16, PhantomData<T>);

impl<T: ConstPoolEntryInfo> ConstPoolIndex<T> {
    pub fn new(index: u16) -> Self {
        Self(index, PhantomData)
    }
}

impl<T: ConstPoolEntryInfo> From<u16> for ConstPoolIndex<T> {
    fn from(index: u16) -> Self {
        Self::new(index)
    }
}

impl<T: ConstPoolEntryInfo> ClassfileWritable for ConstPoolIndex<T> {
    fn write_to_classfile<W: Write>(&self, buffer: &mut W) {
        self.0.write_to_classfile(buffer);
    }
}

/// The [pool reference resolver](crate) contract: yields the raw `u16`
/// index underlying a typed reference.
pub trait PoolIndexResolver {
    fn pool_index(&self) -> u16;
}

impl<T: ConstPoolEntryInfo> PoolIndexResolver for ConstPoolIndex<T> {
    fn pool_index(&self) -> u16 {
        self.0
    }
}

/// Resolves a nullable pool entry reference to its `u16` index, or `0` if
/// absent -- the JVM convention for "no entry".
pub fn pool_index_or_zero<T: ConstPoolEntryInfo>(entry: Option<&ConstPoolIndex<T>>) -> u16 {
    entry.map(PoolIndexResolver::pool_index).unwrap_or(0)
}

impl<T: ConstPoolEntryInfo> ClassfileWritable for Option<ConstPoolIndex<T>> {
    fn write_to_classfile<W: Write>(&self, buffer: &mut W) {
        pool_index_or_zero(self.as_ref()).write_to_classfile(buffer)
    }
}
