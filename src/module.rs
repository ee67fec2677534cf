//! Sub-structures of the `Module` attribute (JVMS #4.7.25) and of the
//! `ModuleHashes` attribute (JEP 261 hashed-module extension).

use crate::classfile_writable;
use crate::classfile_writable_mask_flags;
use crate::pool::{ConstModuleInfo, ConstPackageInfo, ConstPoolIndex, ConstUtf8Info};
use crate::vec::JvmVecU2;
use crate::writer::ClassfileWritable;
use indexmap::IndexMap;
use std::io::Write;

classfile_writable_mask_flags! {
    #[derive(Eq, PartialEq, Copy, Clone, Debug)]
    pub ModuleFlag as u16 = 0x0000;

    #[derive(Eq, PartialEq, Copy, Clone, Debug)]
    ModuleFlags => {
        Open = 0x0020,
        Synthetic = 0x1000,
        Mandated = 0x8000,
    }
}

classfile_writable_mask_flags! {
    #[derive(Eq, PartialEq, Copy, Clone, Debug)]
    pub RequiresFlag as u16 = 0x0000;

    #[derive(Eq, PartialEq, Copy, Clone, Debug)]
    RequiresFlags => {
        Transitive = 0x0020,
        StaticPhase = 0x0040,
        Synthetic = 0x1000,
        Mandated = 0x8000,
    }
}

classfile_writable_mask_flags! {
    #[derive(Eq, PartialEq, Copy, Clone, Debug)]
    pub ExportsFlag as u16 = 0x0000;

    #[derive(Eq, PartialEq, Copy, Clone, Debug)]
    ExportsFlags => {
        Synthetic = 0x1000,
        Mandated = 0x8000,
    }
}

classfile_writable_mask_flags! {
    #[derive(Eq, PartialEq, Copy, Clone, Debug)]
    pub OpensFlag as u16 = 0x0000;

    #[derive(Eq, PartialEq, Copy, Clone, Debug)]
    OpensFlags => {
        Synthetic = 0x1000,
        Mandated = 0x8000,
    }
}

classfile_writable! {
    #[derive(Eq, PartialEq, Debug)]
    pub struct ModuleRequires {
        pub requires: ConstPoolIndex<ConstModuleInfo>,
        pub flags: RequiresFlags,
        pub version: Option<ConstPoolIndex<ConstUtf8Info>>,
    }
}

classfile_writable! {
    #[derive(Eq, PartialEq, Debug)]
    pub struct ModuleExports {
        pub exports: ConstPoolIndex<ConstPackageInfo>,
        pub flags: ExportsFlags,
        pub to: JvmVecU2<ConstPoolIndex<ConstModuleInfo>>,
    }
}

classfile_writable! {
    #[derive(Eq, PartialEq, Debug)]
    pub struct ModuleOpens {
        pub opens: ConstPoolIndex<ConstPackageInfo>,
        pub flags: OpensFlags,
        pub to: JvmVecU2<ConstPoolIndex<ConstModuleInfo>>,
    }
}

/// A `uses_index` entry: a plain class reference naming a service interface.
pub type ModuleUses = ConstPoolIndex<crate::pool::ConstClassInfo>;

classfile_writable! {
    #[derive(Eq, PartialEq, Debug)]
    pub struct ModuleProvides {
        pub provides: ConstPoolIndex<crate::pool::ConstClassInfo>,
        pub with: JvmVecU2<ConstPoolIndex<crate::pool::ConstClassInfo>>,
    }
}

/// `ModuleHashes`'s body: an algorithm name followed by an ordered list of
/// per-module hash entries. Backed by an [`IndexMap`] keyed by module index
/// so lookups stay convenient without losing the wire-significant order.
#[derive(Eq, PartialEq, Debug)]
pub struct ModuleHashes {
    pub algorithm: ConstPoolIndex<ConstUtf8Info>,
    pub hashes: IndexMap<ConstPoolIndex<ConstModuleInfo>, JvmVecU2<u8>>,
}

impl ClassfileWritable for ModuleHashes {
    fn write_to_classfile<W: Write>(&self, buffer: &mut W) {
        self.algorithm.write_to_classfile(buffer);
        (self.hashes.len() as u16).write_to_classfile(buffer);
        for (module_name, hash) in &self.hashes {
            module_name.write_to_classfile(buffer);
            hash.write_to_classfile(buffer);
        }
    }
}
