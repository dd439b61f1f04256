//! An in-memory filesystem.
//!
//! `memfs2` registers a filesystem type with the VFS layer and, once mounted,
//! presents a writable hierarchy of directories and regular files whose data
//! and metadata live entirely in volatile memory. Unmounting an instance
//! releases everything it held; nothing ever touches a device.
//!
//! The crate carries both sides of the dispatch contract: the [`vfs`] module
//! holds the host-side traits, the dentry cache, the page-addressed content
//! store and the registration table, while the [`memfs`] module is the
//! driver that implements them.
#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod memfs;
pub mod vfs;


pub use memfs::MemFsType;
pub use vfs::registry::{mount, register_filesystem, umount, unregister_filesystem};
pub use vfs::{VfsError, VfsResult};
