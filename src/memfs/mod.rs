//! The in-memory filesystem driver.
//!
//! [`MemFsType`] is the registerable type; each mount builds a
//! [`MemSuperBlock`] holding a tree of [`MemInode`] nodes whose content
//! lives in the page store. Everything is released when the instance is
//! torn down and the last outside reference drops.

mod dentry;
mod fstype;
mod inode;
mod superblock;

pub use dentry::MemDentry;
pub use fstype::MemFsType;
pub use inode::MemInode;
pub use superblock::MemSuperBlock;

/// Magic identifier reported for this filesystem type.
pub const MEMFS_MAGIC: u32 = 0xbeef1337;

pub const MEMFS_BLOCK_SIZE_BITS: u32 = 12;

/// Block size of every instance, one content page.
pub const MEMFS_BLOCK_SIZE: u64 = 1 << MEMFS_BLOCK_SIZE_BITS;

/// Largest byte offset a file can reach, the large-file ceiling.
pub const MEMFS_MAX_FILE_SIZE: u64 = i64::MAX as u64;
