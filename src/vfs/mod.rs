//! The virtual-filesystem contract.
//!
//! Everything a filesystem driver is dispatched through lives here: the
//! [`fstype::VfsFsType`] / [`superblock::VfsSuperBlock`] / [`inode::VfsInode`]
//! traits, the dentry layer with generic name resolution, the page-addressed
//! content store, and the process-wide registration table.

pub mod cache;
pub mod dentry;
pub mod error;
pub mod fstype;
pub mod inode;
pub mod path;
pub mod registry;
pub mod superblock;
pub mod utils;

pub use error::{VfsError, VfsResult};
