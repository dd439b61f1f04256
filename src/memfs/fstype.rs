//! The registerable filesystem type.

use alloc::{
    string::{String, ToString},
    sync::Arc,
};

use log::info;

use crate::vfs::{
    dentry::VfsDentry,
    fstype::{FileSystemFlags, VfsFsType},
    inode::VfsInode,
    superblock::VfsSuperBlock,
    VfsError, VfsResult,
};

use super::{dentry::MemDentry, superblock::MemSuperBlock};

/// The in-memory filesystem type.
///
/// Device-less: every mount builds an independent instance out of nothing
/// but memory, and a mount request that names a device is rejected before
/// any state is constructed.
pub struct MemFsType {
    /// Node capacity handed to each instance.
    max_inodes: u64,
}

impl MemFsType {
    /// Filesystem type whose instances are bounded only by available memory.
    pub fn new() -> Self {
        Self {
            max_inodes: u64::MAX,
        }
    }

    /// Filesystem type whose instances hold at most `max_inodes` live
    /// nodes, root included.
    pub fn with_capacity(max_inodes: u64) -> Self {
        Self { max_inodes }
    }
}

impl Default for MemFsType {
    fn default() -> Self {
        Self::new()
    }
}

impl VfsFsType for MemFsType {
    fn mount(
        self: Arc<Self>,
        _flags: u32,
        _ab_mnt: &str,
        dev: Option<Arc<dyn VfsInode>>,
        _data: &[u8],
    ) -> VfsResult<Arc<dyn VfsDentry>> {
        if dev.is_some() {
            return Err(VfsError::Invalid);
        }
        let sb = MemSuperBlock::new(self.max_inodes);
        let root_inode = sb.setup_root()?;
        let root: Arc<dyn VfsDentry> = MemDentry::root(root_inode, sb);
        info!("memfs: mounted new instance");
        Ok(root)
    }

    fn kill_sb(&self, sb: Arc<dyn VfsSuperBlock>) -> VfsResult<()> {
        sb.sync_fs(true)?;
        let sb = sb
            .as_any()
            .downcast_ref::<MemSuperBlock>()
            .ok_or(VfsError::Invalid)?;
        sb.shutdown();
        info!("memfs: unmounted instance");
        Ok(())
    }

    fn fs_flag(&self) -> FileSystemFlags {
        FileSystemFlags::empty()
    }

    fn fs_name(&self) -> String {
        "memfs".to_string()
    }
}
