use alloc::{string::String, sync::Arc};
use bitflags::bitflags;

use super::{dentry::VfsDentry, inode::VfsInode, superblock::VfsSuperBlock, VfsResult};

bitflags! {
    /// Behavior flags a filesystem type reports to the host.
    pub struct FileSystemFlags: u32 {
        /// Mounting requires a backing device.
        const REQUIRES_DEV = 0x1;
    }
}

/// A registerable filesystem type: the mount entry point and its teardown
/// counterpart.
pub trait VfsFsType: Send + Sync {
    /// Mount a new instance and return its root entry.
    ///
    /// `dev` carries the backing device for filesystems that need one;
    /// device-less filesystems reject it. `data` is opaque mount data.
    fn mount(
        self: Arc<Self>,
        flags: u32,
        ab_mnt: &str,
        dev: Option<Arc<dyn VfsInode>>,
        data: &[u8],
    ) -> VfsResult<Arc<dyn VfsDentry>>;

    /// Tear down a mounted instance. Once this returns, no operation is in
    /// flight on the instance and its node tree has been released.
    fn kill_sb(&self, sb: Arc<dyn VfsSuperBlock>) -> VfsResult<()>;

    fn fs_flag(&self) -> FileSystemFlags;

    fn fs_name(&self) -> String;
}
