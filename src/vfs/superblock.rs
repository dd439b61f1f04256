use alloc::sync::Arc;
use core::any::Any;

use super::{inode::VfsInode, utils::VfsFsStat, VfsResult};

/// One mounted filesystem instance.
pub trait VfsSuperBlock: Send + Sync {
    /// Flush instance state to its backing store.
    fn sync_fs(&self, wait: bool) -> VfsResult<()>;

    /// Capacity and usage statistics for the instance.
    fn stat_fs(&self) -> VfsResult<VfsFsStat>;

    /// The root node of the instance.
    fn root_inode(&self) -> VfsResult<Arc<dyn VfsInode>>;

    /// Concrete-type escape hatch for the owning filesystem's teardown path.
    fn as_any(&self) -> &dyn Any;
}
