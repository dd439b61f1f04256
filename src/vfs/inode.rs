use alloc::sync::Arc;

use super::{
    superblock::VfsSuperBlock,
    utils::{VfsDirEntry, VfsFileStat, VfsNodePerm, VfsNodeType},
    VfsResult,
};

/// Content and listing surface of a node.
pub trait VfsFile: Send + Sync {
    /// Read file content at `offset`. Returns the number of bytes read,
    /// `0` at or past end of file.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> VfsResult<usize>;

    /// Write file content at `offset`, extending the file as needed.
    fn write_at(&self, offset: u64, buf: &[u8]) -> VfsResult<usize>;

    /// The directory entry at `start_index`, or `None` past the last one.
    fn readdir(&self, start_index: usize) -> VfsResult<Option<VfsDirEntry>>;
}

/// A filesystem node in the dispatch contract.
///
/// Operations that do not apply to the node's kind fail with
/// [`VfsError::NotDir`](super::VfsError::NotDir) or
/// [`VfsError::NoSys`](super::VfsError::NoSys).
pub trait VfsInode: VfsFile {
    /// The instance this node belongs to.
    fn get_super_block(&self) -> VfsResult<Arc<dyn VfsSuperBlock>>;

    fn node_perm(&self) -> VfsNodePerm;

    fn inode_type(&self) -> VfsNodeType;

    /// Create `name` in this directory and return the new node, already
    /// linked and visible.
    fn create(
        &self,
        name: &str,
        ty: VfsNodeType,
        perm: VfsNodePerm,
    ) -> VfsResult<Arc<dyn VfsInode>>;

    /// Resolve `name` in this directory.
    fn lookup(&self, name: &str) -> VfsResult<Arc<dyn VfsInode>>;

    /// Node attributes, block usage computed from resident pages.
    fn get_attr(&self) -> VfsResult<VfsFileStat>;
}
