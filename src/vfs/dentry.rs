use alloc::{string::String, sync::Arc};

use super::{inode::VfsInode, VfsResult};

/// A name-to-node binding inside a directory.
///
/// Entries form the cached half of name resolution: a child observed once
/// through [`VfsInode::lookup`] stays bound here until removed. A name is
/// unique among the children of one entry at any instant.
pub trait VfsDentry: Send + Sync {
    /// Entry name. The root entry of an instance is named `/`.
    fn name(&self) -> String;

    /// The node this entry is bound to.
    fn inode(&self) -> Arc<dyn VfsInode>;

    /// Parent entry; `None` for the root.
    fn parent(&self) -> Option<Arc<dyn VfsDentry>>;

    /// The cached child binding `name`, if present.
    fn find(&self, name: &str) -> Option<Arc<dyn VfsDentry>>;

    /// Bind `inode` as child `name` and return the new entry.
    fn insert(
        self: Arc<Self>,
        name: &str,
        inode: Arc<dyn VfsInode>,
    ) -> VfsResult<Arc<dyn VfsDentry>>;

    /// Drop the cached child binding `name`.
    fn remove(&self, name: &str) -> Option<Arc<dyn VfsDentry>>;
}
