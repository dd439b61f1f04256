//! Generic name resolution and entry creation over the dentry layer.

use alloc::sync::Arc;
use log::debug;

use super::{
    dentry::VfsDentry,
    utils::{VfsNodePerm, VfsNodeType},
    VfsError, VfsResult,
};

/// Resolve a `/`-separated path relative to `start`.
///
/// Each component is served from the child cache when bound there, and
/// otherwise resolved through the directory node and cached on the way out.
pub fn lookup_path(
    start: &Arc<dyn VfsDentry>,
    path: &str,
) -> VfsResult<Arc<dyn VfsDentry>> {
    let mut cur = start.clone();
    for name in path.split('/').filter(|c| !c.is_empty() && *c != ".") {
        cur = lookup_one(&cur, name)?;
    }
    Ok(cur)
}

fn lookup_one(dir: &Arc<dyn VfsDentry>, name: &str) -> VfsResult<Arc<dyn VfsDentry>> {
    if let Some(child) = dir.find(name) {
        return Ok(child);
    }
    let inode = dir.inode().lookup(name)?;
    dir.clone().insert(name, inode)
}

/// Create and bind a new entry `name` under `parent`.
///
/// The name must not already be bound among the siblings; a collision
/// surfaces as [`VfsError::Exist`] with the existing binding untouched.
pub fn create(
    parent: &Arc<dyn VfsDentry>,
    name: &str,
    ty: VfsNodeType,
    perm: VfsNodePerm,
) -> VfsResult<Arc<dyn VfsDentry>> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err(VfsError::Invalid);
    }
    if parent.find(name).is_some() {
        return Err(VfsError::Exist);
    }
    debug!("create {} under {}", name, parent.name());
    let inode = parent.inode().create(name, ty, perm)?;
    parent.clone().insert(name, inode)
}

/// Regular-file creation: [`create`] with the kind fixed to
/// [`VfsNodeType::File`].
pub fn create_file(
    parent: &Arc<dyn VfsDentry>,
    name: &str,
    perm: VfsNodePerm,
) -> VfsResult<Arc<dyn VfsDentry>> {
    create(parent, name, VfsNodeType::File, perm)
}
