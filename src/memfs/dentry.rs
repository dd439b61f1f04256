//! Directory entries of the driver.

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    sync::{Arc, Weak},
};

use spin::Mutex;

use crate::vfs::{dentry::VfsDentry, inode::VfsInode, superblock::VfsSuperBlock, VfsResult};

/// A bound name-to-node entry with a cache of its children.
pub struct MemDentry {
    name: String,
    parent: Weak<MemDentry>,
    inode: Arc<dyn VfsInode>,
    children: Mutex<BTreeMap<String, Arc<MemDentry>>>,
    /// Strong anchor for the mounted instance. Nodes only hold a weak
    /// back-reference to the superblock, so the live dentry tree is what
    /// keeps the instance alive for the duration of the mount.
    sb: Arc<dyn VfsSuperBlock>,
}

impl MemDentry {
    /// The root entry of a freshly mounted instance.
    pub fn root(inode: Arc<dyn VfsInode>, sb: Arc<dyn VfsSuperBlock>) -> Arc<Self> {
        Arc::new(Self {
            name: "/".to_string(),
            parent: Weak::new(),
            inode,
            children: Mutex::new(BTreeMap::new()),
            sb,
        })
    }
}

impl VfsDentry for MemDentry {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn inode(&self) -> Arc<dyn VfsInode> {
        self.inode.clone()
    }

    fn parent(&self) -> Option<Arc<dyn VfsDentry>> {
        self.parent
            .upgrade()
            .map(|parent| parent as Arc<dyn VfsDentry>)
    }

    fn find(&self, name: &str) -> Option<Arc<dyn VfsDentry>> {
        self.children
            .lock()
            .get(name)
            .cloned()
            .map(|child| child as Arc<dyn VfsDentry>)
    }

    fn insert(
        self: Arc<Self>,
        name: &str,
        inode: Arc<dyn VfsInode>,
    ) -> VfsResult<Arc<dyn VfsDentry>> {
        let child = Arc::new(MemDentry {
            name: name.to_string(),
            parent: Arc::downgrade(&self),
            inode,
            children: Mutex::new(BTreeMap::new()),
            sb: self.sb.clone(),
        });
        self.children.lock().insert(name.to_string(), child.clone());
        Ok(child as Arc<dyn VfsDentry>)
    }

    fn remove(&self, name: &str) -> Option<Arc<dyn VfsDentry>> {
        self.children
            .lock()
            .remove(name)
            .map(|child| child as Arc<dyn VfsDentry>)
    }
}
