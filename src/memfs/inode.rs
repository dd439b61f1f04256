//! Node construction and the per-kind operation surface.

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    sync::{Arc, Weak},
};
use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use log::debug;
use spin::Mutex;

use crate::vfs::{
    cache::{PageCache, PAGE_SHIFT},
    inode::{VfsFile, VfsInode},
    superblock::VfsSuperBlock,
    utils::{VfsDirEntry, VfsFileStat, VfsInodeMode, VfsNodePerm, VfsNodeType, VfsTimeSpec},
    VfsError, VfsResult,
};

use super::superblock::{InstanceCounters, MemSuperBlock};
use super::MEMFS_BLOCK_SIZE;

/// Kind-specific state. The variant is fixed at construction and dispatch
/// is a `match` on it.
enum NodeBody {
    /// Sibling entries of a directory. Structural mutations serialize on
    /// this lock.
    Dir(Mutex<BTreeMap<String, Arc<MemInode>>>),
    File,
}

struct Timestamps {
    atime: VfsTimeSpec,
    mtime: VfsTimeSpec,
    ctime: VfsTimeSpec,
}

/// One in-memory filesystem node.
pub struct MemInode {
    ino: u64,
    body: NodeBody,
    uid: u32,
    gid: u32,
    perm: VfsNodePerm,
    nlink: AtomicU32,
    size: AtomicU64,
    times: Mutex<Timestamps>,
    /// Content backing store, bound for every kind so the generic paths can
    /// map pages no matter what the node is.
    data: PageCache,
    sb: Weak<MemSuperBlock>,
    counters: Arc<InstanceCounters>,
}

impl MemInode {
    /// Node factory: allocate and initialize a node of `ty`.
    ///
    /// Ownership inherits from `parent`; the parentless root case gets
    /// administrator ownership. Construction is atomic: on failure nothing
    /// is allocated and no identity is consumed.
    pub(super) fn alloc(
        sb: &Arc<MemSuperBlock>,
        parent: Option<&MemInode>,
        ty: VfsNodeType,
        perm: VfsNodePerm,
    ) -> VfsResult<Arc<Self>> {
        if !sb.is_alive() {
            return Err(VfsError::Invalid);
        }
        if !sb.counters().try_reserve(sb.max_inodes()) {
            return Err(VfsError::NoSpace);
        }
        let (uid, gid) = match parent {
            Some(dir) => (dir.uid, dir.gid),
            None => (0, 0),
        };
        let (body, nlink) = match ty {
            // The extra directory link is the entry's reference to itself.
            VfsNodeType::Dir => (NodeBody::Dir(Mutex::new(BTreeMap::new())), 2),
            VfsNodeType::File => (NodeBody::File, 1),
        };
        let now = sb.now();
        Ok(Arc::new(Self {
            ino: sb.counters().alloc_ino(),
            body,
            uid,
            gid,
            perm,
            nlink: AtomicU32::new(nlink),
            size: AtomicU64::new(0),
            times: Mutex::new(Timestamps {
                atime: now,
                mtime: now,
                ctime: now,
            }),
            data: PageCache::new(),
            sb: Arc::downgrade(sb),
            counters: sb.counters().clone(),
        }))
    }

    fn now(&self) -> VfsTimeSpec {
        self.counters.now()
    }

    fn is_dir(&self) -> bool {
        matches!(self.body, NodeBody::Dir(_))
    }

    fn touch_modified(&self) {
        let now = self.now();
        let mut times = self.times.lock();
        times.mtime = now;
        times.ctime = now;
    }
}

impl Drop for MemInode {
    fn drop(&mut self) {
        self.counters.node_dropped();
    }
}

impl VfsFile for MemInode {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> VfsResult<usize> {
        if self.is_dir() {
            return Err(VfsError::NoSys);
        }
        let size = self.size.load(Ordering::SeqCst);
        if offset >= size {
            return Ok(0);
        }
        let len = (buf.len() as u64).min(size - offset) as usize;
        self.data.read_at(offset, &mut buf[..len]);
        self.times.lock().atime = self.now();
        Ok(len)
    }

    fn write_at(&self, offset: u64, buf: &[u8]) -> VfsResult<usize> {
        if self.is_dir() {
            return Err(VfsError::NoSys);
        }
        let sb = self.sb.upgrade().ok_or(VfsError::Invalid)?;
        let end = offset.checked_add(buf.len() as u64).ok_or(VfsError::Invalid)?;
        if end > sb.max_bytes() {
            return Err(VfsError::NoSpace);
        }
        let written = self.data.write_at(offset, buf);
        self.size.fetch_max(end, Ordering::SeqCst);
        self.touch_modified();
        Ok(written)
    }

    fn readdir(&self, start_index: usize) -> VfsResult<Option<VfsDirEntry>> {
        let entries = match &self.body {
            NodeBody::Dir(entries) => entries.lock(),
            NodeBody::File => return Err(VfsError::NotDir),
        };
        Ok(entries.iter().nth(start_index).map(|(name, node)| VfsDirEntry {
            ino: node.ino,
            ty: node.inode_type(),
            name: name.clone(),
        }))
    }
}

impl VfsInode for MemInode {
    fn get_super_block(&self) -> VfsResult<Arc<dyn VfsSuperBlock>> {
        self.sb
            .upgrade()
            .map(|sb| sb as Arc<dyn VfsSuperBlock>)
            .ok_or(VfsError::Invalid)
    }

    fn node_perm(&self) -> VfsNodePerm {
        self.perm
    }

    fn inode_type(&self) -> VfsNodeType {
        match self.body {
            NodeBody::Dir(_) => VfsNodeType::Dir,
            NodeBody::File => VfsNodeType::File,
        }
    }

    /// Directory-entry binder: create `name`, publish it, and advance the
    /// parent's modification instants.
    fn create(
        &self,
        name: &str,
        ty: VfsNodeType,
        perm: VfsNodePerm,
    ) -> VfsResult<Arc<dyn VfsInode>> {
        let entries = match &self.body {
            NodeBody::Dir(entries) => entries,
            NodeBody::File => return Err(VfsError::NotDir),
        };
        let sb = self.sb.upgrade().ok_or(VfsError::Invalid)?;
        let mut entries = entries.lock();
        if entries.contains_key(name) {
            return Err(VfsError::Exist);
        }
        let node = MemInode::alloc(&sb, Some(self), ty, perm)?;
        entries.insert(name.to_string(), node.clone());
        debug!("memfs: bound {} as ino {} under ino {}", name, node.ino, self.ino);
        self.touch_modified();
        Ok(node)
    }

    fn lookup(&self, name: &str) -> VfsResult<Arc<dyn VfsInode>> {
        let entries = match &self.body {
            NodeBody::Dir(entries) => entries.lock(),
            NodeBody::File => return Err(VfsError::NotDir),
        };
        entries
            .get(name)
            .cloned()
            .map(|node| node as Arc<dyn VfsInode>)
            .ok_or(VfsError::NoEntry)
    }

    fn get_attr(&self) -> VfsResult<VfsFileStat> {
        let times = self.times.lock();
        Ok(VfsFileStat {
            st_ino: self.ino,
            st_mode: VfsInodeMode::from(self.perm, self.inode_type()).bits(),
            st_nlink: self.nlink.load(Ordering::SeqCst),
            st_uid: self.uid,
            st_gid: self.gid,
            st_size: self.size.load(Ordering::SeqCst),
            st_blksize: MEMFS_BLOCK_SIZE as u32,
            // Block usage counts resident pages, in 512-byte units.
            st_blocks: self.data.nr_pages() << (PAGE_SHIFT - 9),
            st_atime: times.atime,
            st_mtime: times.mtime,
            st_ctime: times.ctime,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perm(bits: u16) -> VfsNodePerm {
        VfsNodePerm::from_bits_truncate(bits)
    }

    #[test]
    fn root_gets_administrator_ownership() {
        let sb = MemSuperBlock::new(u64::MAX);
        let root = sb.setup_root().unwrap();
        let attr = root.get_attr().unwrap();
        assert_eq!((attr.st_uid, attr.st_gid), (0, 0));
        assert_eq!(attr.st_mode, 0o040755);
        assert_eq!(attr.st_nlink, 2);
        assert_eq!(attr.st_ino, 1);
    }

    #[test]
    fn children_inherit_parent_ownership() {
        let sb = MemSuperBlock::new(u64::MAX);
        let root = sb.setup_root().unwrap();
        let file = root
            .create("owned", VfsNodeType::File, perm(0o600))
            .unwrap();
        let attr = file.get_attr().unwrap();
        assert_eq!((attr.st_uid, attr.st_gid), (0, 0));
        assert_eq!(attr.st_nlink, 1);
    }

    #[test]
    fn dead_instance_refuses_allocation() {
        let sb = MemSuperBlock::new(u64::MAX);
        let root = sb.setup_root().unwrap();
        sb.shutdown();
        assert_eq!(
            root.create("late", VfsNodeType::File, perm(0o644)).err(),
            Some(VfsError::Invalid)
        );
    }

    #[test]
    fn capacity_exhaustion_is_no_space_and_parent_untouched() {
        let sb = MemSuperBlock::new(1);
        let root = sb.setup_root().unwrap();
        let before = root.get_attr().unwrap();

        assert_eq!(
            root.create("full", VfsNodeType::File, perm(0o644)).err(),
            Some(VfsError::NoSpace)
        );
        let after = root.get_attr().unwrap();
        assert_eq!(after.st_mtime, before.st_mtime);
        assert_eq!(after.st_ctime, before.st_ctime);
        assert!(root.readdir(0).unwrap().is_none());
    }
}
