//! Superblock of one mounted instance.

use alloc::sync::Arc;
use core::any::Any;
use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use log::info;
use spin::Mutex;

use crate::vfs::{
    inode::VfsInode,
    superblock::VfsSuperBlock,
    utils::{VfsFsStat, VfsNodePerm, VfsNodeType, VfsTimeSpec},
    VfsError, VfsResult,
};

use super::{inode::MemInode, MEMFS_BLOCK_SIZE, MEMFS_MAGIC, MEMFS_MAX_FILE_SIZE};

/// Inode number of the root directory.
const ROOT_INO: u64 = 1;

/// Per-instance counter block.
///
/// Shared between the superblock and every node of the instance. Nodes hold
/// it strongly, so live-node accounting stays correct down to the last drop
/// without a reference back into the superblock itself.
pub(super) struct InstanceCounters {
    /// Next inode number; identities are never reused within the instance.
    next_ino: AtomicU64,
    /// Nodes currently alive, root included.
    live_nodes: AtomicU64,
    /// Logical clock, one tick per queried instant.
    clock: AtomicU64,
}

impl InstanceCounters {
    fn new() -> Self {
        Self {
            next_ino: AtomicU64::new(ROOT_INO),
            live_nodes: AtomicU64::new(0),
            clock: AtomicU64::new(1),
        }
    }

    pub(super) fn alloc_ino(&self) -> u64 {
        self.next_ino.fetch_add(1, Ordering::SeqCst)
    }

    /// The current instant. Ticks on every query, so successive instants
    /// strictly advance.
    pub(super) fn now(&self) -> VfsTimeSpec {
        VfsTimeSpec::new(self.clock.fetch_add(1, Ordering::SeqCst), 0)
    }

    /// Reserve one node slot against `max`. The reservation is released by
    /// the node's drop.
    pub(super) fn try_reserve(&self, max: u64) -> bool {
        let live = self.live_nodes.fetch_add(1, Ordering::SeqCst);
        if live >= max {
            self.live_nodes.fetch_sub(1, Ordering::SeqCst);
            return false;
        }
        true
    }

    pub(super) fn node_dropped(&self) {
        self.live_nodes.fetch_sub(1, Ordering::SeqCst);
    }

    fn live(&self) -> u64 {
        self.live_nodes.load(Ordering::SeqCst)
    }
}

/// One mounted in-memory filesystem instance.
pub struct MemSuperBlock {
    block_size: u64,
    max_bytes: u64,
    magic: u32,
    /// Largest number of live nodes the instance may hold, root included.
    max_inodes: u64,
    counters: Arc<InstanceCounters>,
    /// Cleared by teardown; a dead instance refuses node allocation.
    alive: AtomicBool,
    /// Root anchor, set once mount has built the root node.
    root: Mutex<Option<Arc<MemInode>>>,
}

impl MemSuperBlock {
    pub(super) fn new(max_inodes: u64) -> Arc<Self> {
        Arc::new(Self {
            block_size: MEMFS_BLOCK_SIZE,
            max_bytes: MEMFS_MAX_FILE_SIZE,
            magic: MEMFS_MAGIC,
            max_inodes,
            counters: Arc::new(InstanceCounters::new()),
            alive: AtomicBool::new(true),
            root: Mutex::new(None),
        })
    }

    /// Create the root directory node and anchor it. The instance is not
    /// considered mounted until this has succeeded.
    pub(super) fn setup_root(self: &Arc<Self>) -> VfsResult<Arc<MemInode>> {
        let root = MemInode::alloc(
            self,
            None,
            VfsNodeType::Dir,
            VfsNodePerm::from_bits_truncate(0o755),
        )?;
        *self.root.lock() = Some(root.clone());
        Ok(root)
    }

    /// Nodes currently alive on this instance.
    pub fn live_inodes(&self) -> u64 {
        self.counters.live()
    }

    pub(super) fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    pub(super) fn counters(&self) -> &Arc<InstanceCounters> {
        &self.counters
    }

    pub(super) fn max_inodes(&self) -> u64 {
        self.max_inodes
    }

    pub(super) fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub(super) fn now(&self) -> VfsTimeSpec {
        self.counters.now()
    }

    /// Tear the instance down: mark it dead and drop the root anchor,
    /// releasing the node tree. Nodes still referenced from outside stay
    /// alive until their last holder lets go.
    pub(super) fn shutdown(&self) {
        self.alive.store(false, Ordering::SeqCst);
        self.root.lock().take();
    }
}

impl VfsSuperBlock for MemSuperBlock {
    fn sync_fs(&self, _wait: bool) -> VfsResult<()> {
        // Content already lives in memory; nothing to write back.
        Ok(())
    }

    fn stat_fs(&self) -> VfsResult<VfsFsStat> {
        // Block counts stay zero, the way the generic statfs helper reports
        // memory-backed filesystems.
        let (files, ffree) = if self.max_inodes == u64::MAX {
            (0, 0)
        } else {
            (
                self.max_inodes,
                self.max_inodes.saturating_sub(self.live_inodes()),
            )
        };
        Ok(VfsFsStat {
            f_type: self.magic as i64,
            f_bsize: self.block_size as i64,
            f_blocks: 0,
            f_bfree: 0,
            f_bavail: 0,
            f_files: files,
            f_ffree: ffree,
            f_namelen: 255,
        })
    }

    fn root_inode(&self) -> VfsResult<Arc<dyn VfsInode>> {
        self.root
            .lock()
            .clone()
            .map(|root| root as Arc<dyn VfsInode>)
            .ok_or(VfsError::Invalid)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for MemSuperBlock {
    fn drop(&mut self) {
        info!("memfs: instance released");
    }
}
