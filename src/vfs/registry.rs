//! Process-wide filesystem-type registration.
//!
//! One record per registered type, each carrying the list of instances
//! mounted from it. Unregistering a type tears down every instance still
//! mounted before the record disappears.

use alloc::{collections::BTreeMap, string::String, sync::Arc, vec::Vec};
use log::info;
use spin::Mutex;

use super::{
    dentry::VfsDentry, fstype::VfsFsType, inode::VfsInode, superblock::VfsSuperBlock, VfsError,
    VfsResult,
};

struct RegisteredFs {
    fs: Arc<dyn VfsFsType>,
    mounts: Mutex<Vec<MountedFs>>,
}

/// A live mount: the instance and its root entry.
struct MountedFs {
    sb: Arc<dyn VfsSuperBlock>,
    root: Arc<dyn VfsDentry>,
}

static FILESYSTEMS: Mutex<BTreeMap<String, Arc<RegisteredFs>>> = Mutex::new(BTreeMap::new());

/// Register `fs` under its reported name.
///
/// A second registration of the same name fails with [`VfsError::Exist`]
/// and leaves the first untouched.
pub fn register_filesystem(fs: Arc<dyn VfsFsType>) -> VfsResult<()> {
    let name = fs.fs_name();
    let mut table = FILESYSTEMS.lock();
    if table.contains_key(&name) {
        return Err(VfsError::Exist);
    }
    table.insert(
        name.clone(),
        Arc::new(RegisteredFs {
            fs,
            mounts: Mutex::new(Vec::new()),
        }),
    );
    info!("registered filesystem type {}", name);
    Ok(())
}

/// Unregister the type named `name`, tearing down every instance still
/// mounted from it.
pub fn unregister_filesystem(name: &str) -> VfsResult<()> {
    let reg = FILESYSTEMS.lock().remove(name).ok_or(VfsError::NoEntry)?;
    let mounts = core::mem::take(&mut *reg.mounts.lock());
    for mount in mounts {
        reg.fs.kill_sb(mount.sb)?;
    }
    info!("unregistered filesystem type {}", name);
    Ok(())
}

/// Mount a new instance of the type named `name` and return its root entry.
pub fn mount(
    name: &str,
    flags: u32,
    dev: Option<Arc<dyn VfsInode>>,
    data: &[u8],
) -> VfsResult<Arc<dyn VfsDentry>> {
    let reg = FILESYSTEMS
        .lock()
        .get(name)
        .cloned()
        .ok_or(VfsError::NoEntry)?;
    let root = reg.fs.clone().mount(flags, "/", dev, data)?;
    let sb = root.inode().get_super_block()?;
    reg.mounts.lock().push(MountedFs {
        sb,
        root: root.clone(),
    });
    Ok(root)
}

/// Unmount the instance rooted at `root`.
pub fn umount(root: &Arc<dyn VfsDentry>) -> VfsResult<()> {
    let reg = FILESYSTEMS
        .lock()
        .values()
        .find(|reg| {
            reg.mounts
                .lock()
                .iter()
                .any(|mount| Arc::ptr_eq(&mount.root, root))
        })
        .cloned()
        .ok_or(VfsError::NoEntry)?;
    let mount = {
        let mut mounts = reg.mounts.lock();
        let index = mounts
            .iter()
            .position(|mount| Arc::ptr_eq(&mount.root, root))
            .ok_or(VfsError::NoEntry)?;
        mounts.remove(index)
    };
    reg.fs.kill_sb(mount.sb)
}
