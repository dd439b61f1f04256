//! Value types shared across the dispatch surface.

use alloc::string::String;
use bitflags::bitflags;

/// Kind of a filesystem node. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VfsNodeType {
    Dir,
    File,
}

impl VfsNodeType {
    /// File-type bits of the `st_mode` word.
    pub const fn type_bits(self) -> u32 {
        match self {
            VfsNodeType::Dir => 0o040000,
            VfsNodeType::File => 0o100000,
        }
    }
}

bitflags! {
    /// Permission bits of a node, the lower nine mode bits.
    pub struct VfsNodePerm: u16 {
        const OWNER_READ = 0o400;
        const OWNER_WRITE = 0o200;
        const OWNER_EXEC = 0o100;
        const GROUP_READ = 0o40;
        const GROUP_WRITE = 0o20;
        const GROUP_EXEC = 0o10;
        const OTHER_READ = 0o4;
        const OTHER_WRITE = 0o2;
        const OTHER_EXEC = 0o1;
    }
}

/// Full `st_mode` word, file-type bits plus permission bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VfsInodeMode(u32);

impl VfsInodeMode {
    pub fn from(perm: VfsNodePerm, ty: VfsNodeType) -> Self {
        Self(ty.type_bits() | perm.bits() as u32)
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

/// A point on the instance clock.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VfsTimeSpec {
    pub sec: u64,
    pub nsec: u64,
}

impl VfsTimeSpec {
    pub const fn new(sec: u64, nsec: u64) -> Self {
        Self { sec, nsec }
    }
}

/// One directory entry as reported by `readdir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfsDirEntry {
    pub ino: u64,
    pub ty: VfsNodeType,
    pub name: String,
}

/// Node attributes reported by `get_attr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VfsFileStat {
    pub st_ino: u64,
    pub st_mode: u32,
    pub st_nlink: u32,
    pub st_uid: u32,
    pub st_gid: u32,
    pub st_size: u64,
    pub st_blksize: u32,
    /// Resident block usage in 512-byte units.
    pub st_blocks: u64,
    pub st_atime: VfsTimeSpec,
    pub st_mtime: VfsTimeSpec,
    pub st_ctime: VfsTimeSpec,
}

/// Instance statistics reported by `stat_fs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VfsFsStat {
    pub f_type: i64,
    pub f_bsize: i64,
    pub f_blocks: u64,
    pub f_bfree: u64,
    pub f_bavail: u64,
    pub f_files: u64,
    pub f_ffree: u64,
    pub f_namelen: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_word_composition() {
        let file = VfsInodeMode::from(VfsNodePerm::from_bits_truncate(0o644), VfsNodeType::File);
        assert_eq!(file.bits(), 0o100644);

        let dir = VfsInodeMode::from(VfsNodePerm::from_bits_truncate(0o755), VfsNodeType::Dir);
        assert_eq!(dir.bits(), 0o040755);
    }

    #[test]
    fn timespec_ordering_follows_seconds() {
        assert!(VfsTimeSpec::new(2, 0) > VfsTimeSpec::new(1, 999));
        assert!(VfsTimeSpec::new(1, 1) > VfsTimeSpec::new(1, 0));
    }
}
