use onlyerror::Error;

/// Errors surfaced through the dispatch contract.
///
/// Every failure is detected at its origin and returned immediately; no
/// entry point retries and none leaves partial state behind.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VfsError {
    /// no space left on device
    NoSpace,
    /// file exists
    Exist,
    /// no such file or directory
    NoEntry,
    /// not a directory
    NotDir,
    /// invalid argument
    Invalid,
    /// operation not supported
    NoSys,
}

pub type VfsResult<T> = Result<T, VfsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_read_like_the_errno_strings() {
        assert_eq!(format!("{}", VfsError::NoSpace), "no space left on device");
        assert_eq!(format!("{}", VfsError::Exist), "file exists");
    }
}
