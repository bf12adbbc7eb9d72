//! SHA-256 fingerprint of the mapping file, logged before upload so a
//! server-side mapping can be matched to the local artifact.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Size and digest of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub len: u64,
    /// Lowercase hex SHA-256.
    pub sha256: String,
}

/// Hash a file in fixed-size chunks. Mapping files for large apps run to
/// tens of megabytes, so the whole file is never held in memory here.
pub fn fingerprint(path: &Path) -> Result<Fingerprint> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BUF_SIZE];
    let mut len = 0u64;
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        len += n as u64;
        hasher.update(&buf[..n]);
    }
    Ok(Fingerprint {
        len,
        sha256: hex::encode(hasher.finalize()),
    })
}
