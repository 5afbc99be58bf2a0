//! Opening plain and gzip-compressed read files

use flate2::read::MultiGzDecoder;
use readmap_core::ReadmapResult;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Whether a file starts with the gzip magic bytes
pub fn is_gzipped<P: AsRef<Path>>(path: P) -> ReadmapResult<bool> {
    let mut header = [0u8; 2];
    let mut file = File::open(path.as_ref())?;
    let mut filled = 0;
    while filled < header.len() {
        match file.read(&mut header[filled..])? {
            0 => return Ok(false),
            n => filled += n,
        }
    }
    Ok(header == GZIP_MAGIC)
}

/// Open a read file for buffered reading, decompressing gzip input
///
/// Multi-member gzip streams (as produced by `cat a.gz b.gz`) are read in full.
pub fn open_reads<P: AsRef<Path>>(path: P) -> ReadmapResult<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    if is_gzipped(path)? {
        tracing::trace!("Reading {} as gzip", path.display());
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
