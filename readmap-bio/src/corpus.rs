//! Read corpus normalization
//!
//! bwa maps a single reads file (plus an optional mates file). A corpus given
//! as a directory of read files is flattened into one file first.

use crate::formats::{count_records, detect_format, open_reads, SequenceFormat};
use readmap_core::{ReadmapError, ReadmapResult};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Extensions accepted as read files, optionally followed by `.gz`
const READ_EXTENSIONS: &[&str] = &["fastq", "fq", "fasta", "fa", "fna"];

/// A reads input ready to be handed to bwa
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedReads {
    /// File bwa should read
    pub path: PathBuf,
    /// Number of records in `path`
    pub records: u64,
    pub format: SequenceFormat,
    /// Files that contributed to `path`, in order
    pub sources: Vec<PathBuf>,
}

/// Turns a reads input (file or directory) into a single reads file
pub trait ReadCorpusNormalizer {
    /// Normalize `input`, writing to `destination` if a new file is needed
    fn normalize(&self, input: &Path, destination: &Path) -> ReadmapResult<NormalizedReads>;
}

/// Concatenates every read file of a directory, in name order
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcatenatingNormalizer;

impl ConcatenatingNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Read files of `dir`, sorted by file name
    fn collect_read_files(dir: &Path) -> ReadmapResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            match classify_name(&path) {
                FileKind::Reads => files.push(path),
                FileKind::Sff => {
                    tracing::warn!(
                        "Skipping {}: SFF input is not supported, convert it to FASTQ first",
                        path.display()
                    );
                }
                FileKind::Other => {
                    tracing::debug!("Ignoring {}", path.display());
                }
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    fn concatenate(
        &self,
        dir: &Path,
        sources: Vec<PathBuf>,
        destination: &Path,
    ) -> ReadmapResult<NormalizedReads> {
        let mut format: Option<(SequenceFormat, &Path)> = None;
        let mut records = 0;

        for source in &sources {
            let detected = detect_format(source)?;
            match format {
                Some((expected, first)) if expected != detected => {
                    return Err(ReadmapError::Format(format!(
                        "{} mixes formats: {} is {} but {} is {}",
                        dir.display(),
                        first.display(),
                        expected,
                        source.display(),
                        detected
                    )));
                }
                Some(_) => {}
                None => format = Some((detected, source.as_path())),
            }
            records += count_records(source)?;
        }

        // A non-empty `sources` always sets the format
        let format = format.map(|(f, _)| f).unwrap_or(SequenceFormat::Fastq);

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(destination)?);
        for source in &sources {
            tracing::debug!("Appending {} to {}", source.display(), destination.display());
            append(&mut writer, open_reads(source)?)?;
        }
        writer.flush()?;

        tracing::info!(
            "Concatenated {} files ({} records) into {}",
            sources.len(),
            records,
            destination.display()
        );

        Ok(NormalizedReads {
            path: destination.to_path_buf(),
            records,
            format,
            sources,
        })
    }
}

impl ReadCorpusNormalizer for ConcatenatingNormalizer {
    fn normalize(&self, input: &Path, destination: &Path) -> ReadmapResult<NormalizedReads> {
        if input.is_file() {
            return Ok(NormalizedReads {
                path: input.to_path_buf(),
                records: count_records(input)?,
                format: detect_format(input)?,
                sources: vec![input.to_path_buf()],
            });
        }

        if !input.is_dir() {
            return Err(ReadmapError::Validation(format!(
                "{} is not a valid directory",
                input.display()
            )));
        }

        let mut sources = Self::collect_read_files(input)?;

        // A previous run may have left its output among the inputs
        sources.retain(|source| {
            let stale = same_file(source, destination);
            if stale {
                tracing::debug!("Skipping {}: it is the output file", source.display());
            }
            !stale
        });

        if sources.is_empty() {
            return Err(ReadmapError::Validation(format!(
                "{} contains no FASTA or FASTQ files",
                input.display()
            )));
        }

        self.concatenate(input, sources, destination)
    }
}

enum FileKind {
    Reads,
    Sff,
    Other,
}

fn classify_name(path: &Path) -> FileKind {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.to_ascii_lowercase(),
        None => return FileKind::Other,
    };
    let stem = name.strip_suffix(".gz").unwrap_or(&name);
    let extension = stem.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");

    if extension == "sff" {
        FileKind::Sff
    } else if READ_EXTENSIONS.contains(&extension) {
        FileKind::Reads
    } else {
        FileKind::Other
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Copy a whole reader, making sure the output ends on a line boundary
fn append<W: Write>(writer: &mut W, mut reader: Box<dyn BufRead>) -> ReadmapResult<()> {
    let mut last = None;
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        writer.write_all(buf)?;
        last = buf.last().copied();
        let len = buf.len();
        reader.consume(len);
    }
    if matches!(last, Some(byte) if byte != b'\n') {
        writer.write_all(b"\n")?;
    }
    Ok(())
}
