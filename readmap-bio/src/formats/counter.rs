use super::{detect_format, open_reads, SequenceFormat};
use noodles::{fasta, fastq};
use readmap_core::{ReadmapError, ReadmapResult};
use std::io::{self, BufRead};
use std::path::Path;

/// Count the records in a FASTA or FASTQ file
///
/// The format is detected from content. An empty file holds zero records; a
/// file that does not parse under the detected format is a `Format` error.
pub fn count_records<P: AsRef<Path>>(path: P) -> ReadmapResult<u64> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let reader = open_reads(path)?;

    let counted = match format {
        SequenceFormat::Fasta => count_fasta(reader),
        SequenceFormat::Fastq => count_fastq(reader),
    };

    counted.map_err(|(index, e)| {
        ReadmapError::Format(format!(
            "{}: invalid {} record {}: {}",
            path.display(),
            format,
            index + 1,
            e
        ))
    })
}

fn count_fasta(reader: Box<dyn BufRead>) -> Result<u64, (u64, io::Error)> {
    let mut reader = fasta::io::Reader::new(reader);
    let mut count = 0;
    for result in reader.records() {
        result.map_err(|e| (count, e))?;
        count += 1;
    }
    Ok(count)
}

fn count_fastq(reader: Box<dyn BufRead>) -> Result<u64, (u64, io::Error)> {
    let mut reader = fastq::io::Reader::new(reader);
    let mut count = 0;
    for result in reader.records() {
        let record = result.map_err(|e| (count, e))?;

        // The reader does not pair qualities with bases
        let bases = record.sequence().len();
        let qualities = record.quality_scores().len();
        if bases != qualities {
            let name = record.name().to_vec();
            let message = format!(
                "{}: {} bases but {} quality scores",
                String::from_utf8_lossy(&name),
                bases,
                qualities
            );
            return Err((count, io::Error::new(io::ErrorKind::InvalidData, message)));
        }

        count += 1;
    }
    Ok(count)
}
