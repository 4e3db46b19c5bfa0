//! Per-iteration sample sinks.
//!
//! The inference loop hands each recorded `Y` and `Z` to a [`SampleSink`].
//! Recording is best-effort: a failing sink is logged and counted by the
//! loop, never fatal.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use ibp_noisyor_core::BinaryMatrix;
use serde::{Deserialize, Serialize};

/// Which latent matrix a recorded sample is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixKind {
    /// Feature images `Y` (K×D).
    Images,
    /// Feature ownership `Z` (N×K).
    Ownership,
}

/// Receives the latent matrices of recorded iterations.
pub trait SampleSink {
    /// Record one matrix of iteration `iteration`.
    fn record(&mut self, kind: MatrixKind, iteration: usize, matrix: &BinaryMatrix) -> io::Result<()>;

    /// Flush buffered output. Called once at the end of a run.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Discards every sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SampleSink for NullSink {
    fn record(&mut self, _: MatrixKind, _: usize, _: &BinaryMatrix) -> io::Result<()> {
        Ok(())
    }
}

/// Keeps every sample in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Recorded samples in arrival order.
    pub samples: Vec<(MatrixKind, usize, BinaryMatrix)>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded matrices of one kind, in arrival order.
    pub fn of_kind(&self, kind: MatrixKind) -> impl Iterator<Item = &BinaryMatrix> {
        self.samples
            .iter()
            .filter(move |(k, _, _)| *k == kind)
            .map(|(_, _, m)| m)
    }
}

impl SampleSink for MemorySink {
    fn record(&mut self, kind: MatrixKind, iteration: usize, matrix: &BinaryMatrix) -> io::Result<()> {
        self.samples.push((kind, iteration, matrix.clone()));
        Ok(())
    }
}

/// Writes each matrix as one line: `ncols,v00,v01,...,v10,...` in row-major order.
///
/// An empty matrix is written as its column count alone.
#[derive(Debug)]
pub struct RowMajorWriter<W: Write> {
    out: W,
}

impl RowMajorWriter<BufWriter<File>> {
    /// Create (or truncate) a file and write samples to it.
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> RowMajorWriter<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write one matrix line.
    pub fn write_matrix(&mut self, matrix: &BinaryMatrix) -> io::Result<()> {
        write!(self.out, "{}", matrix.ncols())?;
        for row in matrix.row_iter() {
            for value in row.iter() {
                write!(self.out, ",{}", value)?;
            }
        }
        writeln!(self.out)
    }
}

impl<W: Write> SampleSink for RowMajorWriter<W> {
    fn record(&mut self, _: MatrixKind, _: usize, matrix: &BinaryMatrix) -> io::Result<()> {
        self.write_matrix(matrix)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_line() {
        let mut writer = RowMajorWriter::new(Vec::new());
        let m = BinaryMatrix::from_row_slice(2, 3, &[1, 0, 1, 0, 1, 1]);
        writer.record(MatrixKind::Images, 0, &m).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text, "3,1,0,1,0,1,1\n");
    }

    #[test]
    fn test_empty_matrix_line() {
        let mut writer = RowMajorWriter::new(Vec::new());
        writer.write_matrix(&BinaryMatrix::zeros(0, 4)).unwrap();
        writer.write_matrix(&BinaryMatrix::zeros(3, 0)).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text, "4\n0\n");
    }

    #[test]
    fn test_memory_sink_filters_by_kind() {
        let mut sink = MemorySink::new();
        let y = BinaryMatrix::zeros(1, 2);
        let z = BinaryMatrix::from_element(3, 1, 1);
        sink.record(MatrixKind::Images, 0, &y).unwrap();
        sink.record(MatrixKind::Ownership, 0, &z).unwrap();
        sink.record(MatrixKind::Images, 1, &y).unwrap();
        assert_eq!(sink.of_kind(MatrixKind::Images).count(), 2);
        assert_eq!(sink.of_kind(MatrixKind::Ownership).next(), Some(&z));
    }
}
