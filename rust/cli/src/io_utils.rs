//! File helpers shared by commands: compressed text reads, parent directory
//! creation, and the hand-record writer.
//!
//! Paths ending in `.zst` are Zstandard-compressed on both read and write.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Read text file with automatic .zst decompression detection.
///
/// A UTF-8 byte order mark at the start is dropped.
///
/// ```rust,no_run
/// # use holdem_cli::io_utils::read_text_auto;
/// let content = read_text_auto("hands.jsonl").unwrap();
/// let compressed = read_text_auto("hands.jsonl.zst").unwrap();
/// ```
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::stream::decode_all(comp.as_slice()).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Ensure parent directory exists for given path, creating if needed.
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}

/// Output sink for JSONL records, plain or zstd-compressed by extension.
/// Call [`RecordWriter::finish`] to complete the compressed frame.
pub enum RecordWriter {
    Plain(BufWriter<File>),
    Zstd(zstd::stream::write::Encoder<'static, File>),
}

impl RecordWriter {
    /// Creates (truncating) `path` and any missing parent directories.
    pub fn create(path: &Path) -> std::io::Result<Self> {
        ensure_parent_dir(path).map_err(std::io::Error::other)?;
        let file = File::create(path)?;
        if path.extension().is_some_and(|ext| ext == "zst") {
            Ok(RecordWriter::Zstd(zstd::stream::write::Encoder::new(file, 3)?))
        } else {
            Ok(RecordWriter::Plain(BufWriter::new(file)))
        }
    }

    pub fn finish(self) -> std::io::Result<()> {
        match self {
            RecordWriter::Plain(mut w) => w.flush(),
            RecordWriter::Zstd(enc) => enc.finish().map(|_| ()),
        }
    }
}

impl Write for RecordWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            RecordWriter::Plain(w) => w.write(buf),
            RecordWriter::Zstd(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            RecordWriter::Plain(w) => w.flush(),
            RecordWriter::Zstd(w) => w.flush(),
        }
    }
}
