//! Provides the `Sources` iterator, which opens the input files one at a time,
//! in command line order. Each file is opened only when the iterator reaches
//! it, and is closed when the `Source` for it is dropped, so at most one input
//! file is open at any moment.
use anyhow::{Context, Result};
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};
use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

/// An iterator over the input files named on the command line. Each item is
/// either an open `Source` or the error we got trying to open it.
pub struct Sources {
    paths: std::vec::IntoIter<PathBuf>,
}

impl From<Vec<PathBuf>> for Sources {
    fn from(paths: Vec<PathBuf>) -> Self {
        Sources { paths: paths.into_iter() }
    }
}

impl Iterator for Sources {
    type Item = Result<Source<File>>;
    fn next(&mut self) -> Option<Self::Item> {
        self.paths.next().map(|path| open(&path))
    }
}

// The name is the path's display form. A non-UTF-8 path is named lossily,
// with U+FFFD standing in for the bytes that don't decode.
fn open(path: &Path) -> Result<Source<File>> {
    let file = File::open(path).with_context(|| format!("can't open {}", path.display()))?;
    Ok(Source::new(path.display().to_string(), file))
}

/// `Source` is the `Item` type for the `Sources` iterator: the display form of
/// the file's path (which identifies it in the report) and a line-oriented
/// reader for its contents.
pub struct Source<T: Read> {
    name: String,
    reader: BufReader<DecodeReaderBytes<T, Vec<u8>>>,
}

impl<T: Read> Source<T> {
    /// Wraps `input` in a buffered reader that translates UTF-16 (detected by
    /// its Byte Order Mark) to UTF-8, strips any Byte Order Mark, and passes
    /// everything else through untouched.
    pub fn new(name: String, input: T) -> Self {
        // This double-buffers: `DecodeReaderBytes` keeps its own buffer inside
        // the `BufReader`.
        let reader = BufReader::with_capacity(
            32 * 1024,
            DecodeReaderBytesBuilder::new()
                .bom_sniffing(true)
                .strip_bom(true)
                .utf8_passthru(true)
                .build(input),
        );
        Source { name, reader }
    }

    /// The name used for this source in the report
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gives up the name, keeping the reader
    #[must_use]
    pub fn into_reader(self) -> BufReader<DecodeReaderBytes<T, Vec<u8>>> {
        self.reader
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use bstr::io::BufReadExt;

    const UTF8_BOM: &str = "\u{FEFF}";

    fn lines_of<T: Read>(source: Source<T>) -> Vec<Vec<u8>> {
        source.into_reader().byte_lines().map(|line| line.unwrap()).collect()
    }

    fn to_utf_16le(source: &str) -> Vec<u8> {
        let mut result = b"\xff\xfe".to_vec();
        for b in source.as_bytes().iter() {
            result.push(*b);
            result.push(0);
        }
        result
    }

    fn to_utf_16be(source: &str) -> Vec<u8> {
        let mut result = b"\xfe\xff".to_vec();
        for b in source.as_bytes().iter() {
            result.push(0);
            result.push(*b);
        }
        result
    }

    const TEXT: &str = "The cute red crab\n jumps over the lazy blue gopher\n";
    fn expected() -> Vec<Vec<u8>> {
        vec![b"The cute red crab".to_vec(), b" jumps over the lazy blue gopher".to_vec()]
    }

    #[test]
    fn utf_16le_is_translated_to_utf8() {
        let encoded = to_utf_16le(TEXT);
        let source = Source::new("le".into(), &encoded[..]);
        assert_eq!(lines_of(source), expected());
    }

    #[test]
    fn utf_16be_is_translated_to_utf8() {
        let encoded = to_utf_16be(TEXT);
        let source = Source::new("be".into(), &encoded[..]);
        assert_eq!(lines_of(source), expected());
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let with_bom = UTF8_BOM.to_string() + TEXT;
        let source = Source::new("bom".into(), with_bom.as_bytes());
        assert_eq!(lines_of(source), expected());
    }

    #[test]
    fn invalid_utf8_passes_through() {
        let source = Source::new("raw".into(), &b"caf\xe9\nok\n"[..]);
        assert_eq!(lines_of(source), vec![b"caf\xe9".to_vec(), b"ok".to_vec()]);
    }

    #[test]
    fn open_failure_names_the_path() {
        let mut sources = Sources::from(vec![PathBuf::from("no/such/dir/nothing.txt")]);
        let err = match sources.next() {
            Some(Err(e)) => e,
            _ => panic!("expected an open error"),
        };
        assert!(format!("{err:#}").contains("nothing.txt"));
        assert!(sources.next().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn a_non_utf8_path_opens_and_is_named_lossily() {
        use assert_fs::TempDir;
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let temp = TempDir::new().unwrap();
        let path = temp.path().join(OsStr::from_bytes(b"caf\xe9.txt"));
        std::fs::write(&path, "x\n").unwrap();
        let source = Sources::from(vec![path]).next().unwrap().unwrap();
        assert!(source.name().ends_with("caf\u{FFFD}.txt"), "{}", source.name());
    }
}
