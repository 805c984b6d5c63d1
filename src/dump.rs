//! Streaming reader over a MediaWiki XML dump.
//!
//! [`DumpIterator`] walks the dump with a pull-based XML reader rather than
//! building a DOM, so memory use stays flat regardless of dump size. A
//! `.bz2`-suffixed path is transparently decompressed on the fly through
//! the same streaming decoder the rest of this codebase's ancestor uses for
//! its compressed article database.

use bzip2_rs::DecoderReader;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// A page's title and the raw (still entity-encoded) wikitext of its most
/// recently read revision.
#[derive(Debug)]
pub(crate) struct DumpPage {
    pub(crate) title: String,
    pub(crate) wikitext: String,
}

/// Errors surfaced while reading a dump.
#[derive(Debug, thiserror::Error)]
pub(crate) enum DumpError {
    /// The dump file could not be opened or read.
    #[error("could not read dump file: {0}")]
    Io(#[from] io::Error),
    /// The dump is not well-formed XML.
    #[error("malformed dump XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// A text node was not valid UTF-8.
    #[error("dump contains non-UTF-8 text: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Which leaf element, if any, the reader is currently accumulating text
/// for.
#[derive(Clone, Copy, Eq, PartialEq)]
enum Capturing {
    None,
    Title,
    Text,
}

/// Streams `(title, wikitext)` pairs out of a MediaWiki export XML document.
pub(crate) struct DumpIterator {
    reader: Reader<BufReader<Box<dyn Read>>>,
    buf: Vec<u8>,
    depth: u32,
}

impl DumpIterator {
    /// Opens `path`, transparently decompressing it if its extension is
    /// `.bz2`.
    pub(crate) fn open(path: &Path) -> Result<Self, DumpError> {
        let file = File::open(path)?;
        let source: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "bz2") {
            Box::new(DecoderReader::new(file))
        } else {
            Box::new(file)
        };

        let mut reader = Reader::from_reader(BufReader::new(source));
        reader.config_mut().check_end_names = false;

        Ok(Self {
            reader,
            buf: Vec::new(),
            depth: 0,
        })
    }

    /// Reads and returns the next page with both a title and revision text,
    /// skipping any page that closes without one (this should not happen in
    /// a well-formed dump, but the reader does not assume it).
    pub(crate) fn next_page(&mut self) -> Result<Option<DumpPage>, DumpError> {
        let mut title = None;
        let mut wikitext = None;
        let mut capturing = Capturing::None;

        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Eof => return Ok(None),
                Event::Start(start) => {
                    self.depth += 1;
                    match (self.depth, start.local_name().as_ref()) {
                        (2, b"page") => {
                            title = None;
                            wikitext = None;
                        }
                        (3, b"title") => capturing = Capturing::Title,
                        (4, b"text") => capturing = Capturing::Text,
                        _ => {}
                    }
                }
                Event::Empty(start) => {
                    // A self-closing element can't carry text; if it's the
                    // title or text element, it contributes an empty string.
                    self.depth += 1;
                    match (self.depth, start.local_name().as_ref()) {
                        (3, b"title") => title = Some(String::new()),
                        (4, b"text") => wikitext = Some(String::new()),
                        _ => {}
                    }
                    self.depth -= 1;
                }
                Event::Text(text) => match capturing {
                    Capturing::Title => {
                        title = Some(String::from_utf8(text.into_inner().into_owned())?);
                    }
                    Capturing::Text => {
                        wikitext = Some(String::from_utf8(text.into_inner().into_owned())?);
                    }
                    Capturing::None => {}
                },
                Event::End(end) => {
                    let depth = self.depth;
                    let name = end.local_name();
                    if (depth == 3 && name.as_ref() == b"title")
                        || (depth == 4 && name.as_ref() == b"text")
                    {
                        capturing = Capturing::None;
                    }
                    let page_closed = depth == 2 && name.as_ref() == b"page";
                    self.depth -= 1;
                    if page_closed {
                        if let (Some(title), Some(wikitext)) = (title.take(), wikitext.take()) {
                            return Ok(Some(DumpPage { title, wikitext }));
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

impl Iterator for DumpIterator {
    type Item = Result<DumpPage, DumpError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_page().transpose()
    }
}
