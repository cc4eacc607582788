//! Atom dialect.
//!
//! Atom documents are walked event-by-event with [`quick_xml`] instead of being
//! deserialized up front, so that a single entry with a malformed
//! `<published>` is skipped by the extractor rather than failing the whole
//! feed.  Only direct children of `<entry>` are read; nested elements such as
//! `<author><name>` or `<source><id>` are ignored.

use chrono::{DateTime, FixedOffset};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::entry::{parse_timestamp, Entry};
use crate::error::ExtractionError;

/// An Atom document whose root element has already been sniffed as `<feed>`.
#[derive(Debug, Clone)]
pub struct AtomDocument {
    xml: String,
}

/// One `<entry>` with the fields the extractor cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomEntry {
    pub id: String,
    pub title: String,
    pub link: String,
    pub published: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Title,
    Link,
    Published,
}

/// Accumulates one entry while its events stream past.
#[derive(Default)]
struct EntryBuilder {
    entry: AtomEntry,
    link_text: String,
    alternate_href: Option<String>,
    any_href: Option<String>,
}

impl EntryBuilder {
    /// Record a `<link>` element.  Returns true if this is the link whose
    /// text content should be captured.
    fn link(&mut self, e: &BytesStart<'_>) -> bool {
        let mut rel = None;
        let mut href = None;
        for attr in e.attributes().flatten() {
            let value = attr
                .unescape_value()
                .map(|v| v.trim().to_string())
                .unwrap_or_default();
            match attr.key.local_name().as_ref() {
                b"rel" => rel = Some(value),
                b"href" => href = Some(value),
                _ => {}
            }
        }

        let href = href.unwrap_or_default();
        if self.any_href.is_none() {
            self.any_href = Some(href.clone());
        }
        let alternate = matches!(rel.as_deref(), None | Some("alternate"));
        if alternate && self.alternate_href.is_none() {
            self.alternate_href = Some(href);
            return true;
        }
        false
    }

    fn push_text(&mut self, field: Field, text: &str) {
        let target = match field {
            Field::Id => &mut self.entry.id,
            Field::Title => &mut self.entry.title,
            Field::Link => &mut self.link_text,
            Field::Published => &mut self.entry.published,
        };
        target.push_str(text);
    }

    fn finish(mut self) -> AtomEntry {
        let text = self.link_text.trim();
        self.entry.link = if !text.is_empty() {
            text.to_string()
        } else {
            self.alternate_href.or(self.any_href).unwrap_or_default()
        };
        self.entry
    }
}

impl AtomDocument {
    pub(super) fn new(xml: String) -> Self {
        Self { xml }
    }

    /// Walk the document and collect every `<entry>` in document order.
    ///
    /// Fails only if the XML itself is broken; missing or odd fields are left
    /// for the extractor to judge.
    pub fn entries(&self) -> Result<Vec<AtomEntry>, ExtractionError> {
        let mut reader = Reader::from_str(&self.xml);
        reader.config_mut().trim_text(true);

        let mut entries = Vec::new();
        let mut depth = 0usize;
        // Depth of the open <entry>, if any.
        let mut entry_depth: Option<usize> = None;
        let mut current: Option<EntryBuilder> = None;
        let mut field: Option<Field> = None;

        loop {
            let event = reader.read_event().map_err(|e| ExtractionError::Xml {
                position: reader.error_position() as u64,
                message: e.to_string(),
            })?;

            match event {
                Event::Start(e) => {
                    depth += 1;
                    let name = e.local_name();
                    if entry_depth.is_none() {
                        if name.as_ref() == b"entry" {
                            entry_depth = Some(depth);
                            current = Some(EntryBuilder::default());
                        }
                    } else if let (Some(d), Some(builder)) = (entry_depth, current.as_mut()) {
                        if depth == d + 1 {
                            field = match name.as_ref() {
                                b"id" => Some(Field::Id),
                                b"title" => Some(Field::Title),
                                b"published" => Some(Field::Published),
                                b"link" if builder.link(&e) => Some(Field::Link),
                                _ => None,
                            };
                        }
                    }
                }
                Event::Empty(e) => {
                    // Self-closing children don't change depth.
                    if let (Some(d), Some(builder)) = (entry_depth, current.as_mut()) {
                        if depth == d && e.local_name().as_ref() == b"link" {
                            builder.link(&e);
                        }
                    }
                }
                Event::Text(e) => {
                    if let (Some(f), Some(builder)) = (field, current.as_mut()) {
                        let text = e.unescape().map_err(|err| ExtractionError::Xml {
                            position: reader.buffer_position() as u64,
                            message: err.to_string(),
                        })?;
                        builder.push_text(f, &text);
                    }
                }
                Event::CData(e) => {
                    if let (Some(f), Some(builder)) = (field, current.as_mut()) {
                        builder.push_text(f, &String::from_utf8_lossy(&e));
                    }
                }
                Event::End(_) => {
                    match entry_depth {
                        Some(d) if depth == d => {
                            if let Some(builder) = current.take() {
                                entries.push(builder.finish());
                            }
                            entry_depth = None;
                        }
                        Some(d) if depth == d + 1 => field = None,
                        _ => {}
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if entry_depth.is_some() {
            return Err(ExtractionError::Truncated("entry"));
        }
        Ok(entries)
    }
}

impl Entry for AtomEntry {
    fn identifier(&self) -> &str {
        self.id.trim()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn link(&self) -> &str {
        &self.link
    }

    fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(&self.published)
    }
}
