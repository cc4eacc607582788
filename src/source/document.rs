//! Parsed feed documents.
//!
//! The dialect is chosen by sniffing the first element of the body rather
//! than trusting `Content-Type`, which feeds routinely get wrong.
//!
//! Atom bodies must be UTF-8; a feed in any other encoding fails to parse
//! and is skipped for the run.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::atom::AtomDocument;
use crate::error::FetchError;

/// A fetched feed in one of the supported dialects.
#[derive(Debug, Clone)]
pub enum Document {
    /// RSS 2.0: `<rss><channel><item>…`
    Rss(rss::Channel),
    /// Atom: `<feed><entry>…`
    Atom(AtomDocument),
}

impl Document {
    /// Parse a response body.  Anything that isn't recognisably RSS or Atom is
    /// a [`FetchError::Parse`].
    pub fn parse(body: &[u8]) -> Result<Self, FetchError> {
        let body = body.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(body);

        match root_element(body)?.as_str() {
            "rss" => rss::Channel::read_from(body)
                .map(Document::Rss)
                .map_err(|e| FetchError::Parse(e.to_string())),
            "feed" => {
                let xml = std::str::from_utf8(body)
                    .map_err(|e| FetchError::Parse(format!("atom feed is not UTF-8: {e}")))?;
                Ok(Document::Atom(AtomDocument::new(xml.to_string())))
            }
            other => Err(FetchError::Parse(format!(
                "unsupported root element <{other}>"
            ))),
        }
    }

    /// Short dialect name for log lines.
    pub fn dialect(&self) -> &'static str {
        match self {
            Document::Rss(_) => "rss",
            Document::Atom(_) => "atom",
        }
    }
}

/// Local name of the first element in `body`, skipping the XML declaration,
/// comments, processing instructions and doctype.
fn root_element(body: &[u8]) -> Result<String, FetchError> {
    let mut reader = Reader::from_reader(body);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return Ok(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Ok(Event::Eof) => return Err(FetchError::Parse("empty document".into())),
            Ok(_) => continue,
            Err(e) => return Err(FetchError::Parse(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_rss() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<!-- generated -->
<rss version="2.0"><channel><title>T</title><link>https://example.com</link><description>D</description>
  <item><guid>g1</guid><title>One</title></item>
</channel></rss>"#;

        let doc = Document::parse(xml).unwrap();
        assert_eq!(doc.dialect(), "rss");
        match doc {
            Document::Rss(channel) => assert_eq!(channel.items().len(), 1),
            Document::Atom(_) => panic!("expected rss"),
        }
    }

    #[test]
    fn sniffs_atom_with_bom() {
        let mut xml = b"\xEF\xBB\xBF".to_vec();
        xml.extend_from_slice(br#"<feed xmlns="http://www.w3.org/2005/Atom"><entry><id>a</id></entry></feed>"#);

        let doc = Document::parse(&xml).unwrap();
        assert_eq!(doc.dialect(), "atom");
    }

    #[test]
    fn rejects_other_roots() {
        let err = Document::parse(b"<html><body>nope</body></html>").unwrap_err();
        assert!(err.to_string().contains("<html>"));
    }

    #[test]
    fn rejects_non_xml() {
        assert!(Document::parse(b"").is_err());
        assert!(Document::parse(b"{\"json\": true}").is_err());
    }
}
