//! Parsing sitemap XML
//!
//! Entries are matched by the local name of the `loc` element only. The namespace, or the prefix
//! it is bound to, doesn't matter. So all of the following documents result in the same list of
//! URLs:
//!
//! ```xml
//! <urlset><url><loc>https://a.example/x</loc></url></urlset>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"><url><loc>https://a.example/x</loc></url></urlset>
//! <sm:urlset xmlns:sm="http://www.sitemaps.org/schemas/sitemap/0.9"><sm:url><sm:loc>https://a.example/x</sm:loc></sm:url></sm:urlset>
//! ```

use quick_xml::Reader;
use quick_xml::events::Event;

const LOC: &[u8] = b"loc";

/// The payload is not a well-formed XML document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("XML error at position {position}: {err}")]
    Xml {
        position: u64,
        #[source]
        err: quick_xml::Error,
    },
    #[error("invalid UTF-8 in CDATA section: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("unexpected end of document, {0} element(s) not closed")]
    Unclosed(usize),
    #[error("document has no root element")]
    NoRoot,
}

/// Parse a sitemap, returning the text of all `loc` elements in document order.
///
/// The text is trimmed, elements with empty text are skipped. Duplicates are retained.
pub fn parse(data: &[u8]) -> Result<Vec<String>, ParseError> {
    let mut reader = Reader::from_reader(data);
    reader.config_mut().trim_text(true);

    let mut result = Vec::new();
    let mut buf = Vec::new();

    let mut depth = 0usize;
    let mut root = false;
    // the text collected for the currently open `loc` element
    let mut current: Option<String> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|err| ParseError::Xml {
                position: reader.error_position(),
                err,
            })?;

        match event {
            Event::Start(e) => {
                depth += 1;
                root = true;
                if e.local_name().as_ref() == LOC {
                    current = Some(String::new());
                }
            }
            Event::Empty(_) => {
                // an empty `loc` has no text, nothing to record
                root = true;
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if e.local_name().as_ref() == LOC {
                    if let Some(loc) = current.take() {
                        let loc = loc.trim();
                        if !loc.is_empty() {
                            result.push(loc.to_string());
                        } else {
                            log::debug!("Skipping empty 'loc' element");
                        }
                    }
                }
            }
            Event::Text(e) => {
                if let Some(current) = &mut current {
                    let text = e.unescape().map_err(|err| ParseError::Xml {
                        position: reader.buffer_position(),
                        err,
                    })?;
                    current.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some(current) = &mut current {
                    current.push_str(std::str::from_utf8(&e)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    if depth > 0 {
        return Err(ParseError::Unclosed(depth));
    }
    if !root {
        return Err(ParseError::NoRoot);
    }

    log::debug!("Parsed {} URL(s) from sitemap", result.len());

    Ok(result)
}

#[cfg(test)]
mod test {
    use super::*;

    const EXPECTED: [&str; 2] = ["https://a.example/x", "https://a.example/y"];

    #[test]
    fn default_namespace() {
        let xml = br#"<?xml version="1.0"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"><url><loc>https://a.example/x</loc></url><url><loc>https://a.example/y</loc></url></urlset>"#;
        assert_eq!(parse(xml).unwrap(), EXPECTED);
    }

    #[test]
    fn no_namespace() {
        let xml = br#"<urlset><url><loc>https://a.example/x</loc></url><url><loc>https://a.example/y</loc></url></urlset>"#;
        assert_eq!(parse(xml).unwrap(), EXPECTED);
    }

    #[test]
    fn prefixed_namespace() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<sm:urlset xmlns:sm="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sm:url>
    <sm:loc>https://a.example/x</sm:loc>
  </sm:url>
  <sm:url>
    <sm:loc>https://a.example/y</sm:loc>
  </sm:url>
</sm:urlset>"#;
        assert_eq!(parse(xml).unwrap(), EXPECTED);
    }

    #[test]
    fn skips_empty() {
        let xml = br#"<urlset>
  <url><loc>https://a.example/x</loc></url>
  <url><loc></loc></url>
  <url><loc>   </loc></url>
  <url><loc/></url>
  <url><lastmod>2024-01-01</lastmod></url>
  <url><loc>https://a.example/y</loc></url>
</urlset>"#;
        assert_eq!(parse(xml).unwrap(), EXPECTED);
    }

    #[test]
    fn keeps_duplicates_and_order() {
        let xml = br#"<urlset><url><loc>https://a.example/y</loc></url><url><loc>https://a.example/x</loc></url><url><loc>https://a.example/y</loc></url></urlset>"#;
        assert_eq!(
            parse(xml).unwrap(),
            [
                "https://a.example/y",
                "https://a.example/x",
                "https://a.example/y"
            ]
        );
    }

    #[test]
    fn unescapes_and_trims() {
        let xml = br#"<urlset><url><loc>
    https://a.example/x?a=1&amp;b=2
  </loc></url><url><loc><![CDATA[https://a.example/y?c=3&d=4]]></loc></url></urlset>"#;
        assert_eq!(
            parse(xml).unwrap(),
            ["https://a.example/x?a=1&b=2", "https://a.example/y?c=3&d=4"]
        );
    }

    #[test]
    fn empty_urlset() {
        assert!(parse(b"<urlset/>").unwrap().is_empty());
        assert!(parse(b"<urlset></urlset>").unwrap().is_empty());
    }

    #[test]
    fn mismatched_tags() {
        let xml = br#"<urlset><url><loc>https://a.example/x</url></loc></urlset>"#;
        assert!(matches!(parse(xml), Err(ParseError::Xml { .. })));
    }

    #[test]
    fn unclosed() {
        let xml = br#"<urlset><url><loc>https://a.example/x</loc></url>"#;
        assert!(parse(xml).is_err());
    }

    #[test]
    fn not_xml() {
        assert!(matches!(parse(b"this is not a sitemap"), Err(ParseError::NoRoot)));
        assert!(matches!(parse(b""), Err(ParseError::NoRoot)));
    }

    #[test]
    fn invalid_entity() {
        let xml = br#"<urlset><url><loc>https://a.example/x?a=1&b=2</loc></url></urlset>"#;
        assert!(parse(xml).is_err());
    }
}
