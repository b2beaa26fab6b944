//! Happenings document parsing into [`Founding`] records.
//!
//! The feed is an XML document of `<EVENT>` elements, each carrying a
//! `<TIMESTAMP>` (unix seconds) and a `<TEXT>` sentence such as
//! `@@testlandia@@ was founded in %%the_pacific%%.`. Events that are not
//! foundings, or that are missing a field, are skipped. Only a document
//! that is not well-formed XML fails the parse as a whole.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use founding_types::Founding;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::ClientError;

/// `@@nation@@ was founded in %%region%%.`, optionally `refounded`.
#[allow(clippy::expect_used)] // Literal pattern, covered by the tests below.
static FOUNDING_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@(?P<nation>.+)@@ was (?:re)?founded in %%(?P<region>.+)%%\.$")
        .expect("founding sentence pattern is valid")
});

/// Extract the nation and region from a founding sentence.
///
/// Returns `None` when the text does not follow the founding template.
pub fn parse_founding_text(text: &str) -> Option<(&str, &str)> {
    let captures = FOUNDING_TEXT.captures(text.trim())?;
    let nation = captures.name("nation")?.as_str();
    let region = captures.name("region")?.as_str();
    Some((nation, region))
}

/// Which direct child of `<EVENT>` is currently being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Timestamp,
    Text,
    Other,
}

/// Raw text collected for one `<EVENT>` element.
#[derive(Debug, Default)]
struct RawEvent {
    timestamp: Option<String>,
    text: Option<String>,
}

impl RawEvent {
    fn append(&mut self, field: Field, chunk: &str) {
        let slot = match field {
            Field::Timestamp => &mut self.timestamp,
            Field::Text => &mut self.text,
            Field::Other => return,
        };
        slot.get_or_insert_with(String::new).push_str(chunk);
    }

    fn into_founding(self) -> Option<Founding> {
        let (Some(timestamp), Some(text)) = (self.timestamp, self.text) else {
            warn!("skipping event without TIMESTAMP or TEXT");
            return None;
        };

        let Some(time) = timestamp
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        else {
            warn!(timestamp = timestamp.trim(), "skipping event with invalid timestamp");
            return None;
        };

        let Some((nation, region)) = parse_founding_text(&text) else {
            debug!(text = text.trim(), "skipping event that is not a founding");
            return None;
        };

        Some(Founding {
            time,
            nation: nation.to_owned(),
            region: region.to_owned(),
        })
    }
}

/// Parse every founding out of a happenings document.
///
/// Output keeps document order, which is newest first for the upstream
/// feed.
///
/// # Errors
///
/// Returns [`ClientError::Parse`] if the document is not well-formed XML,
/// has no `<HAPPENINGS>` element, carries text outside any element, or
/// ends before every element is closed. A body like that is never a
/// short page.
pub fn parse_foundings(document: &str) -> Result<Vec<Founding>, ClientError> {
    let mut reader = Reader::from_str(document);
    reader.config_mut().trim_text(true);

    let mut foundings = Vec::new();
    let mut current: Option<RawEvent> = None;
    // Element depth below the open <EVENT>; 0 means directly inside it.
    let mut depth: usize = 0;
    let mut field = Field::Other;
    // Elements open anywhere in the document.
    let mut open: usize = 0;
    let mut saw_happenings = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ClientError::Parse(format!("at byte {}: {e}", reader.buffer_position())))?;

        match event {
            Event::Start(start) => {
                open = open.saturating_add(1);
                let name = start.name();
                saw_happenings |= name.as_ref() == b"HAPPENINGS";

                if current.is_some() {
                    depth = depth.saturating_add(1);
                    if depth == 1 {
                        field = match name.as_ref() {
                            b"TIMESTAMP" => Field::Timestamp,
                            b"TEXT" => Field::Text,
                            _ => Field::Other,
                        };
                    }
                } else if name.as_ref() == b"EVENT" {
                    current = Some(RawEvent::default());
                    depth = 0;
                    field = Field::Other;
                }
            }
            Event::Empty(empty) => {
                saw_happenings |= empty.name().as_ref() == b"HAPPENINGS";
            }
            Event::End(_) => {
                open = open.saturating_sub(1);
                if depth == 0 {
                    if let Some(founding) = current.take().and_then(RawEvent::into_founding) {
                        foundings.push(founding);
                    }
                } else {
                    if depth == 1 {
                        field = Field::Other;
                    }
                    depth = depth.saturating_sub(1);
                }
            }
            Event::Text(text) => {
                if open == 0 {
                    return Err(ClientError::Parse(format!(
                        "text outside any element at byte {}",
                        reader.buffer_position()
                    )));
                }
                if let Some(raw) = current.as_mut() {
                    match text.unescape() {
                        Ok(chunk) => raw.append(field, &chunk),
                        Err(e) => warn!(error = %e, "skipping undecodable event text"),
                    }
                }
            }
            Event::CData(cdata) => {
                if let Some(raw) = current.as_mut() {
                    raw.append(field, &String::from_utf8_lossy(&cdata));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if open > 0 {
        return Err(ClientError::Parse(format!(
            "document ended with {open} unclosed elements"
        )));
    }
    if !saw_happenings {
        return Err(ClientError::Parse(
            "no HAPPENINGS element in document".to_owned(),
        ));
    }

    Ok(foundings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn founding_text_matches_founded_and_refounded() {
        assert_eq!(
            parse_founding_text("@@Testlandia@@ was founded in %%Testregionia%%."),
            Some(("Testlandia", "Testregionia"))
        );
        assert_eq!(
            parse_founding_text("@@old_land@@ was refounded in %%the_rejected_realms%%."),
            Some(("old_land", "the_rejected_realms"))
        );
    }

    #[test]
    fn founding_text_rejects_other_sentences() {
        assert_eq!(parse_founding_text("@@a@@ ceased to exist in %%b%%."), None);
        assert_eq!(parse_founding_text("@@a@@ was founded in %%b%%"), None);
        assert_eq!(parse_founding_text("@@@@ was founded in %%b%%."), None);
        assert_eq!(parse_founding_text(""), None);
    }

    #[test]
    fn parses_matching_events_in_document_order() {
        let doc = r"<WORLD><HAPPENINGS>
            <EVENT id='3'><TIMESTAMP>1700000300</TIMESTAMP><TEXT><![CDATA[@@Testlandia@@ was founded in %%Testregionia%%.]]></TEXT></EVENT>
            <EVENT id='2'><TIMESTAMP>1700000200</TIMESTAMP><TEXT><![CDATA[@@Other@@ was founded in %%Testregionia%%.]]></TEXT></EVENT>
            <EVENT id='1'><TIMESTAMP>1700000100</TIMESTAMP><TEXT><![CDATA[@@Someone@@ changed their flag.]]></TEXT></EVENT>
        </HAPPENINGS></WORLD>";

        let foundings = parse_foundings(doc).unwrap();
        assert_eq!(foundings.len(), 2);
        assert!(foundings.iter().all(|f| f.region == "Testregionia"));
        assert_eq!(foundings[0].time.timestamp(), 1_700_000_300);
        assert_eq!(foundings[1].time.timestamp(), 1_700_000_200);
        assert!(foundings[0].time > foundings[1].time);
    }

    #[test]
    fn plain_text_and_entities_are_decoded() {
        let doc = "<HAPPENINGS><EVENT><TIMESTAMP>1700000000</TIMESTAMP>\
                   <TEXT>@@a&amp;b@@ was founded in %%r%%.</TEXT></EVENT></HAPPENINGS>";
        let foundings = parse_foundings(doc).unwrap();
        assert_eq!(foundings.len(), 1);
        assert_eq!(foundings[0].nation, "a&b");
    }

    #[test]
    fn incomplete_events_are_skipped() {
        let doc = "<HAPPENINGS>\
            <EVENT><TEXT>@@a@@ was founded in %%r%%.</TEXT></EVENT>\
            <EVENT><TIMESTAMP>soon</TIMESTAMP><TEXT>@@b@@ was founded in %%r%%.</TEXT></EVENT>\
            <EVENT><TIMESTAMP>1700000000</TIMESTAMP></EVENT>\
            <EVENT><TIMESTAMP/><TEXT>@@c@@ was founded in %%r%%.</TEXT></EVENT>\
            <EVENT><TIMESTAMP>1700000001</TIMESTAMP><TEXT>@@d@@ was founded in %%r%%.</TEXT></EVENT>\
            </HAPPENINGS>";
        let foundings = parse_foundings(doc).unwrap();
        assert_eq!(foundings.len(), 1);
        assert_eq!(foundings[0].nation, "d");
    }

    #[test]
    fn nested_children_do_not_leak_into_fields() {
        let doc = "<HAPPENINGS><EVENT>\
            <META><TIMESTAMP>1</TIMESTAMP></META>\
            <TIMESTAMP>1700000005</TIMESTAMP>\
            <TEXT>@@n@@ was founded in %%r%%.</TEXT>\
            </EVENT></HAPPENINGS>";
        let foundings = parse_foundings(doc).unwrap();
        assert_eq!(foundings.len(), 1);
        assert_eq!(foundings[0].time.timestamp(), 1_700_000_005);
    }

    #[test]
    fn empty_feed_yields_nothing() {
        let foundings = parse_foundings("<WORLD><HAPPENINGS></HAPPENINGS></WORLD>").unwrap();
        assert!(foundings.is_empty());
    }

    #[test]
    fn malformed_document_is_an_error() {
        let result = parse_foundings("<HAPPENINGS><EVENT></HAPPENINGS>");
        assert!(matches!(result, Err(ClientError::Parse(_))));
    }

    #[test]
    fn plain_text_body_is_an_error() {
        let result = parse_foundings("Too many requests, slow down");
        assert!(matches!(result, Err(ClientError::Parse(_))));
    }

    #[test]
    fn html_page_is_an_error() {
        let result = parse_foundings("<html><body>Service Unavailable</body></html>");
        assert!(matches!(result, Err(ClientError::Parse(_))));
    }

    #[test]
    fn truncated_document_is_an_error() {
        let doc = "<WORLD><HAPPENINGS>\
            <EVENT><TIMESTAMP>1700000200</TIMESTAMP><TEXT>@@a@@ was founded in %%r%%.</TEXT></EVENT>\
            <EVENT><TIMESTAMP>1700000100</TIMESTAMP><TEXT>@@b@@ was fou";
        assert!(matches!(parse_foundings(doc), Err(ClientError::Parse(_))));
    }

    #[test]
    fn self_closing_happenings_is_an_empty_feed() {
        let foundings = parse_foundings("<?xml version=\"1.0\"?><WORLD><HAPPENINGS/></WORLD>").unwrap();
        assert!(foundings.is_empty());
    }
}
