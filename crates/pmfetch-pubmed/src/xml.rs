//! efetch XML → raw records using quick-xml
//!
//! Each `<PubmedArticle>` becomes one nested mapping keyed by element name.
//! The conversion is schema-free so that downstream lookups see exactly what
//! NCBI sent, gaps and oddities included:
//!
//! - text elements become strings (inline `<i>`, `<sup>`... flattened in)
//! - `*List` containers become sequences of their children
//! - `AffiliationInfo` and any repeated sibling become sequences
//! - attributes are dropped

use anyhow::{Context, Result, bail};
use quick_xml::Reader;
use quick_xml::events::Event;
use serde_json::{Map, Value};

use crate::record::RawRecord;

/// Elements that may repeat and are always read as sequences.
const ALWAYS_SEQUENCE: &[&[u8]] = &[b"AffiliationInfo"];

/// Formatting tags that occur inside titles and abstracts.
const INLINE_MARKUP: &[&[u8]] = &[b"i", b"b", b"u", b"sup", b"sub"];

/// Parse a `PubmedArticleSet` document.
///
/// Anything other than `<PubmedArticle>` at the top level (book articles,
/// delete citations) is ignored. Ill-formed XML anywhere is an error.
pub fn parse_article_set(xml: &str) -> Result<Vec<RawRecord>> {
    let mut reader = Reader::from_str(xml);
    let mut records = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"PubmedArticle" => {
                let element = read_element(&mut reader, "PubmedArticle")
                    .with_context(|| format!("Failed to read article #{}", records.len() + 1))?;
                records.push(RawRecord::new(element.value));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e).context("XML parse error"),
            _ => {}
        }
        buf.clear();
    }

    Ok(records)
}

/// A converted element plus all text beneath it, for flattening into a parent.
struct Element {
    value: Value,
    text: String,
}

fn read_element(reader: &mut Reader<&[u8]>, name: &str) -> Result<Element> {
    let mut children: Vec<(String, Value)> = Vec::new();
    let mut text = String::new();
    let mut has_direct_text = false;
    let mut has_markup = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let child = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                has_markup |= INLINE_MARKUP.contains(&child.as_bytes());
                let element = read_element(reader, &child)?;
                text.push_str(&element.text);
                children.push((child, element.value));
            }
            Event::Empty(e) => {
                let child = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let value = if child.ends_with("List") {
                    Value::Array(Vec::new())
                } else {
                    Value::String(String::new())
                };
                children.push((child, value));
            }
            Event::Text(e) => {
                let chunk = e.unescape()?;
                has_direct_text |= !chunk.trim().is_empty();
                text.push_str(&chunk);
            }
            Event::CData(e) => {
                let chunk = String::from_utf8_lossy(&e.into_inner()).into_owned();
                has_direct_text |= !chunk.trim().is_empty();
                text.push_str(&chunk);
            }
            Event::End(_) => break,
            Event::Eof => bail!("document ended inside <{name}>"),
            _ => {}
        }
        buf.clear();
    }

    let value = if has_direct_text || has_markup {
        Value::String(collapse_whitespace(&text))
    } else if name.ends_with("List") {
        Value::Array(children.into_iter().map(|(_, v)| v).collect())
    } else if children.is_empty() {
        Value::String(String::new())
    } else {
        group_children(children)
    };

    Ok(Element { value, text })
}

/// Children → mapping; repeated names collect into a sequence.
fn group_children(children: Vec<(String, Value)>) -> Value {
    let mut grouped: Vec<(String, Vec<Value>)> = Vec::new();
    for (name, value) in children {
        match grouped.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => grouped.push((name, vec![value])),
        }
    }

    let map: Map<String, Value> = grouped
        .into_iter()
        .map(|(name, mut values)| {
            let value = if values.len() == 1 && !ALWAYS_SEQUENCE.contains(&name.as_bytes()) {
                values.remove(0)
            } else {
                Value::Array(values)
            };
            (name, value)
        })
        .collect();
    Value::Object(map)
}

/// Trim and fold runs of whitespace left by pretty-printed XML.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
