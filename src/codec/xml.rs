use std::collections::BTreeMap;

use base64::prelude::*;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::util;
use super::Codec;
use crate::error::{CodeckitError, Result};
use crate::types::{CodecMeta, DataKind};
use crate::value::Value;

/// XML documents with one element per value, named after its kind:
///
/// ```text
/// <map><entry key="x"><int>1</int></entry></map>
/// ```
///
/// `bytes` hold standard Base64 and `time` holds RFC 3339.
pub struct Xml;

impl Codec for Xml {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: "xml",
            aliases: &[],
            title: "XML",
            description: "XML document with one element per value".to_string(),
            output: DataKind::Binary,
        }
    }

    fn encode(&self, value: &Value) -> Result<Value> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write_value(&mut writer, value)?;
        Ok(Value::Bytes(writer.into_inner()))
    }

    fn decode(&self, data: &Value) -> Result<Value> {
        let bytes = util::require_bytes(data)?;
        XmlReader::new(bytes).read_document()
    }
}

fn write_scalar(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if !text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn write_value(writer: &mut Writer<Vec<u8>>, value: &Value) -> Result<()> {
    match value {
        Value::Null => writer.write_event(Event::Empty(BytesStart::new("null")))?,
        Value::Bool(b) => write_scalar(writer, "bool", &b.to_string())?,
        Value::Int(n) => write_scalar(writer, "int", &n.to_string())?,
        Value::Float(x) => write_scalar(writer, "float", &x.to_string())?,
        Value::Text(s) => write_scalar(writer, "text", s)?,
        Value::Bytes(b) => write_scalar(writer, "bytes", &BASE64_STANDARD.encode(b))?,
        Value::Time(t) => {
            write_scalar(writer, "time", &t.to_rfc3339_opts(SecondsFormat::AutoSi, true))?
        }
        Value::Seq(items) => {
            writer.write_event(Event::Start(BytesStart::new("seq")))?;
            for item in items {
                write_value(writer, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new("seq")))?;
        }
        Value::Map(entries) => {
            writer.write_event(Event::Start(BytesStart::new("map")))?;
            for (key, item) in entries {
                let entry = BytesStart::new("entry").with_attributes([("key", key.as_str())]);
                writer.write_event(Event::Start(entry))?;
                write_value(writer, item)?;
                writer.write_event(Event::End(BytesEnd::new("entry")))?;
            }
            writer.write_event(Event::End(BytesEnd::new("map")))?;
        }
    }
    Ok(())
}

enum Node<'a> {
    Open(BytesStart<'a>),
    Leaf(BytesStart<'a>),
    Close,
    Eof,
}

struct XmlReader<'a> {
    reader: Reader<&'a [u8]>,
    depth: usize,
}

impl<'a> XmlReader<'a> {
    fn new(input: &'a [u8]) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.trim_text(false);
        Self { reader, depth: 0 }
    }

    /// Runs `read` one container level deeper, refusing documents nested
    /// past [`util::MAX_DEPTH`].
    fn nested<T>(&mut self, read: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= util::MAX_DEPTH {
            return Err(CodeckitError::malformed_xml("nesting too deep"));
        }
        self.depth += 1;
        let result = read(self);
        self.depth -= 1;
        result
    }

    /// Next structural event, skipping declarations, comments and
    /// whitespace between elements.
    fn next_node(&mut self) -> Result<Node<'a>> {
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => return Ok(Node::Open(e)),
                Event::Empty(e) => return Ok(Node::Leaf(e)),
                Event::End(_) => return Ok(Node::Close),
                Event::Eof => return Ok(Node::Eof),
                Event::Text(t) => {
                    if !t.unescape()?.trim().is_empty() {
                        return Err(CodeckitError::malformed_xml("unexpected text between elements"));
                    }
                }
                Event::CData(_) => {
                    return Err(CodeckitError::malformed_xml("unexpected CDATA between elements"))
                }
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            }
        }
    }

    fn read_document(&mut self) -> Result<Value> {
        let value = match self.next_node()? {
            Node::Open(e) => self.read_element(&e, false)?,
            Node::Leaf(e) => self.read_element(&e, true)?,
            Node::Close | Node::Eof => return Err(CodeckitError::malformed_xml("missing root element")),
        };
        match self.next_node()? {
            Node::Eof => Ok(value),
            _ => Err(CodeckitError::malformed_xml("content after root element")),
        }
    }

    fn read_element(&mut self, start: &BytesStart<'a>, empty: bool) -> Result<Value> {
        let name = start.name();
        match name.as_ref() {
            b"null" => {
                if !empty {
                    self.read_text()?;
                }
                Ok(Value::Null)
            }
            b"seq" if empty => Ok(Value::Seq(Vec::new())),
            b"seq" => Ok(Value::Seq(self.nested(Self::read_items)?)),
            b"map" if empty => Ok(Value::Map(BTreeMap::new())),
            b"map" => Ok(Value::Map(self.nested(Self::read_entries)?)),
            tag => {
                let tag = String::from_utf8_lossy(tag).into_owned();
                let text = if empty { String::new() } else { self.read_text()? };
                parse_scalar(&tag, text)
            }
        }
    }

    fn read_text(&mut self) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.reader.read_event()? {
                Event::Text(t) => text.push_str(&t.unescape()?),
                Event::CData(c) => text.push_str(
                    std::str::from_utf8(&c)
                        .map_err(|_| CodeckitError::malformed_xml("CDATA is not UTF-8"))?,
                ),
                Event::Comment(_) => {}
                Event::End(_) => return Ok(text),
                Event::Eof => return Err(CodeckitError::malformed_xml("unexpected end of document")),
                _ => return Err(CodeckitError::malformed_xml("unexpected markup inside a scalar")),
            }
        }
    }

    fn read_value(&mut self) -> Result<Option<Value>> {
        match self.next_node()? {
            Node::Open(e) => self.read_element(&e, false).map(Some),
            Node::Leaf(e) => self.read_element(&e, true).map(Some),
            Node::Close => Ok(None),
            Node::Eof => Err(CodeckitError::malformed_xml("unexpected end of document")),
        }
    }

    fn read_items(&mut self) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        while let Some(item) = self.read_value()? {
            items.push(item);
        }
        Ok(items)
    }

    fn read_entries(&mut self) -> Result<BTreeMap<String, Value>> {
        let mut entries = BTreeMap::new();
        loop {
            match self.next_node()? {
                Node::Open(e) if e.name().as_ref() == b"entry" => {
                    let key = entry_key(&e)?;
                    let value = self
                        .read_value()?
                        .ok_or_else(|| CodeckitError::malformed_xml("empty <entry>"))?;
                    if self.read_value()?.is_some() {
                        return Err(CodeckitError::malformed_xml("<entry> holds more than one value"));
                    }
                    entries.insert(key, value);
                }
                Node::Close => return Ok(entries),
                Node::Eof => return Err(CodeckitError::malformed_xml("unexpected end of document")),
                _ => return Err(CodeckitError::malformed_xml("expected <entry> inside <map>")),
            }
        }
    }
}

fn entry_key(start: &BytesStart<'_>) -> Result<String> {
    let attr = start
        .try_get_attribute("key")
        .map_err(quick_xml::Error::from)?
        .ok_or_else(|| CodeckitError::malformed_xml("<entry> without key"))?;
    Ok(attr.unescape_value()?.into_owned())
}

fn parse_scalar(tag: &str, text: String) -> Result<Value> {
    if tag == "text" {
        return Ok(Value::Text(text));
    }
    let invalid = |what: &str| CodeckitError::malformed_xml(format!("invalid {} '{}'", what, text));
    match tag {
        "bool" => match text.as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(invalid("bool")),
        },
        "int" => text.parse().map(Value::Int).map_err(|_| invalid("int")),
        "float" => text.parse().map(Value::Float).map_err(|_| invalid("float")),
        "bytes" => Ok(Value::Bytes(BASE64_STANDARD.decode(text.as_bytes())?)),
        "time" => DateTime::parse_from_rfc3339(&text)
            .map(|t| Value::Time(t.with_timezone(&Utc)))
            .map_err(|_| invalid("time")),
        other => Err(CodeckitError::malformed_xml(format!("unknown element <{}>", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn roundtrip(value: &Value) -> Value {
        let encoded = Xml.encode(value).unwrap();
        Xml.decode(&encoded).unwrap()
    }

    #[test]
    fn test_xml_encode_map() {
        let encoded = Xml.encode(&Value::map([("x", Value::Int(1))])).unwrap();
        let text = String::from_utf8(encoded.as_bytes().unwrap().to_vec()).unwrap();
        assert!(text.starts_with("<?xml"));
        assert!(text.ends_with(r#"<map><entry key="x"><int>1</int></entry></map>"#));
    }

    #[test]
    fn test_xml_roundtrip_every_kind() {
        let value = Value::map([
            ("null", Value::Null),
            ("flag", Value::Bool(false)),
            ("count", Value::Int(-12)),
            ("ratio", Value::Float(2.75)),
            ("escaped", Value::from("a < b & \"c\"\n  indented")),
            ("empty", Value::from("")),
            ("raw", Value::Bytes(vec![0, 159, 255])),
            ("at", Value::Time(Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap())),
            ("list", Value::Seq(vec![Value::Int(1), Value::Seq(vec![]), Value::map::<&str, _>([])])),
            ("odd \"key\" & <more>", Value::Int(0)),
        ]);
        assert_eq!(roundtrip(&value), value);
    }

    #[test]
    fn test_xml_roundtrip_scalar_root() {
        assert_eq!(roundtrip(&Value::from("  padded  ")), Value::from("  padded  "));
        assert_eq!(roundtrip(&Value::Null), Value::Null);
    }

    #[test]
    fn test_xml_decode_tolerates_whitespace_and_comments() {
        let doc = b"<?xml version=\"1.0\"?>\n<!-- ids -->\n<seq>\n  <int>1</int>\n  <int>2</int>\n</seq>\n";
        assert_eq!(
            Xml.decode(&Value::Bytes(doc.to_vec())).unwrap(),
            Value::from(vec![1i64, 2])
        );
    }

    #[test]
    fn test_xml_decode_malformed() {
        let err = Xml.decode(&Value::Bytes(b"<seq><int>1</int>".to_vec())).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Format);

        let err = Xml.decode(&Value::Bytes(b"<int>one</int>".to_vec())).unwrap_err();
        assert!(matches!(err, CodeckitError::MalformedXml { .. }));

        let err = Xml.decode(&Value::Bytes(b"<seq></map>".to_vec())).unwrap_err();
        assert!(matches!(err, CodeckitError::Xml(_)));
    }

    #[test]
    fn test_xml_nesting_limit() {
        let deep = |levels: usize| {
            Value::Bytes(format!("{}{}", "<seq>".repeat(levels), "</seq>".repeat(levels)).into_bytes())
        };
        assert!(Xml.decode(&deep(util::MAX_DEPTH)).is_ok());

        let err = Xml.decode(&deep(util::MAX_DEPTH + 1)).unwrap_err();
        assert!(matches!(err, CodeckitError::MalformedXml { ref message } if message == "nesting too deep"));

        let unclosed = Value::Bytes("<seq>".repeat(200_000).into_bytes());
        assert_eq!(Xml.decode(&unclosed).unwrap_err().kind(), crate::error::ErrorKind::Format);

        let maps = "<map><entry key=\"k\">".repeat(200_000);
        assert!(matches!(
            Xml.decode(&Value::Bytes(maps.into_bytes())),
            Err(CodeckitError::MalformedXml { .. })
        ));
    }

    #[test]
    fn test_xml_decode_rejects_non_bytes() {
        assert!(matches!(Xml.decode(&Value::from("<null/>")), Err(CodeckitError::InvalidData)));
    }
}
