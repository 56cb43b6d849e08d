use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// A parsed gateway reply.
///
/// Reads never fail: a missing tag or attribute is `None`, and a body that is
/// empty or not well-formed parses to a message where every read is `None`.
/// Callers rely on that to map an unreachable gateway to an incomplete outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayMessage {
    root: Option<String>,
    attributes: HashMap<String, String>,
    elements: HashMap<String, String>,
}

impl GatewayMessage {
    pub fn parse(body: Option<&str>) -> Self {
        match body {
            Some(raw) if !raw.trim().is_empty() => Self::try_parse(raw).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    fn try_parse(raw: &str) -> Option<Self> {
        let mut reader = Reader::from_str(raw);
        reader.trim_text(true);

        let mut message = Self::default();
        // Open elements, innermost last, each with the text gathered so far.
        let mut open: Vec<(String, String)> = Vec::new();

        loop {
            match reader.read_event().ok()? {
                Event::Start(start) => {
                    let name = element_name(&start);
                    if message.root.is_none() {
                        message.read_root(&start, &name)?;
                    }
                    open.push((name, String::new()));
                }
                Event::Empty(start) => {
                    let name = element_name(&start);
                    if message.root.is_none() {
                        message.read_root(&start, &name)?;
                    }
                    message.elements.entry(name).or_default();
                }
                Event::Text(text) => {
                    if let Some((_, buf)) = open.last_mut() {
                        buf.push_str(&text.unescape().ok()?);
                    }
                }
                Event::CData(data) => {
                    if let Some((_, buf)) = open.last_mut() {
                        buf.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::End(_) => {
                    let (name, text) = open.pop()?;
                    // First occurrence wins.
                    message
                        .elements
                        .entry(name)
                        .or_insert_with(|| text.trim().to_string());
                }
                Event::Eof => break,
                _ => {}
            }
        }

        // Truncated documents are treated as unreadable.
        open.is_empty().then_some(message)
    }

    fn read_root(&mut self, start: &BytesStart<'_>, name: &str) -> Option<()> {
        self.root = Some(name.to_string());
        for attribute in start.attributes() {
            let attribute = attribute.ok()?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value().ok()?.into_owned();
            self.attributes.insert(key, value);
        }
        Some(())
    }

    pub fn root_name(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn root_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn element_text(&self, tag: &str) -> Option<&str> {
        self.elements.get(tag).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}
