// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::{ExtensionDataError, ExtensionDataErrorKind};
use camino::{Utf8Path, Utf8PathBuf};
use quick_xml::{Reader, events::Event};

/// Auxiliary data for an activity, read from the file its `<Extension>` element points to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtensionData {
    source: Utf8PathBuf,
    properties: Vec<ExtensionProperty>,
}

/// A single leaf element read from an extension file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtensionProperty {
    /// The local name of the element.
    pub name: String,
    /// The text content of the element.
    pub value: String,
}

impl ExtensionData {
    /// Reads and parses an extension file.
    pub fn load(path: &Utf8Path) -> Result<Self, ExtensionDataError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|err| ExtensionDataError::new(path, ExtensionDataErrorKind::Io(err)))?;
        let properties =
            parse_properties(&contents).map_err(|kind| ExtensionDataError::new(path, kind))?;
        Ok(Self {
            source: path.to_path_buf(),
            properties,
        })
    }

    /// Returns the file this data was read from.
    pub fn source(&self) -> &Utf8Path {
        &self.source
    }

    /// Returns the leaf elements of the file, in document order.
    pub fn properties(&self) -> &[ExtensionProperty] {
        &self.properties
    }

    /// Returns the value of the first property with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|property| property.name == name)
            .map(|property| property.value.as_str())
    }
}

#[derive(Debug)]
struct Frame {
    name: String,
    text: String,
    has_children: bool,
}

/// Collects every element without child elements that has non-empty text.
fn parse_properties(contents: &str) -> Result<Vec<ExtensionProperty>, ExtensionDataErrorKind> {
    let mut reader = Reader::from_str(contents);
    reader.trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut properties = Vec::new();
    let mut seen_root = false;

    loop {
        match reader.read_event().map_err(ExtensionDataErrorKind::Xml)? {
            Event::Start(start) => {
                seen_root = true;
                if let Some(parent) = stack.last_mut() {
                    parent.has_children = true;
                }
                stack.push(Frame {
                    name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
                    text: String::new(),
                    has_children: false,
                });
            }
            Event::Empty(_) => {
                seen_root = true;
                if let Some(parent) = stack.last_mut() {
                    parent.has_children = true;
                }
            }
            Event::Text(text) => {
                // Whitespace is trimmed, so any text outside an element is stray content.
                let Some(frame) = stack.last_mut() else {
                    return Err(ExtensionDataErrorKind::NotXml);
                };
                frame
                    .text
                    .push_str(&text.unescape().map_err(ExtensionDataErrorKind::Xml)?);
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(_) => {
                if let Some(frame) = stack.pop() {
                    if !frame.has_children && !frame.text.is_empty() {
                        properties.push(ExtensionProperty {
                            name: frame.name,
                            value: frame.text,
                        });
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(ExtensionDataErrorKind::NotXml);
    }
    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino_tempfile::Utf8TempDir;
    use camino_tempfile_ext::prelude::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn load_leaf_properties() {
        let temp = Utf8TempDir::new().unwrap();
        let file = temp.child("ext.xml");
        file.write_str(indoc! {r#"
            <ActivityExtension>
              <Request>
                <Method>GET</Method>
                <Url>https://example.com/?a=1&amp;b=2</Url>
                <Headers/>
              </Request>
              <Body><![CDATA[<payload/>]]></Body>
              <Empty></Empty>
            </ActivityExtension>
        "#})
        .unwrap();

        let data = ExtensionData::load(file.as_path()).unwrap();
        assert_eq!(data.source(), file.as_path());
        let names: Vec<_> = data.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Method", "Url", "Body"]);
        assert_eq!(data.get("Url"), Some("https://example.com/?a=1&b=2"));
        assert_eq!(data.get("Body"), Some("<payload/>"));
        assert_eq!(data.get("Headers"), None);
    }

    #[test]
    fn missing_and_malformed_files() {
        let temp = Utf8TempDir::new().unwrap();

        let err = ExtensionData::load(&temp.path().join("missing.xml")).unwrap_err();
        assert!(err.is_not_found(), "{err:?}");

        let file = temp.child("broken.xml");
        file.write_str("<a><b></a>").unwrap();
        let err = ExtensionData::load(file.as_path()).unwrap_err();
        assert!(!err.is_not_found(), "{err:?}");

        for (name, contents) in [
            ("plain.txt", "this is not xml at all"),
            ("empty.xml", ""),
            ("trailing.xml", "<Extension/> and then some text"),
        ] {
            let file = temp.child(name);
            file.write_str(contents).unwrap();
            let err = ExtensionData::load(file.as_path()).unwrap_err();
            assert!(
                matches!(err.kind(), ExtensionDataErrorKind::NotXml),
                "{name}: {err:?}"
            );
        }
    }
}
