//! XML document format: one root element per dataset, one child element per
//! entity, one tag per field. Documents are pretty-printed on write.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::warn;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::Result;
use crate::storage::file::{FileFormat, FileRecord};

const INDENT: usize = 4;

pub struct XmlFormat;

impl XmlFormat {
    /// Build an entity from the tag/text pairs collected under one record
    /// element, or log why the record is unusable.
    fn finish_record<E: FileRecord>(fields_by_tag: HashMap<String, String>, path: &Path) -> Option<E> {
        let mut fields = Vec::with_capacity(E::FIELDS.len());
        for &name in E::FIELDS {
            match fields_by_tag.get(name) {
                Some(value) => fields.push(value.clone()),
                None => {
                    warn!(
                        "skipping <{}> in {}: missing <{}>",
                        E::RECORD,
                        path.display(),
                        name
                    );
                    return None;
                }
            }
        }
        match E::from_fields(&fields) {
            Ok(entity) => Some(entity),
            Err(err) => {
                warn!("skipping <{}> in {}: {}", E::RECORD, path.display(), err);
                None
            }
        }
    }
}

impl<E: FileRecord> FileFormat<E> for XmlFormat {
    fn load(&self, path: &Path) -> Result<Vec<E>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut reader = Reader::from_str(&text);
        let mut entities = Vec::new();

        // Tag/text pairs of the record element currently open, if any.
        let mut current: Option<HashMap<String, String>> = None;
        let mut field: Option<String> = None;
        let mut value = String::new();

        loop {
            match reader.read_event()? {
                Event::Eof => break,
                Event::Start(start) => {
                    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                    if current.is_none() {
                        if name == E::RECORD {
                            current = Some(HashMap::new());
                        }
                        // The root element, or a stray tag outside a record.
                    } else {
                        field = Some(name);
                        value.clear();
                    }
                }
                Event::Empty(empty) => {
                    if let Some(fields) = current.as_mut() {
                        let name = String::from_utf8_lossy(empty.name().as_ref()).into_owned();
                        fields.insert(name, String::new());
                    }
                }
                Event::Text(text) => {
                    if field.is_some() {
                        value.push_str(&text.unescape()?);
                    }
                }
                Event::End(end) => {
                    let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                    if let Some(tag) = field.take() {
                        if tag == name {
                            if let Some(fields) = current.as_mut() {
                                fields.insert(tag, std::mem::take(&mut value));
                            }
                            continue;
                        }
                    }
                    if name == E::RECORD {
                        if let Some(fields) = current.take() {
                            if let Some(entity) = Self::finish_record::<E>(fields, path) {
                                entities.push(entity);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(entities)
    }

    fn store(&self, path: &Path, entities: &[E]) -> Result<()> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new(E::COLLECTION)))?;
        for entity in entities {
            writer.write_event(Event::Start(BytesStart::new(E::RECORD)))?;
            for (&name, field) in E::FIELDS.iter().zip(entity.to_fields()) {
                writer.write_event(Event::Start(BytesStart::new(name)))?;
                writer.write_event(Event::Text(BytesText::new(&field)))?;
                writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
            writer.write_event(Event::End(BytesEnd::new(E::RECORD)))?;
        }
        writer.write_event(Event::End(BytesEnd::new(E::COLLECTION)))?;

        fs::write(path, writer.into_inner())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::domain::models::Client;

    #[test]
    fn document_is_indented_with_one_tag_per_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clients.xml");

        let clients = vec![Client::new(3, "Ana", "Pop", "ana@home")];
        FileFormat::store(&XmlFormat, &path, &clients).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(text.contains("<clients>"));
        assert!(text.contains("    <client>"));
        assert!(text.contains("<firstName>Ana</firstName>"));
        assert!(text.contains("<address>ana@home</address>"));
    }

    #[test]
    fn escaped_characters_survive_the_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clients.xml");

        let clients = vec![Client::new(1, "Ana & Co", "<Pop>", "ana@home")];
        FileFormat::store(&XmlFormat, &path, &clients).unwrap();
        let reloaded: Vec<Client> = FileFormat::load(&XmlFormat, &path).unwrap();

        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].first_name, "Ana & Co");
        assert_eq!(reloaded[0].last_name, "<Pop>");
    }

    #[test]
    fn mismatched_tags_are_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clients.xml");
        std::fs::write(&path, "<clients><client><id>1</id></wrong></clients>").unwrap();

        let result: Result<Vec<Client>> = FileFormat::load(&XmlFormat, &path);
        assert!(result.is_err());
    }
}
