//! macOS configuration profile (`.mobileconfig`) carrying the Edge
//! `ManagedFavorites` preference.

use std::io::Cursor;

use plist::{Dictionary, Integer, Value as PlistValue};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::model::{load_tree, ExportModel, ModelChild, ModelEntry, ModelFolder};
use super::store::FavoritesTree;
use crate::error::{AppError, Result};

/// Default `PayloadIdentifier` of the outer profile.
pub const DEFAULT_PROFILE_IDENTIFIER: &str = "com.example.edge.managedfavorites";

const FAVORITES_KEY: &str = "ManagedFavorites";

/// Render the profile with fresh payload UUIDs.
pub fn export_document(model: &ExportModel, profile_identifier: &str) -> Result<String> {
    export_document_with(model, profile_identifier, Uuid::new_v4(), Uuid::new_v4())
}

/// Render the profile with caller-chosen UUIDs for the outer profile and the
/// inner preferences payload.
pub fn export_document_with(
    model: &ExportModel,
    profile_identifier: &str,
    profile_uuid: Uuid,
    payload_uuid: Uuid,
) -> Result<String> {
    let favorites = model.entries().iter().map(entry_to_plist).collect();

    let mut settings = Dictionary::new();
    settings.insert(FAVORITES_KEY.to_string(), PlistValue::Array(favorites));
    let mut forced = Dictionary::new();
    forced.insert(
        "mcx_preference_settings".to_string(),
        PlistValue::Dictionary(settings),
    );
    let mut edge = Dictionary::new();
    edge.insert(
        "Forced".to_string(),
        PlistValue::Array(vec![PlistValue::Dictionary(forced)]),
    );
    let mut content = Dictionary::new();
    content.insert("com.microsoft.Edge".to_string(), PlistValue::Dictionary(edge));

    let mut payload = Dictionary::new();
    payload.insert("PayloadContent".to_string(), PlistValue::Dictionary(content));
    insert_payload_fields(
        &mut payload,
        "Microsoft Edge Preferences",
        "com.microsoft.Edge.preferences",
        "com.apple.ManagedClient.preferences",
        payload_uuid,
    );

    let mut profile = Dictionary::new();
    profile.insert(
        "PayloadContent".to_string(),
        PlistValue::Array(vec![PlistValue::Dictionary(payload)]),
    );
    insert_payload_fields(
        &mut profile,
        "Edge Managed Favorites",
        profile_identifier,
        "Configuration",
        profile_uuid,
    );

    let mut buf = Vec::new();
    PlistValue::Dictionary(profile)
        .to_writer_xml(&mut buf)
        .map_err(|e| AppError::Format(format!("cannot write plist: {}", e)))?;
    String::from_utf8(buf).map_err(|e| AppError::Format(format!("plist is not UTF-8: {}", e)))
}

fn insert_payload_fields(
    dict: &mut Dictionary,
    display_name: &str,
    identifier: &str,
    payload_type: &str,
    uuid: Uuid,
) {
    dict.insert(
        "PayloadDisplayName".to_string(),
        PlistValue::String(display_name.to_string()),
    );
    dict.insert(
        "PayloadIdentifier".to_string(),
        PlistValue::String(identifier.to_string()),
    );
    dict.insert(
        "PayloadType".to_string(),
        PlistValue::String(payload_type.to_string()),
    );
    dict.insert(
        "PayloadUUID".to_string(),
        PlistValue::String(uuid.to_string().to_uppercase()),
    );
    dict.insert(
        "PayloadVersion".to_string(),
        PlistValue::Integer(Integer::from(1i64)),
    );
}

fn string_dict(fields: &[(&str, &str)]) -> Dictionary {
    let mut dict = Dictionary::new();
    for (key, value) in fields {
        dict.insert(key.to_string(), PlistValue::String(value.to_string()));
    }
    dict
}

fn entry_to_plist(entry: &ModelEntry) -> PlistValue {
    match entry {
        ModelEntry::RootName { toplevel_name } => {
            PlistValue::Dictionary(string_dict(&[("toplevel_name", toplevel_name.as_str())]))
        }
        ModelEntry::Folder(folder) => folder_to_plist(folder),
    }
}

/// Folders are written `name` first, then `children`.
fn folder_to_plist(folder: &ModelFolder) -> PlistValue {
    let mut dict = string_dict(&[("name", folder.name.as_str())]);
    let children = folder.children.iter().map(child_to_plist).collect();
    dict.insert("children".to_string(), PlistValue::Array(children));
    PlistValue::Dictionary(dict)
}

fn child_to_plist(child: &ModelChild) -> PlistValue {
    match child {
        ModelChild::Folder(folder) => folder_to_plist(folder),
        ModelChild::Link { name, url } => {
            PlistValue::Dictionary(string_dict(&[("name", name.as_str()), ("url", url.as_str())]))
        }
    }
}

/// Read a profile and rebuild the tree from the first `ManagedFavorites`
/// array found anywhere in it.
///
/// Documents that are not plists as a whole (wrapper elements, foreign
/// markup) are still accepted as long as the key is directly followed by an
/// `<array>`; only that array is decoded then.
pub fn import_document(text: &str) -> Result<FavoritesTree> {
    let entries = match PlistValue::from_reader_xml(Cursor::new(text.as_bytes())) {
        Ok(document) => {
            let favorites = find_key(&document, FAVORITES_KEY).ok_or_else(|| {
                AppError::Format(format!("no {} key in profile", FAVORITES_KEY))
            })?;
            let PlistValue::Array(entries) = favorites else {
                return Err(not_an_array());
            };
            entries.clone()
        }
        Err(e) if text.contains(&key_marker()) => {
            log::debug!("document is not a plist ({}), reading the favorites array alone", e);
            embedded_array(text)?
        }
        Err(e) => return Err(AppError::Format(format!("not a valid plist: {}", e))),
    };

    load_tree(&Value::Array(decode_array(&entries)))
}

fn key_marker() -> String {
    format!("<key>{}</key>", FAVORITES_KEY)
}

fn not_an_array() -> AppError {
    AppError::Format(format!("{} is not an array", FAVORITES_KEY))
}

/// Cut the `<array>` element that follows the first favorites key out of
/// raw XML and parse it on its own.
fn embedded_array(text: &str) -> Result<Vec<PlistValue>> {
    let marker = key_marker();
    let Some(found) = text.find(&marker) else {
        return Err(AppError::Format(format!("no {} key in profile", FAVORITES_KEY)));
    };
    let rest = skip_insignificant(&text[found + marker.len()..]);

    let element = if rest.starts_with("<array/>") {
        "<array/>"
    } else if rest.starts_with("<array>") {
        let len = array_element_len(rest).ok_or_else(|| {
            AppError::Format(format!("{} array is not closed", FAVORITES_KEY))
        })?;
        &rest[..len]
    } else {
        return Err(not_an_array());
    };

    let wrapped = format!("<plist version=\"1.0\">{}</plist>", element);
    match PlistValue::from_reader_xml(Cursor::new(wrapped.as_bytes())) {
        Ok(PlistValue::Array(entries)) => Ok(entries),
        Ok(_) => Err(not_an_array()),
        Err(e) => Err(AppError::Format(format!(
            "{} array is not valid plist: {}",
            FAVORITES_KEY, e
        ))),
    }
}

/// Skip whitespace and comments between elements.
fn skip_insignificant(mut xml: &str) -> &str {
    loop {
        xml = xml.trim_start();
        match xml
            .strip_prefix("<!--")
            .and_then(|body| body.find("-->").map(|end| &body[end + 3..]))
        {
            Some(after) => xml = after,
            None => return xml,
        }
    }
}

/// Byte length of the `<array>` element `xml` starts with, nested arrays
/// included.
fn array_element_len(xml: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = 0;
    while let Some(offset) = xml[pos..].find('<') {
        let tag = &xml[pos + offset..];
        let tag_end = pos + offset + tag.find('>')? + 1;
        if tag.starts_with("</array>") {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(tag_end);
            }
        } else if tag.starts_with("<array>") {
            depth += 1;
        }
        pos = tag_end;
    }
    None
}

/// Depth-first search in document order.
fn find_key<'a>(value: &'a PlistValue, key: &str) -> Option<&'a PlistValue> {
    match value {
        PlistValue::Dictionary(dict) => dict.iter().find_map(|(k, v)| {
            if k == key {
                Some(v)
            } else {
                find_key(v, key)
            }
        }),
        PlistValue::Array(items) => items.iter().find_map(|item| find_key(item, key)),
        _ => None,
    }
}

fn decode_array(items: &[PlistValue]) -> Vec<Value> {
    items
        .iter()
        .filter_map(|item| match item {
            PlistValue::Dictionary(dict) => Some(Value::Object(decode_dict(dict))),
            _ => None,
        })
        .collect()
}

fn decode_dict(dict: &Dictionary) -> Map<String, Value> {
    dict.iter()
        .filter_map(|(key, value)| {
            let decoded = match value {
                PlistValue::String(text) => Value::String(text.clone()),
                PlistValue::Array(items) => Value::Array(decode_array(items)),
                PlistValue::Dictionary(inner) => Value::Object(decode_dict(inner)),
                _ => return None,
            };
            Some((key.clone(), decoded))
        })
        .collect()
}
