use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Id of the group holding one sub-group per ring in a site plan
pub const RING_ROADS_ID: &str = "Ring_Roads";

#[derive(Error, Debug)]
pub enum RingRoadError {
    #[error("failed to read site plan {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed site plan: {0}")]
    Xml(String),
    #[error("ring {0} not found in site plan")]
    RingNotFound(String),
}

pub fn load_site_plan(path: &Path) -> Result<String, RingRoadError> {
    std::fs::read_to_string(path).map_err(|source| RingRoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse every ring road path out of a site plan
///
/// # Algorithm
/// 1. Walk the document keeping the chain of ancestor ids
/// 2. For each `path` with a `d` attribute anywhere below the `Ring_Roads`
///    group, key its path data by the id of its parent element (empty when
///    the parent has no id). Paths placed directly in the group are keyed
///    `Ring_Roads`.
/// 3. A later path under the same parent replaces an earlier one
pub fn parse_ring_roads(doc: &str) -> Result<BTreeMap<String, String>, RingRoadError> {
    let mut rings = BTreeMap::new();

    visit_paths(doc, |ancestors, data| {
        if position_of(ancestors, RING_ROADS_ID).is_none() {
            return false;
        }
        let parent_id = ancestors
            .last()
            .and_then(|id| id.clone())
            .unwrap_or_default();
        rings.insert(parent_id, data.to_string());
        false
    })?;

    Ok(rings)
}

/// Path data of the first `path` inside `#Ring_Roads #<ring>`
pub fn extract_ring_path(doc: &str, ring: &str) -> Result<String, RingRoadError> {
    let mut found = None;

    visit_paths(doc, |ancestors, data| {
        let inside_ring = position_of(ancestors, RING_ROADS_ID)
            .map(|depth| {
                ancestors[depth + 1..]
                    .iter()
                    .any(|id| id.as_deref() == Some(ring))
            })
            .unwrap_or(false);
        if inside_ring {
            found = Some(data.to_string());
        }
        inside_ring
    })?;

    found.ok_or_else(|| RingRoadError::RingNotFound(ring.to_string()))
}

fn position_of(ancestors: &[Option<String>], id: &str) -> Option<usize> {
    ancestors.iter().position(|a| a.as_deref() == Some(id))
}

/// Call `visit` with the ancestor id chain and path data of every `path`
/// element, in document order. Stops early when `visit` returns true.
fn visit_paths<F>(doc: &str, mut visit: F) -> Result<(), RingRoadError>
where
    F: FnMut(&[Option<String>], &str) -> bool,
{
    let mut reader = Reader::from_str(doc);
    let mut ancestors: Vec<Option<String>> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => {
                if is_path(&element)
                    && let Some(data) = attribute(&element, "d")?
                    && visit(&ancestors, &data)
                {
                    return Ok(());
                }
                ancestors.push(attribute(&element, "id")?);
            }
            Ok(Event::Empty(element)) => {
                if is_path(&element)
                    && let Some(data) = attribute(&element, "d")?
                    && visit(&ancestors, &data)
                {
                    return Ok(());
                }
            }
            Ok(Event::End(_)) => {
                ancestors.pop();
            }
            Ok(Event::Eof) => return Ok(()),
            Ok(_) => {}
            Err(e) => return Err(RingRoadError::Xml(e.to_string())),
        }
    }
}

fn is_path(element: &BytesStart<'_>) -> bool {
    element.local_name().as_ref() == b"path"
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>, RingRoadError> {
    let attr = element
        .try_get_attribute(name)
        .map_err(|e| RingRoadError::Xml(e.to_string()))?;

    match attr {
        Some(attr) => {
            let value = attr
                .unescape_value()
                .map_err(|e| RingRoadError::Xml(e.to_string()))?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}
