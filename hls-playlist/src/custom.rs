//! Caller-supplied tags the core does not know about.
//!
//! A [`CustomDecoder`] claims every line starting with its tag name and turns
//! it into a [`CustomTag`]. Playlist-scoped tags land in the playlist's
//! [`CustomTags`], segment-scoped tags in the collection of the segment that
//! follows them.

use std::{fmt, sync::Arc};

use crate::error::BoxError;

/// A decoded extension tag that knows how to write itself back.
pub trait CustomTag: fmt::Debug + Send + Sync {
    /// Tag prefix this value was decoded from, e.g. `#X-CUSTOM:`.
    fn tag_name(&self) -> &str;

    /// Full line to emit. An empty string omits the tag.
    fn encode(&self) -> String;
}

pub trait CustomDecoder: Send + Sync {
    /// Line prefix this decoder claims.
    fn tag_name(&self) -> &str;

    /// Whether decoded values attach to the next segment instead of the playlist.
    fn segment_tag(&self) -> bool {
        false
    }

    fn decode(&self, line: &str) -> Result<Arc<dyn CustomTag>, BoxError>;
}

/// Ordered collection of custom tag values keyed by tag name.
///
/// Setting a tag whose name is already present replaces the value in place,
/// so encode order stays the order names were first set.
#[derive(Clone, Debug, Default)]
pub struct CustomTags(Vec<Arc<dyn CustomTag>>);

impl CustomTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, tag: Arc<dyn CustomTag>) {
        match self.0.iter_mut().find(|x| x.tag_name() == tag.tag_name()) {
            Some(slot) => *slot = tag,
            None => self.0.push(tag),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn CustomTag>> {
        self.0.iter().find(|x| x.tag_name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn CustomTag>> {
        self.0.iter()
    }

    pub(crate) fn write_to(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tag in self.0.iter() {
            let encoded = tag.encode();
            if !encoded.is_empty() {
                writeln!(f, "{}", encoded)?;
            }
        }
        Ok(())
    }
}

impl PartialEq for CustomTags {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|(a, b)| a.tag_name() == b.tag_name() && a.encode() == b.encode())
    }
}

/// Registration-ordered dispatch table of extension decoders.
#[derive(Clone, Default)]
pub struct CustomRegistry(Vec<Arc<dyn CustomDecoder>>);

impl CustomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, decoder: Arc<dyn CustomDecoder>) {
        self.0.push(decoder);
    }

    /// First registered decoder whose prefix matches the line.
    pub fn find(&self, line: &str) -> Option<&dyn CustomDecoder> {
        self.0
            .iter()
            .find(|x| line.starts_with(x.tag_name()))
            .map(|x| &**x)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for CustomRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|x| x.tag_name()))
            .finish()
    }
}

impl FromIterator<Arc<dyn CustomDecoder>> for CustomRegistry {
    fn from_iter<I: IntoIterator<Item = Arc<dyn CustomDecoder>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
