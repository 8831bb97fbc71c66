use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use smol_str::SmolStr;

use crate::{
    Error, Result,
    custom::{CustomTag, CustomTags},
    format::{ByteRange, Scte, Version},
    ring::{SegmentRing, Segments},
};

/// `EXT-X-KEY` encryption descriptor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Key {
    pub method: SmolStr,
    pub uri: Option<SmolStr>,
    pub iv: Option<SmolStr>,
    pub key_format: Option<SmolStr>,
    pub key_format_versions: Option<SmolStr>,
}

impl Key {
    pub fn new(
        method: impl Into<SmolStr>,
        uri: impl Into<SmolStr>,
        iv: impl Into<SmolStr>,
        key_format: impl Into<SmolStr>,
        key_format_versions: impl Into<SmolStr>,
    ) -> Self {
        Self {
            method: method.into(),
            uri: non_empty(uri.into()),
            iv: non_empty(iv.into()),
            key_format: non_empty(key_format.into()),
            key_format_versions: non_empty(key_format_versions.into()),
        }
    }

    /// Protocol version the key attributes require.
    pub(crate) fn min_version(&self) -> u8 {
        if self.key_format.is_some() || self.key_format_versions.is_some() {
            5
        } else {
            super::MIN_VERSION
        }
    }
}

/// `EXT-X-MAP` media initialization section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Map {
    pub uri: SmolStr,
    pub byte_range: Option<ByteRange>,
}

impl Map {
    /// A zero `length` means the whole resource.
    pub fn new(uri: impl Into<SmolStr>, length: u64, offset: u64) -> Self {
        Self {
            uri: uri.into(),
            byte_range: (length > 0).then(|| ByteRange::new(length, Some(offset))),
        }
    }
}

/// How a key or map came to be attached to a segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Carried<T> {
    /// Prevailing value at the time the segment was read; written only if it
    /// differs from what the previous segment left in effect.
    Inherited(T),
    /// Set on this segment explicitly; always written before it.
    Explicit(T),
}

impl<T> Carried<T> {
    pub fn get(&self) -> &T {
        match self {
            Self::Inherited(x) | Self::Explicit(x) => x,
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MediaSegment {
    /// Assigned on append, unique for the playlist's lifetime.
    pub seq_id: u64,
    pub uri: SmolStr,
    pub duration: f64,
    pub title: SmolStr,
    pub byte_range: Option<ByteRange>,
    pub key: Option<Carried<Key>>,
    pub map: Option<Carried<Map>>,
    pub discontinuity: bool,
    pub program_date_time: Option<DateTime<FixedOffset>>,
    pub scte: Option<Scte>,
    pub custom: CustomTags,
}

impl MediaSegment {
    pub fn new(uri: impl Into<SmolStr>, duration: f64, title: impl Into<SmolStr>) -> Self {
        Self {
            uri: uri.into(),
            duration,
            title: title.into(),
            ..Default::default()
        }
    }
}

/// `EXT-X-PLAYLIST-TYPE` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaType {
    Event,
    Vod,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "EVENT",
            Self::Vod => "VOD",
        }
    }
}

/// A list of media segments, either a finite VOD list or the sliding window
/// of a live stream.
#[derive(Clone, Debug)]
pub struct MediaPlaylist {
    pub(crate) segments: SegmentRing,
    pub(crate) target_duration: f64,
    pub(crate) discontinuity_seq: u64,
    pub(crate) closed: bool,
    pub(crate) media_type: Option<MediaType>,
    pub(crate) iframes_only: bool,
    pub(crate) start_time: f64,
    pub(crate) start_time_precise: bool,
    pub(crate) winsize: usize,
    pub(crate) version: Version,
    pub(crate) default_key: Option<Key>,
    pub(crate) default_map: Option<Map>,
    pub(crate) custom: CustomTags,
    pub(crate) duration_as_int: bool,
    pub(crate) cache: Option<String>,
}

impl MediaPlaylist {
    /// `winsize` is how many of the most recent segments are written out, 0
    /// meaning all of them; `capacity` bounds how many are stored.
    pub fn new(winsize: usize, capacity: usize) -> Result<Self> {
        if winsize > capacity {
            return Err(Error::InvalidWindow { winsize, capacity });
        }

        Ok(Self {
            segments: SegmentRing::new(capacity),
            target_duration: 0.0,
            discontinuity_seq: 0,
            closed: false,
            media_type: None,
            iframes_only: false,
            start_time: 0.0,
            start_time_precise: false,
            winsize,
            version: Version::default(),
            default_key: None,
            default_map: None,
            custom: CustomTags::new(),
            duration_as_int: false,
            cache: None,
        })
    }

    pub fn append(
        &mut self,
        uri: impl Into<SmolStr>,
        duration: f64,
        title: impl Into<SmolStr>,
    ) -> Result<()> {
        self.append_segment(MediaSegment::new(uri, duration, title))
    }

    /// Appends a prepared segment. Its `seq_id` is overwritten.
    pub fn append_segment(&mut self, segment: MediaSegment) -> Result<()> {
        if self.closed {
            return Err(Error::Closed);
        }
        let duration = segment.duration;
        let min_version = segment_min_version(&segment);
        self.segments.push(segment)?;
        self.segment_added(duration, min_version);
        Ok(())
    }

    /// Appends a segment, evicting the oldest one if the playlist is full.
    pub fn slide(
        &mut self,
        uri: impl Into<SmolStr>,
        duration: f64,
        title: impl Into<SmolStr>,
    ) -> Result<()> {
        if self.closed {
            return Err(Error::Closed);
        }
        self.segments
            .slide(MediaSegment::new(uri, duration, title))?;
        self.segment_added(duration, super::MIN_VERSION);
        Ok(())
    }

    /// Evicts the oldest segment.
    pub fn remove(&mut self) -> Result<MediaSegment> {
        let segment = self
            .segments
            .pop_front()
            .ok_or(Error::InvalidState("playlist is empty"))?;
        self.cache = None;
        Ok(segment)
    }

    fn segment_added(&mut self, duration: f64, min_version: u8) {
        if self.target_duration < duration {
            self.target_duration = duration.ceil();
        }
        self.version.raise(min_version);
        self.cache = None;
    }

    fn last_mut(&mut self) -> Result<&mut MediaSegment> {
        self.cache = None;
        self.segments
            .last_mut()
            .ok_or(Error::InvalidState("playlist has no segments"))
    }

    /// Marks the last segment as following a discontinuity.
    pub fn set_discontinuity(&mut self) -> Result<()> {
        self.last_mut()?.discontinuity = true;
        Ok(())
    }

    pub fn set_program_date_time(&mut self, time: DateTime<FixedOffset>) -> Result<()> {
        self.last_mut()?.program_date_time = Some(time);
        Ok(())
    }

    /// Sets the byte range of the last segment. An offset that continues
    /// the previous segment's range of the same resource is dropped.
    pub fn set_range(&mut self, length: u64, offset: Option<u64>) -> Result<()> {
        let offset = match (offset, self.previous_range_end()) {
            (Some(x), Some(end)) if x == end => None,
            (x, _) => x,
        };
        self.last_mut()?.byte_range = Some(ByteRange::new(length, offset));
        self.version.raise(4);
        Ok(())
    }

    /// Byte after the range of the segment before the last one, when the
    /// last segment shares its resource.
    fn previous_range_end(&self) -> Option<u64> {
        let last = self.segments.last()?;
        let mut end: Option<(&str, u64)> = None;
        for segment in self.segments().take(self.count() - 1) {
            end = segment.byte_range.and_then(|range| {
                let start = match (range.offset, end) {
                    (Some(offset), _) => offset,
                    (None, Some((uri, end))) if segment.uri == uri => end,
                    (None, _) => return None,
                };
                Some((segment.uri.as_str(), start.checked_add(range.length)?))
            });
        }
        end.filter(|(uri, _)| last.uri.as_str() == *uri)
            .map(|(_, end)| end)
    }

    /// Overrides the encryption key starting at the last segment.
    pub fn set_key(
        &mut self,
        method: impl Into<SmolStr>,
        uri: impl Into<SmolStr>,
        iv: impl Into<SmolStr>,
        key_format: impl Into<SmolStr>,
        key_format_versions: impl Into<SmolStr>,
    ) -> Result<()> {
        let key = Key::new(method, uri, iv, key_format, key_format_versions);
        let min_version = key.min_version();
        self.last_mut()?.key = Some(Carried::Explicit(key));
        self.version.raise(min_version);
        Ok(())
    }

    /// Key written once in the playlist header and in effect for every
    /// segment that does not override it.
    pub fn set_default_key(
        &mut self,
        method: impl Into<SmolStr>,
        uri: impl Into<SmolStr>,
        iv: impl Into<SmolStr>,
        key_format: impl Into<SmolStr>,
        key_format_versions: impl Into<SmolStr>,
    ) -> Result<()> {
        let key = Key::new(method, uri, iv, key_format, key_format_versions);
        self.version.raise(key.min_version());
        self.default_key = Some(key);
        self.cache = None;
        Ok(())
    }

    /// Overrides the initialization section starting at the last segment.
    pub fn set_map(&mut self, uri: impl Into<SmolStr>, length: u64, offset: u64) -> Result<()> {
        self.last_mut()?.map = Some(Carried::Explicit(Map::new(uri, length, offset)));
        self.version.raise(5);
        Ok(())
    }

    pub fn set_default_map(&mut self, uri: impl Into<SmolStr>, length: u64, offset: u64) {
        self.default_map = Some(Map::new(uri, length, offset));
        self.version.raise(5);
        self.cache = None;
    }

    /// Attaches a point-in-time `#EXT-SCTE35` cue to the last segment.
    pub fn set_scte(
        &mut self,
        cue: impl Into<SmolStr>,
        id: impl Into<SmolStr>,
        time: f64,
    ) -> Result<()> {
        self.set_scte35(Scte::point(cue, non_empty(id.into()), time))
    }

    pub fn set_scte35(&mut self, scte: Scte) -> Result<()> {
        self.last_mut()?.scte = Some(scte);
        Ok(())
    }

    pub fn set_custom_tag(&mut self, tag: Arc<dyn CustomTag>) {
        self.custom.set(tag);
        self.cache = None;
    }

    pub fn set_custom_segment_tag(&mut self, tag: Arc<dyn CustomTag>) -> Result<()> {
        self.last_mut()?.custom.set(tag);
        Ok(())
    }

    /// Finalizes the playlist; no segment can be appended afterwards.
    pub fn close(&mut self) {
        self.closed = true;
        self.cache = None;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn count(&self) -> usize {
        self.segments.len()
    }

    pub fn capacity(&self) -> usize {
        self.segments.capacity()
    }

    /// Live segments, oldest first.
    pub fn segments(&self) -> Segments<'_> {
        self.segments.iter()
    }

    /// Segment at `index` counted from the oldest live one.
    pub fn segment(&self, index: usize) -> Option<&MediaSegment> {
        self.segments.get(index)
    }

    pub fn segment_mut(&mut self, index: usize) -> Option<&mut MediaSegment> {
        self.cache = None;
        self.segments.get_mut(index)
    }

    pub fn last(&self) -> Option<&MediaSegment> {
        self.segments.last()
    }

    /// Sequence number of the oldest live segment.
    pub fn seq_no(&self) -> u64 {
        self.segments.seq_no()
    }

    /// Only meaningful before the first append: SeqIds continue from here.
    pub fn set_seq_no(&mut self, seq_no: u64) {
        self.segments.set_seq_no(seq_no);
        self.cache = None;
    }

    pub fn target_duration(&self) -> f64 {
        self.target_duration
    }

    pub fn set_target_duration(&mut self, target_duration: f64) {
        self.target_duration = target_duration;
        self.cache = None;
    }

    pub fn discontinuity_seq(&self) -> u64 {
        self.discontinuity_seq
    }

    pub fn set_discontinuity_seq(&mut self, seq: u64) {
        self.discontinuity_seq = seq;
        self.cache = None;
    }

    pub fn media_type(&self) -> Option<MediaType> {
        self.media_type
    }

    pub fn set_media_type(&mut self, media_type: Option<MediaType>) {
        self.media_type = media_type;
        self.cache = None;
    }

    pub fn iframes_only(&self) -> bool {
        self.iframes_only
    }

    pub fn set_iframes_only(&mut self, iframes_only: bool) {
        self.iframes_only = iframes_only;
        if iframes_only {
            self.version.raise(4);
        }
        self.cache = None;
    }

    /// `EXT-X-START` offset in seconds, 0 when absent.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn set_start_time(&mut self, offset: f64, precise: bool) {
        self.start_time = offset;
        self.start_time_precise = precise;
        self.cache = None;
    }

    pub fn start_time_precise(&self) -> bool {
        self.start_time_precise
    }

    pub fn default_key(&self) -> Option<&Key> {
        self.default_key.as_ref()
    }

    pub fn default_map(&self) -> Option<&Map> {
        self.default_map.as_ref()
    }

    pub fn custom(&self) -> &CustomTags {
        &self.custom
    }

    pub fn version(&self) -> u8 {
        self.version.get()
    }

    /// Pins the declared version; feature use no longer raises it.
    pub fn set_version(&mut self, version: u8) {
        self.version.pin(version);
        self.cache = None;
    }

    pub fn win_size(&self) -> usize {
        self.winsize
    }

    pub fn set_win_size(&mut self, winsize: usize) -> Result<()> {
        if winsize > self.capacity() {
            return Err(Error::InvalidWindow {
                winsize,
                capacity: self.capacity(),
            });
        }
        self.winsize = winsize;
        self.cache = None;
        Ok(())
    }

    /// Write segment durations as whole seconds instead of three decimals.
    pub fn set_duration_as_int(&mut self, as_int: bool) {
        self.duration_as_int = as_int;
        self.cache = None;
    }

    /// Forces the next [`encode`](Self::encode) to rebuild its output.
    pub fn reset_cache(&mut self) {
        self.cache = None;
    }
}

fn segment_min_version(segment: &MediaSegment) -> u8 {
    let mut version = super::MIN_VERSION;
    if segment.byte_range.is_some() {
        version = version.max(4);
    }
    if let Some(key) = &segment.key {
        version = version.max(key.get().min_version());
    }
    if segment.map.is_some() {
        version = version.max(5);
    }
    version
}

pub(crate) fn non_empty(value: SmolStr) -> Option<SmolStr> {
    (!value.is_empty()).then_some(value)
}
