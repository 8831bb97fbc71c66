use std::{fmt, num::ParseIntError, str::FromStr};

mod master;
mod media;
mod scte;

pub use master::*;
pub use media::*;
pub use scte::*;

pub mod directives {
    pub const EXTM3U: &str = "#EXTM3U";
    pub const EXTINF: &str = "#EXTINF";
    pub const VERSION: &str = "#EXT-X-VERSION";
    pub const TARGET_DURATION: &str = "#EXT-X-TARGETDURATION";
    pub const MEDIA_SEQUENCE: &str = "#EXT-X-MEDIA-SEQUENCE";
    pub const DISCONTINUITY_SEQUENCE: &str = "#EXT-X-DISCONTINUITY-SEQUENCE";
    pub const PLAYLIST_TYPE: &str = "#EXT-X-PLAYLIST-TYPE";
    pub const START: &str = "#EXT-X-START";
    pub const KEY: &str = "#EXT-X-KEY";
    pub const MAP: &str = "#EXT-X-MAP";
    pub const PROGRAM_DATE_TIME: &str = "#EXT-X-PROGRAM-DATE-TIME";
    pub const BYTERANGE: &str = "#EXT-X-BYTERANGE";
    pub const DISCONTINUITY: &str = "#EXT-X-DISCONTINUITY";
    pub const I_FRAMES_ONLY: &str = "#EXT-X-I-FRAMES-ONLY";
    pub const ENDLIST: &str = "#EXT-X-ENDLIST";
    pub const INDEPENDENT_SEGMENTS: &str = "#EXT-X-INDEPENDENT-SEGMENTS";
    pub const MEDIA: &str = "#EXT-X-MEDIA";
    pub const STREAM_INF: &str = "#EXT-X-STREAM-INF";
    pub const I_FRAME_STREAM_INF: &str = "#EXT-X-I-FRAME-STREAM-INF";
    pub const SCTE35: &str = "#EXT-SCTE35";
    pub const OATCLS_SCTE35: &str = "#EXT-OATCLS-SCTE35";
    pub const CUE_OUT: &str = "#EXT-X-CUE-OUT";
    pub const CUE_OUT_CONT: &str = "#EXT-X-CUE-OUT-CONT";
    pub const CUE_IN: &str = "#EXT-X-CUE-IN";
}

/// Lowest protocol version ever written; floating point `EXTINF` needs 3.
pub const MIN_VERSION: u8 = 3;

/// Declared protocol version. Raised monotonically by the features a
/// playlist uses until it is pinned by an explicit `set_version` or an
/// `EXT-X-VERSION` tag in decoded input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Version {
    value: u8,
    pinned: bool,
}

impl Default for Version {
    fn default() -> Self {
        Self {
            value: MIN_VERSION,
            pinned: false,
        }
    }
}

impl Version {
    pub fn get(&self) -> u8 {
        self.value
    }

    pub fn raise(&mut self, min: u8) {
        if !self.pinned && self.value < min {
            self.value = min;
        }
    }

    pub fn pin(&mut self, value: u8) {
        self.value = value;
        self.pinned = true;
    }
}

/// `<length>[@<offset>]` sub-range of a resource. A missing offset means
/// the range starts right after the previous one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByteRange {
    pub length: u64,
    pub offset: Option<u64>,
}

impl ByteRange {
    pub fn new(length: u64, offset: Option<u64>) -> Self {
        Self { length, offset }
    }
}

impl FromStr for ByteRange {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(2, '@');
        let length = parts.next().unwrap_or_default().parse()?;
        let offset = parts.next().map(str::parse).transpose()?;
        Ok(Self { length, offset })
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.length)?;
        if let Some(offset) = self.offset {
            write!(f, "@{}", offset)?;
        }
        Ok(())
    }
}

/// Which kind of playlist a decode produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListType {
    Master,
    Media,
}

#[derive(Debug)]
pub enum Playlist {
    Master(MasterPlaylist),
    Media(MediaPlaylist),
}

impl Playlist {
    pub fn kind(&self) -> ListType {
        match self {
            Self::Master(_) => ListType::Master,
            Self::Media(_) => ListType::Media,
        }
    }

    pub fn as_master(&self) -> Option<&MasterPlaylist> {
        match self {
            Self::Master(p) => Some(p),
            Self::Media(_) => None,
        }
    }

    pub fn as_media(&self) -> Option<&MediaPlaylist> {
        match self {
            Self::Media(p) => Some(p),
            Self::Master(_) => None,
        }
    }

    pub fn into_master(self) -> Option<MasterPlaylist> {
        match self {
            Self::Master(p) => Some(p),
            Self::Media(_) => None,
        }
    }

    pub fn into_media(self) -> Option<MediaPlaylist> {
        match self {
            Self::Media(p) => Some(p),
            Self::Master(_) => None,
        }
    }

    /// Serialized form, memoized by the underlying playlist.
    pub fn encode(&mut self) -> &str {
        match self {
            Self::Master(p) => p.encode(),
            Self::Media(p) => p.encode(),
        }
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Master(p) => fmt::Display::fmt(p, f),
            Self::Media(p) => fmt::Display::fmt(p, f),
        }
    }
}
