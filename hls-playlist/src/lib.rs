//! # hls-playlist
//! A library for decoding and encoding HLS (m3u8) master and media playlists
//!
//! # Example
//! ```rust
//! use hls_playlist::{ListType, MediaPlaylist, decode_from};
//!
//! // 1. Build a live playlist showing the three most recent segments
//! let mut playlist = MediaPlaylist::new(3, 10)?;
//! for i in 0..5 {
//!     playlist.append(format!("segment{}.ts", i), 9.009, "")?;
//! }
//! let encoded = playlist.encode().to_owned();
//! assert!(encoded.contains("#EXT-X-MEDIA-SEQUENCE:2\n"));
//!
//! // 2. Parse it back without knowing its kind
//! let (decoded, kind) = decode_from(encoded.as_bytes(), true)?;
//! assert_eq!(kind, ListType::Media);
//! assert_eq!(decoded.as_media().map(|x| x.count()), Some(3));
//! # Ok::<(), hls_playlist::Error>(())
//! ```

mod builder;
mod custom;
mod error;
pub mod format;
mod lexer;
mod parser;
mod ring;
pub mod time;

#[cfg(test)]
mod test_fixtures;

pub use custom::{CustomDecoder, CustomRegistry, CustomTag, CustomTags};
pub use error::{BoxError, Error, Result};
pub use format::{
    Alternative, ByteRange, Carried, CueForm, CueType, Key, ListType, Map, MasterPlaylist, MediaPlaylist,
    MediaSegment, MediaType, Playlist, Scte, ScteSyntax, Variant, VariantParams,
};
pub use parser::*;
pub use ring::Segments;
