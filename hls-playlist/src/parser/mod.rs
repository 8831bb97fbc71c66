//! Line-driven playlist decoders.
//!
//! [`Parser`] reads the `#EXTM3U` header and hands every following line to a
//! [`DecodeLine`] state machine: [`media::MediaDecoder`] or
//! [`master::MasterDecoder`]. Autodetection buffers the lines it had to look
//! at before it could tell the two kinds apart and replays them.

use std::{io::BufRead, str::FromStr, sync::Arc};

use log::{debug, warn};

use crate::{
    Error, Result,
    custom::{CustomDecoder, CustomRegistry},
    format::{ListType, MasterPlaylist, MediaPlaylist, MediaType, Playlist, directives},
    lexer::{Line, LineReader},
};

mod master;
mod media;
mod scte;

use master::MasterDecoder;
use media::MediaDecoder;

/// Window size of a media playlist built by autodetection.
pub const DEFAULT_WINSIZE: usize = 8;
/// Initial segment capacity of a media playlist built by autodetection.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Decoding switches shared by every decode entry point.
#[derive(Clone, Debug, Default)]
pub struct DecodeOptions {
    strict: bool,
    registry: CustomRegistry,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on malformed values instead of substituting zero.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_decoder(mut self, decoder: Arc<dyn CustomDecoder>) -> Self {
        self.registry.register(decoder);
        self
    }

    pub fn with_registry(mut self, registry: CustomRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn registry(&self) -> &CustomRegistry {
        &self.registry
    }
}

/// One line being decoded, carried along for error reporting.
pub(crate) struct LineContext<'a> {
    pub no: usize,
    pub line: &'a str,
    pub strict: bool,
}

impl LineContext<'_> {
    pub fn error(&self, reason: &'static str) -> Error {
        Error::parse(self.no, self.line, reason)
    }

    /// Parses a numeric field. Lenient decoding degrades malformed input to
    /// the zero value.
    pub fn number<T: FromStr + Default>(&self, value: Option<&str>, reason: &'static str) -> Result<T> {
        match self.parse(value, reason)? {
            Some(x) => Ok(x),
            None => Ok(T::default()),
        }
    }

    /// Parses a field that has no sensible zero value; lenient decoding
    /// yields `None` for malformed input.
    pub fn parse<T: FromStr>(&self, value: Option<&str>, reason: &'static str) -> Result<Option<T>> {
        match value.map(str::trim).unwrap_or_default().parse() {
            Ok(x) => Ok(Some(x)),
            Err(_) if self.strict => Err(self.error(reason)),
            Err(_) => {
                warn!("{} at line {}, ignoring: {:?}", reason, self.no, self.line);
                Ok(None)
            }
        }
    }
}

/// Playlist state machine fed one non-blank line at a time.
pub(crate) trait DecodeLine {
    type Output;

    fn decode_line(&mut self, context: &LineContext<'_>) -> Result<()>;

    fn finish(self) -> Result<Self::Output>;
}

pub struct Parser<R: BufRead> {
    lines: LineReader<R>,
    options: DecodeOptions,
}

impl<R: BufRead> Parser<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, DecodeOptions::default())
    }

    pub fn with_options(reader: R, options: DecodeOptions) -> Self {
        Self {
            lines: LineReader::new(reader),
            options,
        }
    }

    fn parse_m3u_header(&mut self) -> Result<()> {
        match self.lines.next_line()? {
            Some((_, line)) if line.starts_with(directives::EXTM3U) => Ok(()),
            _ => Err(Error::NotAPlaylist),
        }
    }

    /// Decodes a media playlist whose segment store starts at `capacity`
    /// and grows as needed.
    pub fn parse_media(mut self, winsize: usize, capacity: usize) -> Result<MediaPlaylist> {
        self.parse_m3u_header()?;
        let decoder = MediaDecoder::new(MediaPlaylist::new(winsize, capacity)?, &self.options);
        let playlist = feed(&mut self.lines, Vec::new(), decoder, self.options.strict)?;

        debug!("Decoded media playlist with {} segments", playlist.count());
        Ok(playlist)
    }

    pub fn parse_master(mut self) -> Result<MasterPlaylist> {
        self.parse_m3u_header()?;
        let decoder = MasterDecoder::new(&self.options);
        let playlist = feed(&mut self.lines, Vec::new(), decoder, self.options.strict)?;

        debug!("Decoded master playlist with {} variants", playlist.variants().len());
        Ok(playlist)
    }

    /// Decodes either kind of playlist, telling them apart by the first
    /// directive specific to one of them.
    pub fn parse(mut self) -> Result<(Playlist, ListType)> {
        self.parse_m3u_header()?;

        let mut peeked = Vec::new();
        let kind = loop {
            let Some((no, line)) = self.lines.next_line()? else {
                break ListType::Media;
            };
            let kind = detect(line);
            peeked.push((no, line.to_owned()));
            if let Some(kind) = kind {
                break kind;
            }
        };

        let strict = self.options.strict;
        match kind {
            ListType::Master => {
                let decoder = MasterDecoder::new(&self.options);
                let playlist = feed(&mut self.lines, peeked, decoder, strict)?;
                debug!("Detected master playlist with {} variants", playlist.variants().len());
                Ok((Playlist::Master(playlist), ListType::Master))
            }
            ListType::Media => {
                let playlist = MediaPlaylist::new(DEFAULT_WINSIZE, DEFAULT_CAPACITY)?;
                let decoder = MediaDecoder::new(playlist, &self.options);
                let mut playlist = feed(&mut self.lines, peeked, decoder, strict)?;

                playlist.winsize = if playlist.closed || playlist.media_type == Some(MediaType::Event) {
                    0
                } else {
                    playlist
                        .count()
                        .max(DEFAULT_WINSIZE)
                        .min(playlist.capacity())
                };
                debug!("Detected media playlist with {} segments", playlist.count());
                Ok((Playlist::Media(playlist), ListType::Media))
            }
        }
    }
}

/// Master-only or media-only directive, if `line` is one.
fn detect(line: &str) -> Option<ListType> {
    let Line::Tag { name, .. } = Line::classify(line) else {
        return None;
    };
    match name {
        directives::STREAM_INF | directives::I_FRAME_STREAM_INF | directives::MEDIA => {
            Some(ListType::Master)
        }
        directives::EXTINF
        | directives::TARGET_DURATION
        | directives::MEDIA_SEQUENCE
        | directives::PLAYLIST_TYPE => Some(ListType::Media),
        _ => None,
    }
}

fn feed<R: BufRead, D: DecodeLine>(
    lines: &mut LineReader<R>,
    peeked: Vec<(usize, String)>,
    mut decoder: D,
    strict: bool,
) -> Result<D::Output> {
    for (no, line) in peeked.iter() {
        decoder.decode_line(&LineContext { no: *no, line, strict })?;
    }
    while let Some((no, line)) = lines.next_line()? {
        decoder.decode_line(&LineContext { no, line, strict })?;
    }
    decoder.finish()
}

/// Decodes a playlist of either kind.
pub fn decode_from<R: BufRead>(reader: R, strict: bool) -> Result<(Playlist, ListType)> {
    Parser::with_options(reader, DecodeOptions::new().strict(strict)).parse()
}

/// Like [`decode_from`], offering unknown tags to `registry`.
pub fn decode_with<R: BufRead>(
    reader: R,
    strict: bool,
    registry: CustomRegistry,
) -> Result<(Playlist, ListType)> {
    let options = DecodeOptions::new().strict(strict).with_registry(registry);
    Parser::with_options(reader, options).parse()
}

impl MediaPlaylist {
    /// Replaces this playlist with the decoded one, keeping its window
    /// size. On error `self` is left untouched.
    pub fn decode_from<R: BufRead>(&mut self, reader: R, strict: bool) -> Result<()> {
        self.decode_with(reader, DecodeOptions::new().strict(strict))
    }

    pub fn decode_with<R: BufRead>(&mut self, reader: R, options: DecodeOptions) -> Result<()> {
        *self = Parser::with_options(reader, options).parse_media(self.winsize, self.capacity())?;
        Ok(())
    }

    pub fn decode(&mut self, input: &str, strict: bool) -> Result<()> {
        self.decode_from(input.as_bytes(), strict)
    }
}

impl MasterPlaylist {
    /// Replaces this playlist with the decoded one. On error `self` is
    /// left untouched.
    pub fn decode_from<R: BufRead>(&mut self, reader: R, strict: bool) -> Result<()> {
        self.decode_with(reader, DecodeOptions::new().strict(strict))
    }

    pub fn decode_with<R: BufRead>(&mut self, reader: R, options: DecodeOptions) -> Result<()> {
        *self = Parser::with_options(reader, options).parse_master()?;
        Ok(())
    }

    pub fn decode(&mut self, input: &str, strict: bool) -> Result<()> {
        self.decode_from(input.as_bytes(), strict)
    }
}
