use std::mem;

use chrono::{DateTime, FixedOffset};
use log::{trace, warn};
use smol_str::SmolStr;

use super::{DecodeLine, DecodeOptions, LineContext, scte::CueParser};
use crate::{
    Error, Result,
    custom::CustomTags,
    format::{ByteRange, Carried, Key, Map, MediaPlaylist, MediaSegment, MediaType, directives},
    lexer::{Line, parse_attributes},
    time::{full_time_parse, strict_time_parse},
};

/// Tags read since the last URI line, applied to the next segment.
#[derive(Debug, Default)]
struct PendingSegment {
    /// Duration and title from `#EXTINF`.
    info: Option<(f64, SmolStr)>,
    byte_range: Option<ByteRange>,
    discontinuity: bool,
    program_date_time: Option<DateTime<FixedOffset>>,
    key: Option<Key>,
    map: Option<Map>,
    custom: CustomTags,
}

pub(crate) struct MediaDecoder<'a> {
    playlist: MediaPlaylist,
    options: &'a DecodeOptions,
    pending: PendingSegment,
    cues: CueParser,
    /// Key and map in effect for segments without their own tag.
    key: Option<Key>,
    map: Option<Map>,
    endlist: bool,
}

impl<'a> MediaDecoder<'a> {
    pub fn new(playlist: MediaPlaylist, options: &'a DecodeOptions) -> Self {
        Self {
            playlist,
            options,
            pending: PendingSegment::default(),
            cues: CueParser::default(),
            key: None,
            map: None,
            endlist: false,
        }
    }

    fn parse_tag(&mut self, context: &LineContext<'_>, name: &str, value: Option<&str>) -> Result<()> {
        if self.cues.tag(context, name, value)? {
            return Ok(());
        }

        match name {
            directives::EXTM3U => {}
            directives::EXTINF => self.parse_media_info(context, value.unwrap_or_default())?,
            directives::VERSION => {
                if let Some(version) = context.parse(value, "invalid version")? {
                    self.playlist.version.pin(version);
                }
            }
            directives::TARGET_DURATION => {
                self.playlist.target_duration = context.number(value, "invalid target duration")?
            }
            directives::MEDIA_SEQUENCE => {
                let seq_no = context.number(value, "invalid media sequence")?;
                self.playlist.segments.set_seq_no(seq_no);
            }
            directives::DISCONTINUITY_SEQUENCE => {
                self.playlist.discontinuity_seq = context.number(value, "invalid discontinuity sequence")?
            }
            directives::PLAYLIST_TYPE => match value.map(str::trim) {
                Some("EVENT") => self.playlist.media_type = Some(MediaType::Event),
                Some("VOD") => self.playlist.media_type = Some(MediaType::Vod),
                _ if context.strict => return Err(context.error("unknown playlist type")),
                _ => warn!("Unknown playlist type at line {}: {:?}", context.no, context.line),
            },
            directives::START => {
                for (key, value) in parse_attributes(value.unwrap_or_default()) {
                    match key {
                        "TIME-OFFSET" => {
                            self.playlist.start_time = context.number(Some(value), "invalid start offset")?
                        }
                        "PRECISE" => self.playlist.start_time_precise = value == "YES",
                        _ => {}
                    }
                }
            }
            directives::I_FRAMES_ONLY => self.playlist.set_iframes_only(true),
            directives::ENDLIST => self.endlist = true,
            directives::DISCONTINUITY => self.pending.discontinuity = true,
            directives::PROGRAM_DATE_TIME => self.parse_program_date_time(context, value.unwrap_or_default())?,
            directives::BYTERANGE => {
                self.pending.byte_range = context.parse(value, "invalid byte range")?;
            }
            directives::KEY => self.parse_key(context, value.unwrap_or_default())?,
            directives::MAP => self.parse_map(context, value.unwrap_or_default())?,
            _ => self.parse_custom(context)?,
        }
        Ok(())
    }

    /// `<duration>,[<title>]`
    fn parse_media_info(&mut self, context: &LineContext<'_>, value: &str) -> Result<()> {
        let (duration, title) = match value.split_once(',') {
            Some(x) => x,
            None if context.strict => return Err(context.error("missing comma after duration")),
            None => (value, ""),
        };

        let duration: f64 = context.number(Some(duration), "invalid segment duration")?;
        let duration = if duration.is_finite() && duration >= 0.0 {
            duration
        } else if context.strict {
            return Err(context.error("invalid segment duration"));
        } else {
            warn!("Negative segment duration at line {}, using zero", context.no);
            0.0
        };

        self.pending.info = Some((duration, title.trim().into()));
        Ok(())
    }

    fn parse_program_date_time(&mut self, context: &LineContext<'_>, value: &str) -> Result<()> {
        let parsed = if context.strict {
            strict_time_parse(value)
        } else {
            full_time_parse(value)
        };
        match parsed {
            Ok(time) => self.pending.program_date_time = Some(time),
            Err(_) if context.strict => return Err(context.error("invalid program date time")),
            Err(e) => warn!("Skipping program date time at line {}: {}", context.no, e),
        }
        Ok(())
    }

    fn parse_key(&mut self, context: &LineContext<'_>, value: &str) -> Result<()> {
        let mut key = Key::default();
        for (name, value) in parse_attributes(value) {
            let value = Some(SmolStr::from(value));
            match name {
                "METHOD" => key.method = value.unwrap_or_default(),
                "URI" => key.uri = value,
                "IV" => key.iv = value,
                "KEYFORMAT" => key.key_format = value,
                "KEYFORMATVERSIONS" => key.key_format_versions = value,
                _ => {}
            }
        }
        if key.method.is_empty() && context.strict {
            return Err(context.error("key without METHOD"));
        }

        self.playlist.version.raise(key.min_version());
        if self.playlist.count() == 0 {
            self.playlist.default_key = Some(key.clone());
        } else {
            self.pending.key = Some(key.clone());
        }
        self.key = Some(key);
        Ok(())
    }

    fn parse_map(&mut self, context: &LineContext<'_>, value: &str) -> Result<()> {
        let mut map = Map::default();
        for (name, value) in parse_attributes(value) {
            match name {
                "URI" => map.uri = value.into(),
                "BYTERANGE" => map.byte_range = context.parse(Some(value), "invalid map byte range")?,
                _ => {}
            }
        }

        self.playlist.version.raise(5);
        if self.playlist.count() == 0 {
            self.playlist.default_map = Some(map.clone());
        } else {
            self.pending.map = Some(map.clone());
        }
        self.map = Some(map);
        Ok(())
    }

    fn parse_custom(&mut self, context: &LineContext<'_>) -> Result<()> {
        let options = self.options;
        let Some(decoder) = options.registry.find(context.line) else {
            trace!("Ignoring line {}: {:?}", context.no, context.line);
            return Ok(());
        };

        let tag = decoder.decode(context.line).map_err(Error::Extension)?;
        if decoder.segment_tag() {
            self.pending.custom.set(tag);
        } else {
            self.playlist.custom.set(tag);
        }
        Ok(())
    }

    fn parse_uri(&mut self, context: &LineContext<'_>, uri: &str) -> Result<()> {
        let Some((duration, title)) = self.pending.info.take() else {
            if context.strict {
                return Err(context.error("segment URI without #EXTINF"));
            }
            warn!("Ignoring segment URI without #EXTINF at line {}", context.no);
            return Ok(());
        };

        let pending = mem::take(&mut self.pending);
        let key = match pending.key {
            Some(key) => Some(Carried::Explicit(key)),
            None => self.key.clone().map(Carried::Inherited),
        };
        let map = match pending.map {
            Some(map) => Some(Carried::Explicit(map)),
            None => self.map.clone().map(Carried::Inherited),
        };

        let segment = MediaSegment {
            seq_id: 0,
            uri: uri.into(),
            duration,
            title,
            byte_range: pending.byte_range,
            key,
            map,
            discontinuity: pending.discontinuity,
            program_date_time: pending.program_date_time,
            scte: self.cues.next_cue(duration),
            custom: pending.custom,
        };

        if self.playlist.segments.is_full() {
            self.playlist.segments.grow();
        }
        self.playlist.append_segment(segment).map_err(|e| match e {
            Error::InvalidState(reason) => context.error(reason),
            e => e,
        })
    }
}

impl DecodeLine for MediaDecoder<'_> {
    type Output = MediaPlaylist;

    fn decode_line(&mut self, context: &LineContext<'_>) -> Result<()> {
        match Line::classify(context.line) {
            Line::Tag { name, value } => self.parse_tag(context, name, value),
            Line::Comment => self.parse_custom(context),
            Line::Uri(uri) => self.parse_uri(context, uri),
        }
    }

    fn finish(mut self) -> Result<MediaPlaylist> {
        if self.pending.info.is_some() {
            warn!("Playlist ends with #EXTINF but no segment URI");
        }
        if self.endlist {
            self.playlist.close();
        }
        self.playlist.cache = None;
        Ok(self.playlist)
    }
}
