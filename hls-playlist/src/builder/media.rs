use std::fmt::{self, Display, Formatter};

use super::AttributeList;
use crate::{
    format::{Carried, CueForm, CueType, Key, Map, MediaPlaylist, MediaSegment, Scte, ScteSyntax, directives},
    time::format_time,
};

impl Display for MediaPlaylist {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // header
        writeln!(f, "{}", directives::EXTM3U)?;
        writeln!(f, "{}:{}", directives::VERSION, self.version.get())?;
        self.custom.write_to(f)?;
        if let Some(key) = &self.default_key {
            write_key(f, key)?;
        }
        if let Some(map) = &self.default_map {
            write_map(f, map)?;
        }
        if let Some(media_type) = self.media_type {
            writeln!(f, "{}:{}", directives::PLAYLIST_TYPE, media_type.as_str())?;
        }

        let window = self.window();
        let seq_no = window.clone().next().map_or(self.seq_no(), |x| x.seq_id);
        writeln!(f, "{}:{}", directives::MEDIA_SEQUENCE, seq_no)?;
        writeln!(
            f,
            "{}:{}",
            directives::TARGET_DURATION,
            self.target_duration.ceil() as u64
        )?;
        if self.start_time != 0.0 {
            let mut attributes = AttributeList::new(f, directives::START)?;
            attributes.bare("TIME-OFFSET", self.start_time)?;
            if self.start_time_precise {
                attributes.bare("PRECISE", "YES")?;
            }
            attributes.finish()?;
        }
        if self.discontinuity_seq != 0 {
            writeln!(
                f,
                "{}:{}",
                directives::DISCONTINUITY_SEQUENCE,
                self.discontinuity_seq
            )?;
        }
        if self.iframes_only {
            writeln!(f, "{}", directives::I_FRAMES_ONLY)?;
        }

        // segments
        let mut key = self.default_key.as_ref();
        let mut map = self.default_map.as_ref();
        for segment in window {
            self.write_segment(f, segment, &mut key, &mut map)?;
        }

        if self.closed {
            writeln!(f, "{}", directives::ENDLIST)?;
        }
        Ok(())
    }
}

impl MediaPlaylist {
    /// The `winsize` most recent segments, or all of them for a zero window.
    fn window(&self) -> impl Iterator<Item = &MediaSegment> + Clone {
        let skip = match self.winsize {
            0 => 0,
            winsize => self.count().saturating_sub(winsize),
        };
        self.segments().skip(skip)
    }

    fn write_segment<'a>(
        &self,
        f: &mut Formatter<'_>,
        segment: &'a MediaSegment,
        key: &mut Option<&'a Key>,
        map: &mut Option<&'a Map>,
    ) -> fmt::Result {
        if let Some(scte) = &segment.scte {
            write_scte(f, scte)?;
        }
        if let Some(carried) = &segment.key {
            if changes(carried, *key) {
                write_key(f, carried.get())?;
            }
            *key = Some(carried.get());
        }
        if segment.discontinuity {
            writeln!(f, "{}", directives::DISCONTINUITY)?;
        }
        if let Some(carried) = &segment.map {
            if changes(carried, *map) {
                write_map(f, carried.get())?;
            }
            *map = Some(carried.get());
        }
        if let Some(time) = &segment.program_date_time {
            writeln!(f, "{}:{}", directives::PROGRAM_DATE_TIME, format_time(time))?;
        }
        if let Some(range) = &segment.byte_range {
            writeln!(f, "{}:{}", directives::BYTERANGE, range)?;
        }
        segment.custom.write_to(f)?;

        // #EXTINF:duration,title
        if self.duration_as_int {
            write!(f, "{}:{}", directives::EXTINF, segment.duration.ceil() as u64)?;
        } else {
            write!(f, "{}:{:.3}", directives::EXTINF, segment.duration)?;
        }
        writeln!(f, ",{}", segment.title)?;
        writeln!(f, "{}", segment.uri)
    }
}

/// Explicit values are always written; inherited ones only when they differ
/// from what is already in effect.
fn changes<T: PartialEq>(carried: &Carried<T>, current: Option<&T>) -> bool {
    carried.is_explicit() || current != Some(carried.get())
}

fn write_key(f: &mut Formatter<'_>, key: &Key) -> fmt::Result {
    let mut attributes = AttributeList::new(f, directives::KEY)?;
    attributes.bare("METHOD", &key.method)?;
    if key.method != "NONE" {
        attributes.quoted_opt("URI", key.uri.as_ref())?;
        attributes.bare_opt("IV", key.iv.as_ref())?;
        attributes.quoted_opt("KEYFORMAT", key.key_format.as_ref())?;
        attributes.quoted_opt("KEYFORMATVERSIONS", key.key_format_versions.as_ref())?;
    }
    attributes.finish()
}

fn write_map(f: &mut Formatter<'_>, map: &Map) -> fmt::Result {
    let mut attributes = AttributeList::new(f, directives::MAP)?;
    attributes.quoted("URI", &map.uri)?;
    attributes.bare_opt("BYTERANGE", map.byte_range.as_ref())?;
    attributes.finish()
}

fn write_scte(f: &mut Formatter<'_>, scte: &Scte) -> fmt::Result {
    match (scte.syntax, scte.cue_type) {
        (ScteSyntax::Scte35_67_2014, _) => {
            let mut attributes = AttributeList::new(f, directives::SCTE35)?;
            attributes.quoted("CUE", &scte.cue)?;
            attributes.quoted_opt("ID", scte.id.as_ref())?;
            if scte.time != 0.0 {
                attributes.bare("TIME", scte.time)?;
            }
            attributes.finish()
        }
        (ScteSyntax::Oatcls, CueType::Start) => {
            if !scte.cue.is_empty() {
                writeln!(f, "{}:{}", directives::OATCLS_SCTE35, scte.cue)?;
            }
            match scte.form {
                _ if scte.time == 0.0 => writeln!(f, "{}", directives::CUE_OUT),
                CueForm::Keyed => writeln!(f, "{}:DURATION={}", directives::CUE_OUT, scte.time),
                _ => writeln!(f, "{}:{}", directives::CUE_OUT, scte.time),
            }
        }
        (ScteSyntax::Oatcls, CueType::Mid) if scte.implicit => Ok(()),
        (ScteSyntax::Oatcls, CueType::Mid) if scte.form == CueForm::Fraction => {
            writeln!(f, "{}:{}/{}", directives::CUE_OUT_CONT, scte.elapsed, scte.time)
        }
        (ScteSyntax::Oatcls, CueType::Mid) => {
            let mut attributes = AttributeList::new(f, directives::CUE_OUT_CONT)?;
            attributes.bare("ElapsedTime", scte.elapsed)?;
            attributes.bare("Duration", scte.time)?;
            if !scte.cue.is_empty() {
                attributes.bare("SCTE35", &scte.cue)?;
            }
            attributes.finish()
        }
        (ScteSyntax::Oatcls, CueType::End) => writeln!(f, "{}", directives::CUE_IN),
    }
}
