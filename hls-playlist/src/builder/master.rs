use std::{
    collections::HashSet,
    fmt::{self, Display, Formatter},
};

use super::AttributeList;
use crate::format::{Alternative, MasterPlaylist, Variant, VariantParams, directives};

impl Display for MasterPlaylist {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // header
        writeln!(f, "{}", directives::EXTM3U)?;
        writeln!(f, "{}:{}", directives::VERSION, self.version.get())?;
        if self.independent_segments {
            writeln!(f, "{}", directives::INDEPENDENT_SEGMENTS)?;
        }
        self.custom.write_to(f)?;

        // variants, each preceded by renditions not written yet
        let mut written = HashSet::new();
        for variant in self.variants.iter() {
            for alternative in variant.params.alternatives.iter() {
                let identity = (
                    alternative.media_type.as_str(),
                    alternative.group_id.as_str(),
                    alternative.name.as_str(),
                    alternative.language.as_deref(),
                );
                if written.insert(identity) {
                    write_alternative(f, alternative)?;
                }
            }

            if variant.params.iframe {
                write_iframe_variant(f, variant)?;
            } else {
                self.write_variant(f, variant)?;
            }
        }
        Ok(())
    }
}

impl MasterPlaylist {
    fn write_variant(&self, f: &mut Formatter<'_>, variant: &Variant) -> fmt::Result {
        let params = &variant.params;
        let mut attributes = AttributeList::new(f, directives::STREAM_INF)?;
        write_common_params(&mut attributes, params)?;
        attributes.quoted_opt("AUDIO", params.audio.as_ref())?;
        attributes.quoted_opt("VIDEO", params.video.as_ref())?;
        attributes.quoted_opt("SUBTITLES", params.subtitles.as_ref())?;
        match params.captions.as_deref() {
            Some("NONE") => attributes.bare("CLOSED-CAPTIONS", "NONE")?,
            captions => attributes.quoted_opt("CLOSED-CAPTIONS", captions)?,
        }
        if let Some(frame_rate) = params.frame_rate {
            attributes.bare("FRAME-RATE", format_args!("{:.3}", frame_rate))?;
        }
        attributes.bare_opt("VIDEO-RANGE", params.video_range.as_ref())?;
        attributes.bare_opt("HDCP-LEVEL", params.hdcp_level.as_ref())?;
        attributes.quoted_opt("NAME", params.name.as_ref())?;
        attributes.finish()?;

        // extra query arguments go after any the URI already has
        match &self.args {
            Some(args) if variant.uri.contains('?') => writeln!(f, "{}&{}", variant.uri, args),
            Some(args) => writeln!(f, "{}?{}", variant.uri, args),
            None => writeln!(f, "{}", variant.uri),
        }
    }
}

fn write_common_params(attributes: &mut AttributeList<'_, '_>, params: &VariantParams) -> fmt::Result {
    attributes.bare_opt("PROGRAM-ID", params.program_id)?;
    attributes.bare("BANDWIDTH", params.bandwidth)?;
    attributes.bare_opt("AVERAGE-BANDWIDTH", params.average_bandwidth)?;
    attributes.quoted_opt("CODECS", params.codecs.as_ref())?;
    attributes.bare_opt("RESOLUTION", params.resolution.as_ref())
}

fn write_iframe_variant(f: &mut Formatter<'_>, variant: &Variant) -> fmt::Result {
    let params = &variant.params;
    let mut attributes = AttributeList::new(f, directives::I_FRAME_STREAM_INF)?;
    write_common_params(&mut attributes, params)?;
    attributes.quoted_opt("VIDEO", params.video.as_ref())?;
    attributes.bare_opt("VIDEO-RANGE", params.video_range.as_ref())?;
    attributes.bare_opt("HDCP-LEVEL", params.hdcp_level.as_ref())?;
    attributes.quoted("URI", &variant.uri)?;
    attributes.finish()
}

fn write_alternative(f: &mut Formatter<'_>, alternative: &Alternative) -> fmt::Result {
    let mut attributes = AttributeList::new(f, directives::MEDIA)?;
    attributes.bare("TYPE", &alternative.media_type)?;
    attributes.quoted("GROUP-ID", &alternative.group_id)?;
    attributes.quoted("NAME", &alternative.name)?;
    attributes.bare("DEFAULT", if alternative.default { "YES" } else { "NO" })?;
    attributes.bare_opt("AUTOSELECT", alternative.autoselect.as_ref())?;
    attributes.quoted_opt("LANGUAGE", alternative.language.as_ref())?;
    attributes.bare_opt("FORCED", alternative.forced.as_ref())?;
    attributes.quoted_opt("CHARACTERISTICS", alternative.characteristics.as_ref())?;
    attributes.quoted_opt("SUBTITLES", alternative.subtitles.as_ref())?;
    attributes.quoted_opt("INSTREAM-ID", alternative.instream_id.as_ref())?;
    attributes.quoted_opt("URI", alternative.uri.as_ref())?;
    attributes.finish()
}
