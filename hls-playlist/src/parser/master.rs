use log::{trace, warn};
use smol_str::SmolStr;

use super::{DecodeLine, DecodeOptions, LineContext};
use crate::{
    Error, Result,
    format::{Alternative, MasterPlaylist, Variant, VariantParams, directives},
    lexer::{Line, parse_attributes},
};

pub(crate) struct MasterDecoder<'a> {
    playlist: MasterPlaylist,
    options: &'a DecodeOptions,
    /// `EXT-X-STREAM-INF` waiting for its URI line.
    stream_inf: Option<VariantParams>,
    /// Renditions in declaration order, attached to variants at the end.
    alternatives: Vec<Alternative>,
}

impl<'a> MasterDecoder<'a> {
    pub fn new(options: &'a DecodeOptions) -> Self {
        Self {
            playlist: MasterPlaylist::new(),
            options,
            stream_inf: None,
            alternatives: Vec::new(),
        }
    }

    fn parse_tag(&mut self, context: &LineContext<'_>, name: &str, value: Option<&str>) -> Result<()> {
        match name {
            directives::EXTM3U => {}
            directives::VERSION => {
                if let Some(version) = context.parse(value, "invalid version")? {
                    self.playlist.version.pin(version);
                }
            }
            directives::INDEPENDENT_SEGMENTS => self.playlist.independent_segments = true,
            directives::MEDIA => {
                let alternative = parse_alternative(context, value.unwrap_or_default())?;
                self.alternatives.push(alternative);
            }
            directives::STREAM_INF => {
                if self.stream_inf.is_some() {
                    if context.strict {
                        return Err(context.error("stream info without URI"));
                    }
                    warn!("Dropping stream info without URI before line {}", context.no);
                }
                let (params, _) = parse_variant_params(context, value.unwrap_or_default())?;
                self.stream_inf = Some(params);
            }
            directives::I_FRAME_STREAM_INF => {
                let (mut params, uri) = parse_variant_params(context, value.unwrap_or_default())?;
                params.iframe = true;
                let uri = match uri {
                    Some(x) => x,
                    None if context.strict => return Err(context.error("i-frame stream without URI")),
                    None => SmolStr::default(),
                };
                self.playlist.variants.push(Variant {
                    uri,
                    chunklist: None,
                    params,
                });
            }
            _ => self.parse_custom(context)?,
        }
        Ok(())
    }

    fn parse_custom(&mut self, context: &LineContext<'_>) -> Result<()> {
        let options = self.options;
        let Some(decoder) = options.registry.find(context.line) else {
            trace!("Ignoring line {}: {:?}", context.no, context.line);
            return Ok(());
        };

        let tag = decoder.decode(context.line).map_err(Error::Extension)?;
        self.playlist.custom.set(tag);
        Ok(())
    }

    fn parse_uri(&mut self, context: &LineContext<'_>, uri: &str) -> Result<()> {
        let Some(params) = self.stream_inf.take() else {
            if context.strict {
                return Err(context.error("variant URI without #EXT-X-STREAM-INF"));
            }
            warn!("Ignoring variant URI without stream info at line {}", context.no);
            return Ok(());
        };

        self.playlist.variants.push(Variant {
            uri: uri.into(),
            chunklist: None,
            params,
        });
        Ok(())
    }
}

impl DecodeLine for MasterDecoder<'_> {
    type Output = MasterPlaylist;

    fn decode_line(&mut self, context: &LineContext<'_>) -> Result<()> {
        match Line::classify(context.line) {
            Line::Tag { name, value } => self.parse_tag(context, name, value),
            Line::Comment => self.parse_custom(context),
            Line::Uri(uri) => self.parse_uri(context, uri),
        }
    }

    fn finish(mut self) -> Result<MasterPlaylist> {
        if self.stream_inf.is_some() {
            if self.options.strict {
                return Err(Error::InvalidState("playlist ends with stream info but no URI"));
            }
            warn!("Playlist ends with stream info but no URI");
        }

        for variant in self.playlist.variants.iter_mut() {
            let matching: Vec<_> = self
                .alternatives
                .iter()
                .filter(|x| x.belongs_to(&variant.params))
                .cloned()
                .collect();
            variant.params.alternatives.extend(matching);
        }
        if self
            .playlist
            .variants
            .iter()
            .any(|x| !x.params.alternatives.is_empty())
        {
            self.playlist.version.raise(4);
        }

        self.playlist.cache = None;
        Ok(self.playlist)
    }
}

fn parse_yes_no(context: &LineContext<'_>, value: &str) -> Result<bool> {
    match value {
        "YES" => Ok(true),
        "NO" => Ok(false),
        _ if context.strict => Err(context.error("expected YES or NO")),
        _ => Ok(false),
    }
}

fn parse_alternative(context: &LineContext<'_>, value: &str) -> Result<Alternative> {
    let mut alternative = Alternative::default();
    for (name, value) in parse_attributes(value) {
        let text = Some(SmolStr::from(value));
        match name {
            "TYPE" => alternative.media_type = value.into(),
            "GROUP-ID" => alternative.group_id = value.into(),
            "NAME" => alternative.name = value.into(),
            "URI" => alternative.uri = text,
            "DEFAULT" => alternative.default = parse_yes_no(context, value)?,
            "AUTOSELECT" => alternative.autoselect = text,
            "LANGUAGE" => alternative.language = text,
            "FORCED" => alternative.forced = text,
            "CHARACTERISTICS" => alternative.characteristics = text,
            "SUBTITLES" => alternative.subtitles = text,
            "INSTREAM-ID" => alternative.instream_id = text,
            _ => {}
        }
    }
    Ok(alternative)
}

/// Attributes shared by both stream-info tags, plus the `URI` attribute of
/// the i-frame form.
fn parse_variant_params(
    context: &LineContext<'_>,
    value: &str,
) -> Result<(VariantParams, Option<SmolStr>)> {
    let mut params = VariantParams::default();
    let mut uri = None;
    for (name, value) in parse_attributes(value) {
        let text = Some(SmolStr::from(value));
        match name {
            "PROGRAM-ID" => params.program_id = context.parse(Some(value), "invalid program id")?,
            "BANDWIDTH" => params.bandwidth = context.number(Some(value), "invalid bandwidth")?,
            "AVERAGE-BANDWIDTH" => {
                params.average_bandwidth = context.parse(Some(value), "invalid average bandwidth")?
            }
            "CODECS" => params.codecs = text,
            "RESOLUTION" => params.resolution = text,
            "FRAME-RATE" => params.frame_rate = context.parse(Some(value), "invalid frame rate")?,
            "AUDIO" => params.audio = text,
            "VIDEO" => params.video = text,
            "SUBTITLES" => params.subtitles = text,
            "CLOSED-CAPTIONS" => params.captions = text,
            "VIDEO-RANGE" => params.video_range = text,
            "HDCP-LEVEL" => params.hdcp_level = text,
            "NAME" => params.name = text,
            "URI" => uri = text,
            _ => {}
        }
    }
    Ok((params, uri))
}
