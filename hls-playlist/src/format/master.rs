use std::sync::Arc;

use smol_str::SmolStr;

use crate::{
    custom::{CustomTag, CustomTags},
    format::{MediaPlaylist, Version},
};

/// `EXT-X-MEDIA` rendition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Alternative {
    /// `AUDIO`, `VIDEO`, `SUBTITLES` or `CLOSED-CAPTIONS`.
    pub media_type: SmolStr,
    pub group_id: SmolStr,
    pub name: SmolStr,
    pub uri: Option<SmolStr>,
    pub default: bool,
    pub autoselect: Option<SmolStr>,
    pub language: Option<SmolStr>,
    pub forced: Option<SmolStr>,
    pub characteristics: Option<SmolStr>,
    pub subtitles: Option<SmolStr>,
    pub instream_id: Option<SmolStr>,
}

impl Alternative {
    /// Whether a variant with these params references this rendition's group.
    pub(crate) fn belongs_to(&self, params: &VariantParams) -> bool {
        let group = match self.media_type.as_str() {
            "AUDIO" => &params.audio,
            "VIDEO" => &params.video,
            "SUBTITLES" => &params.subtitles,
            "CLOSED-CAPTIONS" => &params.captions,
            _ => return false,
        };
        group.as_deref() == Some(self.group_id.as_str())
    }
}

/// Attributes of an `EXT-X-STREAM-INF` or `EXT-X-I-FRAME-STREAM-INF` line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariantParams {
    pub program_id: Option<u32>,
    pub bandwidth: u64,
    pub average_bandwidth: Option<u64>,
    pub codecs: Option<SmolStr>,
    pub resolution: Option<SmolStr>,
    pub frame_rate: Option<f64>,
    pub audio: Option<SmolStr>,
    pub video: Option<SmolStr>,
    pub subtitles: Option<SmolStr>,
    /// Group id, or `NONE` which is written unquoted.
    pub captions: Option<SmolStr>,
    pub video_range: Option<SmolStr>,
    pub hdcp_level: Option<SmolStr>,
    pub name: Option<SmolStr>,
    /// Written as `EXT-X-I-FRAME-STREAM-INF` with the URI as an attribute.
    pub iframe: bool,
    pub alternatives: Vec<Alternative>,
}

#[derive(Clone, Debug)]
pub struct Variant {
    pub uri: SmolStr,
    /// Media playlist behind the URI when the caller has one at hand.
    pub chunklist: Option<Arc<MediaPlaylist>>,
    pub params: VariantParams,
}

/// Top-level playlist listing the variant streams of a presentation.
#[derive(Clone, Debug, Default)]
pub struct MasterPlaylist {
    pub(crate) variants: Vec<Variant>,
    pub(crate) args: Option<SmolStr>,
    pub(crate) independent_segments: bool,
    pub(crate) custom: CustomTags,
    pub(crate) version: Version,
    pub(crate) cache: Option<String>,
}

impl MasterPlaylist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(
        &mut self,
        uri: impl Into<SmolStr>,
        chunklist: Option<Arc<MediaPlaylist>>,
        params: VariantParams,
    ) {
        if !params.alternatives.is_empty() {
            self.version.raise(4);
        }
        self.variants.push(Variant {
            uri: uri.into(),
            chunklist,
            params,
        });
        self.cache = None;
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn variants_mut(&mut self) -> &mut [Variant] {
        self.cache = None;
        &mut self.variants
    }

    /// Query string appended to every variant URI on encode.
    pub fn set_args(&mut self, args: impl Into<SmolStr>) {
        self.args = super::media::non_empty(args.into());
        self.cache = None;
    }

    pub fn args(&self) -> Option<&str> {
        self.args.as_deref()
    }

    pub fn set_independent_segments(&mut self, independent: bool) {
        self.independent_segments = independent;
        self.cache = None;
    }

    pub fn independent_segments(&self) -> bool {
        self.independent_segments
    }

    pub fn set_custom_tag(&mut self, tag: Arc<dyn CustomTag>) {
        self.custom.set(tag);
        self.cache = None;
    }

    pub fn custom(&self) -> &CustomTags {
        &self.custom
    }

    pub fn version(&self) -> u8 {
        self.version.get()
    }

    pub fn set_version(&mut self, version: u8) {
        self.version.pin(version);
        self.cache = None;
    }

    pub fn reset_cache(&mut self) {
        self.cache = None;
    }
}
