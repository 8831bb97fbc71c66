use smol_str::SmolStr;

/// Wire dialect an ad cue was read from, kept so encoding reproduces it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScteSyntax {
    /// Single `#EXT-SCTE35:CUE=..,ID=..,TIME=..` tag per cue point.
    #[default]
    Scte35_67_2014,
    /// `#EXT-OATCLS-SCTE35` / `#EXT-X-CUE-OUT` / `#EXT-X-CUE-OUT-CONT` / `#EXT-X-CUE-IN`.
    Oatcls,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CueType {
    #[default]
    Start,
    Mid,
    End,
}

/// Shape of the value of an OATCLS break tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CueForm {
    /// `#EXT-X-CUE-OUT:<duration>` and
    /// `#EXT-X-CUE-OUT-CONT:ElapsedTime=..,Duration=..,SCTE35=..`.
    #[default]
    Plain,
    /// `#EXT-X-CUE-OUT:DURATION=<duration>`.
    Keyed,
    /// `#EXT-X-CUE-OUT-CONT:<elapsed>/<duration>`.
    Fraction,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scte {
    pub syntax: ScteSyntax,
    pub cue_type: CueType,
    /// Base64 splice info section, kept verbatim.
    pub cue: SmolStr,
    pub id: Option<SmolStr>,
    /// Planned break duration in seconds.
    pub time: f64,
    /// Seconds into the break at the start of this segment.
    pub elapsed: f64,
    /// Mid-break state derived while decoding rather than read from a
    /// `#EXT-X-CUE-OUT-CONT` tag. Implicit cues are not written back.
    pub implicit: bool,
    pub form: CueForm,
}

impl Scte {
    /// Point-in-time cue in the `#EXT-SCTE35` dialect.
    pub fn point(cue: impl Into<SmolStr>, id: Option<SmolStr>, time: f64) -> Self {
        Self {
            syntax: ScteSyntax::Scte35_67_2014,
            cue_type: CueType::Start,
            cue: cue.into(),
            id,
            time,
            ..Default::default()
        }
    }
}
