use smol_str::SmolStr;

use super::LineContext;
use crate::{
    Result,
    format::{CueForm, CueType, Scte, ScteSyntax, directives},
    lexer::parse_attributes,
};

/// Ad break opened by `#EXT-X-CUE-OUT` and not yet closed.
#[derive(Debug)]
struct Break {
    cue: SmolStr,
    time: f64,
    /// Seconds elapsed at the start of the next segment.
    elapsed: f64,
}

/// Collects ad-cue tags and resolves the cue of each segment.
#[derive(Debug, Default)]
pub(crate) struct CueParser {
    pending: Option<Scte>,
    /// `#EXT-OATCLS-SCTE35` payload waiting for its `#EXT-X-CUE-OUT`.
    payload: Option<SmolStr>,
    open: Option<Break>,
}

impl CueParser {
    /// Consumes `name` if it is an ad-cue directive.
    pub fn tag(&mut self, context: &LineContext<'_>, name: &str, value: Option<&str>) -> Result<bool> {
        match name {
            directives::SCTE35 => {
                let mut scte = Scte::point("", None, 0.0);
                for (key, value) in parse_attributes(value.unwrap_or_default()) {
                    match key {
                        "CUE" => scte.cue = value.into(),
                        "ID" => scte.id = Some(value.into()),
                        "TIME" => scte.time = context.number(Some(value), "invalid cue time")?,
                        _ => {}
                    }
                }
                self.pending = Some(scte);
            }
            directives::OATCLS_SCTE35 => {
                self.payload = value.map(|x| x.trim().into());
            }
            directives::CUE_OUT => {
                let value = value.map(str::trim);
                let (duration, form) = match value.and_then(|x| x.strip_prefix("DURATION=")) {
                    Some(x) => (Some(x), CueForm::Keyed),
                    None => (value, CueForm::Plain),
                };
                let time = match duration {
                    Some(x) => context.number(Some(x), "invalid cue-out duration")?,
                    None => 0.0,
                };
                self.pending = Some(Scte {
                    syntax: ScteSyntax::Oatcls,
                    cue_type: CueType::Start,
                    cue: self.payload.take().unwrap_or_default(),
                    time,
                    form,
                    ..Default::default()
                });
            }
            directives::CUE_OUT_CONT => {
                self.pending = Some(self.continuation(context, value.unwrap_or_default())?);
            }
            directives::CUE_IN => {
                self.pending = Some(Scte {
                    syntax: ScteSyntax::Oatcls,
                    cue_type: CueType::End,
                    ..Default::default()
                });
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// `ElapsedTime=..,Duration=..,SCTE35=..` or `<elapsed>/<duration>`.
    /// Missing fields fall back to the open break.
    fn continuation(&self, context: &LineContext<'_>, value: &str) -> Result<Scte> {
        let mut scte = Scte {
            syntax: ScteSyntax::Oatcls,
            cue_type: CueType::Mid,
            ..Default::default()
        };
        if let Some(open) = &self.open {
            scte.cue = open.cue.clone();
            scte.time = open.time;
            scte.elapsed = open.elapsed;
        }

        if !value.contains('=') {
            if let Some((elapsed, duration)) = value.split_once('/') {
                scte.elapsed = context.number(Some(elapsed), "invalid cue elapsed time")?;
                scte.time = context.number(Some(duration), "invalid cue duration")?;
                scte.form = CueForm::Fraction;
            }
            return Ok(scte);
        }

        for (key, value) in parse_attributes(value) {
            match key {
                "ElapsedTime" => {
                    scte.elapsed = context.number(Some(value), "invalid cue elapsed time")?
                }
                "Duration" => scte.time = context.number(Some(value), "invalid cue duration")?,
                "SCTE35" => scte.cue = value.into(),
                _ => {}
            }
        }
        Ok(scte)
    }

    /// Cue of a segment lasting `duration`, and the break state after it.
    pub fn next_cue(&mut self, duration: f64) -> Option<Scte> {
        self.payload = None;
        let scte = self.pending.take().or_else(|| {
            self.open.as_ref().map(|open| Scte {
                syntax: ScteSyntax::Oatcls,
                cue_type: CueType::Mid,
                cue: open.cue.clone(),
                time: open.time,
                elapsed: open.elapsed,
                implicit: true,
                ..Default::default()
            })
        });

        if let Some(scte) = scte.as_ref().filter(|x| x.syntax == ScteSyntax::Oatcls) {
            match scte.cue_type {
                CueType::Start | CueType::Mid => {
                    self.open = Some(Break {
                        cue: scte.cue.clone(),
                        time: scte.time,
                        elapsed: scte.elapsed + duration,
                    })
                }
                CueType::End => self.open = None,
            }
        }
        scte
    }
}
