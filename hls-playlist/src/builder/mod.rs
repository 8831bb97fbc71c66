//! Encoders, written as `Display` impls. `encode` memoizes the output until
//! the next mutation.

use std::fmt::{self, Display, Formatter};

use crate::format::{MasterPlaylist, MediaPlaylist};

mod master;
mod media;

/// Writes `TAG:KEY=VALUE,...` lines, taking care of the separators.
pub(crate) struct AttributeList<'a, 'b> {
    f: &'a mut Formatter<'b>,
    first: bool,
}

impl<'a, 'b> AttributeList<'a, 'b> {
    pub fn new(f: &'a mut Formatter<'b>, tag: &str) -> Result<Self, fmt::Error> {
        write!(f, "{}:", tag)?;
        Ok(Self { f, first: true })
    }

    fn separator(&mut self) -> fmt::Result {
        if !std::mem::replace(&mut self.first, false) {
            write!(self.f, ",")?;
        }
        Ok(())
    }

    pub fn bare(&mut self, key: &str, value: impl Display) -> fmt::Result {
        self.separator()?;
        write!(self.f, "{}={}", key, value)
    }

    pub fn quoted(&mut self, key: &str, value: impl Display) -> fmt::Result {
        self.separator()?;
        write!(self.f, "{}=\"{}\"", key, value)
    }

    pub fn bare_opt(&mut self, key: &str, value: Option<impl Display>) -> fmt::Result {
        match value {
            Some(value) => self.bare(key, value),
            None => Ok(()),
        }
    }

    pub fn quoted_opt(&mut self, key: &str, value: Option<impl Display>) -> fmt::Result {
        match value {
            Some(value) => self.quoted(key, value),
            None => Ok(()),
        }
    }

    pub fn finish(self) -> fmt::Result {
        writeln!(self.f)
    }
}

impl MediaPlaylist {
    /// Serialized playlist, rebuilt only after a mutation or
    /// [`reset_cache`](Self::reset_cache).
    pub fn encode(&mut self) -> &str {
        let encoded = match self.cache.take() {
            Some(x) => x,
            None => self.to_string(),
        };
        self.cache.insert(encoded)
    }
}

impl MasterPlaylist {
    /// Serialized playlist, rebuilt only after a mutation or
    /// [`reset_cache`](Self::reset_cache).
    pub fn encode(&mut self) -> &str {
        let encoded = match self.cache.take() {
            Some(x) => x,
            None => self.to_string(),
        };
        self.cache.insert(encoded)
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::{self, Display, Formatter};

    use super::AttributeList;

    struct Sample(Option<&'static str>);

    impl Display for Sample {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            let mut attributes = AttributeList::new(f, "#EXT-X-TEST")?;
            attributes.quoted_opt("A", self.0)?;
            attributes.bare("B", 2)?;
            attributes.quoted("C", "x,y")?;
            attributes.finish()
        }
    }

    #[test]
    fn separators() {
        assert_eq!(Sample(Some("1")).to_string(), "#EXT-X-TEST:A=\"1\",B=2,C=\"x,y\"\n");
        assert_eq!(Sample(None).to_string(), "#EXT-X-TEST:B=2,C=\"x,y\"\n");
    }
}
