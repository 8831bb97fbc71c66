use std::io::{self, BufRead};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `KEY=VALUE` pairs where VALUE is either a quoted string (commas allowed)
    /// or a bare token running up to the next comma.
    static ref ATTRIBUTE_REGEX: Regex =
        Regex::new(r#"([A-Za-z0-9_-]+)=("[^"]*"|[^",]*)"#).expect("Regular expression error");
}

/// Splits an attribute list into `(key, value)` pairs in source order,
/// with quotes stripped from quoted values.
pub(crate) fn parse_attributes(input: &str) -> Vec<(&str, &str)> {
    ATTRIBUTE_REGEX
        .captures_iter(input)
        .map(|x| x.extract())
        .map(|(_, [key, value])| (key, unquote(value)))
        .collect()
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|x| x.strip_suffix('"'))
        .unwrap_or(value)
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// `#EXT...` directive, split at the first colon.
    Tag { name: &'a str, value: Option<&'a str> },
    /// Any other `#` line.
    Comment,
    Uri(&'a str),
}

impl<'a> Line<'a> {
    pub fn classify(line: &'a str) -> Self {
        if line.starts_with("#EXT") {
            let mut splited_line = line.splitn(2, ':');
            let name = splited_line.next().unwrap_or(line);
            let value = splited_line.next();
            Self::Tag { name, value }
        } else if line.starts_with('#') {
            Self::Comment
        } else {
            Self::Uri(line)
        }
    }
}

/// Reads trimmed, non-blank lines and counts them for error reporting.
pub(crate) struct LineReader<R: BufRead> {
    reader: R,
    buffer: String,
    line_no: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line_no: 0,
        }
    }

    /// Next non-blank line with its 1-based line number.
    pub fn next_line(&mut self) -> Result<Option<(usize, &str)>, io::Error> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            if !self.buffer.trim().is_empty() {
                return Ok(Some((self.line_no, self.buffer.trim())));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{Line, LineReader, parse_attributes};

    #[test]
    fn test_parse_attributes() {
        let result = parse_attributes(
            r#"BANDWIDTH=1500000,CODECS="avc1.42c015,mp4a.40.2",RESOLUTION=576x480,NAME="HD 960p""#,
        );
        assert_eq!(
            result,
            vec![
                ("BANDWIDTH", "1500000"),
                ("CODECS", "avc1.42c015,mp4a.40.2"),
                ("RESOLUTION", "576x480"),
                ("NAME", "HD 960p"),
            ]
        );
        assert!(parse_attributes("").is_empty());
    }

    #[test]
    fn test_parse_attributes_keeps_base64() {
        let result = parse_attributes("ElapsedTime=8.844,Duration=15,SCTE35=/DAlAAAAAAAAAP/wFAUAAAABf+/+ANgNkv4AFJlwAAEBAQAA5xULLA==");
        assert_eq!(
            result[2],
            ("SCTE35", "/DAlAAAAAAAAAP/wFAUAAAABf+/+ANgNkv4AFJlwAAEBAQAA5xULLA==")
        );
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            Line::classify("#EXT-X-PROGRAM-DATE-TIME:2018-12-31T09:47:22+08:00"),
            Line::Tag {
                name: "#EXT-X-PROGRAM-DATE-TIME",
                value: Some("2018-12-31T09:47:22+08:00")
            }
        );
        assert_eq!(
            Line::classify("#EXT-X-ENDLIST"),
            Line::Tag {
                name: "#EXT-X-ENDLIST",
                value: None
            }
        );
        assert_eq!(Line::classify("# a comment"), Line::Comment);
        assert_eq!(Line::classify("media0.ts"), Line::Uri("media0.ts"));
    }

    #[test]
    fn test_line_reader_skips_blank_and_crlf() {
        let mut reader = LineReader::new(Cursor::new("\r\n#EXTM3U\r\n\r\n#EXTINF:10,\r\na.ts"));
        assert_eq!(reader.next_line().unwrap(), Some((2, "#EXTM3U")));
        assert_eq!(reader.next_line().unwrap(), Some((4, "#EXTINF:10,")));
        assert_eq!(reader.next_line().unwrap(), Some((5, "a.ts")));
        assert_eq!(reader.next_line().unwrap(), None);
    }
}
