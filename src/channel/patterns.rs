use crate::errors::ArubaError;
use core::fmt;
use once_cell::sync::OnceCell;
use regex::bytes::Regex;

/// `Pattern` is something the channel can wait for: a regular expression over the incoming byte
/// stream, or the end of the stream itself.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// A regular expression, along with the text it was built from.
    Text {
        /// The text the pattern was built from, this is what gets searched for as a word when
        /// recovering from a timeout.
        source: String,
        /// The compiled expression.
        regex: Regex,
    },
    /// End of stream, the device hung up (ex: while rebooting).
    Eof,
}

impl Pattern {
    /// Returns a pattern matching `s` exactly.
    ///
    /// # Panics
    ///
    /// Should realistically never panic, an escaped literal always compiles.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn literal(s: &str) -> Self {
        Self::Text {
            source: s.to_owned(),
            regex: Regex::new(&regex::escape(s))
                .expect("failed compiling escaped literal, this is a bug"),
        }
    }

    /// Returns a pattern compiled from the regular expression `s`, this is how user supplied
    /// prompts (ex: from a config file) are treated.
    ///
    /// # Errors
    ///
    /// Returns an `ArubaError::Framework` if `s` is not a valid expression.
    pub fn regex(s: &str) -> Result<Self, ArubaError> {
        match Regex::new(s) {
            Ok(regex) => Ok(Self::Text {
                source: s.to_owned(),
                regex,
            }),
            Err(err) => Err(ArubaError::Framework(format!(
                "prompt pattern '{s}' could not be compiled, error: {err}"
            ))),
        }
    }

    /// The text the pattern was built from, `None` for `Eof`.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Text { source, .. } => Some(source.as_str()),
            Self::Eof => None,
        }
    }

    /// Returns the (start, end) of the first match of the pattern in `b`. `Eof` never matches
    /// text.
    #[must_use]
    pub fn find(
        &self,
        b: &[u8],
    ) -> Option<(usize, usize)> {
        match self {
            Self::Text { regex, .. } => regex.find(b).map(|m| (m.start(), m.end())),
            Self::Eof => None,
        }
    }

    /// Indicates if this is the `Eof` pattern.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }
}

impl fmt::Display for Pattern {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        match self {
            Self::Text { source, .. } => write!(f, "{source:?}"),
            Self::Eof => write!(f, "EOF"),
        }
    }
}

/// # Panics
///
///  Returns (once), the complied ansi matching pattern. This should realisitcally never panic.
#[allow(clippy::expect_used)]
pub fn ansi_pattern() -> Regex {
    static RE: OnceCell<Regex> = OnceCell::new();

    RE.get_or_init(|| {
        Regex::new(r"(?-u)\x1b(?:\[[0-9;?]*[ -/]*[@-~]|\][^\x07]*\x07|[()][A-Za-z0-9])")
            .expect("failed compiling pattern, this is a bug")
    })
    .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_is_escaped() {
        let p = Pattern::literal("cpboot>");
        assert_eq!(p.find(b"\r\ncpboot> "), Some((2, 9)));

        let p = Pattern::literal("#");
        assert_eq!(p.source(), Some("#"));
        assert_eq!(p.find(b"(host) #"), Some((7, 8)));

        let p = Pattern::literal("(host) #");
        assert!(p.find(b"host #").is_none());
    }

    #[test]
    fn test_regex_pattern() {
        let p = Pattern::regex(r"\(\w+\) #").unwrap();
        assert_eq!(p.source(), Some(r"\(\w+\) #"));
        assert!(p.find(b"show ap\r\n(aruba7010) #").is_some());

        assert!(matches!(
            Pattern::regex("(unclosed"),
            Err(ArubaError::Framework(_))
        ));
    }

    #[test]
    fn test_eof_never_matches_text() {
        assert!(Pattern::Eof.is_eof());
        assert!(Pattern::Eof.find(b"anything").is_none());
        assert_eq!(Pattern::Eof.source(), None);
        assert_eq!(Pattern::Eof.to_string(), "EOF");
    }
}
