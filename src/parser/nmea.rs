//! NMEA sentence framing: span location, checksum validation and a
//! borrowed field view over a validated sentence.

use crate::{
    constants::{
        NMEA_CHECKSUM_CHAR, NMEA_END_CHAR_2, NMEA_MAX_SENTENCE_LEN, NMEA_MIN_SENTENCE_LEN,
        NMEA_SYNC_CHAR,
    },
    error::ParserError,
    parser::checksum::{hex_digit, nmea_checksum},
};

/// Result of scanning a buffer that starts with `$`.
#[derive(Debug, PartialEq, Eq)]
pub enum SentenceScan {
    /// No terminator yet; keep the bytes and wait for more input.
    NeedMore,
    /// A delimited span was found but it is not a usable sentence
    /// (missing `*`, bad hex, non-ASCII). Discard the whole span.
    Malformed { len: usize },
    /// Span with a `*hh` trailer whose XOR did not match. Discard it.
    ChecksumMismatch { len: usize, expect: u8, got: u8 },
    /// Complete, checksum-valid sentence of `len` bytes (terminator
    /// included).
    Complete { len: usize },
}

/// Locates and validates the sentence at the head of `buf`. The caller
/// guarantees `buf[0] == b'$'`. Completeness is keyed on the line
/// terminator; a sentence longer than the protocol maximum without one is
/// reported malformed so the stream can resynchronize.
pub fn scan_sentence(buf: &[u8]) -> SentenceScan {
    debug_assert_eq!(buf.first(), Some(&NMEA_SYNC_CHAR));

    let nl = buf.iter().position(|&b| b == NMEA_END_CHAR_2);
    let len = match nl {
        Some(pos) => pos + 1,
        None if buf.len() > NMEA_MAX_SENTENCE_LEN => {
            return SentenceScan::Malformed { len: 1 };
        },
        None => return SentenceScan::NeedMore,
    };

    if len < NMEA_MIN_SENTENCE_LEN {
        return SentenceScan::Malformed { len };
    }

    let star = match buf[..len].iter().position(|&b| b == NMEA_CHECKSUM_CHAR) {
        Some(pos) => pos,
        None => return SentenceScan::Malformed { len },
    };
    if star + 2 >= len {
        return SentenceScan::Malformed { len };
    }
    let expect = match (hex_digit(buf[star + 1]), hex_digit(buf[star + 2])) {
        (Some(hi), Some(lo)) => (hi << 4) | lo,
        _ => return SentenceScan::Malformed { len },
    };

    let got = nmea_checksum(&buf[1..star]);
    if got != expect {
        return SentenceScan::ChecksumMismatch { len, expect, got };
    }
    SentenceScan::Complete { len }
}

/// Borrowed view over one checksum-valid sentence. Fields are slices into
/// the original bytes; no copy is made.
#[derive(Debug)]
pub struct NmeaSentence<'a> {
    /// Two-character talker id, e.g. `GP` or `GN`.
    pub talker: &'a str,
    /// Three-character sentence type, e.g. `GGA`.
    pub msg_type: &'a str,
    /// Everything between the first comma and the `*`, still
    /// comma-delimited.
    body: &'a str,
}

impl<'a> NmeaSentence<'a> {
    /// Splits a validated span (as accepted by [`scan_sentence`]) into the
    /// talker/type header and field body.
    pub fn parse(raw: &'a [u8]) -> Result<Self, ParserError> {
        const PACKET: &str = "NmeaSentence";

        let star = raw
            .iter()
            .position(|&b| b == NMEA_CHECKSUM_CHAR)
            .ok_or(ParserError::InvalidField {
                packet: PACKET,
                field: "checksum",
            })?;
        let inner =
            core::str::from_utf8(&raw[1..star]).map_err(|_| ParserError::InvalidField {
                packet: PACKET,
                field: "encoding",
            })?;

        let (address, body) = match inner.find(',') {
            Some(comma) => (&inner[..comma], &inner[comma + 1..]),
            None => (inner, ""),
        };
        if address.len() != 5 {
            return Err(ParserError::InvalidField {
                packet: PACKET,
                field: "address",
            });
        }
        Ok(Self {
            talker: &address[..2],
            msg_type: &address[2..],
            body,
        })
    }

    /// The comma-delimited data fields in sentence order.
    pub fn fields(&self) -> impl Iterator<Item = &'a str> {
        self.body.split(',')
    }

    /// Field by zero-based index, `None` past the end.
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.body.split(',').nth(index)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const GGA: &[u8] =
        b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";

    #[test]
    fn scan_complete_sentence() {
        assert_eq!(scan_sentence(GGA), SentenceScan::Complete { len: GGA.len() });
    }

    #[test]
    fn scan_waits_for_terminator() {
        assert_eq!(scan_sentence(&GGA[..20]), SentenceScan::NeedMore);
        assert_eq!(scan_sentence(&GGA[..GGA.len() - 1]), SentenceScan::NeedMore);
    }

    #[test]
    fn scan_rejects_tampered_checksum() {
        let mut bad = GGA.to_vec();
        let star = bad.iter().position(|&b| b == b'*').unwrap();
        bad[star + 2] = b'8'; // 0x47 -> 0x48
        assert_eq!(
            scan_sentence(&bad),
            SentenceScan::ChecksumMismatch {
                len: bad.len(),
                expect: 0x48,
                got: 0x47,
            }
        );
    }

    #[test]
    fn scan_rejects_missing_star() {
        let bad = b"$GPGGA,123519,4807.038\r\n";
        assert_eq!(
            scan_sentence(bad),
            SentenceScan::Malformed { len: bad.len() }
        );
    }

    #[test]
    fn scan_resyncs_on_runaway_sentence() {
        let mut runaway = vec![b'$'];
        runaway.extend_from_slice(&[b'A'; 100]);
        assert_eq!(scan_sentence(&runaway), SentenceScan::Malformed { len: 1 });
    }

    #[test]
    fn parse_fields() {
        let s = NmeaSentence::parse(GGA).unwrap();
        assert_eq!(s.talker, "GP");
        assert_eq!(s.msg_type, "GGA");
        assert_eq!(s.field(0), Some("123519"));
        assert_eq!(s.field(1), Some("4807.038"));
        assert_eq!(s.field(8), Some("545.4"));
        assert_eq!(s.field(12), Some(""));
        assert_eq!(s.field(13), Some(""));
        assert_eq!(s.field(14), None);
        assert_eq!(s.fields().count(), 14);
    }

    #[test]
    fn parse_rejects_short_address() {
        let bad = b"$GP,1,2*00\r\n";
        assert!(matches!(
            NmeaSentence::parse(bad),
            Err(ParserError::InvalidField { .. })
        ));
    }
}
