//! Pure parsing of ICY metadata blocks
//!
//! An interleaved metadata block starts with one length byte (its value
//! times 16 gives the block size, so a block spans 0 to 4080 bytes),
//! followed by ASCII-ish key/value pairs padded with NUL bytes up to that
//! size:
//!
//! ```text
//! StreamTitle='Artist - Track';StreamUrl='https://...';\0\0\0...
//! ```
//!
//! The functions here take the block *after* the length byte and know
//! nothing about transport. They never fail: malformed input just yields
//! no title.

use regex::Regex;

/// Decode a raw metadata block to text.
///
/// Strips the trailing NUL padding and decodes the rest as UTF-8,
/// replacing invalid sequences. Servers in the wild send Latin-1 as well
/// as UTF-8, so the result may contain replacement characters rather
/// than failing.
pub fn decode_metadata_block(block: &[u8]) -> String {
    let end = block.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&block[..end]).into_owned()
}

/// Extract the value of `StreamTitle='...'` from decoded metadata text.
///
/// Returns the captured title verbatim, including the empty string when
/// the server sends `StreamTitle='';` between songs. Returns `None` when
/// no `StreamTitle` field is present. The wild format has no escaping,
/// so a title containing a single quote is cut at that quote.
pub fn parse_stream_title(metadata: &str) -> Option<String> {
    let re = Regex::new(r"StreamTitle='([^']*)'").ok()?;
    re.captures(metadata)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Title carried by a raw metadata block, when any.
pub fn title_from_block(block: &[u8]) -> Option<String> {
    parse_stream_title(&decode_metadata_block(block))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_block() {
        assert_eq!(
            parse_stream_title("StreamTitle='Artist - Track';"),
            Some("Artist - Track".to_string())
        );
    }

    #[test]
    fn test_empty_title_is_a_valid_capture() {
        assert_eq!(parse_stream_title("StreamTitle='';"), Some(String::new()));
    }

    #[test]
    fn test_multibyte_title() {
        assert_eq!(
            parse_stream_title("StreamTitle='Émilie Simon, Désert — 夜想曲';"),
            Some("Émilie Simon, Désert — 夜想曲".to_string())
        );
    }

    #[test]
    fn test_extra_fields_ignored() {
        assert_eq!(
            parse_stream_title("StreamTitle='A';StreamUrl='https://example.com/';"),
            Some("A".to_string())
        );
    }

    #[test]
    fn test_missing_terminator_still_matches() {
        assert_eq!(parse_stream_title("StreamTitle='A'"), Some("A".to_string()));
    }

    #[test]
    fn test_no_stream_title_field() {
        assert_eq!(parse_stream_title("StreamUrl='https://example.com/';"), None);
        assert_eq!(parse_stream_title(""), None);
    }

    #[test]
    fn test_apostrophe_cuts_title() {
        // No escaping in the wild format
        assert_eq!(
            parse_stream_title("StreamTitle='Don't Stop Me Now';"),
            Some("Don".to_string())
        );
    }

    #[test]
    fn test_decode_strips_trailing_padding() {
        let mut block = b"StreamTitle='X';".to_vec();
        block.resize(32, 0);
        assert_eq!(decode_metadata_block(&block), "StreamTitle='X';");
    }

    #[test]
    fn test_decode_all_padding() {
        assert_eq!(decode_metadata_block(&[0u8; 48]), "");
        assert_eq!(decode_metadata_block(&[]), "");
    }

    #[test]
    fn test_decode_invalid_utf8_is_lossy() {
        let mut block = b"StreamTitle='Caf\xe9';".to_vec();
        block.resize(32, 0);
        let decoded = decode_metadata_block(&block);
        assert!(decoded.starts_with("StreamTitle='Caf"));
        // Latin-1 byte survives as the replacement character
        assert_eq!(title_from_block(&block), Some("Caf\u{FFFD}".to_string()));
    }

    #[test]
    fn test_title_from_block() {
        let mut block = b"StreamTitle='Artist - Track';StreamUrl='';".to_vec();
        block.resize(64, 0);
        assert_eq!(title_from_block(&block), Some("Artist - Track".to_string()));
    }

    #[test]
    fn test_decode_is_deterministic() {
        // Same captured bytes, same answer, however often it runs.
        let mut block = b"StreamTitle='Artist - Track';".to_vec();
        block.resize(32, 0);
        let first = title_from_block(&block);
        assert_eq!(title_from_block(&block), first);
        assert_eq!(first, Some("Artist - Track".to_string()));
    }
}
