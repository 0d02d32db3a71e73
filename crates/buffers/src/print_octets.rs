//! Hex rendering of byte blobs for packet descriptions.

/// Byte limit used by [`print_octets_default`].
pub const DEFAULT_OCTETS: usize = 16;

/// Renders up to `max` bytes as space separated lowercase hex. Anything past
/// the limit is summarized as a count.
///
/// ```
/// use tasd_buffers::print_octets;
///
/// assert_eq!(print_octets(&[0x01, 0x02, 0x0a, 0xff], 16), "01 02 0a ff");
/// assert_eq!(print_octets(&[0x01, 0x02, 0x03], 2), "01 02 ... (1 more)");
/// ```
pub fn print_octets(octets: &[u8], max: usize) -> String {
    let shown = octets.len().min(max);
    let mut out = String::with_capacity(shown * 3 + 16);
    for (i, byte) in octets[..shown].iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{byte:02x}"));
    }
    let hidden = octets.len() - shown;
    if hidden > 0 {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&format!("... ({hidden} more)"));
    }
    out
}

/// [`print_octets`] with a limit of [`DEFAULT_OCTETS`].
pub fn print_octets_default(octets: &[u8]) -> String {
    print_octets(octets, DEFAULT_OCTETS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_blob() {
        assert_eq!(print_octets_default(&[]), "");
    }

    #[test]
    fn test_limit_summarizes_rest() {
        let data: Vec<u8> = (0..20).collect();
        assert_eq!(
            print_octets_default(&data),
            "00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f ... (4 more)"
        );
    }

    #[test]
    fn test_zero_limit() {
        assert_eq!(print_octets(&[0xaa, 0xbb], 0), "... (2 more)");
    }
}
