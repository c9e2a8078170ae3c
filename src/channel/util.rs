use crate::channel::patterns::ansi_pattern;

/// Strips ansi characters out of the given byte slice.
pub fn strip_ansi(b: &[u8]) -> Vec<u8> {
    ansi_pattern().replace_all(b, vec![]).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi(b"\x1b[1;32m(host) #\x1b[0m"), b"(host) #".to_vec());
        assert_eq!(strip_ansi(b"plain"), b"plain".to_vec());
    }
}
