/// Returns the device output in `raw` with the command echo, the prompt residue and blank lines
/// removed.
///
/// Whatever follows the last newline was printed on the same line as the matched prompt (ex: the
/// "(host) " in front of "#") so it is dropped. The first remaining line is dropped only if it is
/// the echo of `command`, hidden input (passwords) is never echoed.
pub fn frame_output(
    raw: &str,
    command: &str,
) -> String {
    let body = raw.rfind('\n').map_or("", |idx| raw.get(..idx).unwrap_or(""));

    let mut lines = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .peekable();

    let echo = command.trim();

    if !echo.is_empty() && lines.peek() == Some(&echo) {
        lines.next();
    }

    lines.collect::<Vec<&str>>().join("\n")
}

/// Indicates if `word` appears in `s` as a whitespace delimited word.
pub fn contains_word(
    s: &str,
    word: &str,
) -> bool {
    let word = word.trim();

    if word.is_empty() {
        return false;
    }

    s.split_whitespace().any(|w| w == word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_output_strips_echo_and_blank_lines() {
        let raw = "show version\r\nArubaOS (MODEL), Version X.Y.Z\r\n";
        assert_eq!(
            frame_output(raw, "show version"),
            "ArubaOS (MODEL), Version X.Y.Z"
        );

        let raw = "show vlan\r\n\r\nVLAN CONFIGURATION\r\n------------------\r\n\r\n1    default\r\n\r\n(aruba7010) [mynode] ";
        assert_eq!(
            frame_output(raw, "show vlan"),
            "VLAN CONFIGURATION\n------------------\n1    default"
        );
    }

    #[test]
    fn test_frame_output_keeps_first_line_when_not_echo() {
        let raw = "\r\nWelcome admin\r\n(host) ";
        assert_eq!(frame_output(raw, "secret"), "Welcome admin");
    }

    #[test]
    fn test_frame_output_prompt_only() {
        assert_eq!(frame_output("(host) ", "show ap"), "");
        assert_eq!(frame_output("", "show ap"), "");
        assert_eq!(frame_output("enable\r\n", "enable"), "");
    }

    #[test]
    fn test_contains_word() {
        assert!(contains_word("show ap\r\n(host) # \r\n", "#"));
        assert!(!contains_word("(host)#", "#"));
        assert!(contains_word("User: admin", "User: "));
        assert!(!contains_word("anything", " "));
    }
}
