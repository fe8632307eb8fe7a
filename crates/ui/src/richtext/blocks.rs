/// Strip a list marker (`•`, `-` plus whitespace, or digits plus `.`) from
/// an already trimmed line
pub fn strip_list_marker(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix('•') {
        return Some(rest.trim_start());
    }

    if let Some(rest) = line.strip_prefix('-') {
        return rest.starts_with(char::is_whitespace).then(|| rest.trim_start());
    }

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        return line[digits..].strip_prefix('.').map(str::trim_start);
    }

    None
}

/// A block is a list when it has more than one line and every line carries
/// a list marker. Returns the item bodies in order.
pub fn list_items(block: &str) -> Option<Vec<&str>> {
    let lines: Vec<&str> = block.split('\n').collect();
    if lines.len() < 2 {
        return None;
    }
    lines.iter().map(|line| strip_list_marker(line.trim())).collect()
}
