//! Fixed-width formatting for selection previews.

/// Column width history previews are wrapped to.
pub const PREVIEW_WIDTH: usize = 60;
/// Indent prefix for wrapped continuation lines.
pub const PREVIEW_INDENT: usize = 2;

/// Wrap rendered selection markup to a fixed column width. Existing line
/// breaks are kept; overlong lines break at the last space that fits, or
/// hard at the limit when there is none. Continuation lines are indented.
pub(crate) fn format_preview(markup: &str, width: usize, indent: usize) -> String {
    let mut out = Vec::new();
    for line in markup.lines() {
        wrap_line(line.trim_end(), width, indent, &mut out);
    }
    out.join("\n")
}

fn wrap_line(line: &str, width: usize, indent: usize, out: &mut Vec<String>) {
    let width = width.max(1);
    let mut remaining = line;
    let mut first = true;

    loop {
        let prefix = if first { 0 } else { indent.min(width - 1) };
        let avail = width - prefix;

        if remaining.chars().count() <= avail {
            out.push(format!("{}{}", " ".repeat(prefix), remaining));
            return;
        }

        let window_end = remaining
            .char_indices()
            .nth(avail)
            .map(|(byte, _)| byte)
            .unwrap_or(remaining.len());
        let break_at = remaining[..window_end]
            .rfind(' ')
            .filter(|&at| at > 0)
            .unwrap_or(window_end);

        let (head, tail) = remaining.split_at(break_at);
        out.push(format!("{}{}", " ".repeat(prefix), head.trim_end()));
        remaining = tail.trim_start();
        first = false;

        if remaining.is_empty() {
            return;
        }
    }
}
