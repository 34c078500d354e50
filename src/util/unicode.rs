use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells. Tabs count as 4 cells.
pub fn display_width(s: &str) -> usize {
    s.split('\t')
        .enumerate()
        .map(|(i, part)| {
            let w = UnicodeWidthStr::width(part);
            if i > 0 { w + 4 } else { w }
        })
        .sum()
}

/// Pad `s` with trailing spaces to `width` cells.
pub fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(fill))
}

/// Pad `s` with leading spaces to `width` cells.
pub fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", " ".repeat(fill), s)
}

/// Center `s` in `width` cells; odd padding goes to the right.
pub fn pad_center(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    let left = fill / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(fill - left))
}
