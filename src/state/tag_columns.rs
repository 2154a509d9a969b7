/// Parses the tag-columns textbox into 1-based column numbers.
///
/// Empty input is valid and yields no columns. Duplicates are dropped,
/// keeping the first occurrence.
pub fn parse_tag_columns(text: &str) -> Option<Vec<usize>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(Vec::new());
    }

    let mut columns = Vec::new();
    for part in trimmed.split(',') {
        let column = part.trim().parse::<usize>().ok().filter(|c| *c > 0)?;
        if !columns.contains(&column) {
            columns.push(column);
        }
    }
    Some(columns)
}

pub fn format_tag_columns(columns: &[usize]) -> String {
    columns
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Adds `column` if missing, removes it otherwise. Invalid text is replaced.
pub fn toggle_tag_column(text: &str, column: usize) -> String {
    let mut columns = parse_tag_columns(text).unwrap_or_default();
    if let Some(pos) = columns.iter().position(|c| *c == column) {
        columns.remove(pos);
    } else {
        columns.push(column);
        columns.sort_unstable();
    }
    format_tag_columns(&columns)
}
