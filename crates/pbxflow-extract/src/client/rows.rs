//! Parsing of the client's batch output.
//!
//! `mysql -N -B` prints one row per line, fields tab-separated, with
//! `\t`, `\n`, `\\` and `\0` escaped inside values and SQL NULL printed
//! as the literal `NULL`.

use super::Row;

/// Parse batch-mode output into rows. NULL fields become empty strings.
pub fn parse_batch_output(text: &str) -> Vec<Row> {
    text.lines()
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Row {
    line.split('\t')
        .map(|field| {
            if field == "NULL" {
                String::new()
            } else {
                unescape(field)
            }
        })
        .collect()
}

fn unescape(field: &str) -> String {
    if !field.contains('\\') {
        return field.to_string();
    }
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
