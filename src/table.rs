//! Elastic-width table rendering for terminal output.

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count().max(1)).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(widths.len()) {
            widths[idx] = widths[idx].max(sanitize(cell).chars().count());
        }
    }

    let mut output = String::new();
    push_row(&mut output, headers, &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat((*w).max(3))).collect();
    push_row(&mut output, &separator, &widths);
    for row in rows {
        push_row(&mut output, row, &widths);
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn push_row(output: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (idx, cell) in cells.iter().enumerate().take(widths.len()) {
        if idx > 0 {
            line.push_str("  ");
        }
        let cell = sanitize(cell);
        let padding = widths[idx].max(3).saturating_sub(cell.chars().count());
        line.push_str(&cell);
        line.push_str(&" ".repeat(padding));
    }
    output.push_str(line.trim_end());
    output.push('\n');
}

fn sanitize(cell: &str) -> String {
    cell.chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_pad_to_the_widest_cell() {
        let headers = vec!["Country".to_string(), "Wins".to_string()];
        let rows = vec![
            vec!["Uruguay".to_string(), "2".to_string()],
            vec!["West Germany".to_string(), "3".to_string()],
        ];
        let rendered = render_table(&headers, &rows);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Country"));
        assert!(lines[1].starts_with("---"));
        assert!(lines[3].starts_with("West Germany  3"));
    }

    #[test]
    fn control_characters_never_break_the_layout() {
        let headers = vec!["value".to_string()];
        let rows = vec![vec!["a\tb\nc".to_string()]];
        let rendered = render_table(&headers, &rows);
        assert!(rendered.lines().nth(2).unwrap().contains("a b c"));
    }
}
