use std::{borrow::Cow, fmt::Write};

const MIN_COLUMN_WIDTH: usize = 3;

/// Builds a Markdown table padded for monospace terminals.
#[derive(Default)]
pub struct TextTableBuilder<'a, Seq> {
    headers: &'a [Cow<'a, str>],
    rows: Vec<Seq>,
    alignments: Cow<'a, [Alignment]>,
}

#[derive(Clone, Copy, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

impl<'a, Seq> TextTableBuilder<'a, Seq>
where
    Seq: AsRef<[Cow<'a, str>]> + Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignments(mut self, alignments: &'a [Alignment]) -> Self {
        self.alignments = Cow::Borrowed(alignments);
        self
    }

    pub fn headers(mut self, headers: &'a [Cow<'a, str>]) -> Self {
        self.headers = headers;
        if self.alignments.is_empty() {
            self.alignments = Cow::Owned(vec![Alignment::default(); self.headers.len()]);
        }
        self
    }

    pub fn row(mut self, row: Seq) -> Self {
        self.rows.push(row);
        self
    }

    pub fn build(self) -> String {
        let col_count = self.headers.len();
        if col_count == 0 {
            return String::new();
        }

        let headers: Vec<Cow<'_, str>> = self.headers.iter().map(|h| escape_cell(h)).collect();
        let rows: Vec<Vec<Cow<'_, str>>> = self
            .rows
            .iter()
            .map(|row| {
                let mut cells: Vec<Cow<'_, str>> = row
                    .as_ref()
                    .iter()
                    .take(col_count)
                    .map(|cell| escape_cell(cell))
                    .collect();
                cells.resize(col_count, Cow::Borrowed(""));
                cells
            })
            .collect();

        let mut col_widths: Vec<usize> = headers
            .iter()
            .map(|h| display_width(h).max(MIN_COLUMN_WIDTH))
            .collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                col_widths[i] = col_widths[i].max(display_width(cell));
            }
        }

        let alignment_at = |i: usize| self.alignments.get(i).copied().unwrap_or_default();

        let mut table = String::with_capacity(256 * (rows.len() + 2));
        write_row(&mut table, &headers, &col_widths, alignment_at);

        table.push('|');
        for (i, width) in col_widths.iter().enumerate() {
            let dashes = "-".repeat(width.saturating_sub(1));
            let _ = match alignment_at(i) {
                Alignment::Left => write!(&mut table, " :{dashes} |"),
                Alignment::Right => write!(&mut table, " {dashes}: |"),
            };
        }
        table.push('\n');

        for row in &rows {
            write_row(&mut table, row, &col_widths, alignment_at);
        }

        table
    }
}

fn write_row(
    out: &mut String,
    cells: &[Cow<'_, str>],
    col_widths: &[usize],
    alignment_at: impl Fn(usize) -> Alignment,
) {
    out.push('|');
    for (i, cell) in cells.iter().enumerate() {
        let padding = col_widths[i].saturating_sub(display_width(cell));
        let (left, right) = match alignment_at(i) {
            Alignment::Left => (0, padding),
            Alignment::Right => (padding, 0),
        };
        let _ = write!(
            out,
            " {}{cell}{} |",
            " ".repeat(left),
            " ".repeat(right)
        );
    }
    out.push('\n');
}

/// Terminal columns taken by `text`; non-ASCII counts as full width.
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

fn escape_cell(s: &str) -> Cow<'_, str> {
    if !s.contains(['|', '\n']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.replace('|', "\\|").replace('\n', " "))
}
