use crate::extraction::{PageWords, Word};
use crate::model::{Cell, RawRow};
use crate::parsing::values::parse_cell;
use std::ops::Range;

/// Reconstruct statement tables from positioned words.
///
/// No column boundaries are supplied: words are grouped into visual lines,
/// adjacent words into phrases, and columns are inferred from the gutters
/// that no phrase crosses.
#[derive(Debug, Clone)]
pub struct TableSettings {
    /// Minimum phrases for a line to count as a table row.
    pub min_columns: usize,
    /// Vertical overlap (fraction of the shorter word height) needed for two
    /// words to share a line.
    pub row_tolerance: f32,
    /// Words closer than this fraction of the word height join one phrase.
    pub word_gap: f32,
    /// Short lines allowed between two table rows, merged into the row above
    /// as wrapped cell text.
    pub max_continuation_lines: usize,
}

impl Default for TableSettings {
    fn default() -> Self {
        TableSettings {
            min_columns: 4,
            row_tolerance: 0.5,
            word_gap: 0.6,
            max_continuation_lines: 2,
        }
    }
}

/// The table detected on one page.
#[derive(Debug, Clone, Default)]
pub struct PageTable {
    pub page_number: usize,
    /// Column titles, when the first table line carries no numbers.
    pub header: Option<Vec<String>>,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone)]
struct Phrase {
    text: String,
    x_min: f32,
    x_max: f32,
}

impl Phrase {
    fn x_center(&self) -> f32 {
        (self.x_min + self.x_max) / 2.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Span {
    x_min: f32,
    x_max: f32,
}

/// Detect one table per page, in page order.
pub fn detect_tables(pages: &[PageWords], settings: &TableSettings) -> Vec<PageTable> {
    pages
        .iter()
        .map(|page| detect_page_table(page, settings))
        .collect()
}

pub fn detect_page_table(page: &PageWords, settings: &TableSettings) -> PageTable {
    let lines: Vec<Vec<Phrase>> = group_lines(&page.words, settings)
        .into_iter()
        .map(|words| merge_phrases(&words, settings))
        .collect();

    let Some(region) = find_table_region(&lines, settings) else {
        log::debug!("page {}: no table found", page.page_number);
        return PageTable {
            page_number: page.page_number,
            ..PageTable::default()
        };
    };

    let lines = &lines[region];
    let is_tabular = |line: &Vec<Phrase>| line.len() >= settings.min_columns;

    let has_header = lines
        .first()
        .map(|first| first.iter().all(|p| !parse_cell(&p.text).is_number()))
        .unwrap_or(false);

    // Infer columns from data lines; a lone header line still defines them.
    let body_start = if has_header { 1 } else { 0 };
    let column_source: Vec<&Vec<Phrase>> = if lines[body_start..].iter().any(is_tabular) {
        lines[body_start..].iter().filter(|l| is_tabular(l)).collect()
    } else {
        lines.iter().filter(|l| is_tabular(l)).collect()
    };
    let columns = infer_columns(&column_source);

    let mut texts: Vec<Vec<Option<String>>> = Vec::new();
    for line in lines {
        let cells = assign_cells(line, &columns);
        if !is_tabular(line) && !is_row_start(line, &columns) {
            if let Some(previous) = texts.last_mut() {
                merge_continuation(previous, cells);
                continue;
            }
        }
        texts.push(cells);
    }

    let mut rows: Vec<RawRow> = texts
        .into_iter()
        .map(|cells| {
            cells
                .into_iter()
                .map(|c| c.map(|t| parse_cell(&t)).unwrap_or(Cell::Missing))
                .collect()
        })
        .collect();

    let header = if has_header && !rows.is_empty() {
        Some(rows.remove(0).iter().map(|c| c.to_string()).collect())
    } else {
        None
    };

    log::debug!(
        "page {}: {} columns, {} rows",
        page.page_number,
        columns.len(),
        rows.len()
    );

    PageTable {
        page_number: page.page_number,
        header,
        rows,
    }
}

/// Group words into visual lines, top to bottom, each sorted left to right.
fn group_lines<'a>(words: &'a [Word], settings: &TableSettings) -> Vec<Vec<&'a Word>> {
    let mut sorted: Vec<&Word> = words.iter().collect();
    sorted.sort_by(|a, b| {
        a.bbox
            .y_min
            .total_cmp(&b.bbox.y_min)
            .then(a.bbox.x_min.total_cmp(&b.bbox.x_min))
    });

    let mut lines: Vec<(f32, f32, Vec<&Word>)> = Vec::new();
    for word in sorted {
        let joins = lines.last().is_some_and(|(y_min, y_max, _)| {
            let overlap = y_max.min(word.bbox.y_max) - y_min.max(word.bbox.y_min);
            let shorter = (y_max - y_min).min(word.bbox.height()).max(f32::EPSILON);
            overlap / shorter >= settings.row_tolerance
        });
        if joins {
            if let Some((y_min, y_max, line)) = lines.last_mut() {
                *y_min = y_min.min(word.bbox.y_min);
                *y_max = y_max.max(word.bbox.y_max);
                line.push(word);
                continue;
            }
        }
        lines.push((word.bbox.y_min, word.bbox.y_max, vec![word]));
    }

    lines
        .into_iter()
        .map(|(_, _, mut line)| {
            line.sort_by(|a, b| a.bbox.x_min.total_cmp(&b.bbox.x_min));
            line
        })
        .collect()
}

/// Join words separated by less than a word-gap into phrases.
fn merge_phrases(words: &[&Word], settings: &TableSettings) -> Vec<Phrase> {
    let mut phrases: Vec<Phrase> = Vec::new();
    for word in words {
        let max_gap = word.bbox.height() * settings.word_gap;
        if let Some(last) = phrases.last_mut() {
            if word.bbox.x_min - last.x_max <= max_gap {
                last.text.push(' ');
                last.text.push_str(&word.text);
                last.x_max = last.x_max.max(word.bbox.x_max);
                continue;
            }
        }
        phrases.push(Phrase {
            text: word.text.clone(),
            x_min: word.bbox.x_min,
            x_max: word.bbox.x_max,
        });
    }
    phrases
}

/// A short line that opens its own row: it fills the id column or carries a
/// number. Only other short lines are wrapped text of the row above.
fn is_row_start(line: &[Phrase], columns: &[Span]) -> bool {
    line.iter().any(|p| {
        parse_cell(&p.text).is_number() || nearest_column(columns, p.x_center()) == Some(0)
    })
}

fn has_number(line: &[Phrase]) -> bool {
    line.iter().any(|p| parse_cell(&p.text).is_number())
}

/// Longest run of table lines, allowing a few short wrapped lines between
/// them. Sparse rows carrying numbers do not count towards that allowance.
/// Lines after the last table line are not included.
fn find_table_region(lines: &[Vec<Phrase>], settings: &TableSettings) -> Option<Range<usize>> {
    let mut best: Option<Range<usize>> = None;
    let mut current: Option<Range<usize>> = None;
    let mut tabular_in_current = 0;
    let mut best_tabular = 0;
    let mut gap = 0;

    for (i, line) in lines.iter().enumerate() {
        if line.len() >= settings.min_columns {
            current = match current {
                Some(run) if gap <= settings.max_continuation_lines => {
                    tabular_in_current += 1;
                    Some(run.start..i + 1)
                }
                _ => {
                    tabular_in_current = 1;
                    Some(i..i + 1)
                }
            };
            gap = 0;
            if tabular_in_current > best_tabular {
                best_tabular = tabular_in_current;
                best = current.clone();
            }
        } else if !has_number(line) {
            gap += 1;
        }
    }

    best
}

/// Merge overlapping phrase extents into column spans, left to right.
fn infer_columns(lines: &[&Vec<Phrase>]) -> Vec<Span> {
    let mut extents: Vec<Span> = lines
        .iter()
        .flat_map(|line| line.iter())
        .map(|p| Span {
            x_min: p.x_min,
            x_max: p.x_max,
        })
        .collect();
    extents.sort_by(|a, b| a.x_min.total_cmp(&b.x_min));

    let mut columns: Vec<Span> = Vec::new();
    for extent in extents {
        if let Some(col) = columns.last_mut() {
            if extent.x_min <= col.x_max {
                col.x_max = col.x_max.max(extent.x_max);
                continue;
            }
        }
        columns.push(extent);
    }
    columns
}

/// Place each phrase in the column under its centre (or the nearest one).
fn assign_cells(line: &[Phrase], columns: &[Span]) -> Vec<Option<String>> {
    let mut cells: Vec<Option<String>> = vec![None; columns.len()];
    for phrase in line {
        let center = phrase.x_center();
        let Some(idx) = nearest_column(columns, center) else {
            continue;
        };
        match &mut cells[idx] {
            Some(text) => {
                text.push(' ');
                text.push_str(&phrase.text);
            }
            slot => *slot = Some(phrase.text.clone()),
        }
    }
    cells
}

fn nearest_column(columns: &[Span], x: f32) -> Option<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let distance = if x < col.x_min {
                col.x_min - x
            } else if x > col.x_max {
                x - col.x_max
            } else {
                0.0
            };
            (i, distance)
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

fn merge_continuation(previous: &mut [Option<String>], wrapped: Vec<Option<String>>) {
    for (slot, extra) in previous.iter_mut().zip(wrapped) {
        let Some(extra) = extra else { continue };
        match slot {
            Some(text) => {
                text.push(' ');
                text.push_str(&extra);
            }
            None => *slot = Some(extra),
        }
    }
}
