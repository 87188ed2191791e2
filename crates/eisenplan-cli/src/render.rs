//! Terminal rendition of the planner views: the task table, the agenda
//! grid and the collections overview.

use std::io::{self, IsTerminal, Write};

use eisenplan_core::collections::CollectionStore;
use eisenplan_core::store::TaskStore;
use eisenplan_core::task::Task;
use eisenplan_core::timegrid::{self, SLOT_HOURS};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            color: io::stdout().is_terminal(),
        }
    }

    /// Numbered task table; positions are what the mutating commands take.
    pub fn print_task_table(&self, store: &TaskStore) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        let headers = vec![
            "#".to_string(),
            "Done".to_string(),
            "Quadrant".to_string(),
            "Time".to_string(),
            "Dur".to_string(),
            "Task".to_string(),
        ];

        let mut rows = Vec::with_capacity(store.len());
        for (idx, task) in store.iter().enumerate() {
            let position = self.paint(&(idx + 1).to_string(), "33");
            let done = if task.completed { "x" } else { "" }.to_string();
            let time = task
                .scheduled_time
                .map(timegrid::format_hour)
                .unwrap_or_else(|| "-".to_string());
            let text = if task.completed {
                self.paint(&task.text, "90")
            } else {
                task.text.clone()
            };

            rows.push(vec![
                position,
                done,
                task.quadrant.as_key().to_string(),
                time,
                format_duration(task.duration),
                text,
            ]);
        }

        write_table(&mut out, headers, rows)?;
        Ok(())
    }

    /// The day calendar as half-hour rows; scheduled blocks open with their
    /// text and span continuation rows down to their end.
    pub fn print_agenda(&self, store: &TaskStore) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        for line in agenda_lines(store) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    pub fn print_collections(&self, collections: &CollectionStore) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        if collections.is_empty() {
            writeln!(out, "no collections")?;
            return Ok(());
        }

        for collection in collections.iter() {
            writeln!(
                out,
                "{} ({})",
                self.paint(&collection.name, "36"),
                collection.tasks.len()
            )?;
            for (idx, task) in collection.tasks.iter().enumerate() {
                writeln!(out, "  {} {}", idx + 1, task.text)?;
            }
        }
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

pub fn format_duration(duration: f64) -> String {
    if duration.fract() == 0.0 {
        format!("{}h", duration as i64)
    } else {
        format!("{duration}h")
    }
}

/// Builds the agenda rows without writing them, so tests can look at them.
pub fn agenda_lines(store: &TaskStore) -> Vec<String> {
    let mut scheduled: Vec<&Task> = store.scheduled().collect();
    scheduled.sort_by(|a, b| {
        a.scheduled_time
            .partial_cmp(&b.scheduled_time)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut lines = Vec::new();
    let mut slot = timegrid::GRID_START_HOUR;
    while slot <= timegrid::LAST_SLOT {
        let label = format!("{:>5}", timegrid::format_hour(slot));

        let starting = scheduled.iter().find(|t| t.scheduled_time == Some(slot));
        let covering = scheduled.iter().find(|t| {
            t.scheduled_time
                .is_some_and(|start| start < slot && slot < start + t.duration)
        });

        let line = if let Some(task) = starting {
            let end = slot + task.duration;
            format!(
                "{label} ┌ {} ({} - {})",
                task.text,
                timegrid::format_hour(slot),
                timegrid::format_hour(end)
            )
        } else if covering.is_some() {
            format!("{label} │")
        } else {
            format!("{label} ·")
        };

        lines.push(line);
        slot += SLOT_HOURS;
    }
    lines
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use eisenplan_core::store::TaskStore;

    use super::{agenda_lines, format_duration, strip_ansi};

    #[test]
    fn agenda_covers_every_half_hour_slot() {
        let lines = agenda_lines(&TaskStore::new());
        assert_eq!(lines.len(), 26);
        assert!(lines[0].starts_with(" 7:00"));
        assert!(lines[25].starts_with("19:30"));
        assert!(lines.iter().all(|l| l.ends_with('·')));
    }

    #[test]
    fn a_block_opens_at_its_slot_and_spans_its_duration() {
        let mut store = TaskStore::new();
        let id = store.add_task("Deep work").expect("add");
        store.reclassify(id, None, Some(9.0));
        store.resize(id, 1.5);

        let lines = agenda_lines(&store);
        // 9:00 is slot index (9.0 - 7.0) * 2 = 4.
        assert!(lines[4].contains("┌ Deep work (9:00 - 10:30)"));
        assert!(lines[5].ends_with('│'));
        assert!(lines[6].ends_with('│'));
        assert!(lines[7].ends_with('·'));
    }

    #[test]
    fn durations_render_compactly() {
        assert_eq!(format_duration(1.0), "1h");
        assert_eq!(format_duration(0.5), "0.5h");
        assert_eq!(format_duration(2.5), "2.5h");
    }

    #[test]
    fn ansi_stripping_leaves_plain_text() {
        assert_eq!(strip_ansi("\x1b[33m12\x1b[0m"), "12");
        assert_eq!(strip_ansi("plain"), "plain");
    }
}
