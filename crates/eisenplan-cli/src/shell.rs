//! The interactive shell: a read-eval loop over a session-lifetime store.
//! State is in-memory only, so unlike a one-shot task CLI the process stays
//! up and every command acts on the same plan.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use eisenplan_core::collections::CollectionStore;
use eisenplan_core::store::TaskStore;
use eisenplan_core::task::Quadrant;
use eisenplan_core::timegrid;
use tracing::{debug, info};
use uuid::Uuid;

use crate::cli::{self, GlobalCli};
use crate::render::Renderer;

pub fn known_command_names() -> Vec<&'static str> {
    vec![
        "add",
        "agenda",
        "collection",
        "done",
        "export",
        "help",
        "list",
        "move",
        "quit",
        "resize",
        "schedule",
    ]
}

/// Expands an unambiguous prefix to its command, taskwarrior style.
pub fn expand_command_abbrev<'a>(token: &'a str, known: &[&'a str]) -> Option<&'a str> {
    if known.contains(&token) {
        return Some(token);
    }

    let mut matches = known.iter().copied().filter(|name| name.starts_with(token));
    let first = matches.next()?;
    if matches.next().is_some() {
        None
    } else {
        Some(first)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = GlobalCli::parse();
    cli::init_tracing(args.verbose, args.quiet)?;

    info!(no_samples = args.no_samples, "starting eisenplan shell");

    let mut shell = Shell::new(!args.no_samples);
    println!("eisenplan - type 'help' for commands, 'quit' to leave");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("plan> ");
        io::stdout().flush()?;

        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("failed reading stdin")?;
        if read == 0 {
            break;
        }

        if !shell.dispatch(line.trim())? {
            break;
        }
    }

    Ok(())
}

struct Shell {
    store: TaskStore,
    collections: CollectionStore,
    renderer: Renderer,
}

impl Shell {
    fn new(samples: bool) -> Self {
        Self {
            store: if samples {
                TaskStore::with_samples()
            } else {
                TaskStore::new()
            },
            collections: CollectionStore::new(),
            renderer: Renderer::new(),
        }
    }

    /// One input line. Returns `false` when the session should end.
    fn dispatch(&mut self, line: &str) -> anyhow::Result<bool> {
        let mut tokens = line.split_whitespace();
        let Some(word) = tokens.next() else {
            return Ok(true);
        };
        let rest: Vec<&str> = tokens.collect();

        let known = known_command_names();
        let Some(command) = expand_command_abbrev(word, &known) else {
            println!("unknown or ambiguous command '{word}', try 'help'");
            return Ok(true);
        };
        debug!(command, ?rest, "dispatching");

        match command {
            "add" => self.cmd_add(&rest),
            "list" => self.renderer.print_task_table(&self.store)?,
            "agenda" => self.renderer.print_agenda(&self.store)?,
            "done" => self.cmd_done(&rest)?,
            "move" => self.cmd_move(&rest),
            "schedule" => self.cmd_schedule(&rest),
            "resize" => self.cmd_resize(&rest),
            "export" => self.cmd_export()?,
            "collection" => self.cmd_collection(&rest)?,
            "help" => print_help(),
            "quit" => return Ok(false),
            _ => unreachable!("command table covers all expansions"),
        }

        Ok(true)
    }

    fn cmd_add(&mut self, rest: &[&str]) {
        let text = rest.join(" ");
        match self.store.add_task(&text) {
            Some(_) => println!("added '{}'", text.trim()),
            None => println!("nothing to add"),
        }
    }

    fn cmd_done(&mut self, rest: &[&str]) -> anyhow::Result<()> {
        let Some(id) = self.resolve_position(rest.first()) else {
            return Ok(());
        };
        if self.store.toggle_completion(id) {
            self.renderer.print_task_table(&self.store)?;
        }
        Ok(())
    }

    fn cmd_move(&mut self, rest: &[&str]) {
        let Some(id) = self.resolve_position(rest.first()) else {
            return;
        };
        let Some(quadrant) = rest.get(1).copied().and_then(Quadrant::from_key) else {
            println!("expected a quadrant: do, schedule, delegate or delete");
            return;
        };
        if self.store.reclassify(id, Some(quadrant), None) {
            println!("moved to {}", quadrant.as_key());
        }
    }

    fn cmd_schedule(&mut self, rest: &[&str]) {
        let Some(id) = self.resolve_position(rest.first()) else {
            return;
        };
        let Some(slot) = rest.get(1).copied().and_then(timegrid::parse_hour) else {
            println!(
                "expected a half-hour time between {} and {}, like 9 or 14:30",
                timegrid::format_hour(timegrid::GRID_START_HOUR),
                timegrid::format_hour(timegrid::LAST_SLOT)
            );
            return;
        };
        if self.store.reclassify(id, None, Some(slot)) {
            println!("scheduled at {}", timegrid::format_hour(slot));
        }
    }

    fn cmd_resize(&mut self, rest: &[&str]) {
        let Some(id) = self.resolve_position(rest.first()) else {
            return;
        };
        let Some(duration) = rest.get(1).and_then(|raw| parse_duration(raw)) else {
            println!("expected a duration in half-hour steps, like 1.5");
            return;
        };

        if let Some(task) = self.store.get(id)
            && let Some(start) = task.scheduled_time
            && !timegrid::fits_in_grid(start, duration)
        {
            println!(
                "{} + {} runs past the end of the day",
                timegrid::format_hour(start),
                crate::render::format_duration(duration)
            );
            return;
        }

        if self.store.resize(id, duration) {
            println!("duration set to {}", crate::render::format_duration(duration));
        }
    }

    fn cmd_export(&self) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        for task in self.store.iter() {
            let line = serde_json::to_string(task).context("failed serializing task")?;
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    fn cmd_collection(&mut self, rest: &[&str]) -> anyhow::Result<()> {
        match rest {
            ["new", name @ ..] if !name.is_empty() => {
                let name = name.join(" ");
                if self.collections.create(&name) {
                    println!("created collection '{name}'");
                } else {
                    println!("collection names must be non-empty and unique");
                }
            }
            ["add", name, text @ ..] if !text.is_empty() => {
                if self.collections.add_task(name, &text.join(" ")).is_none() {
                    println!("no collection named '{name}'");
                }
            }
            ["rename", old, new] => {
                if !self.collections.rename(old, new) {
                    println!("rename did not apply");
                }
            }
            ["delete", name] => {
                let Some(count) = self.collections.get(name).map(|c| c.tasks.len()) else {
                    println!("no collection named '{name}'");
                    return Ok(());
                };
                if confirm(&format!(
                    "delete collection '{name}' and its {count} task(s)? [y/N] "
                ))? {
                    self.collections.delete(name);
                    println!("deleted '{name}'");
                }
            }
            ["move", name, position] => {
                let Some(task_id) = self.resolve_collection_position(name, position) else {
                    return Ok(());
                };
                if self
                    .collections
                    .move_to_plan(name, task_id, &mut self.store)
                {
                    println!("moved into the plan");
                }
            }
            ["list"] | [] => self.renderer.print_collections(&self.collections)?,
            _ => println!("usage: collection new|add|rename|delete|move|list"),
        }
        Ok(())
    }

    /// Maps a 1-based `list` position to the task id, telling the user when
    /// it does not point at anything.
    fn resolve_position(&self, raw: Option<&&str>) -> Option<Uuid> {
        let Some(position) = raw.and_then(|p| p.parse::<usize>().ok()) else {
            println!("expected a task number from 'list'");
            return None;
        };
        let id = position
            .checked_sub(1)
            .and_then(|idx| self.store.iter().nth(idx))
            .map(|t| t.id);
        if id.is_none() {
            println!("no task #{position}");
        }
        id
    }

    fn resolve_collection_position(&self, name: &str, raw: &str) -> Option<Uuid> {
        let Some(collection) = self.collections.get(name) else {
            println!("no collection named '{name}'");
            return None;
        };
        let Ok(position) = raw.parse::<usize>() else {
            println!("expected a task number from 'collection list'");
            return None;
        };
        let id = position
            .checked_sub(1)
            .and_then(|idx| collection.tasks.get(idx))
            .map(|t| t.id);
        if id.is_none() {
            println!("no task #{position} in '{name}'");
        }
        id
    }
}

fn parse_duration(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    let quantized = value >= timegrid::MIN_DURATION && (value / timegrid::SLOT_HOURS).fract() == 0.0;
    quantized.then_some(value)
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed reading confirmation")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn print_help() {
    println!("  add <text>                capture a task (lands in 'schedule')");
    println!("  list                      numbered task table");
    println!("  agenda                    the day calendar, 7:00-20:00");
    println!("  done <n>                  toggle completion");
    println!("  move <n> <quadrant>       do | schedule | delegate | delete");
    println!("  schedule <n> <time>       put on the calendar, e.g. 9 or 14:30");
    println!("  resize <n> <hours>        change duration in half-hour steps");
    println!("  export                    print tasks as JSON, one per line");
    println!("  collection new <name>     create a collection");
    println!("  collection add <name> <text>");
    println!("  collection rename <old> <new>");
    println!("  collection delete <name>  asks for confirmation");
    println!("  collection move <name> <n>  promote into the plan");
    println!("  collection list           show collections");
    println!("  quit");
    println!("Commands may be abbreviated to any unambiguous prefix.");
}

#[cfg(test)]
mod tests {
    use super::{expand_command_abbrev, known_command_names, parse_duration};

    #[test]
    fn unambiguous_prefixes_expand() {
        let known = known_command_names();
        assert_eq!(expand_command_abbrev("ag", &known), Some("agenda"));
        assert_eq!(expand_command_abbrev("l", &known), Some("list"));
        assert_eq!(expand_command_abbrev("col", &known), Some("collection"));
        assert_eq!(expand_command_abbrev("export", &known), Some("export"));
    }

    #[test]
    fn ambiguous_or_unknown_prefixes_do_not() {
        let known = known_command_names();
        assert_eq!(expand_command_abbrev("a", &known), None);
        assert_eq!(expand_command_abbrev("zzz", &known), None);
    }

    #[test]
    fn durations_parse_in_half_hour_steps_only() {
        assert_eq!(parse_duration("1.5"), Some(1.5));
        assert_eq!(parse_duration("0.5"), Some(0.5));
        assert_eq!(parse_duration("12"), Some(12.0));
        assert_eq!(parse_duration("0"), None);
        assert_eq!(parse_duration("0.25"), None);
        assert_eq!(parse_duration("-1"), None);
        assert_eq!(parse_duration("soon"), None);
    }
}
