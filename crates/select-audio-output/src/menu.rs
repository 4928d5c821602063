//! Minimal terminal widgets: an arrow-key list picker and a volume prompt.

use std::{borrow::Cow, io};

use console::{Key, Term, style, truncate_str};
use tracing::debug;

/// Shows the cursor again when dropped.
struct CursorGuard<'a>(&'a Term);

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.0.show_cursor() {
            debug!("failed to restore cursor: {e}");
        }
    }
}

/// Move a selection one step, wrapping at both ends.
fn step(selected: usize, len: usize, down: bool) -> usize {
    if down {
        (selected + 1) % len
    } else if selected == 0 {
        len - 1
    } else {
        selected - 1
    }
}

/// Columns taken by the selection marker in front of each item.
const MARKER_WIDTH: usize = 2;

/// Cut `item` so that marker plus item fit on one row of `columns`.
fn fit(item: &str, columns: usize) -> Cow<'_, str> {
    truncate_str(item, columns.saturating_sub(MARKER_WIDTH).max(1), "…")
}

/// Let the user pick one of `items` with the arrow keys (or `j`/`k`).
///
/// Returns `None` when the user presses Escape, `q` or Ctrl-C, or when there
/// is nothing to choose from.
pub fn select(term: &Term, prompt: &str, items: &[String]) -> io::Result<Option<usize>> {
    if items.is_empty() {
        return Ok(None);
    }
    term.write_line(&format!(
        "{} {}",
        style("?").green().bold(),
        style(prompt).bold()
    ))?;
    term.hide_cursor()?;
    let _guard = CursorGuard(term);

    let mut selected = 0;
    loop {
        let columns = usize::from(term.size().1);
        for (i, item) in items.iter().enumerate() {
            let item = fit(item, columns);
            if i == selected {
                term.write_line(&format!("{} {}", style("»").cyan(), style(item).cyan()))?;
            } else {
                term.write_line(&format!("  {item}"))?;
            }
        }
        let key = term.read_key();
        term.clear_last_lines(items.len())?;
        let key = match key {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(None),
            other => other?,
        };
        match key {
            Key::ArrowUp | Key::Char('k') => selected = step(selected, items.len(), false),
            Key::ArrowDown | Key::Char('j') | Key::Tab => {
                selected = step(selected, items.len(), true);
            }
            Key::Home => selected = 0,
            Key::End => selected = items.len() - 1,
            Key::Enter => {
                term.clear_last_lines(1)?;
                term.write_line(&format!(
                    "{} {} {}",
                    style("?").green().bold(),
                    style(prompt).bold(),
                    style(&items[selected]).cyan()
                ))?;
                return Ok(Some(selected));
            }
            Key::Escape | Key::Char('q') | Key::CtrlC => return Ok(None),
            _ => {}
        }
    }
}

/// Parse a volume typed at the prompt: digits only, 0 through 100.
pub fn parse_volume_input(input: &str) -> Option<u8> {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    input.parse::<u8>().ok().filter(|v| *v <= 100)
}

/// Ask for a volume until a valid one is entered. Empty input aborts.
pub fn prompt_volume(term: &Term) -> io::Result<Option<u8>> {
    loop {
        term.write_str("Enter volume (0-100%): ")?;
        let line = term.read_line()?;
        if line.trim().is_empty() {
            return Ok(None);
        }
        match parse_volume_input(&line) {
            Some(level) => return Ok(Some(level)),
            None => term.write_line("Please enter a whole number between 0 and 100.")?,
        }
    }
}
