use crate::terminal::Terminal;
use crossterm::cursor::MoveTo;
use crossterm::event::KeyCode;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, stdout, Write};

/// Key bindings as (keys, action) pairs
pub type Bindings<'a> = &'a [(&'a str, &'a str)];

/// Lay out a titled key table, keys padded to a common column.
pub fn help_lines(title: &str, bindings: Bindings) -> Vec<String> {
    let key_width = bindings.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let mut lines = vec![title.to_string(), "─".repeat(title.chars().count().max(17))];
    for (keys, action) in bindings {
        lines.push(format!("{keys:<key_width$}  {action}"));
    }
    lines
}

/// Show a modal help overlay straight on the screen, leaving the back
/// buffer alone. Returns true if the user asked to quit (q/Esc) while the
/// overlay was open.
pub fn show_help_modal(term: &mut Terminal, title: &str, bindings: Bindings) -> io::Result<bool> {
    let lines = help_lines(title, bindings);
    let (width, height) = term.size();
    draw_overlay(width, height, &lines)?;

    loop {
        if let Some(code) = term.wait_key(50)? {
            match code {
                KeyCode::Char('?') => break,
                KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                _ => {}
            }
        }
    }

    // Restore previous frame from back buffer.
    term.present()?;
    Ok(false)
}

fn draw_overlay(width: u16, height: u16, lines: &[String]) -> io::Result<()> {
    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = max_width + 4;
    let box_height = lines.len() + 2;

    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(box_height) / 2;
    let bottom_y = start_y + box_height - 1;
    let rule = "─".repeat(box_width - 2);

    let mut out = stdout();
    queue!(out, SetForegroundColor(Color::White))?;
    queue!(out, MoveTo(start_x as u16, start_y as u16), Print(format!("┌{rule}┐")))?;

    for (i, line) in lines.iter().enumerate() {
        let y = (start_y + 1 + i) as u16;
        let padding = max_width.saturating_sub(line.chars().count());
        queue!(
            out,
            MoveTo(start_x as u16, y),
            SetForegroundColor(Color::White),
            Print('│'),
            SetForegroundColor(Color::Grey),
            Print(format!(" {}{} ", line, " ".repeat(padding))),
            SetForegroundColor(Color::White),
            Print('│')
        )?;
    }

    queue!(out, MoveTo(start_x as u16, bottom_y as u16), Print(format!("└{rule}┘")))?;
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::help_lines;

    #[test]
    fn keys_align_in_one_column() {
        let lines = help_lines("GARDEN", &[("q/Esc", "Quit"), ("w", "Water")]);
        assert_eq!(lines[0], "GARDEN");
        assert_eq!(lines[2], "q/Esc  Quit");
        assert_eq!(lines[3], "w      Water");
    }
}
