use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyModifiers},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::fmt::Write as _;
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Cell buffer drawn to the terminal in one pass
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
    alternate_screen: bool,
}

/// A single cell in the buffer
#[derive(Clone, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
            bold: false,
        }
    }
}

impl Terminal {
    /// Take over the real terminal (raw mode, alternate screen)
    pub fn new(alternate_screen: bool) -> io::Result<Self> {
        let (width, height) = size()?;

        if alternate_screen {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
        }

        Ok(Self::with_size(width, height, alternate_screen))
    }

    /// Buffer of a fixed size that never touches the terminal; used for
    /// print mode, where stdout may be a pipe.
    pub fn offscreen(width: u16, height: u16) -> Self {
        Self::with_size(width, height, false)
    }

    fn with_size(width: u16, height: u16, alternate_screen: bool) -> Self {
        Self {
            width,
            height,
            buffer: vec![vec![Cell::default(); width as usize]; height as usize],
            alternate_screen,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            row.fill(Cell::default());
        }
    }

    /// Clear the actual terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    /// Set a character with optional foreground; clipped to the buffer
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        if let Some(cell) = self.cell_mut(x, y) {
            *cell = Cell { ch, fg, bg: cell.bg, bold };
        }
    }

    /// Paint a cell including its background
    pub fn paint(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bg: Option<Color>) {
        if let Some(cell) = self.cell_mut(x, y) {
            *cell = Cell { ch, fg, bg, bold: false };
        }
    }

    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bold);
        }
    }

    fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(&mut self.buffer[y as usize][x as usize])
        } else {
            None
        }
    }

    /// Draw the whole buffer
    pub fn present(&self) -> io::Result<()> {
        let mut out = stdout();

        for (y, row) in self.buffer.iter().enumerate() {
            queue!(out, MoveTo(0, y as u16))?;

            for cell in row {
                if cell.bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                if let Some(color) = cell.fg {
                    queue!(out, SetForegroundColor(color))?;
                }
                if let Some(color) = cell.bg {
                    queue!(out, SetBackgroundColor(color))?;
                }
                queue!(out, Print(cell.ch))?;
                if cell.bold || cell.fg.is_some() || cell.bg.is_some() {
                    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
                }
            }
        }

        out.flush()?;
        Ok(())
    }

    /// Check for keypress (non-blocking), returns (code, modifiers)
    pub fn check_key(&self) -> io::Result<Option<(KeyCode, KeyModifiers)>> {
        if poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = read()? {
                return Ok(Some((key_event.code, key_event.modifiers)));
            }
        }
        Ok(None)
    }

    /// Wait for a keypress with timeout
    pub fn wait_key(&self, timeout_ms: u64) -> io::Result<Option<KeyCode>> {
        if poll(Duration::from_millis(timeout_ms))? {
            if let Event::Key(key_event) = read()? {
                return Ok(Some(key_event.code));
            }
        }
        Ok(None)
    }

    pub fn sleep(&self, seconds: f32) {
        std::thread::sleep(Duration::from_secs_f32(seconds.max(0.0)));
    }

    /// Buffer as ANSI-colored text, one line per row, trailing blanks trimmed
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        for row in &self.buffer {
            let used = row.iter().rposition(|c| *c != Cell::default()).map_or(0, |i| i + 1);
            for cell in &row[..used] {
                let mut codes = Vec::new();
                if cell.bold {
                    codes.push("1".to_string());
                }
                codes.extend(cell.fg.and_then(|c| sgr(c, false)));
                codes.extend(cell.bg.and_then(|c| sgr(c, true)));

                if codes.is_empty() {
                    out.push(cell.ch);
                } else {
                    let _ = write!(out, "\x1b[{}m{}\x1b[0m", codes.join(";"), cell.ch);
                }
            }
            out.push('\n');
        }
        out
    }

    #[cfg(test)]
    pub fn plain_text(&self) -> String {
        self.buffer
            .iter()
            .map(|row| row.iter().map(|c| c.ch).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Print buffer to stdout with ANSI colors (for print mode)
    pub fn print_to_stdout(&self) -> io::Result<()> {
        let mut out = stdout();
        out.write_all(self.to_ansi().as_bytes())?;
        out.flush()
    }
}

/// SGR parameter for a color, foreground or background
fn sgr(color: Color, background: bool) -> Option<String> {
    let layer = if background { 48 } else { 38 };
    let shift = if background { 10 } else { 0 };
    let code = match color {
        Color::Rgb { r, g, b } => return Some(format!("{layer};2;{r};{g};{b}")),
        Color::AnsiValue(v) => return Some(format!("{layer};5;{v}")),
        // Standard colors (0-7)
        Color::Black => 30,
        Color::DarkRed => 31,
        Color::DarkGreen => 32,
        Color::DarkYellow => 33,
        Color::DarkBlue => 34,
        Color::DarkMagenta => 35,
        Color::DarkCyan => 36,
        Color::Grey => 37,
        // Bright colors (8-15)
        Color::DarkGrey => 90,
        Color::Red => 91,
        Color::Green => 92,
        Color::Yellow => 93,
        Color::Blue => 94,
        Color::Magenta => 95,
        Color::Cyan => 96,
        Color::White => 97,
        _ => return None,
    };
    Some((code + shift).to_string())
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}

/// Helper to create RGB colors
pub fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offscreen_clips_writes() {
        let mut term = Terminal::offscreen(4, 2);
        term.set_str(2, 0, "abcd", None, false);
        term.set(-1, 0, 'x', None, false);
        assert_eq!(term.to_ansi(), "  ab\n\n");
    }

    #[test]
    fn ansi_output_carries_rgb_layers() {
        let mut term = Terminal::offscreen(2, 1);
        term.paint(0, 0, '&', Some(rgb([1, 2, 3])), Some(rgb([4, 5, 6])));
        assert_eq!(term.to_ansi(), "\x1b[38;2;1;2;3;48;2;4;5;6m&\x1b[0m\n");
    }

    #[test]
    fn named_background_codes_shift_by_ten() {
        assert_eq!(sgr(Color::Red, false).as_deref(), Some("91"));
        assert_eq!(sgr(Color::Red, true).as_deref(), Some("101"));
        assert_eq!(sgr(Color::Reset, true), None);
    }
}
