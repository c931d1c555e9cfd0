use crate::render::Frame;
use crate::TermInt;
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{Context, Result, ensure};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, KeyEventKind, read, poll};

type Pos = (TermInt, TermInt);

const TEXT_COLOR: Color = Color::White;
const BORDER_COLOR: Color = Color::Grey;

#[derive(Copy, Clone, PartialEq)]
struct Glyph {
    ch: char,
    color: Color,
}

const BLANK: Glyph = Glyph { ch: ' ', color: TEXT_COLOR };

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    board: Pos,
    stdout: Stdout,
    screen: Vec<Glyph>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Pos,
    width: TermInt,
    height: TermInt,
}

/// Terminal footprint of a board with `cells` cells per side: the framed
/// canvas plus one score line below it. None if it exceeds terminal
/// coordinates.
pub fn board_size(cells: usize) -> Option<Pos> {
    let width = cells.checked_mul(2)?.checked_add(2)?;
    let height = cells.checked_add(2)?;
    Some((TermInt::try_from(width).ok()?, TermInt::try_from(height).ok()?))
}

impl TermManager {
    pub fn new(cells: usize) -> Result<Self> {
        let (width, height) = terminal::size().context("Failed to read terminal size")?;
        let board = board_size(cells)
            .with_context(|| format!("a {}-cell board does not fit in any terminal", cells))?;

        ensure!(
            width >= board.0 && height > board.1,
            "terminal is {}x{}, but a {}-cell board needs at least {}x{}",
            width, height, cells, board.0, u32::from(board.1) + 1
        );

        let stdout = stdout();
        let screen = vec![BLANK; width as usize * height as usize];
        Ok(TermManager { width, height, board, stdout, screen, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("Failed to hide cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking)
            .context("Failed to show cursor")?;
        execute!(self.stdout, LeaveAlternateScreen).context("Failed to leave alternate screen")?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Some(key) = as_key_press(read().context("Failed to read terminal event")?) {
                return Ok(key);
            }
        }
    }

    /// Waits up to `timeout` for a key press.
    pub fn poll_key(&self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if !poll(timeout).context("Failed to poll terminal events")? {
            return Ok(None);
        }

        Ok(as_key_press(read().context("Failed to read terminal event")?))
    }

    pub fn draw_borders(&mut self) -> Result<()> {
        let (width, height) = self.board;
        let end_x = width - 1;
        let end_y = height - 1;

        for x in 0..width {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.print_at((x, 0), ch, BORDER_COLOR)?;
            self.print_at((x, end_y), ch, BORDER_COLOR)?;
        }

        for y in 1..end_y {
            self.print_at((0, y), '|', BORDER_COLOR)?;
            self.print_at((end_x, y), '|', BORDER_COLOR)?;
        }

        self.flush()
    }

    /// Draws every cell and the score line. An open message stays on top.
    pub fn draw_frame(&mut self, frame: &Frame) -> Result<()> {
        for row in 0..frame.cells() {
            for col in 0..frame.cells() {
                let (chars, color) = frame.tile(col, row).glyph();
                let x = (1 + col * 2) as TermInt;
                let y = (1 + row) as TermInt;
                self.put(x, y, Glyph { ch: chars[0], color })?;
                self.put(x + 1, y, Glyph { ch: chars[1], color })?;
            }
        }

        let score_y = self.board.1;
        let line = format!("{:<width$}", frame.score_text(), width = self.board.0 as usize);
        for (x, ch) in line.chars().enumerate() {
            self.put(x as TermInt, score_y, Glyph { ch, color: TEXT_COLOR })?;
        }

        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.board.0 / 2, self.board.1 / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), BLANK)?;
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), Glyph { ch, color: TEXT_COLOR })?;
            }
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };
        let top_left = msg.top_left();

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height() {
            for x_diff in 0..msg.width() {
                let pos = (top_left.0 + x_diff, top_left.1 + y_diff);
                if let Some(i) = self.index(pos) {
                    let glyph = self.screen[i];
                    self.print_at_no_save(pos, glyph)?;
                }
            }
        }

        self.flush()
    }

    pub fn print_at(&mut self, pos: Pos, ch: char, color: Color) -> Result<()> {
        self.put(pos.0, pos.1, Glyph { ch, color })
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Failed to clear terminal")?;
        self.screen = vec![BLANK; self.width as usize * self.height as usize];
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Failed to flush terminal output")
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn put(&mut self, x: TermInt, y: TermInt, glyph: Glyph) -> Result<()> {
        let i = match self.index((x, y)) {
            Some(i) => i,
            None => return Ok(()),
        };

        if self.screen[i] == glyph {
            return Ok(());
        }
        self.screen[i] = glyph;

        // Cells under an open message are only buffered, so hiding the
        // message later reveals the latest board.
        if self.is_under_message((x, y)) {
            return Ok(());
        }
        self.print_at_no_save((x, y), glyph)
    }

    fn print_at_no_save(&mut self, pos: Pos, glyph: Glyph) -> Result<()> {
        // Used for messages too, which must not overwrite the buffer they
        // are restored from.
        if self.index(pos).is_none() {
            return Ok(());
        }

        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            style::SetForegroundColor(glyph.color),
            style::Print(glyph.ch)
        )
        .context("Failed to queue terminal output")
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.0 >= self.width || pos.1 >= self.height {
            return None;
        }
        Some(self.width as usize * pos.1 as usize + pos.0 as usize)
    }

    fn is_under_message(&self, pos: Pos) -> bool {
        match &self.current_msg {
            Some(msg) => {
                let (left, top) = msg.top_left();
                (left..left + msg.width()).contains(&pos.0) && (top..top + msg.height()).contains(&pos.1)
            }
            None => false,
        }
    }
}

impl Message {
    pub fn new(width: TermInt, height: TermInt, top_left: Pos) -> Self {
        Message { width, height, top_left }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn top_left(&self) -> Pos {
        self.top_left
    }
}

fn as_key_press(event: Event) -> Option<KeyEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(key),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_size() {
        assert_eq!(board_size(30), Some((62, 32)));
        assert_eq!(board_size(3), Some((8, 5)));
    }

    #[test]
    fn test_board_size_rejects_overflow() {
        assert_eq!(board_size(65535), None);
        assert_eq!(board_size(32767), None);
        assert_eq!(board_size(32766), Some((65534, 32768)));
        assert_eq!(board_size(usize::MAX), None);
    }
}
