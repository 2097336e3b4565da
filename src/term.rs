use crate::{Coords, TermInt, TermPos};
use crate::engine::Snapshot;
use crate::grid::Grid;
use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

const FOOD_CHAR: char = '*';
const OBSTACLE_CHAR: char = '#';
const DEAD_SNAKE_CHAR: char = 'X';

/// Rows above the field (title and key help).
pub const MARGIN_TOP: TermInt = 2;
/// Rows taken by the margins plus the status and pause lines.
pub const MARGIN_VERTICAL: TermInt = 5;
pub const MARGIN_HORIZONTAL: TermInt = 2;

const TITLE: &str = " SNAKE GAME ";
const HELP: &str = "Arrows/WASD: Move | P: Pause | R: Restart | K: Skin | L: Leaderboard | Q: Quit";

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: TermPos,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> crossterm::Result<Self> {
        let (width, height) = terminal::size()?;
        let stdout = stdout();
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, stdout, screen, current_msg: None })
    }

    pub fn setup(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> crossterm::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn read_key_blocking(&self) -> crossterm::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    pub fn read_key_events_queue(&self) -> crossterm::Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> TermPos {
        (self.width, self.height)
    }

    /// Playfield dimensions (rows, cols) that fit this terminal.
    pub fn field_size(&self) -> (i32, i32) {
        (
            self.height as i32 - MARGIN_VERTICAL as i32,
            self.width as i32 - MARGIN_HORIZONTAL as i32,
        )
    }

    /// Title, help line and the field border.
    pub fn draw_layout(&mut self, grid: &Grid) -> crossterm::Result<()> {
        self.print_centered(0, TITLE);
        self.print_centered(1, HELP);

        let (width, height) = (grid.width() as TermInt, grid.height() as TermInt);
        let (left, top) = field_origin();
        let (right, bottom) = (left + width - 1, top + height - 1);

        for x in left..=right {
            let ch = if x == left || x == right {'+'} else {'-'};
            self.print_at((x, top), ch);
            self.print_at((x, bottom), ch);
        }

        for y in top + 1..bottom {
            self.print_at((left, y), '|');
            self.print_at((right, y), '|');
        }

        self.flush()
    }

    /// Redraws the field interior and the status lines, touching only
    /// cells that changed since the last frame.
    pub fn draw_frame(&mut self, grid: &Grid, snap: &Snapshot) -> crossterm::Result<()> {
        let cols = (grid.width() - 2) as usize;
        let mut cells = vec![' '; grid.interior_len()];
        let index = |pos: &Coords| (pos.0 as usize - 1) * cols + (pos.1 as usize - 1);

        for pos in snap.obstacles.iter() {
            cells[index(pos)] = OBSTACLE_CHAR;
        }
        cells[index(&snap.food)] = FOOD_CHAR;

        let body_char = if snap.game_over {DEAD_SNAKE_CHAR} else {snap.skin.body_char()};
        for pos in snap.snake.body() {
            cells[index(pos)] = body_char;
        }
        if !snap.game_over {
            cells[index(&snap.snake.head())] = snap.skin.head_char(snap.snake.direction());
        }

        for (pos, ch) in grid.interior_cells().zip(cells) {
            let at = to_term(pos);
            if self.screen_char(at) != ch {
                self.print_at(at, ch);
            }
        }

        let status_y = self.height - 2;
        let left = format!("Score: {}  Level: {}  Skin: {}", snap.score, snap.level, snap.skin.name());
        let right = format!("High Score: {}", snap.high_score);
        self.clear_line(status_y);
        self.print_str_at((2, status_y), &left);
        self.print_str_at((self.width.saturating_sub(right.chars().count() as TermInt + 2), status_y), &right);

        let pause_y = self.height - 1;
        self.clear_line(pause_y);
        if snap.paused {
            self.print_centered(pause_y, "*** PAUSED ***");
        }

        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> crossterm::Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ');
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch);
            }
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        self.flush()
    }

    pub fn hide_message(&mut self) -> crossterm::Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };
        let top_left = msg.top_left();

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height() {
            for x_diff in 0..msg.width() {
                let pos = (top_left.0 + x_diff, top_left.1 + y_diff);
                let ch = self.screen_char(pos);
                self.print_at_no_save(pos, ch);
            }
        }

        self.flush()
    }

    pub fn print_at(&mut self, pos: TermPos, ch: char) {
        if pos.0 >= self.width || pos.1 >= self.height {
            return;
        }
        let _ = queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch));
        self.screen[self.width as usize * pos.1 as usize + pos.0 as usize] = ch;
    }

    pub fn clear(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> crossterm::Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn screen_char(&self, pos: TermPos) -> char {
        self.screen
            .get(self.width as usize * pos.1 as usize + pos.0 as usize)
            .copied()
            .unwrap_or(' ')
    }

    fn print_str_at(&mut self, pos: TermPos, text: &str) {
        for (x_diff, ch) in text.chars().enumerate() {
            self.print_at((pos.0 + x_diff as TermInt, pos.1), ch);
        }
    }

    fn print_centered(&mut self, y: TermInt, text: &str) {
        let len = text.chars().count() as TermInt;
        self.print_str_at(((self.width / 2).saturating_sub(len / 2), y), text);
    }

    fn clear_line(&mut self, y: TermInt) {
        for x in 0..self.width {
            if self.screen_char((x, y)) != ' ' {
                self.print_at((x, y), ' ');
            }
        }
    }

    fn print_at_no_save(&mut self, pos: TermPos, ch: char) {
        // To be used for printing messages, where we don't wanna overwrite our
        // local buffer to restore it when the message is hidden
        let _ = queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch));
    }
}

impl Message {
    pub fn new(width: TermInt, height: TermInt, top_left: TermPos) -> Self {
        Message { width, height, top_left }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn top_left(&self) -> TermPos {
        self.top_left
    }
}

fn field_origin() -> TermPos {
    (MARGIN_HORIZONTAL / 2, MARGIN_TOP)
}

/// Terminal position of a grid cell.
fn to_term(pos: Coords) -> TermPos {
    let (left, top) = field_origin();
    (left + pos.1 as TermInt, top + pos.0 as TermInt)
}
