#![forbid(unsafe_code)]

//! A minimal cell grid that screens draw into once per frame.
//!
//! Coordinates are signed so partially visible cards can be drawn with
//! negative origins; anything outside the grid is clipped. Wide glyphs
//! occupy two cells, the second marked as a continuation.

use std::io::{self, Write};

use crossterm::style::{Attribute, Color, Print, SetAttribute, SetForegroundColor};
use crossterm::{cursor, queue, terminal};
use unicode_width::UnicodeWidthChar;

/// Foreground color and weight of a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    pub const PLAIN: Style = Style {
        fg: None,
        bold: false,
        dim: false,
    };

    #[must_use]
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            bold: false,
            dim: false,
        }
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    style: Style,
    /// Right half of a wide glyph.
    continuation: bool,
}

const BLANK: Cell = Cell {
    ch: ' ',
    style: Style::PLAIN,
    continuation: false,
};

/// Rectangle in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether column `x`, row `y` is inside.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Frame buffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; usize::from(width) * usize::from(height)],
        }
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Change dimensions and blank every cell.
    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::new(width, height);
    }

    /// Blank every cell.
    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some(y as usize * usize::from(self.width) + x as usize)
    }

    /// Write one glyph, clipped. Returns the number of columns it occupies.
    ///
    /// A wide glyph with only one half on the grid is drawn as a blank.
    /// Overwriting either half of an existing wide glyph blanks the other.
    pub fn set(&mut self, x: i32, y: i32, ch: char, style: Style) -> i32 {
        let w = ch.width().unwrap_or(0) as i32;
        if w == 0 {
            return 0;
        }
        let lead = self.index(x, y);
        let tail = if w == 2 { self.index(x + 1, y) } else { None };
        self.split_wide(x, y);
        if w == 2 {
            self.split_wide(x + 1, y);
        }

        let blank = Cell {
            ch: ' ',
            style,
            continuation: false,
        };
        match (lead, tail) {
            (Some(i), Some(j)) => {
                self.cells[i] = Cell {
                    ch,
                    style,
                    continuation: false,
                };
                self.cells[j] = Cell {
                    ch: ' ',
                    style,
                    continuation: true,
                };
            }
            (Some(i), None) if w == 2 => self.cells[i] = blank,
            (Some(i), None) => {
                self.cells[i] = Cell {
                    ch,
                    style,
                    continuation: false,
                };
            }
            (None, Some(j)) => self.cells[j] = blank,
            (None, None) => {}
        }
        w
    }

    /// Blank the other half of a wide glyph covering `x`, `y`.
    fn split_wide(&mut self, x: i32, y: i32) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        if self.cells[i].continuation {
            if let Some(lead) = self.index(x - 1, y) {
                self.cells[lead] = BLANK;
            }
        } else if let Some(next) = self.index(x + 1, y)
            && self.cells[next].continuation
        {
            self.cells[next] = BLANK;
        }
    }

    /// Write `text` starting at column `x`, stopping before `limit`.
    /// Returns the column after the last glyph written.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, style: Style, limit: i32) -> i32 {
        let mut col = x;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as i32;
            if col + w > limit {
                break;
            }
            col += self.set(col, y, ch, style);
        }
        col
    }

    /// Fill a row segment with `ch`.
    pub fn hline(&mut self, x: i32, y: i32, len: i32, ch: char, style: Style) {
        for dx in 0..len {
            self.set(x + dx, y, ch, style);
        }
    }

    /// Draw a rounded single-line border around `rect`.
    pub fn draw_box(&mut self, rect: Rect, style: Style) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let (r, b) = (rect.right() - 1, rect.bottom() - 1);
        self.hline(rect.x + 1, rect.y, rect.width - 2, '─', style);
        self.hline(rect.x + 1, b, rect.width - 2, '─', style);
        for y in rect.y + 1..b {
            self.set(rect.x, y, '│', style);
            self.set(r, y, '│', style);
        }
        self.set(rect.x, rect.y, '╭', style);
        self.set(r, rect.y, '╮', style);
        self.set(rect.x, b, '╰', style);
        self.set(r, b, '╯', style);
    }

    /// Text of row `y` with trailing blanks removed.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        let start = usize::from(y) * usize::from(self.width);
        let Some(row) = self.cells.get(start..start + usize::from(self.width)) else {
            return String::new();
        };
        let text: String = row
            .iter()
            .filter(|c| !c.continuation)
            .map(|c| c.ch)
            .collect();
        text.trim_end().to_string()
    }

    /// Style of the cell at `x`, `y`.
    #[must_use]
    pub fn style_at(&self, x: u16, y: u16) -> Option<Style> {
        self.index(i32::from(x), i32::from(y))
            .map(|i| self.cells[i].style)
    }

    /// Emit the whole grid.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn flush<W: Write>(&self, out: &mut W) -> io::Result<()> {
        queue!(out, terminal::BeginSynchronizedUpdate, cursor::MoveTo(0, 0))?;
        let mut current: Option<Style> = None;
        for y in 0..self.height {
            queue!(out, cursor::MoveTo(0, y))?;
            let start = usize::from(y) * usize::from(self.width);
            for cell in &self.cells[start..start + usize::from(self.width)] {
                if cell.continuation {
                    continue;
                }
                if current != Some(cell.style) {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                    if let Some(color) = cell.style.fg {
                        queue!(out, SetForegroundColor(color))?;
                    }
                    if cell.style.bold {
                        queue!(out, SetAttribute(Attribute::Bold))?;
                    }
                    if cell.style.dim {
                        queue!(out, SetAttribute(Attribute::Dim))?;
                    }
                    current = Some(cell.style);
                }
                queue!(out, Print(cell.ch))?;
            }
        }
        queue!(
            out,
            SetAttribute(Attribute::Reset),
            terminal::EndSynchronizedUpdate
        )?;
        out.flush()
    }
}

/// Greedy word wrap to `width` columns. Overlong words are split.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    use unicode_width::UnicodeWidthStr;

    let mut lines = Vec::new();
    if width == 0 {
        return lines;
    }
    let mut line = String::new();
    let mut line_w = 0;
    for word in text.split_whitespace() {
        let word_w = word.width();
        let sep = usize::from(!line.is_empty());
        if line_w + sep + word_w <= width {
            if sep == 1 {
                line.push(' ');
            }
            line.push_str(word);
            line_w += sep + word_w;
            continue;
        }
        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line_w = 0;
        }
        if word_w <= width {
            line.push_str(word);
            line_w = word_w;
            continue;
        }
        for ch in word.chars() {
            let w = ch.width().unwrap_or(0);
            if line_w + w > width {
                lines.push(std::mem::take(&mut line));
                line_w = 0;
            }
            line.push(ch);
            line_w += w;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
