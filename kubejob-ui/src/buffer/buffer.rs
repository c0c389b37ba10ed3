use super::Cell;
use crate::rect::Rect;
use crate::style::Style;
use crate::text::char_width;

/// A width x height grid of cells that frames are drawn into.
///
/// All writes are clipped to the grid, so drawing code never has to check
/// bounds before calling in.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Fills `area` with blanks in `style`.
    pub fn fill(&mut self, area: Rect, style: Style) {
        self.fill_char(area, ' ', style);
    }

    pub fn fill_char(&mut self, area: Rect, ch: char, style: Style) {
        let cell = Cell::new(ch).with_style(style);
        for y in area.y..area.bottom().min(self.height) {
            for x in area.x..area.right().min(self.width) {
                self.set(x, y, cell);
            }
        }
    }

    /// Writes `text` at `(x, y)` using at most `max_width` cells.
    ///
    /// Returns the number of cells written. Double-width characters that
    /// would straddle the limit are dropped.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, max_width: u16, style: Style) -> u16 {
        if y >= self.height {
            return 0;
        }
        let limit = x.saturating_add(max_width).min(self.width);
        let mut cx = x;

        for ch in text.chars() {
            let w = char_width(ch) as u16;
            if w == 0 {
                continue;
            }
            if cx.saturating_add(w) > limit {
                break;
            }
            self.set(cx, y, Cell::new(ch).with_style(style));
            if w == 2 {
                let mut cont = Cell::new(' ').with_style(style);
                cont.wide_continuation = true;
                self.set(cx + 1, y, cont);
            }
            cx += w;
        }

        cx - x
    }

    /// Restyles `area` without touching characters.
    pub fn set_style(&mut self, area: Rect, style: Style) {
        for y in area.y..area.bottom().min(self.height) {
            for x in area.x..area.right().min(self.width) {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.fg = style.fg;
                    cell.bg = style.bg;
                    cell.style = style.text;
                }
            }
        }
    }

    /// Copies a `area.width` x `area.height` window of `src`, starting at
    /// column `src_x`, into `area`.
    pub fn blit(&mut self, src: &Buffer, src_x: u16, area: Rect) {
        for dy in 0..area.height {
            for dx in 0..area.width {
                let Some(cell) = src.get(src_x.saturating_add(dx), dy) else {
                    continue;
                };
                let mut cell = *cell;
                // Half a wide char at the left edge has nothing to continue.
                if dx == 0 && cell.wide_continuation {
                    cell.wide_continuation = false;
                    cell.char = ' ';
                }
                self.set(area.x + dx, area.y + dy, cell);
            }
        }
    }

    /// Characters of row `y`, continuation cells skipped.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect()
    }

    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }
}
