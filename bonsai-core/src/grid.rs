use crate::types::Style;
use std::borrow::Cow;

/// A painted cell: the glyph and its display category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub style: Style,
}

/// One cell of a serialized grid, ready for display.
///
/// `text` is already escaped for markup; blank cells are a single space
/// with no style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedCell {
    pub text: Cow<'static, str>,
    pub style: Option<Style>,
}

/// Fixed-size character canvas the growth engine paints into.
///
/// Cells are stored row-major. Every cell starts blank (`None`) and is
/// only ever overwritten by [`Grid::write`].
///
/// Coordinates are signed so callers can pass agent positions straight
/// through; anything outside `[0, rows) x [0, cols)` is simply not
/// addressable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Cell>>,
}

impl Grid {
    /// Creates a blank [`Grid`].
    ///
    /// ### Parameters
    /// - `rows` - Number of rows.
    /// - `cols` - Number of columns.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Maps a signed coordinate to a storage index, or `None` when it is
    /// outside the grid.
    #[inline]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Paints one cell.
    ///
    /// Out-of-bounds writes are dropped without error: branch tips may
    /// wander off the canvas and just stop leaving marks.
    ///
    /// ### Parameters
    /// - `row` - Target row (may be negative or past the end).
    /// - `col` - Target column (may be negative or past the end).
    /// - `symbol` - Glyph to store.
    /// - `style` - Display category of the glyph.
    ///
    /// ### Returns
    /// `true` if the cell was inside the grid and got overwritten.
    pub fn write(&mut self, row: i32, col: i32, symbol: char, style: Style) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = Some(Cell { symbol, style });
                true
            }
            None => false,
        }
    }

    /// Returns the cell at `(row, col)`, or `None` if it is blank or out
    /// of bounds.
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).and_then(|i| self.cells[i])
    }

    /// Returns `true` if nothing has been painted yet.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Number of non-blank cells.
    pub fn painted_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterates over the rows as slices of cells.
    ///
    /// Always yields `rows` slices, which are empty when `cols` is zero.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Option<Cell>]> + '_ {
        (0..self.rows).map(move |r| &self.cells[r * self.cols..(r + 1) * self.cols])
    }

    /// Produces a display-ready copy of the grid.
    ///
    /// Each of the `rows` inner vectors holds exactly `cols` cells. Painted
    /// cells carry their style and a markup-escaped symbol; blank cells are
    /// a bare space. This does not touch the grid.
    pub fn serialize(&self) -> Vec<Vec<RenderedCell>> {
        self.iter_rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(c) => RenderedCell {
                            text: escape_symbol(c.symbol),
                            style: Some(c.style),
                        },
                        None => RenderedCell {
                            text: Cow::Borrowed(" "),
                            style: None,
                        },
                    })
                    .collect()
            })
            .collect()
    }

    /// Renders the grid as markup: every painted cell is wrapped in a
    /// `<span>` whose class is the style name, every row ends with `\n`.
    pub fn to_markup(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in self.serialize() {
            for cell in row {
                match cell.style {
                    Some(style) => {
                        out.push_str("<span class=\"");
                        out.push_str(style.class_name());
                        out.push_str("\">");
                        out.push_str(&cell.text);
                        out.push_str("</span>");
                    }
                    None => out.push_str(&cell.text),
                }
            }
            out.push('\n');
        }
        out
    }

    /// Renders the raw symbols, unescaped and unstyled, one line per row.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in self.iter_rows() {
            out.extend(row.iter().map(|c| c.map_or(' ', |c| c.symbol)));
            out.push('\n');
        }
        out
    }
}

/// Escapes the characters that carry meaning in markup.
pub fn escape_symbol(symbol: char) -> Cow<'static, str> {
    match symbol {
        '&' => Cow::Borrowed("&amp;"),
        '<' => Cow::Borrowed("&lt;"),
        '>' => Cow::Borrowed("&gt;"),
        other => Cow::Owned(other.to_string()),
    }
}
