//! Sudoku grid model: locations, the generic 9×9 grid, and puzzle parsing.

/// Width of a grid.
pub const COLUMNS: usize = 9;
/// Height of a grid.
pub const ROWS: usize = 9;
/// Number of rows in a box.
pub const BOX_ROWS: usize = 3;
/// Number of columns in a box.
pub const BOX_COLUMNS: usize = 3;
/// Number of boxes horizontally in a grid.
pub const HBOXES: usize = COLUMNS / BOX_COLUMNS;
/// Number of cells in a grid.
pub const CELLS: usize = COLUMNS * ROWS;

/// A location in a 9×9 grid.
///
/// Row and column are 0-based, counted left-to-right and top-to-bottom.
/// Boxes are numbered the same way:
///
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GridLocation(usize);

impl GridLocation {
    pub fn from_row_col(row: usize, col: usize) -> Self {
        debug_assert!(row < ROWS && col < COLUMNS);
        Self(row * COLUMNS + col)
    }

    pub fn from_absolute(index: usize) -> Option<Self> {
        (index < CELLS).then_some(Self(index))
    }

    #[inline]
    pub fn row(self) -> usize {
        self.0 / COLUMNS
    }

    #[inline]
    pub fn col(self) -> usize {
        self.0 % COLUMNS
    }

    /// Absolute index, 0 at the top left through 80 at the bottom right.
    #[inline]
    pub fn abs(self) -> usize {
        self.0
    }

    /// Index of the 3×3 box containing this location.
    pub fn box_index(self) -> usize {
        (self.row() / BOX_ROWS) * HBOXES + self.col() / BOX_COLUMNS
    }

    /// The location moved `right` columns and `up` rows, or `None` when that
    /// falls outside the grid.
    pub fn relative(self, right: i32, up: i32) -> Option<Self> {
        let row = self.row() as i32 - up;
        let col = self.col() as i32 + right;
        if row < 0 || row >= ROWS as i32 || col < 0 || col >= COLUMNS as i32 {
            return None;
        }
        Some(Self::from_row_col(row as usize, col as usize))
    }

    pub fn left(self) -> Option<Self> {
        self.relative(-1, 0)
    }

    pub fn right(self) -> Option<Self> {
        self.relative(1, 0)
    }

    pub fn up(self) -> Option<Self> {
        self.relative(0, 1)
    }

    pub fn down(self) -> Option<Self> {
        self.relative(0, -1)
    }

    /// All locations in row-major order.
    pub fn all() -> impl Iterator<Item = GridLocation> {
        (0..CELLS).map(GridLocation)
    }
}

/// A 9×9 grid of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    items: Vec<T>,
}

impl<T> Grid<T> {
    /// Builds a grid by evaluating `f` at every location in row-major order.
    pub fn from_fn(mut f: impl FnMut(GridLocation) -> T) -> Self {
        Self {
            items: (0..CELLS).map(|i| f(GridLocation(i))).collect(),
        }
    }

    pub fn get(&self, location: GridLocation) -> &T {
        &self.items[location.abs()]
    }

    /// Maps every item to a new value using its current value and location.
    pub fn map<U>(&self, mut f: impl FnMut(&T, GridLocation) -> U) -> Grid<U> {
        Grid {
            items: self
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| f(item, GridLocation(i)))
                .collect(),
        }
    }

    /// All locations whose item matches the predicate.
    pub fn find(&self, mut predicate: impl FnMut(&T, GridLocation) -> bool) -> Vec<GridLocation> {
        self.items
            .iter()
            .enumerate()
            .filter(|(i, item)| predicate(item, GridLocation(*i)))
            .map(|(i, _)| GridLocation(i))
            .collect()
    }
}

impl<T: Clone> Grid<T> {
    /// A copy of the grid with the item at `location` replaced.
    pub fn with(&self, location: GridLocation, item: T) -> Grid<T> {
        let mut items = self.items.clone();
        items[location.abs()] = item;
        Grid { items }
    }
}

/// An empty sudoku cell is `None`; filled cells hold 1 through 9.
pub type Cell = Option<u8>;

/// Serialization format of a puzzle string.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridFormat {
    /// Items on a row are spaced apart by one character, with '0' for an
    /// empty slot.
    SpacedWithZeroes,
    /// Items on a row are consecutive, with '0' for an empty slot.
    Zeroes,
    /// Items on a row are consecutive, with '.' for an empty slot.
    Dots,
}

impl GridFormat {
    /// Guesses the format from the content.
    pub fn detect(content: &str) -> GridFormat {
        let body = content.trim();
        if body.contains(' ') {
            GridFormat::SpacedWithZeroes
        } else if body.contains('0') {
            GridFormat::Zeroes
        } else if body.contains('.') {
            GridFormat::Dots
        } else {
            GridFormat::Zeroes
        }
    }
}

impl Grid<Cell> {
    pub fn empty() -> Self {
        Grid::from_fn(|_| None)
    }

    /// Parses a puzzle, detecting the format from the content.
    ///
    /// Parsing is lenient: missing rows, short rows and unexpected characters
    /// all read as empty cells.
    pub fn parse(content: &str) -> Self {
        Self::parse_with(content, GridFormat::detect(content))
    }

    pub fn parse_with(content: &str, format: GridFormat) -> Self {
        let lines: Vec<&str> = content.trim().lines().map(str::trim).collect();

        Grid::from_fn(|location| {
            let line = lines.get(location.row()).copied().unwrap_or("");
            let index = match format {
                GridFormat::SpacedWithZeroes => location.col() * 2,
                GridFormat::Zeroes | GridFormat::Dots => location.col(),
            };
            match line.chars().nth(index) {
                Some(c @ '1'..='9') => Some(c as u8 - b'0'),
                _ => None,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPACED: &str = "
0 4 0 0 0 0 1 7 9
0 0 2 0 0 8 0 5 4
0 0 6 0 0 5 0 0 8
0 8 0 0 7 0 9 1 0
0 5 0 0 9 0 0 3 0
0 1 9 0 6 0 0 4 0
3 0 0 4 0 0 7 0 0
5 7 0 1 0 0 2 0 0
9 2 8 0 0 0 0 6 0
";

    #[test]
    fn detects_formats() {
        assert_eq!(GridFormat::detect(SPACED), GridFormat::SpacedWithZeroes);
        assert_eq!(GridFormat::detect("004\n120"), GridFormat::Zeroes);
        assert_eq!(GridFormat::detect("..4\n12."), GridFormat::Dots);
    }

    #[test]
    fn parses_spaced_puzzle() {
        let grid = Grid::parse(SPACED);
        assert_eq!(*grid.get(GridLocation::from_row_col(0, 0)), None);
        assert_eq!(*grid.get(GridLocation::from_row_col(0, 1)), Some(4));
        assert_eq!(*grid.get(GridLocation::from_row_col(0, 8)), Some(9));
        assert_eq!(*grid.get(GridLocation::from_row_col(8, 0)), Some(9));
        assert_eq!(*grid.get(GridLocation::from_row_col(8, 8)), None);
    }

    #[test]
    fn parses_dots_the_same_as_zeroes() {
        let a = Grid::parse(".4.\n1..");
        let b = Grid::parse("040\n100");
        assert_eq!(a, b);
    }

    #[test]
    fn short_input_reads_as_empty() {
        let grid = Grid::parse("5");
        assert_eq!(*grid.get(GridLocation::from_row_col(0, 0)), Some(5));
        assert_eq!(grid.find(|c, _| c.is_some()).len(), 1);
    }

    #[test]
    fn location_boxes_run_left_to_right_then_down() {
        assert_eq!(GridLocation::from_row_col(0, 0).box_index(), 0);
        assert_eq!(GridLocation::from_row_col(0, 8).box_index(), 2);
        assert_eq!(GridLocation::from_row_col(4, 4).box_index(), 4);
        assert_eq!(GridLocation::from_row_col(8, 0).box_index(), 6);
        assert_eq!(GridLocation::from_row_col(8, 8).box_index(), 8);
    }

    #[test]
    fn relative_moves_stop_at_the_edges() {
        let top_left = GridLocation::from_row_col(0, 0);
        assert_eq!(top_left.left(), None);
        assert_eq!(top_left.up(), None);
        assert_eq!(top_left.right(), Some(GridLocation::from_row_col(0, 1)));
        assert_eq!(top_left.down(), Some(GridLocation::from_row_col(1, 0)));
    }

    #[test]
    fn with_replaces_a_single_cell() {
        let grid = Grid::empty();
        let loc = GridLocation::from_row_col(3, 7);
        let updated = grid.with(loc, Some(6));
        assert_eq!(*updated.get(loc), Some(6));
        assert_eq!(updated.find(|c, _| c.is_some()), vec![loc]);
        assert_eq!(*grid.get(loc), None);
    }
}
