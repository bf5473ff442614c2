/// World units per tile side.
pub const CELL_SIZE: f32 = 64.0;

const DEFAULT_MAP: [[u8; 7]; 7] = [
    [1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 1, 0, 1],
    [1, 0, 0, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 0, 0, 0, 1],
    [1, 0, 0, 0, 1, 0, 1],
    [1, 1, 1, 1, 1, 1, 1],
];

/// Static tile grid. 0 is empty, anything else is a wall.
pub struct GridMap {
    rows: Vec<Vec<u8>>,
    width: usize,
    pub cell_size: f32,
}

impl GridMap {
    /// Builds a map from rows of tile codes. Short rows are padded with
    /// walls so the grid stays rectangular.
    pub fn new(rows: Vec<Vec<u8>>, cell_size: f32) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, 1);
                row
            })
            .collect();
        Self {
            rows,
            width,
            cell_size,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_out_of_bounds(&self, cell_x: i64, cell_y: i64) -> bool {
        cell_x < 0 || cell_x >= self.width as i64 || cell_y < 0 || cell_y >= self.height() as i64
    }

    /// Out-of-bounds cells are never walls.
    #[inline]
    pub fn is_wall(&self, cell_x: i64, cell_y: i64) -> bool {
        if self.is_out_of_bounds(cell_x, cell_y) {
            return false;
        }
        self.rows[cell_y as usize][cell_x as usize] != 0
    }

    /// Iterates wall cells as (cell_x, cell_y).
    pub fn walls(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, tile)| **tile != 0)
                .map(move |(x, _)| (x, y))
        })
    }
}

impl Default for GridMap {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAP.iter().map(|row| row.to_vec()).collect(),
            CELL_SIZE,
        )
    }
}
