use crate::collision::{snap_to_grid, Collidable};
use sdl2::rect::Rect;

/// One grid-aligned water tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterTile {
    pub x: i32,
    pub y: i32,
    pub size: u32,
}

impl WaterTile {
    /// Creates a tile, snapping the position to the grid
    pub fn new(x: i32, y: i32, grid_size: i32) -> Self {
        WaterTile {
            x: snap_to_grid(x, grid_size),
            y: snap_to_grid(y, grid_size),
            size: grid_size as u32,
        }
    }
}

impl Collidable for WaterTile {
    fn get_bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

/// A cluster of water tiles
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lake {
    pub tiles: Vec<WaterTile>,
}

impl Lake {
    pub fn new(tiles: Vec<WaterTile>) -> Self {
        Lake { tiles }
    }

    pub fn overlaps(&self, rect: &Rect) -> bool {
        self.tiles.iter().any(|tile| tile.overlaps(rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_snaps_to_grid() {
        let tile = WaterTile::new(130, 70, 64);
        assert_eq!((tile.x, tile.y), (128, 64));
    }

    #[test]
    fn test_lake_overlap() {
        let lake = Lake::new(vec![WaterTile::new(0, 0, 64), WaterTile::new(64, 0, 64)]);

        assert!(lake.overlaps(&Rect::new(100, 10, 10, 10)));
        assert!(!lake.overlaps(&Rect::new(0, 64, 10, 10)));
    }
}
