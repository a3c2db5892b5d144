//! Grid coordinates, tile ids, and conversions to world-space positions.

use glam::Vec2;

/// Edge length of one tile in metres.
pub const TILE_SIZE_METERS: f32 = 1024.0;

/// Width and height of the tile grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Extent {
    /// Tiles along x.
    pub width: u32,
    /// Tiles along y.
    pub height: u32,
}

/// A tile position on the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    /// Column, `0 <= x < width`.
    pub x: u32,
    /// Row, `0 <= y < height`.
    pub y: u32,
}

impl Coordinate {
    /// Construct a coordinate.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Row-major tile index: `y * width + x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl TileId {
    /// The id as a vector index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Extent {
    /// A square extent.
    pub const fn square(dimension: u32) -> Self {
        Self {
            width: dimension,
            height: dimension,
        }
    }

    /// Number of tiles covered.
    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size of the grid in world units.
    pub fn world_size(self) -> Vec2 {
        Vec2::new(
            self.width as f32 * TILE_SIZE_METERS,
            self.height as f32 * TILE_SIZE_METERS,
        )
    }

    /// Returns `true` if `c` lies on the grid.
    #[inline]
    pub const fn contains(self, c: Coordinate) -> bool {
        c.x < self.width && c.y < self.height
    }

    /// Tile id for `c`, or `None` off the grid.
    #[inline]
    pub const fn tile_id(self, c: Coordinate) -> Option<TileId> {
        if self.contains(c) {
            Some(TileId(c.y * self.width + c.x))
        } else {
            None
        }
    }

    /// Coordinate for `id`, or `None` past the last tile.
    #[inline]
    pub const fn coordinate(self, id: TileId) -> Option<Coordinate> {
        if (id.0 as usize) < self.area() {
            Some(Coordinate::new(id.0 % self.width, id.0 / self.width))
        } else {
            None
        }
    }

    /// Centre of tile `c` in world units.
    #[inline]
    pub fn position(self, c: Coordinate) -> Vec2 {
        Vec2::new(
            (c.x as f32 + 0.5) * TILE_SIZE_METERS,
            (c.y as f32 + 0.5) * TILE_SIZE_METERS,
        )
    }

    /// Tile containing world position `p`, or `None` off the grid.
    pub fn coordinate_at(self, p: Vec2) -> Option<Coordinate> {
        if !(p.x >= 0.0 && p.y >= 0.0) {
            return None;
        }
        let c = Coordinate::new(
            (p.x / TILE_SIZE_METERS).floor() as u32,
            (p.y / TILE_SIZE_METERS).floor() as u32,
        );
        self.contains(c).then_some(c)
    }

    /// `c` scaled into `[0, 1]^2` by tile centre.
    #[inline]
    pub fn normalized(self, c: Coordinate) -> Vec2 {
        Vec2::new(
            (c.x as f32 + 0.5) / self.width as f32,
            (c.y as f32 + 0.5) / self.height as f32,
        )
    }

    /// In-grid 4-neighbours of `c`, in west, east, north, south order.
    pub fn neighbors4(self, c: Coordinate) -> impl Iterator<Item = Coordinate> {
        let Coordinate { x, y } = c;
        [
            x.checked_sub(1).map(|nx| Coordinate::new(nx, y)),
            (x + 1 < self.width).then(|| Coordinate::new(x + 1, y)),
            y.checked_sub(1).map(|ny| Coordinate::new(x, ny)),
            (y + 1 < self.height).then(|| Coordinate::new(x, y + 1)),
        ]
        .into_iter()
        .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_id_roundtrip_all_cells() {
        let extent = Extent::square(64);
        for y in 0..64 {
            for x in 0..64 {
                let c = Coordinate::new(x, y);
                let id = extent.tile_id(c).unwrap();
                assert_eq!(id.0, y * 64 + x);
                assert_eq!(extent.coordinate(id), Some(c));
            }
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        let extent = Extent::square(64);
        assert_eq!(extent.tile_id(Coordinate::new(64, 0)), None);
        assert_eq!(extent.tile_id(Coordinate::new(0, 64)), None);
        assert_eq!(extent.coordinate(TileId(64 * 64)), None);
    }

    #[test]
    fn test_position_is_tile_centre() {
        let extent = Extent::square(64);
        let p = extent.position(Coordinate::new(2, 3));
        assert_eq!(p, Vec2::new(2.5 * 1024.0, 3.5 * 1024.0));
        assert_eq!(extent.coordinate_at(p), Some(Coordinate::new(2, 3)));
    }

    #[test]
    fn test_coordinate_at_edges() {
        let extent = Extent::square(64);
        assert_eq!(extent.coordinate_at(Vec2::ZERO), Some(Coordinate::new(0, 0)));
        assert_eq!(extent.coordinate_at(Vec2::new(-1.0, 5.0)), None);
        assert_eq!(extent.coordinate_at(extent.world_size()), None);
        assert_eq!(extent.coordinate_at(Vec2::new(f32::NAN, 0.0)), None);
    }

    #[test]
    fn test_neighbors4_at_corner_and_interior() {
        let extent = Extent::square(4);
        let corner: Vec<_> = extent.neighbors4(Coordinate::new(0, 0)).collect();
        assert_eq!(corner, vec![Coordinate::new(1, 0), Coordinate::new(0, 1)]);
        assert_eq!(extent.neighbors4(Coordinate::new(1, 1)).count(), 4);
        assert_eq!(extent.neighbors4(Coordinate::new(3, 3)).count(), 2);
    }
}
