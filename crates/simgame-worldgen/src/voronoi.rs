//! Voronoi partitioning of a rectangle from seeded sample points.
//!
//! Ownership is resolved on a square sample grid: every cell belongs to the
//! centroid nearest its centre (squared distance, lowest id on ties). Cell
//! adjacency is found by comparing each cell with its east and south
//! neighbours only, which visits every shared boundary exactly once.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::Rng;

use crate::error::WorldError;

/// Uniform bucket grid answering nearest-point queries.
///
/// Results are identical to a brute-force scan, including the lowest-index
/// tie rule, so callers can mix this with exhaustive searches freely.
#[derive(Clone, Debug)]
pub struct NearestIndex {
    points: Vec<Vec2>,
    cells_x: usize,
    cells_y: usize,
    cell_size: Vec2,
    buckets: Vec<Vec<u32>>,
}

impl NearestIndex {
    /// Build an index over `points` lying (mostly) inside `[0, size)`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] when `points` is empty or
    /// `size` is degenerate.
    pub fn new(points: Vec<Vec2>, size: Vec2) -> Result<Self, WorldError> {
        if points.is_empty() {
            return Err(WorldError::InvalidArgument(
                "nearest-point index needs at least one point".into(),
            ));
        }
        if !(size.x > 0.0 && size.y > 0.0) {
            return Err(WorldError::InvalidArgument(format!(
                "partition canvas must have positive area, got {size}"
            )));
        }

        // Roughly one point per bucket.
        let side = (points.len() as f32).sqrt().ceil().max(1.0) as usize;
        let cells_x = side;
        let cells_y = side;
        let cell_size = Vec2::new(size.x / cells_x as f32, size.y / cells_y as f32);

        let mut buckets = vec![Vec::new(); cells_x * cells_y];
        for (i, p) in points.iter().enumerate() {
            let (cx, cy) = Self::cell_of(*p, cell_size, cells_x, cells_y);
            buckets[cy * cells_x + cx].push(i as u32);
        }

        Ok(Self {
            points,
            cells_x,
            cells_y,
            cell_size,
            buckets,
        })
    }

    fn cell_of(p: Vec2, cell_size: Vec2, cells_x: usize, cells_y: usize) -> (usize, usize) {
        let cx = (p.x / cell_size.x).floor().clamp(0.0, (cells_x - 1) as f32) as usize;
        let cy = (p.y / cell_size.y).floor().clamp(0.0, (cells_y - 1) as f32) as usize;
        (cx, cy)
    }

    /// Indexed points, in id order.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Id of the point nearest `p`.
    pub fn nearest(&self, p: Vec2) -> u32 {
        let (cx, cy) = Self::cell_of(p, self.cell_size, self.cells_x, self.cells_y);
        let mut best_id = u32::MAX;
        let mut best_d2 = f32::INFINITY;
        let max_ring = self.cells_x.max(self.cells_y);

        for ring in 0..=max_ring {
            let x0 = cx as isize - ring as isize;
            let x1 = cx as isize + ring as isize;
            let y0 = cy as isize - ring as isize;
            let y1 = cy as isize + ring as isize;

            for y in y0..=y1 {
                for x in x0..=x1 {
                    // Only the perimeter of the ring is new.
                    if x != x0 && x != x1 && y != y0 && y != y1 {
                        continue;
                    }
                    if x < 0 || y < 0 || x >= self.cells_x as isize || y >= self.cells_y as isize {
                        continue;
                    }
                    for &id in &self.buckets[y as usize * self.cells_x + x as usize] {
                        let d2 = self.points[id as usize].distance_squared(p);
                        if d2 < best_d2 || (d2 == best_d2 && id < best_id) {
                            best_d2 = d2;
                            best_id = id;
                        }
                    }
                }
            }

            let covers_all = x0 <= 0
                && y0 <= 0
                && x1 >= self.cells_x as isize - 1
                && y1 >= self.cells_y as isize - 1;
            if covers_all {
                break;
            }

            // Any point outside the searched square is at least `gap` away.
            let gap = [
                p.x - x0 as f32 * self.cell_size.x,
                (x1 + 1) as f32 * self.cell_size.x - p.x,
                p.y - y0 as f32 * self.cell_size.y,
                (y1 + 1) as f32 * self.cell_size.y - p.y,
            ]
            .into_iter()
            .fold(f32::INFINITY, f32::min);
            if gap > 0.0 && best_d2 < gap * gap {
                break;
            }
        }

        best_id
    }
}

/// Draw `count` points uniformly from `[0, size)`.
pub fn uniform_points(count: usize, size: Vec2, rng: &mut impl Rng) -> Vec<Vec2> {
    (0..count)
        .map(|_| Vec2::new(rng.random::<f32>() * size.x, rng.random::<f32>() * size.y))
        .collect()
}

/// A Voronoi partition of a `size` rectangle sampled on a `resolution^2` grid.
#[derive(Clone, Debug)]
pub struct Voronoi {
    index: NearestIndex,
    size: Vec2,
    resolution: usize,
    ownership: Vec<u32>,
    adjacency: Vec<BTreeSet<u32>>,
}

impl Voronoi {
    /// Sample `count` uniform centroids in `[0, size)` and partition.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] when `count` or `resolution` is zero.
    pub fn generate(
        count: usize,
        size: Vec2,
        resolution: usize,
        rng: &mut impl Rng,
    ) -> Result<Self, WorldError> {
        Self::from_centroids(uniform_points(count, size, rng), size, resolution)
    }

    /// Partition using caller-supplied centroids.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] when `centroids` is empty or
    /// `resolution` is zero.
    pub fn from_centroids(
        centroids: Vec<Vec2>,
        size: Vec2,
        resolution: usize,
    ) -> Result<Self, WorldError> {
        if resolution == 0 {
            return Err(WorldError::InvalidArgument(
                "voronoi sample resolution must be positive".into(),
            ));
        }
        let index = NearestIndex::new(centroids, size)?;
        let count = index.points().len();

        let step = Vec2::new(size.x / resolution as f32, size.y / resolution as f32);
        let mut ownership = Vec::with_capacity(resolution * resolution);
        for y in 0..resolution {
            for x in 0..resolution {
                let centre = Vec2::new((x as f32 + 0.5) * step.x, (y as f32 + 0.5) * step.y);
                ownership.push(index.nearest(centre));
            }
        }

        let mut adjacency = vec![BTreeSet::new(); count];
        for y in 0..resolution {
            for x in 0..resolution {
                let owner = ownership[y * resolution + x];
                let mut link = |other: u32| {
                    if other != owner {
                        adjacency[owner as usize].insert(other);
                        adjacency[other as usize].insert(owner);
                    }
                };
                if x + 1 < resolution {
                    link(ownership[y * resolution + x + 1]);
                }
                if y + 1 < resolution {
                    link(ownership[(y + 1) * resolution + x]);
                }
            }
        }

        Ok(Self {
            index,
            size,
            resolution,
            ownership,
            adjacency,
        })
    }

    /// Centroids, indexed by region id.
    pub fn centroids(&self) -> &[Vec2] {
        self.index.points()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Always `false`: construction rejects empty inputs.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Canvas size in world units.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Sample grid edge length.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Owner of sample cell `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell lies outside the sample grid.
    pub fn owner(&self, x: usize, y: usize) -> u32 {
        self.ownership[y * self.resolution + x]
    }

    /// Neighbour set of cell `id`.
    pub fn neighbors(&self, id: u32) -> &BTreeSet<u32> {
        &self.adjacency[id as usize]
    }

    /// Cell owning an arbitrary position (nearest centroid).
    pub fn region_at(&self, position: Vec2) -> u32 {
        self.index.nearest(position)
    }

    /// Consume the partition, returning centroids and adjacency sets.
    pub fn into_parts(self) -> (Vec<Vec2>, Vec<BTreeSet<u32>>) {
        (self.index.points, self.adjacency)
    }

    /// Rasterise the partition as RGBA for debugging.
    ///
    /// Cells are shaded grey by id; pixels whose east or south neighbour has a
    /// different owner are drawn black.
    pub fn to_pixels(&self, resolution: usize) -> Vec<u8> {
        let mut pixels = vec![0u8; resolution * resolution * 4];
        let count = self.len().max(1) as f32;
        let step = Vec2::new(
            self.size.x / resolution as f32,
            self.size.y / resolution as f32,
        );
        let owner_at = |x: usize, y: usize| {
            self.region_at(Vec2::new(
                (x as f32 + 0.5) * step.x,
                (y as f32 + 0.5) * step.y,
            ))
        };

        for y in 0..resolution {
            for x in 0..resolution {
                let owner = owner_at(x, y);
                let boundary = (x + 1 < resolution && owner_at(x + 1, y) != owner)
                    || (y + 1 < resolution && owner_at(x, y + 1) != owner);
                let shade = if boundary {
                    0
                } else {
                    (32.0 + 223.0 * (owner as f32 + 1.0) / count) as u8
                };
                let idx = (y * resolution + x) * 4;
                pixels[idx..idx + 4].copy_from_slice(&[shade, shade, shade, 255]);
            }
        }

        pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn brute_nearest(points: &[Vec2], p: Vec2) -> u32 {
        let mut best = (f32::INFINITY, u32::MAX);
        for (i, c) in points.iter().enumerate() {
            let d2 = c.distance_squared(p);
            if d2 < best.0 {
                best = (d2, i as u32);
            }
        }
        best.1
    }

    #[test]
    fn test_empty_input_rejected() {
        let result = Voronoi::from_centroids(Vec::new(), Vec2::splat(100.0), 16);
        assert!(matches!(result, Err(WorldError::InvalidArgument(_))));
    }

    #[test]
    fn test_grid_index_matches_brute_force() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let size = Vec2::new(1000.0, 600.0);
        let points: Vec<Vec2> = (0..97)
            .map(|_| Vec2::new(rng.random::<f32>() * size.x, rng.random::<f32>() * size.y))
            .collect();
        let index = NearestIndex::new(points.clone(), size).unwrap();

        for _ in 0..2000 {
            // Include queries outside the canvas.
            let p = Vec2::new(
                rng.random::<f32>() * 1200.0 - 100.0,
                rng.random::<f32>() * 800.0 - 100.0,
            );
            assert_eq!(index.nearest(p), brute_nearest(&points, p), "mismatch at {p}");
        }
    }

    #[test]
    fn test_ties_pick_lowest_id() {
        let points = vec![Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0), Vec2::new(10.0, 0.0)];
        let index = NearestIndex::new(points, Vec2::splat(20.0)).unwrap();
        assert_eq!(index.nearest(Vec2::ZERO), 0);
        assert_eq!(index.nearest(Vec2::new(10.0, 0.0)), 0);
    }

    #[test]
    fn test_adjacency_symmetric_and_irreflexive() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let v = Voronoi::generate(64, Vec2::splat(4096.0), 64, &mut rng).unwrap();
        for id in 0..v.len() as u32 {
            assert!(!v.neighbors(id).contains(&id), "{id} neighbours itself");
            for &n in v.neighbors(id) {
                assert!(v.neighbors(n).contains(&id), "{id} -> {n} not mirrored");
            }
        }
    }

    #[test]
    fn test_ownership_matches_region_at() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let v = Voronoi::generate(30, Vec2::splat(320.0), 32, &mut rng).unwrap();
        for y in 0..32 {
            for x in 0..32 {
                let centre = Vec2::new(x as f32 * 10.0 + 5.0, y as f32 * 10.0 + 5.0);
                assert_eq!(v.owner(x, y), v.region_at(centre));
            }
        }
    }

    #[test]
    fn test_same_seed_same_partition() {
        let a = Voronoi::generate(50, Vec2::splat(640.0), 64, &mut ChaCha8Rng::seed_from_u64(77))
            .unwrap();
        let b = Voronoi::generate(50, Vec2::splat(640.0), 64, &mut ChaCha8Rng::seed_from_u64(77))
            .unwrap();
        assert_eq!(a.centroids(), b.centroids());
        for id in 0..50 {
            assert_eq!(a.neighbors(id), b.neighbors(id));
        }
    }

    #[test]
    fn test_single_centroid_owns_everything() {
        let v = Voronoi::from_centroids(vec![Vec2::splat(3.0)], Vec2::splat(8.0), 8).unwrap();
        assert!(v.neighbors(0).is_empty());
        assert!((0..8).all(|y| (0..8).all(|x| v.owner(x, y) == 0)));
    }

    #[test]
    fn test_to_pixels_layout() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let v = Voronoi::generate(8, Vec2::splat(100.0), 16, &mut rng).unwrap();
        let pixels = v.to_pixels(32);
        assert_eq!(pixels.len(), 32 * 32 * 4);
        assert!(pixels.chunks_exact(4).all(|px| px[3] == 255));
        assert!(
            pixels.chunks_exact(4).any(|px| px[0] == 0),
            "expected boundary pixels"
        );
    }
}
