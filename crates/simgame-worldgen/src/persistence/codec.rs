//! Binary encoding of a [`World`] in the WSAV format.
//!
//! ## Binary Layout
//!
//! All integers and floats are little-endian. Strings are a `u32` byte length
//! followed by UTF-8 bytes. Bools are one byte, `0` or `1`. Ids are `i32`,
//! with `-1` meaning unassigned.
//!
//! | Section | Contents |
//! |---------|----------|
//! | header  | magic `"WSAV"`, version `u8` (currently 1) |
//! | params  | name, seed_ascii, dimension `u64`, num_continents `u64`, percent_land `f32`, region_size `u64` |
//! | plates  | `u32` count, then per plate: velocity `2×f32`, is_continental, absolute_height `f32`, centroid `2×f32`, `u32` boundary count, boundaries × {other id `i32`, kind `u8`} |
//! | regions | `u32` count, then per region: plate id, centroid `2×f32`, `u32` neighbour count, neighbours × `i32`, 10 bools, 7 `f32`, flow direction id, biome name |
//! | tiles   | `u32` count, then per tile: region id, is_edge_tile, absolute_height `f32`, is_water, is_river, is_lake, water_level `f32` |
//!
//! The ocean level and the tile flow fields are not stored; decoding
//! recomputes them from the stored heights and water flags.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;

use crate::error::WorldFormatError;
use crate::generator::{ocean_level_for, restore_flow};
use crate::params::WorldParams;
use crate::world::{BiomeType, BoundaryType, PlateId, Region, RegionId, TectonicPlate, World};

/// Magic bytes identifying the WSAV format.
pub const MAGIC: [u8; 4] = *b"WSAV";

/// Current format version.
pub const FORMAT_VERSION: u8 = 1;

/// Smallest possible plate record: no boundaries.
const MIN_PLATE_LEN: usize = 8 + 1 + 4 + 8 + 4;
/// Smallest possible region record: no neighbours, empty biome name.
const MIN_REGION_LEN: usize = 4 + 8 + 4 + 10 + 7 * 4 + 4 + 4;
/// Every tile record has the same size.
const TILE_LEN: usize = 4 + 1 + 4 + 3 + 4;

/// Serializes `world` to a byte vector in the WSAV binary format.
pub fn encode_world(world: &World) -> Vec<u8> {
    let mut w = Writer::with_capacity(
        64 + world.plates().len() * MIN_PLATE_LEN
            + world.regions().len() * (MIN_REGION_LEN + 6 * 4 + 16)
            + world.tiles().len() * TILE_LEN,
    );

    w.bytes(&MAGIC);
    w.u8(FORMAT_VERSION);

    let params = world.params();
    w.str(&params.name);
    w.str(&params.seed_ascii);
    w.u64(u64::from(params.dimension));
    w.u64(u64::from(params.num_continents));
    w.f32(params.percent_land);
    w.u64(u64::from(params.region_size));

    w.count(world.plates().len());
    for plate in world.plates() {
        w.vec2(plate.velocity);
        w.bool(plate.is_continental);
        w.f32(plate.absolute_height);
        w.vec2(plate.centroid);
        w.count(plate.boundaries.len());
        for (other, kind) in &plate.boundaries {
            w.id(Some(other.0));
            w.u8(*kind as u8);
        }
    }

    w.count(world.regions().len());
    for region in world.regions() {
        w.id(region.plate_id.map(|p| p.0));
        w.vec2(region.centroid);
        w.count(region.neighbors.len());
        for n in &region.neighbors {
            w.id(Some(n.0));
        }
        for flag in [
            region.is_boundary,
            region.has_subduction,
            region.is_ocean,
            region.is_water,
            region.is_lake,
            region.is_mountain,
            region.has_river,
            region.is_coastal,
            region.is_swamp,
            region.is_frozen,
        ] {
            w.bool(flag);
        }
        for value in [
            region.absolute_height,
            region.water_level,
            region.flow_accumulation,
            region.latitude,
            region.temperature,
            region.temperature_variance,
            region.moisture,
        ] {
            w.f32(value);
        }
        w.id(region.flow_direction.map(|r| r.0));
        w.str(region.biome.map_or("", BiomeType::name));
    }

    w.count(world.tiles().len());
    for tile in world.tiles() {
        w.id(tile.region_id.map(|r| r.0));
        w.bool(tile.is_edge_tile);
        w.f32(tile.absolute_height);
        w.bool(tile.is_water);
        w.bool(tile.is_river);
        w.bool(tile.is_lake);
        w.f32(tile.water_level);
    }

    w.finish()
}

/// Deserializes a world from a byte slice in the WSAV binary format.
///
/// Every field is validated before the world is built: parameters must be
/// in their option sets, counts must fit the data, and every id must be in
/// range.
///
/// # Errors
///
/// Returns a [`WorldFormatError`] describing the first problem found.
pub fn decode_world(data: &[u8]) -> Result<World, WorldFormatError> {
    if data.len() < MAGIC.len() || data[..MAGIC.len()] != MAGIC {
        return Err(WorldFormatError::InvalidMagic);
    }
    let mut r = Reader::new(data, MAGIC.len());
    let version = r.u8()?;
    if version != FORMAT_VERSION {
        return Err(WorldFormatError::UnsupportedVersion(version));
    }

    let params = read_params(&mut r)?;
    params
        .validate()
        .map_err(|e| WorldFormatError::InvalidValue(e.to_string()))?;

    let plate_count = r.count(MIN_PLATE_LEN)?;
    let mut plates = Vec::with_capacity(plate_count);
    for _ in 0..plate_count {
        let velocity = r.vec2()?;
        let is_continental = r.bool()?;
        let absolute_height = r.f32()?;
        let centroid = r.vec2()?;
        let boundary_count = r.count(5)?;
        let mut boundaries = BTreeMap::new();
        for _ in 0..boundary_count {
            let other = r.id(plate_count, "boundary plate")?;
            let raw = r.u8()?;
            let kind = BoundaryType::from_u8(raw).ok_or_else(|| {
                WorldFormatError::InvalidValue(format!("boundary type {raw}"))
            })?;
            boundaries.insert(PlateId(other), kind);
        }
        plates.push(TectonicPlate {
            centroid,
            velocity,
            is_continental,
            absolute_height,
            boundaries,
        });
    }

    let region_count = r.count(MIN_REGION_LEN)?;
    let mut regions = Vec::with_capacity(region_count);
    for _ in 0..region_count {
        regions.push(read_region(&mut r, plate_count, region_count)?);
    }

    let tile_count = r.count(TILE_LEN)?;
    if tile_count != params.num_tiles() {
        return Err(WorldFormatError::InvalidValue(format!(
            "tile count {tile_count} for dimension {}",
            params.dimension
        )));
    }
    let mut tiles = Vec::with_capacity(tile_count);
    for _ in 0..tile_count {
        tiles.push(TileRecord {
            region_id: r.optional_id(region_count, "tile region")?.map(RegionId),
            is_edge_tile: r.bool()?,
            absolute_height: r.f32()?,
            is_water: r.bool()?,
            is_river: r.bool()?,
            is_lake: r.bool()?,
            water_level: r.f32()?,
        });
    }

    let trailing = r.remaining();
    if trailing > 0 {
        return Err(WorldFormatError::TrailingBytes(trailing));
    }

    // Everything has been validated; building the world cannot fail from here.
    let mut world =
        World::new(params).map_err(|e| WorldFormatError::InvalidValue(e.to_string()))?;
    world.set_plates(plates);
    world
        .set_regions(regions, false)
        .map_err(|e| WorldFormatError::InvalidValue(e.to_string()))?;
    for (tile, record) in world.tiles_mut().iter_mut().zip(tiles) {
        tile.region_id = record.region_id;
        tile.is_edge_tile = record.is_edge_tile;
        tile.absolute_height = record.absolute_height;
        tile.is_water = record.is_water;
        tile.is_river = record.is_river;
        tile.is_lake = record.is_lake;
        tile.water_level = record.water_level;
    }

    let level = ocean_level_for(world.tiles(), world.params().percent_land);
    world.set_ocean_level(level);
    restore_flow(&mut world);
    Ok(world)
}

struct TileRecord {
    region_id: Option<RegionId>,
    is_edge_tile: bool,
    absolute_height: f32,
    is_water: bool,
    is_river: bool,
    is_lake: bool,
    water_level: f32,
}

fn read_params(r: &mut Reader<'_>) -> Result<WorldParams, WorldFormatError> {
    let name = r.str()?;
    let seed_ascii = r.str()?;
    let dimension = r.u64_as_u32("dimension")?;
    let num_continents = r.u64_as_u32("num_continents")?;
    let percent_land = r.f32()?;
    let region_size = r.u64_as_u32("region_size")?;
    Ok(WorldParams {
        name,
        seed_ascii,
        dimension,
        num_continents,
        percent_land,
        region_size,
    })
}

fn read_region(
    r: &mut Reader<'_>,
    plate_count: usize,
    region_count: usize,
) -> Result<Region, WorldFormatError> {
    let plate_id = r.optional_id(plate_count, "region plate")?.map(PlateId);
    let centroid = r.vec2()?;
    let neighbor_count = r.count(4)?;
    let mut neighbors = BTreeSet::new();
    for _ in 0..neighbor_count {
        neighbors.insert(RegionId(r.id(region_count, "neighbour region")?));
    }

    let mut flags = [false; 10];
    for flag in &mut flags {
        *flag = r.bool()?;
    }
    let [
        is_boundary,
        has_subduction,
        is_ocean,
        is_water,
        is_lake,
        is_mountain,
        has_river,
        is_coastal,
        is_swamp,
        is_frozen,
    ] = flags;

    let mut values = [0.0f32; 7];
    for value in &mut values {
        *value = r.f32()?;
    }
    let [
        absolute_height,
        water_level,
        flow_accumulation,
        latitude,
        temperature,
        temperature_variance,
        moisture,
    ] = values;

    let flow_direction = r.optional_id(region_count, "flow region")?.map(RegionId);
    let biome_name = r.str()?;
    let biome = if biome_name.is_empty() {
        None
    } else {
        Some(BiomeType::from_name(&biome_name).ok_or_else(|| {
            WorldFormatError::InvalidValue(format!("unknown biome {biome_name:?}"))
        })?)
    };

    Ok(Region {
        centroid,
        neighbors,
        plate_id,
        is_boundary,
        has_subduction,
        is_ocean,
        is_water,
        is_lake,
        is_mountain,
        has_river,
        is_coastal,
        is_swamp,
        is_frozen,
        absolute_height,
        water_level,
        flow_accumulation,
        latitude,
        temperature,
        temperature_variance,
        moisture,
        flow_direction,
        biome,
    })
}

// ---------------------------------------------------------------------------
// Byte-level helpers
// ---------------------------------------------------------------------------

struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    fn bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn bool(&mut self, v: bool) {
        self.buf.push(u8::from(v));
    }

    fn u32(&mut self, v: u32) {
        self.bytes(&v.to_le_bytes());
    }

    fn count(&mut self, n: usize) {
        self.u32(n as u32);
    }

    fn u64(&mut self, v: u64) {
        self.bytes(&v.to_le_bytes());
    }

    fn f32(&mut self, v: f32) {
        self.bytes(&v.to_le_bytes());
    }

    fn vec2(&mut self, v: Vec2) {
        self.f32(v.x);
        self.f32(v.y);
    }

    fn id(&mut self, id: Option<u32>) {
        let v = id.map_or(-1, |v| v as i32);
        self.bytes(&v.to_le_bytes());
    }

    fn str(&mut self, s: &str) {
        self.count(s.len());
        self.bytes(s.as_bytes());
    }

    fn finish(self) -> Vec<u8> {
        self.buf
    }
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], WorldFormatError> {
        let slice = self.slice(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn slice(&mut self, n: usize) -> Result<&'a [u8], WorldFormatError> {
        if self.remaining() < n {
            return Err(WorldFormatError::Truncated {
                expected: self.pos + n,
                actual: self.data.len(),
            });
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, WorldFormatError> {
        Ok(self.take::<1>()?[0])
    }

    fn bool(&mut self) -> Result<bool, WorldFormatError> {
        match self.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            v => Err(WorldFormatError::InvalidValue(format!("bool byte {v}"))),
        }
    }

    fn u32(&mut self) -> Result<u32, WorldFormatError> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    fn i32(&mut self) -> Result<i32, WorldFormatError> {
        Ok(i32::from_le_bytes(self.take()?))
    }

    fn u64_as_u32(&mut self, field: &str) -> Result<u32, WorldFormatError> {
        let v = u64::from_le_bytes(self.take()?);
        u32::try_from(v).map_err(|_| WorldFormatError::InvalidValue(format!("{field} {v}")))
    }

    fn f32(&mut self) -> Result<f32, WorldFormatError> {
        Ok(f32::from_le_bytes(self.take()?))
    }

    fn vec2(&mut self) -> Result<Vec2, WorldFormatError> {
        Ok(Vec2::new(self.f32()?, self.f32()?))
    }

    /// A record count, checked against the bytes left so corrupt counts
    /// cannot trigger huge allocations.
    fn count(&mut self, min_record_len: usize) -> Result<usize, WorldFormatError> {
        let n = self.u32()? as usize;
        let needed = n.saturating_mul(min_record_len);
        if needed > self.remaining() {
            return Err(WorldFormatError::Truncated {
                expected: self.pos.saturating_add(needed),
                actual: self.data.len(),
            });
        }
        Ok(n)
    }

    fn optional_id(&mut self, bound: usize, what: &str) -> Result<Option<u32>, WorldFormatError> {
        match self.i32()? {
            -1 => Ok(None),
            v if v >= 0 && (v as usize) < bound => Ok(Some(v as u32)),
            v => Err(WorldFormatError::InvalidValue(format!(
                "{what} id {v} out of range 0..{bound}"
            ))),
        }
    }

    fn id(&mut self, bound: usize, what: &str) -> Result<u32, WorldFormatError> {
        self.optional_id(bound, what)?
            .ok_or_else(|| WorldFormatError::InvalidValue(format!("{what} id missing")))
    }

    fn str(&mut self) -> Result<String, WorldFormatError> {
        let len = self.u32()? as usize;
        let bytes = self.slice(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| WorldFormatError::InvalidValue("string is not UTF-8".into()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
