//! Street map representation and builder.
//!
//! # Data layout
//!
//! The graph is an [`ExpandingIndex`] from each coordinate to the directed
//! segments that *start* there, in insertion order.  Every street record
//! contributes two segments: `A → B` registered at `A`, and the mirrored
//! `B → A` (same name) registered at `B`.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over the indexed coordinates answers
//! nearest-coordinate queries, so callers can snap a raw position to a
//! routable coordinate.
//!
//! # Reloading
//!
//! [`StreetMap::load`] takes `&mut self`, so a reload can never overlap a
//! search holding `&StreetMap`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::{debug, info};

use dp_core::{ExpandingIndex, GeoCoord, StreetSegment};

use crate::records::parse_records;
use crate::SpatialResult;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a `[lat, lon]` point with its coordinate.
#[derive(Clone)]
struct CoordEntry {
    point: [f64; 2], // [lat, lon]
    coord: GeoCoord,
}

impl RTreeObject for CoordEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CoordEntry {
    /// Squared Euclidean distance in lat/lon space.  Good enough to pick the
    /// closest intersection within a city.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── StreetMap ─────────────────────────────────────────────────────────────────

/// Coordinate → outgoing street segments, plus a nearest-coordinate index.
///
/// Build with [`StreetMapBuilder`] or load from a record file with
/// [`StreetMap::load`].
pub struct StreetMap {
    outgoing:      ExpandingIndex<GeoCoord, Vec<StreetSegment>>,
    segment_count: usize,
    spatial_idx:   RTree<CoordEntry>,
}

impl StreetMap {
    /// A map with no coordinates.  Every routing request against it fails
    /// with `BadCoord`.
    pub fn empty() -> Self {
        StreetMapBuilder::new().build()
    }

    /// Load a street map from a record file.
    pub fn open(path: &Path) -> SpatialResult<Self> {
        let mut map = Self::empty();
        map.load(path)?;
        Ok(map)
    }

    /// Replace the map's contents with the records in the file at `path`.
    ///
    /// # Errors
    ///
    /// [`SpatialError::Io`](crate::SpatialError::Io) if the file cannot be
    /// opened or read.  The map is left empty in that case.
    pub fn load(&mut self, path: &Path) -> SpatialResult<()> {
        self.reset();
        debug!(path = %path.display(), "opening street map");
        let file = File::open(path)?;
        self.load_reader(BufReader::new(file))
    }

    /// Like [`load`](Self::load) but reads records from any buffered source.
    pub fn load_reader<R: BufRead>(&mut self, reader: R) -> SpatialResult<()> {
        self.reset();
        let records = parse_records(reader)?;

        let mut builder = StreetMapBuilder::new();
        for segment in records {
            builder.add_street(segment);
        }
        *self = builder.build();
        info!(
            coords = self.coord_count(),
            segments = self.segment_count(),
            "loaded street map"
        );
        Ok(())
    }

    fn reset(&mut self) {
        self.outgoing.reset();
        self.segment_count = 0;
        self.spatial_idx = RTree::new();
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    /// Number of distinct coordinates with at least one outgoing segment.
    pub fn coord_count(&self) -> usize {
        self.outgoing.size()
    }

    /// Number of directed segments (two per street record).
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Segments that start at `coord`, or `None` if the coordinate is not in
    /// the map.
    pub fn segments_from(&self, coord: &GeoCoord) -> Option<&[StreetSegment]> {
        self.outgoing.find(coord).map(Vec::as_slice)
    }

    pub fn contains(&self, coord: &GeoCoord) -> bool {
        self.outgoing.contains_key(coord)
    }

    /// All coordinates of the map, in index order.
    pub fn coords(&self) -> impl Iterator<Item = &GeoCoord> + '_ {
        self.outgoing.keys()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The map coordinate closest to `(lat, lon)`.
    ///
    /// Returns `None` only if the map is empty.
    pub fn nearest_coord(&self, lat: f64, lon: f64) -> Option<&GeoCoord> {
        self.spatial_idx
            .nearest_neighbor(&[lat, lon])
            .map(|e| &e.coord)
    }
}

impl Default for StreetMap {
    fn default() -> Self {
        Self::empty()
    }
}

// ── StreetMapBuilder ──────────────────────────────────────────────────────────

/// Construct a [`StreetMap`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use dp_core::{GeoCoord, StreetSegment};
/// use dp_spatial::StreetMapBuilder;
///
/// let a = GeoCoord::parse("34.05", "-118.40").unwrap();
/// let b = GeoCoord::parse("34.06", "-118.40").unwrap();
///
/// let mut builder = StreetMapBuilder::new();
/// builder.add_street(StreetSegment::new(a.clone(), b, "Main St"));
/// let map = builder.build();
/// assert_eq!(map.coord_count(), 2);
/// assert_eq!(map.segment_count(), 2); // both directions
/// assert_eq!(map.segments_from(&a).unwrap()[0].name, "Main St");
/// ```
pub struct StreetMapBuilder {
    outgoing:      ExpandingIndex<GeoCoord, Vec<StreetSegment>>,
    segment_count: usize,
}

impl StreetMapBuilder {
    pub fn new() -> Self {
        Self { outgoing: ExpandingIndex::new(), segment_count: 0 }
    }

    /// Add a street in **both** directions: `segment` at its start, and its
    /// reverse at its end.
    pub fn add_street(&mut self, segment: StreetSegment) {
        let reverse = segment.reversed();
        self.add_directed_segment(segment);
        self.add_directed_segment(reverse);
    }

    /// Add a single directed segment, registered at its start coordinate.
    ///
    /// The end coordinate only becomes routable if some segment also starts
    /// there.
    pub fn add_directed_segment(&mut self, segment: StreetSegment) {
        self.outgoing
            .find_or_insert_with(segment.start.clone(), Vec::new)
            .push(segment);
        self.segment_count += 1;
    }

    pub fn coord_count(&self) -> usize { self.outgoing.size() }
    pub fn segment_count(&self) -> usize { self.segment_count }

    /// Consume the builder and produce a [`StreetMap`].
    ///
    /// Bulk-loads the R-tree in O(N log N) over the N indexed coordinates.
    pub fn build(self) -> StreetMap {
        let entries: Vec<CoordEntry> = self
            .outgoing
            .keys()
            .map(|c| CoordEntry {
                point: [c.latitude(), c.longitude()],
                coord: c.clone(),
            })
            .collect();

        StreetMap {
            outgoing:      self.outgoing,
            segment_count: self.segment_count,
            spatial_idx:   RTree::bulk_load(entries),
        }
    }
}

impl Default for StreetMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
