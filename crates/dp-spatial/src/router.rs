//! Routing trait and default breadth-first implementation.
//!
//! # Pluggability
//!
//! The planner calls routing via the [`Router`] trait, so applications can
//! swap in a weighted search without touching direction compilation.  The
//! default [`BfsRouter`] minimises the number of segments (hops), not miles.
//!
//! # Heuristic ordering
//!
//! When a coordinate is expanded, its outgoing segments are visited in order
//! of increasing great-circle distance from the segment's end to the target.
//! The first coordinate to discover a neighbour owns that neighbour's
//! back-pointer, so among equal-hop paths the search prefers the one that
//! heads towards the destination.  Hop count is unaffected.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::debug;

use dp_core::{ExpandingIndex, GeoCoord, StreetSegment};

use crate::network::StreetMap;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the segments to drive, in order, and the
/// total great-circle distance along them.
///
/// Consecutive segments chain: `segments[i].end == segments[i + 1].start`.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub segments:    Vec<StreetSegment>,
    pub total_miles: f64,
}

impl Route {
    /// Route of a search whose start equals its end.
    pub fn empty() -> Self {
        Self { segments: Vec::new(), total_miles: 0.0 }
    }

    /// `true` if the start and destination are the same coordinate.
    pub fn is_trivial(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn hop_count(&self) -> usize {
        self.segments.len()
    }

    pub fn start(&self) -> Option<&GeoCoord> {
        self.segments.first().map(|s| &s.start)
    }

    pub fn end(&self) -> Option<&GeoCoord> {
        self.segments.last().map(|s| &s.end)
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable point-to-point routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router can serve many
/// concurrent searches over a shared `&StreetMap` (see [`route_many`]).
pub trait Router: Send + Sync {
    /// Compute a route from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::BadCoord`] if either endpoint is not in `map`.
    ///   Checked before anything else, so never reported as `NoRoute`.
    /// - [`SpatialError::NoRoute`] if the endpoints are not connected.
    ///
    /// `from == to` yields an empty route with zero distance.
    fn route(&self, map: &StreetMap, from: &GeoCoord, to: &GeoCoord) -> SpatialResult<Route>;
}

// ── BfsRouter ─────────────────────────────────────────────────────────────────

/// Breadth-first search with nearest-to-target neighbour ordering.
///
/// Stateless: each call allocates its own frontier, visited set, and
/// predecessor index, all dropped when the call returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsRouter;

impl Router for BfsRouter {
    fn route(&self, map: &StreetMap, from: &GeoCoord, to: &GeoCoord) -> SpatialResult<Route> {
        breadth_first(map, from, to)
    }
}

// ── BFS internals ─────────────────────────────────────────────────────────────

fn breadth_first<'a>(
    map: &'a StreetMap,
    from: &'a GeoCoord,
    to: &'a GeoCoord,
) -> SpatialResult<Route> {
    for endpoint in [from, to] {
        if !map.contains(endpoint) {
            return Err(SpatialError::BadCoord(endpoint.clone()));
        }
    }
    if from == to {
        return Ok(Route::empty());
    }

    // predecessors[c] = coordinate that first discovered c.
    let mut predecessors: ExpandingIndex<&GeoCoord, &GeoCoord> = ExpandingIndex::new();
    let mut visited: FxHashSet<&GeoCoord> = FxHashSet::default();
    let mut frontier: VecDeque<&GeoCoord> = VecDeque::new();
    let mut ranked: Vec<(f64, &StreetSegment)> = Vec::new();

    visited.insert(from);
    frontier.push_back(from);

    while let Some(current) = frontier.pop_front() {
        if current == to {
            let route = reconstruct(map, &predecessors, to);
            debug!(
                %from, %to,
                visited = visited.len(),
                hops = route.hop_count(),
                miles = route.total_miles,
                "route found"
            );
            return Ok(route);
        }

        ranked.clear();
        ranked.extend(
            map.segments_from(current)
                .unwrap_or_default()
                .iter()
                .map(|s| (s.end.distance_miles(to), s)),
        );
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

        for &(_, segment) in &ranked {
            if visited.insert(&segment.end) {
                predecessors.associate(&segment.end, current);
                frontier.push_back(&segment.end);
            }
        }
    }

    debug!(%from, %to, visited = visited.len(), "frontier exhausted");
    Err(SpatialError::NoRoute { from: from.clone(), to: to.clone() })
}

/// Walk the back-pointers from `to` to the search origin and turn the
/// coordinate chain into named segments.
fn reconstruct<'a>(
    map: &StreetMap,
    predecessors: &ExpandingIndex<&'a GeoCoord, &'a GeoCoord>,
    to: &'a GeoCoord,
) -> Route {
    let mut coords = vec![to];
    let mut total_miles = 0.0;
    let mut current = to;
    while let Some(&prev) = predecessors.find(&current) {
        total_miles += prev.distance_miles(current);
        coords.push(prev);
        current = prev;
    }
    coords.reverse();

    let segments = coords
        .windows(2)
        .map(|pair| {
            let (start, end) = (pair[0], pair[1]);
            // First outgoing segment of `start` that reaches `end`.
            let name = map
                .segments_from(start)
                .and_then(|segs| segs.iter().find(|s| s.end == *end))
                .map(|s| s.name.clone())
                .unwrap_or_default();
            StreetSegment::new(start.clone(), end.clone(), name)
        })
        .collect();

    Route { segments, total_miles }
}

// ── Batch routing ─────────────────────────────────────────────────────────────

/// Route every `(from, to)` pair against one shared map.
///
/// Results are returned in input order.  With the `parallel` feature the
/// searches run on Rayon's thread pool; each still owns its own search state.
pub fn route_many<R: Router>(
    router: &R,
    map: &StreetMap,
    pairs: &[(GeoCoord, GeoCoord)],
) -> Vec<SpatialResult<Route>> {
    #[cfg(not(feature = "parallel"))]
    {
        pairs
            .iter()
            .map(|(from, to)| router.route(map, from, to))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        pairs
            .par_iter()
            .map(|(from, to)| router.route(map, from, to))
            .collect()
    }
}
