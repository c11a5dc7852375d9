//! Unit tests for dp-spatial.
//!
//! All tests use hand-crafted maps so they run without any data file.

#[cfg(test)]
mod helpers {
    use dp_core::{GeoCoord, StreetSegment};

    use crate::{StreetMap, StreetMapBuilder};

    pub fn c(lat: &str, lon: &str) -> GeoCoord {
        GeoCoord::parse(lat, lon).unwrap()
    }

    pub fn street(a: &GeoCoord, b: &GeoCoord, name: &str) -> StreetSegment {
        StreetSegment::new(a.clone(), b.clone(), name)
    }

    /// Small grid:
    ///
    /// ```text
    ///   n3 ───── D St ───── n4
    ///   │                    │
    ///  B St                 C St
    ///   │                    │
    ///   n0 ── A St ── n1 ── A St ── n2
    /// ```
    ///
    /// n0→n4 is three hops via n1/n2 and two hops via n3.
    pub fn grid_map() -> (StreetMap, [GeoCoord; 5]) {
        let n0 = c("34.000", "-118.000");
        let n1 = c("34.000", "-117.999");
        let n2 = c("34.000", "-117.998");
        let n3 = c("34.001", "-118.000");
        let n4 = c("34.001", "-117.998");

        let mut b = StreetMapBuilder::new();
        b.add_street(street(&n0, &n1, "A St"));
        b.add_street(street(&n1, &n2, "A St"));
        b.add_street(street(&n0, &n3, "B St"));
        b.add_street(street(&n2, &n4, "C St"));
        b.add_street(street(&n3, &n4, "D St"));

        (b.build(), [n0, n1, n2, n3, n4])
    }

    pub const GRID_RECORDS: &str = "\
A St
2
34.000 -118.000 34.000 -117.999
34.000 -117.999 34.000 -117.998
B   St
1
34.000 -118.000 34.001 -118.000
C St
1
34.000 -117.998 34.001 -117.998
D St
1
34.001 -118.000 34.001 -117.998
";
}

// ── Builder & map structure ───────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::helpers::{c, grid_map, street};
    use crate::{StreetMap, StreetMapBuilder};

    #[test]
    fn empty_build() {
        let map = StreetMapBuilder::new().build();
        assert_eq!(map.coord_count(), 0);
        assert_eq!(map.segment_count(), 0);
        assert!(map.is_empty());
        assert!(StreetMap::default().is_empty());
    }

    #[test]
    fn street_registers_both_directions() {
        let a = c("1.0", "2.0");
        let b = c("1.5", "2.0");
        let mut builder = StreetMapBuilder::new();
        builder.add_street(street(&a, &b, "Elm"));
        let map = builder.build();

        assert_eq!(map.coord_count(), 2);
        assert_eq!(map.segment_count(), 2);

        let out_a = map.segments_from(&a).unwrap();
        assert_eq!(out_a.len(), 1);
        assert_eq!(out_a[0].end, b);
        assert_eq!(out_a[0].name, "Elm");

        let out_b = map.segments_from(&b).unwrap();
        assert_eq!(out_b, &[out_a[0].reversed()]);
    }

    #[test]
    fn directed_only_segment() {
        let a = c("1.0", "2.0");
        let b = c("1.5", "2.0");
        let mut builder = StreetMapBuilder::new();
        builder.add_directed_segment(street(&a, &b, "One Way"));
        let map = builder.build();
        assert_eq!(map.segment_count(), 1);
        assert!(map.contains(&a));
        assert!(!map.contains(&b));
        assert!(map.segments_from(&b).is_none());
    }

    #[test]
    fn outgoing_preserves_insertion_order() {
        let (map, [n0, n1, _, n3, _]) = grid_map();
        let ends: Vec<_> = map.segments_from(&n0).unwrap().iter().map(|s| &s.end).collect();
        assert_eq!(ends, vec![&n1, &n3]);
    }

    #[test]
    fn every_segment_starts_at_its_key() {
        let (map, _) = grid_map();
        for coord in map.coords() {
            for seg in map.segments_from(coord).unwrap() {
                assert_eq!(&seg.start, coord);
            }
        }
        assert_eq!(map.coords().count(), 5);
        assert_eq!(map.segment_count(), 10);
    }

    #[test]
    fn unknown_coordinate_is_none() {
        let (map, _) = grid_map();
        // Same value as n0, different text.
        assert!(map.segments_from(&c("34.0", "-118.0")).is_none());
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loading {
    use std::io::{Cursor, Write};

    use super::helpers::{GRID_RECORDS, c};
    use crate::{SpatialError, StreetMap, parse_records};

    #[test]
    fn parse_assigns_names_to_following_segments() {
        let segs = parse_records(Cursor::new(GRID_RECORDS)).unwrap();
        let names: Vec<_> = segs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A St", "A St", "B St", "C St", "D St"]);
        assert_eq!(segs[0].start, c("34.000", "-118.000"));
        assert_eq!(segs[0].end, c("34.000", "-117.999"));
    }

    #[test]
    fn segments_before_any_name_are_unnamed() {
        let segs = parse_records(Cursor::new("1 2 3 4\nMain\n5 6 7 8\n")).unwrap();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].name, "");
        assert_eq!(segs[1].name, "Main");
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let text = "Oak Ave\n\n1 2 3\n1 2 3 4 5\n1 2 x3 4\n-1 -2 -3 -4\n";
        // "1 2 x3 4" has a letter, so it is a (strange) name line.
        let segs = parse_records(Cursor::new(text)).unwrap();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].name, "1 2 x3 4");
    }

    #[test]
    fn load_reader_builds_both_directions() {
        let mut map = StreetMap::empty();
        map.load_reader(Cursor::new(GRID_RECORDS)).unwrap();
        assert_eq!(map.coord_count(), 5);
        assert_eq!(map.segment_count(), 10);

        let n2 = c("34.000", "-117.998");
        let names: Vec<_> = map.segments_from(&n2).unwrap().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A St", "C St"]);
    }

    #[test]
    fn reload_replaces_contents() {
        let mut map = StreetMap::empty();
        map.load_reader(Cursor::new(GRID_RECORDS)).unwrap();
        map.load_reader(Cursor::new("Solo Rd\n10 20 10 21\n")).unwrap();
        assert_eq!(map.coord_count(), 2);
        assert!(!map.contains(&c("34.000", "-118.000")));
        assert!(map.contains(&c("10", "21")));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(GRID_RECORDS.as_bytes()).unwrap();
        let map = StreetMap::open(file.path()).unwrap();
        assert_eq!(map.coord_count(), 5);
    }

    #[test]
    fn missing_file_is_io_error_and_leaves_map_empty() {
        let mut map = StreetMap::empty();
        map.load_reader(Cursor::new(GRID_RECORDS)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let err = map.load(&dir.path().join("does-not-exist.txt")).unwrap_err();
        assert!(matches!(err, SpatialError::Io(_)));
        assert!(map.is_empty());
    }

    #[test]
    fn non_utf8_line_does_not_abort_load() {
        // "Calle Peña" in Latin-1.
        let bytes: &[u8] =
            b"Main Street\n1\n34.0 -118.0 34.1 -118.0\nCalle Pe\xF1a\n1\n34.1 -118.0 34.2 -118.0\n";
        let mut map = StreetMap::empty();
        map.load_reader(Cursor::new(bytes)).unwrap();

        assert_eq!(map.coord_count(), 3);
        assert_eq!(map.segment_count(), 4);
        let main = map.segments_from(&c("34.0", "-118.0")).unwrap();
        assert_eq!(main[0].name, "Main Street");

        let calle = &map.segments_from(&c("34.2", "-118.0")).unwrap()[0];
        assert!(calle.name.starts_with("Calle Pe"), "got {:?}", calle.name);
        assert_eq!(calle.end, c("34.1", "-118.0"));
    }
}

// ── Spatial snap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use super::helpers::grid_map;
    use crate::StreetMap;

    #[test]
    fn snap_exact_position() {
        let (map, [n0, ..]) = grid_map();
        assert_eq!(map.nearest_coord(34.0, -118.0), Some(&n0));
    }

    #[test]
    fn snap_nearest() {
        let (map, [_, n1, _, _, n4]) = grid_map();
        assert_eq!(map.nearest_coord(34.0001, -117.9991), Some(&n1));
        assert_eq!(map.nearest_coord(34.0015, -117.9975), Some(&n4));
    }

    #[test]
    fn empty_map_returns_none() {
        assert!(StreetMap::empty().nearest_coord(0.0, 0.0).is_none());
    }
}

// ── Breadth-first routing ─────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use super::helpers::{c, grid_map, street};
    use crate::{BfsRouter, Route, Router, SpatialError, StreetMap, StreetMapBuilder, route_many};

    fn assert_chained(map: &StreetMap, route: &Route) {
        for pair in route.segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "route is not chained");
        }
        for seg in &route.segments {
            let real = map
                .segments_from(&seg.start)
                .unwrap()
                .iter()
                .any(|s| s.end == seg.end && s.name == seg.name);
            assert!(real, "segment {seg} is not an edge of the map");
        }
    }

    #[test]
    fn trivial_same_coord_for_every_coord() {
        let (map, _) = grid_map();
        for coord in map.coords() {
            let r = BfsRouter.route(&map, coord, coord).unwrap();
            assert!(r.is_trivial());
            assert_eq!(r.total_miles, 0.0);
        }
    }

    #[test]
    fn fewest_hops_wins_over_fewest_miles() {
        let (map, [n0, _, _, n3, n4]) = grid_map();
        let route = BfsRouter.route(&map, &n0, &n4).unwrap();

        // Two hops via n3 (B St, D St), not three via A St.
        assert_eq!(route.hop_count(), 2);
        assert_eq!(route.segments[0].end, n3);
        assert_eq!(route.segments[0].name, "B St");
        assert_eq!(route.segments[1].name, "D St");
        assert_eq!(route.start(), Some(&n0));
        assert_eq!(route.end(), Some(&n4));
        assert_chained(&map, &route);

        let expected = n0.distance_miles(&n3) + n3.distance_miles(&n4);
        assert!((route.total_miles - expected).abs() < 1e-12);
    }

    #[test]
    fn all_pairs_chain_and_use_real_edges() {
        let (map, nodes) = grid_map();
        for from in &nodes {
            for to in &nodes {
                let route = BfsRouter.route(&map, from, to).unwrap();
                assert_chained(&map, &route);
                if from != to {
                    assert_eq!(route.start(), Some(from));
                    assert_eq!(route.end(), Some(to));
                    let summed: f64 = route.segments.iter().map(|s| s.length_miles()).sum();
                    assert!((route.total_miles - summed).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn repeated_searches_are_identical() {
        let (map, [n0, _, n2, _, _]) = grid_map();
        let first = BfsRouter.route(&map, &n0, &n2).unwrap();
        for _ in 0..10 {
            let again = BfsRouter.route(&map, &n0, &n2).unwrap();
            assert_eq!(again.hop_count(), first.hop_count());
            assert_eq!(again.total_miles, first.total_miles);
            assert_eq!(again, first);
        }
    }

    #[test]
    fn nearer_neighbour_wins_equal_hop_tie() {
        // Diamond S → {far, near} → T.  `far` is inserted first, so only the
        // distance ranking can make the search record the path via `near`.
        let s = c("0.0000", "0.0000");
        let t = c("0.0000", "0.0020");
        let near = c("0.0005", "0.0010");
        let far = c("-0.0020", "0.0010");

        let mut b = StreetMapBuilder::new();
        b.add_street(street(&s, &far, "Far Rd"));
        b.add_street(street(&s, &near, "Near Rd"));
        b.add_street(street(&far, &t, "Far Rd"));
        b.add_street(street(&near, &t, "Near Rd"));
        let map = b.build();

        let route = BfsRouter.route(&map, &s, &t).unwrap();
        assert_eq!(route.hop_count(), 2);
        assert_eq!(route.segments[0].end, near);
        assert!(route.segments.iter().all(|seg| seg.name == "Near Rd"));
    }

    #[test]
    fn name_comes_from_first_matching_edge() {
        // Two streets share the same stretch of pavement.
        let a = c("1.0", "1.0");
        let b = c("1.0", "1.1");
        let mut builder = StreetMapBuilder::new();
        builder.add_street(street(&a, &b, "First Name"));
        builder.add_street(street(&a, &b, "Second Name"));
        let map = builder.build();

        let route = BfsRouter.route(&map, &a, &b).unwrap();
        assert_eq!(route.segments[0].name, "First Name");
    }

    #[test]
    fn bad_coord_for_unknown_endpoints() {
        let (map, [n0, ..]) = grid_map();
        let unknown = c("50", "50");

        let err = BfsRouter.route(&map, &unknown, &n0).unwrap_err();
        assert!(matches!(err, SpatialError::BadCoord(ref p) if *p == unknown));

        let err = BfsRouter.route(&map, &n0, &unknown).unwrap_err();
        assert!(matches!(err, SpatialError::BadCoord(ref p) if *p == unknown));

        // Unknown → itself is still BadCoord, not a trivial route.
        let err = BfsRouter.route(&map, &unknown, &unknown).unwrap_err();
        assert!(matches!(err, SpatialError::BadCoord(_)));
    }

    #[test]
    fn bad_coord_on_empty_map() {
        let p = c("1", "1");
        let err = BfsRouter.route(&StreetMap::empty(), &p, &p).unwrap_err();
        assert!(matches!(err, SpatialError::BadCoord(_)));
    }

    #[test]
    fn no_route_disconnected() {
        let a = c("0", "0");
        let b = c("0", "1");
        let x = c("5", "5");
        let y = c("5", "6");
        let mut builder = StreetMapBuilder::new();
        builder.add_street(street(&a, &b, "West"));
        builder.add_street(street(&x, &y, "East"));
        let map = builder.build();

        let err = BfsRouter.route(&map, &a, &y).unwrap_err();
        assert!(
            matches!(err, SpatialError::NoRoute { ref from, ref to } if *from == a && *to == y),
            "expected NoRoute, got {err:?}"
        );
    }

    #[test]
    fn one_way_segment_is_respected() {
        let a = c("0", "0");
        let b = c("0", "1");
        let cc = c("0", "2");
        let mut builder = StreetMapBuilder::new();
        builder.add_street(street(&a, &b, "Two Way"));
        builder.add_directed_segment(street(&b, &cc, "One Way"));
        builder.add_directed_segment(street(&cc, &b, "Other Way"));
        builder.add_directed_segment(street(&cc, &a, "Shortcut"));
        let map = builder.build();

        // a → c must go through b; c → a can use the directed shortcut.
        assert_eq!(BfsRouter.route(&map, &a, &cc).unwrap().hop_count(), 2);
        let back = BfsRouter.route(&map, &cc, &a).unwrap();
        assert_eq!(back.hop_count(), 1);
        assert_eq!(back.segments[0].name, "Shortcut");
    }

    #[test]
    fn route_many_preserves_order() {
        let (map, [n0, n1, n2, _, n4]) = grid_map();
        let unknown = c("9", "9");
        let pairs = vec![
            (n0.clone(), n4.clone()),
            (n1.clone(), n1.clone()),
            (unknown, n2.clone()),
            (n2, n0),
        ];
        let results = route_many(&BfsRouter, &map, &pairs);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().hop_count(), 2);
        assert!(results[1].as_ref().unwrap().is_trivial());
        assert!(matches!(results[2], Err(SpatialError::BadCoord(_))));
        assert_eq!(results[3].as_ref().unwrap().hop_count(), 2);
    }
}
