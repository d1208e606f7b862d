use super::*;
use crate::crystal_map::{CrystalMapBuilder, MapError, ScanUnit};
use crate::orientation::Orientations;
use crate::phase::{Lattice, Phase, PhaseList, NOT_INDEXED_ID};
use crate::properties::{PropertyError, PropertyValues};
use tempfile::tempdir;

const TSL_HEADER: &str = "\
# TEM_PIXperUM          1.000000
# x-star                0.413549
# y-star                0.755320
# z-star                0.648626
# WorkingDistance       27.084879
#
# Phase 1
# MaterialName  \tNickel
# Formula     \tNi
# Info
# Symmetry              43
# LatticeConstants      3.520 3.520 3.520  90.000  90.000  90.000
# NumberFamilies        4
# hklFamilies   \t 1  1  1 1 0.000000
#
# GRID: SqrGrid
# XSTEP: 0.100000
# YSTEP: 0.100000
# NCOLS_ODD: 2
# NCOLS_EVEN: 2
# NROWS: 2
#
# OPERATOR: \tsem
#
# SAMPLEID:
#
# SCANID:
#
";

const TSL_ROWS: &str = "\
   1.00000   0.50000   2.00000   0.00000   0.00000  100.0  0.900  1  800.0  1.20  0  0  0  0
   1.10000   0.60000   2.10000   0.10000   0.00000   90.0 -1.000  1  810.0  1.10  0  0  0  0
   1.20000   0.70000   2.20000   0.00000   0.10000   80.0  0.700  1  820.0  1.00  0  0  0  0
   1.30000   0.80000   2.30000   0.10000   0.10000   70.0  0.600  1  830.0  0.90  0  0  0  0
";

fn tsl_file() -> String {
    format!("{}{}", TSL_HEADER, TSL_ROWS)
}

fn two_point_map() -> crate::crystal_map::CrystalMap {
    CrystalMapBuilder::new(Orientations::from_euler(vec![
        [0.1, 0.2, 0.3],
        [1.0, 2.0, 3.0],
    ]))
    .shape(vec![2])
    .steps(1.0, 0.5)
    .property("iq", vec![10.5, 2.0])
    .property("CI", vec![0.3, 0.9])
    .build()
    .unwrap()
}

// --- Header parsing ---

#[test]
fn test_header_stops_at_first_data_line() {
    let (header, n) = Header::parse(&tsl_file());
    assert_eq!(n, 28);
    assert_eq!(header.lines().len(), 28);
    assert_eq!(header.lines()[0], "# TEM_PIXperUM          1.000000");
    assert_eq!(header.lines()[5], "#");
}

#[test]
fn test_header_phase_metadata() {
    let (header, _) = Header::parse(TSL_HEADER);
    let meta = header.phases();
    assert_eq!(meta.ids, vec![1]);
    assert_eq!(meta.names, vec!["Nickel"]);
    assert_eq!(meta.formulas, vec!["Ni"]);
    assert_eq!(meta.point_groups, vec!["43"]);
    assert_eq!(
        meta.lattice_constants,
        vec![[3.52, 3.52, 3.52, 90.0, 90.0, 90.0]]
    );
    assert_eq!(meta.display_names(), vec!["Ni"]);
}

#[test]
fn test_material_name_tokens_rejoined() {
    let (header, _) = Header::parse("# MaterialName  \tIron   alpha  \n# Formula\n1 2 3\n");
    let meta = header.phases();
    assert_eq!(meta.names, vec!["Iron alpha"]);
    // Empty formula falls back to the material name
    assert_eq!(meta.formulas, vec![""]);
    assert_eq!(meta.display_names(), vec!["Iron alpha"]);
}

#[test]
fn test_phase_id_completion() {
    let header = "\
# MaterialName A
# Phase 2
# MaterialName B
# MaterialName C
";
    let (header, _) = Header::parse(header);
    assert_eq!(header.phases().complete_ids(), vec![2, 3, 4]);

    let (header, _) = Header::parse("# MaterialName A\n# MaterialName B\n# MaterialName C\n");
    assert_eq!(header.phases().complete_ids(), vec![0, 1, 2]);
}

#[test]
fn test_repeated_phase_id_is_completed() {
    let (header, _) = Header::parse("# Phase 1\n# MaterialName A\n# Phase 1\n# MaterialName B\n");
    assert_eq!(header.phases().complete_ids(), vec![1, 2]);
}

#[test]
fn test_phase_id_completion_stops_at_i32_max() {
    let (header, _) = Header::parse("# Phase 2147483647\n# MaterialName A\n# MaterialName B\n");
    assert_eq!(header.phases().complete_ids(), vec![i32::MAX]);

    let map = read_str("# Phase 2147483647\n# MaterialName A\n# MaterialName B\n 0 0 0 0 0 0 0 0\n")
        .unwrap();
    assert_eq!(map.phases().get(i32::MAX).unwrap().name, "A");
    assert!(map.phases().iter().all(|p| p.name != "B"));
}

#[test]
fn test_header_phase_with_not_indexed_id() {
    let text = "\
# Phase -1
# MaterialName Void
# Phase 0
# MaterialName Fe
 0 0 0 0 0 1 1 0
 0 0 0 1 0 1 1 0
";
    let map = read_str(text).unwrap();
    let void = map.phases().get(NOT_INDEXED_ID).unwrap();
    assert_eq!(void.name, "Void");
    assert!(void.is_not_indexed());

    let encoded = encode(&map, &WriteOptions::default()).unwrap();
    assert!(encoded.contains("Fe"));
    assert!(!encoded.contains("Void"));
}

#[test]
fn test_malformed_header_lines_skipped() {
    let header = "\
# Phase one
# MaterialName Fe
# LatticeConstants 2.87 2.87
# LatticeConstants a b c d e f
# Symmetry
";
    let (header, _) = Header::parse(header);
    let meta = header.phases();
    assert!(meta.ids.is_empty());
    assert!(meta.lattice_constants.is_empty());
    assert_eq!(meta.point_groups, vec![""]);

    let phases = meta.to_phase_list();
    assert_eq!(phases.ids(), vec![0]);
    assert_eq!(phases.get(0).unwrap().structure.lattice, Lattice::default());
}

// --- Vendor detection and column resolution ---

#[test]
fn test_vendor_detection() {
    assert_eq!(Vendor::detect(&["# TEM_PIXperUM 1.0"]), Vendor::Tsl);
    assert_eq!(Vendor::detect(&["# EMsoft v5.0"]), Vendor::Emsoft);
    assert_eq!(Vendor::detect(&["# File created by ACOM"]), Vendor::Astar);
    assert_eq!(
        Vendor::detect(&["# ACOM export", "# via EMsoft"]),
        Vendor::Emsoft
    );
    let empty: [&str; 0] = [];
    assert_eq!(Vendor::detect(&empty), Vendor::Tsl);
}

#[test]
fn test_vendor_column_counts() {
    assert_eq!(Vendor::Tsl.columns().len(), 14);
    assert_eq!(Vendor::Emsoft.columns().len(), 8);
    assert_eq!(Vendor::Astar.columns().len(), 9);
    assert_eq!(Vendor::Unknown.columns().len(), 8);
}

#[test]
fn test_resolve_columns_matching() {
    let schema = resolve_columns(Vendor::Astar, 9);
    assert_eq!(schema.vendor, Vendor::Astar);
    assert_eq!(schema.columns[5], "ind");
    assert_eq!(schema.columns[8], "relx100");
}

#[test]
fn test_resolve_columns_fallback_extends() {
    let schema = resolve_columns(Vendor::Tsl, 12);
    assert_eq!(schema.vendor, Vendor::Unknown);
    assert_eq!(schema.columns.len(), 12);
    assert_eq!(
        schema.columns,
        vec![
            "euler1", "euler2", "euler3", "x", "y", "unknown1", "unknown2", "phase_id",
            "unknown3", "unknown4", "unknown5", "unknown6",
        ]
    );
}

#[test]
fn test_resolve_columns_fallback_exact() {
    let schema = resolve_columns(Vendor::Astar, 8);
    assert_eq!(schema.vendor, Vendor::Unknown);
    assert_eq!(schema.columns, Vendor::Unknown.columns());
}

// --- Reading ---

#[test]
fn test_read_tsl() {
    let map = read_str(&tsl_file()).unwrap();

    assert_eq!(map.size(), 4);
    assert_eq!(map.shape(), &[2, 2]);
    assert!((map.dx() - 0.1).abs() < 1e-9);
    assert_eq!(map.scan_unit(), ScanUnit::Micrometer);

    // Confidence index of -1 marks the second point as not indexed
    assert_eq!(map.phase_id(), vec![1, -1, 1, 1]);
    assert_eq!(map.phases().ids(), vec![-1, 1]);

    let nickel = map.phases().get(1).unwrap();
    assert_eq!(nickel.name, "Ni");
    assert_eq!(nickel.point_group, "43");
    assert_eq!(nickel.structure.lattice.a, 3.52);

    assert_eq!(map.orientations().euler()[2], [1.2, 0.7, 2.2]);
    assert_eq!(map.x(), vec![0.0, 0.1, 0.0, 0.1]);

    let keys: Vec<&str> = map.prop().keys().collect();
    assert_eq!(
        keys,
        vec!["ci", "fit", "iq", "unknown1", "unknown2", "unknown3", "unknown4", "unknown5"]
    );
    assert_eq!(
        map.prop().get("iq").unwrap().as_f64(),
        Some(&[100.0, 90.0, 80.0, 70.0][..])
    );
    assert!(!map.prop().contains("euler1"));
}

#[test]
fn test_read_emsoft() {
    let text = "\
# EMsoft v5.0 EMdpmerge
# Phase 1
# MaterialName  \tNi
# Formula     \tNi
# Symmetry              43
#
 0.1 0.2 0.3  0.0 0.0  0.8  0.95  1
 0.4 0.5 0.6  1.5 0.0  0.7  -1  1
";
    let map = read_str(text).unwrap();
    assert_eq!(map.scan_unit(), ScanUnit::Micrometer);
    assert_eq!(map.ndim(), 1);
    assert_eq!(map.prop().keys().collect::<Vec<_>>(), vec!["dp", "iq"]);
    // EMsoft has no not-indexed convention
    assert_eq!(map.phase_id(), vec![1, 1]);
    assert_eq!(map.phases().ids(), vec![1]);
}

#[test]
fn test_read_astar() {
    let text = "\
# File created from ACOM RES results
# MaterialName  \tAl
# Formula
# Symmetry              m-3m
 0.1 0.2 0.3  0.0 0.0  20  15  0  1500
 0.4 0.5 0.6  5.0 0.0  22  17  0  1700
";
    let map = read_str(text).unwrap();
    assert_eq!(map.scan_unit(), ScanUnit::Nanometer);
    assert_eq!(
        map.prop().keys().collect::<Vec<_>>(),
        vec!["ind", "rel", "relx100"]
    );
    let al = map.phases().get(0).unwrap();
    assert_eq!(al.name, "Al");
    assert_eq!(al.point_group, "m-3m");
}

#[test]
fn test_read_column_mismatch_uses_fallback() {
    let text = "\
# TEM_PIXperUM 1.0
 0.1 0.2 0.3  0.0 0.0  1  2  0  3  4
";
    let map = read_str(text).unwrap();
    assert_eq!(map.scan_unit(), ScanUnit::Nanometer);
    assert_eq!(
        map.prop().keys().collect::<Vec<_>>(),
        vec!["unknown1", "unknown2", "unknown3", "unknown4"]
    );
    assert_eq!(map.prop().get("unknown4").unwrap().as_f64(), Some(&[4.0][..]));
}

#[test]
fn test_read_too_few_columns() {
    let err = read_str("# header\n1 2 3 4 5\n").unwrap_err();
    assert!(matches!(err, AngError::InvalidFormat { line: 2, .. }));
}

#[test]
fn test_read_non_numeric_row() {
    let text = format!("{}  1 2 3 0 0 1 1 0 1 1 0 0 0 0\n  1 2 three 0 0 1 1 0 1 1 0 0 0 0\n", TSL_HEADER);
    let err = read_str(&text).unwrap_err();
    match err {
        AngError::InvalidFormat { line, message } => {
            assert_eq!(line, 30);
            assert!(message.contains("three"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_read_ragged_rows() {
    let err = read_str("# h\n1 2 3 4 5 6 7 8\n1 2 3 4 5 6 7\n").unwrap_err();
    assert!(matches!(err, AngError::InvalidFormat { line: 3, .. }));
}

#[test]
fn test_read_header_only() {
    let err = read_str(TSL_HEADER).unwrap_err();
    assert!(matches!(err, AngError::InvalidFormat { .. }));
}

#[test]
fn test_read_skips_blank_lines_in_data() {
    let text = "# h\n0 0 0 0 0 1 1 0\n\n0 0 0 1 0 1 1 0\n";
    let map = read_str(text).unwrap();
    assert_eq!(map.size(), 2);
}

// --- Writing ---

#[test]
fn test_encode_rows() {
    let text = encode(&two_point_map(), &WriteOptions::new()).unwrap();
    let rows: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(
        rows,
        vec![
            " 0.10000   0.20000   0.30000  0.00000  0.00000  10.50000  0.30000  0  0.00000  0.00000",
            " 1.00000   2.00000   3.00000  0.50000  0.00000   2.00000  0.90000  0  0.00000  0.00000",
        ]
    );
}

#[test]
fn test_encode_header() {
    let phases = PhaseList::from_phases([Phase::new(0, "Ni", "m-3m")
        .with_lattice(Lattice::from_abcabg([3.52, 3.52, 3.52, 90.0, 90.0, 90.0]))])
    .unwrap();
    let map = CrystalMapBuilder::new(Orientations::identity(6))
        .shape(vec![2, 3])
        .steps(0.25, 0.5)
        .phases(phases)
        .build()
        .unwrap();

    let text = encode(&map, &WriteOptions::new()).unwrap();
    let header: Vec<&str> = text.lines().take_while(|l| l.starts_with('#')).collect();

    assert_eq!(header[0], "# TEM_PIXperUM           1.000000");
    assert!(header.contains(&"# Phase 0"));
    assert!(header.contains(&"# MaterialName    Ni"));
    assert!(header.contains(&"# Formula    Ni"));
    assert!(header.contains(&"# Symmetry    m-3m"));
    assert!(header.contains(&"# LatticeConstants    3.520 3.520 3.520 90.000 90.000 90.000"));
    assert!(header.contains(&"# NumberFamilies    0"));
    assert!(header.contains(&"# GRID: SqrGrid"));
    assert!(header.contains(&"# XSTEP: 0.500000"));
    assert!(header.contains(&"# YSTEP: 0.250000"));
    assert!(header.contains(&"# NCOLS_ODD: 3"));
    assert!(header.contains(&"# NCOLS_EVEN: 3"));
    assert!(header.contains(&"# NROWS: 2"));
    assert!(header.contains(&"# SCANID:"));
    assert!(header.iter().any(|l| l.starts_with("# OPERATOR: angmap")));

    let rows: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(rows.len(), 6);
    let last: Vec<&str> = rows[5].split_whitespace().collect();
    assert_eq!(last[3], "1.00000");
    assert_eq!(last[4], "0.25000");
}

#[test]
fn test_explicit_override_beats_alias() {
    let mut map = two_point_map();
    map.prop_mut().set("quality", vec![7.0, 8.0]).unwrap();

    let options = WriteOptions::new().image_quality("quality");
    let text = encode(&map, &options).unwrap();
    let first: Vec<&str> = text
        .lines()
        .find(|l| !l.starts_with('#'))
        .unwrap()
        .split_whitespace()
        .collect();
    assert_eq!(first[5], "7.00000");
    assert_eq!(first[6], "0.30000");
}

#[test]
fn test_explicit_override_missing() {
    let options = WriteOptions::new().pattern_fit("fit_score");
    let err = encode(&two_point_map(), &options).unwrap_err();
    assert!(matches!(
        err,
        AngError::PropertyError(PropertyError::KeyNotFound(ref name)) if name == "fit_score"
    ));
}

#[test]
fn test_inactive_points_written_as_placeholders() {
    let mut map = two_point_map();
    map.set_mask(vec![true, false]).unwrap();

    let text = encode(&map, &WriteOptions::new()).unwrap();
    let rows: Vec<Vec<&str>> = text
        .lines()
        .filter(|l| !l.starts_with('#'))
        .map(|l| l.split_whitespace().collect())
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[1][..3], &["0.00000", "0.00000", "0.00000"]);
    assert_eq!(rows[1][3], "0.50000");
    assert_eq!(rows[1][5], "0.00000");
    assert_eq!(rows[1][7], "-1");
}

#[test]
fn test_multi_component_uses_first_value() {
    let map = CrystalMapBuilder::new(Orientations::identity(2))
        .property(
            "pattern_fit",
            PropertyValues::float_components(vec![1.5, 9.0, 2.5, 9.0], 2),
        )
        .build()
        .unwrap();
    let text = encode(&map, &WriteOptions::new()).unwrap();
    let fits: Vec<&str> = text
        .lines()
        .filter(|l| !l.starts_with('#'))
        .map(|l| l.split_whitespace().nth(8).unwrap())
        .collect();
    assert_eq!(fits, vec!["1.50000", "2.50000"]);
}

#[test]
fn test_write_rejects_three_dimensions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("volume.ang");
    let map = CrystalMapBuilder::new(Orientations::identity(8))
        .shape(vec![2, 2, 2])
        .build()
        .unwrap();

    let err = write(&path, &map, &WriteOptions::new()).unwrap_err();
    assert!(matches!(err, AngError::UnsupportedDimensions { ndim: 3 }));
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_write_creates_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("map.ang");
    write(&path, &two_point_map(), &WriteOptions::new()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, encode(&two_point_map(), &WriteOptions::new()).unwrap());
}

#[test]
fn test_map_error_converts() {
    let err: AngError = MapError::DuplicatePhaseId(3).into();
    assert!(err.to_string().contains("Duplicate phase id: 3"));
}
