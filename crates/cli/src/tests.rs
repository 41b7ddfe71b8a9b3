use super::*;
use std::fs;
use tempfile::{tempdir, TempDir};

fn run(args: &[&str]) -> Result<()> {
    let argv = std::iter::once("geodetic-cli").chain(args.iter().copied());
    execute(Cmd::try_parse_from(argv)?)
}

fn csv(dir: &TempDir, name: &str, body: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path.to_string_lossy().into_owned()
}

/// Column `name` of a small CSV as strings, header excluded.
fn column(path: &Path, name: &str) -> Vec<String> {
    let text = fs::read_to_string(path).unwrap();
    let mut lines = text.lines();
    let header: Vec<&str> = lines.next().unwrap().split(',').collect();
    let at = header.iter().position(|h| *h == name).unwrap();
    lines
        .map(|l| l.split(',').nth(at).unwrap().to_string())
        .collect()
}

fn floats(path: &Path, name: &str) -> Vec<f64> {
    column(path, name)
        .iter()
        .map(|v| v.parse().unwrap())
        .collect()
}

#[test]
fn distance_in_degrees_broadcasts_single_origin() {
    let dir = tempdir().unwrap();
    let from = csv(&dir, "from.csv", "lon,lat\n0,0\n");
    let to = csv(&dir, "to.csv", "lon,lat\n0,1\n1,0\n0,0\n");
    let out = dir.path().join("out/dist.csv");
    run(&[
        "--degrees",
        "--out",
        out.to_str().unwrap(),
        "distance",
        "--from",
        &from,
        "--to",
        &to,
        "--azimuth",
    ])
    .unwrap();
    let d = floats(&out, "distance_km");
    assert_eq!(d.len(), 3);
    assert!((d[0] - 111.19).abs() < 0.01);
    assert!((d[1] - 111.19).abs() < 0.01);
    assert_eq!(d[2], 0.0);
    let az = floats(&out, "azimuth");
    assert!(az[0].abs() < 1e-9);
    assert!((az[1] - 90.0).abs() < 1e-9);
    assert!(dir.path().join("out/dist.provenance.json").exists());
}

#[test]
fn min_distance_reports_first_of_tied_indices() {
    let dir = tempdir().unwrap();
    let mesh = csv(&dir, "mesh.csv", "lon,lat\n0.1,0\n-0.1,0\n0.5,0\n");
    let sites = csv(&dir, "sites.csv", "lon,lat\n0,0\n0.45,0\n");
    let out = dir.path().join("nearest.csv");
    run(&[
        "--out",
        out.to_str().unwrap(),
        "min-distance",
        "--mesh",
        &mesh,
        "--sites",
        &sites,
        "--index",
        "--closest",
    ])
    .unwrap();
    assert_eq!(column(&out, "mesh_index"), ["0", "2"]);
    assert_eq!(floats(&out, "closest_lon"), [0.1, 0.5]);
    assert_eq!(column(&out, "row"), ["0", "1"]);
}

#[test]
fn min_distance_uses_depth_unless_surface() {
    let dir = tempdir().unwrap();
    let mesh = csv(&dir, "mesh.csv", "lon,lat,depth\n0,0,10\n");
    let sites = csv(&dir, "sites.csv", "lon,lat\n0,0\n");
    let deep = dir.path().join("deep.csv");
    let flat = dir.path().join("flat.csv");
    let args = |out: &Path, surface: bool| {
        let mut v = vec![
            "--out".to_string(),
            out.to_string_lossy().into_owned(),
            "min-distance".to_string(),
            "--mesh".to_string(),
            mesh.clone(),
            "--sites".to_string(),
            sites.clone(),
        ];
        if surface {
            v.push("--surface".to_string());
        }
        v
    };
    let deep_args = args(&deep, false);
    run(&deep_args.iter().map(String::as_str).collect::<Vec<_>>()).unwrap();
    let flat_args = args(&flat, true);
    run(&flat_args.iter().map(String::as_str).collect::<Vec<_>>()).unwrap();
    assert_eq!(floats(&deep, "distance_km"), [10.0]);
    assert_eq!(floats(&flat, "distance_km"), [0.0]);
}

#[test]
fn polygon_distance_is_zero_inside_hull() {
    let dir = tempdir().unwrap();
    let mesh = csv(&dir, "mesh.csv", "x,y\n0,0\n2,0\n2,2\n0,2\n1,1\n");
    let sites = csv(&dir, "sites.csv", "x,y\n1,1\n5,1\n");
    let out = dir.path().join("poly.csv");
    run(&[
        "--out",
        out.to_str().unwrap(),
        "polygon-distance",
        "--mesh",
        &mesh,
        "--sites",
        &sites,
    ])
    .unwrap();
    assert_eq!(floats(&out, "distance"), [0.0, 3.0]);
}

#[test]
fn arc_distance_signs_follow_sides() {
    let dir = tempdir().unwrap();
    let arcs = csv(&dir, "arcs.csv", "lon,lat,azimuth\n0,0,0\n");
    let sites = csv(&dir, "sites.csv", "lon,lat\n0.1,0\n-0.1,0\n");
    let out = dir.path().join("arc.csv");
    run(&[
        "--degrees",
        "--out",
        out.to_str().unwrap(),
        "arc-distance",
        "--arcs",
        &arcs,
        "--sites",
        &sites,
    ])
    .unwrap();
    let d = floats(&out, "distance_km");
    assert!(d[0] > 0.0 && d[1] < 0.0);
    assert!((d[0] + d[1]).abs() < 1e-9);
}

#[test]
fn mismatched_tables_fail_before_writing() {
    let dir = tempdir().unwrap();
    let from = csv(&dir, "from.csv", "lon,lat\n0,0\n1,1\n");
    let to = csv(&dir, "to.csv", "lon,lat\n0,0\n1,1\n2,2\n");
    let out = dir.path().join("never.csv");
    let err = run(&[
        "--out",
        out.to_str().unwrap(),
        "distance",
        "--from",
        &from,
        "--to",
        &to,
    ])
    .unwrap_err();
    assert!(err.downcast_ref::<geodetic::GeodeticError>().is_some());
    assert!(!out.exists());
}

#[test]
fn missing_column_is_reported() {
    let dir = tempdir().unwrap();
    let mesh = csv(&dir, "mesh.csv", "lon,latitude\n0,0\n");
    let sites = csv(&dir, "sites.csv", "lon,lat\n0,0\n");
    let err = run(&["min-distance", "--mesh", &mesh, "--sites", &sites]).unwrap_err();
    assert!(err.to_string().contains("`lat`"));
}
