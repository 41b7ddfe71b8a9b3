use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geodetic::api::{
    distance_and_azimuth, distance_to_arc, geodetic_distance, point_to_polygon_distance_with,
    ArrayView, HullCfg, Mesh, PointSet, TracingSink,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod table;

use provenance::{write_sidecar, Payload};
use table::{float_series, index_series, output_angles, row_series, Table};

#[derive(Parser)]
#[command(name = "geodetic-cli")]
#[command(about = "Spherical distance kernels over CSV point tables")]
struct Cmd {
    /// Optional run tag; propagated to outputs and logs
    #[arg(long, global = true)]
    tag: Option<String>,

    /// Angle columns (lon, lat, azimuth) are in degrees rather than radians
    #[arg(long, global = true)]
    degrees: bool,

    /// Output CSV path; stdout when omitted (no provenance sidecar then)
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Pairwise great-circle distance between two broadcastable tables
    Distance {
        #[arg(long)]
        from: PathBuf,
        #[arg(long)]
        to: PathBuf,
        /// Also emit the initial bearing from `from` toward `to`
        #[arg(long)]
        azimuth: bool,
    },
    /// Nearest mesh point for every site (depth-aware when a depth column exists)
    MinDistance {
        #[arg(long)]
        mesh: PathBuf,
        #[arg(long)]
        sites: PathBuf,
        /// Report the flattened mesh index instead of the distance
        #[arg(long)]
        index: bool,
        /// Ignore depth columns entirely
        #[arg(long)]
        surface: bool,
        /// Also emit the coordinates of the nearest mesh point
        #[arg(long)]
        closest: bool,
    },
    /// Planar distance from sites to the convex hull of a projected mesh (x, y columns)
    PolygonDistance {
        #[arg(long)]
        mesh: PathBuf,
        #[arg(long)]
        sites: PathBuf,
    },
    /// Cross-track distance from sites to arcs given by lon, lat, azimuth
    ArcDistance {
        #[arg(long)]
        arcs: PathBuf,
        #[arg(long)]
        sites: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    execute(Cmd::parse())
}

fn execute(cmd: Cmd) -> Result<()> {
    let Cmd {
        tag,
        degrees,
        out,
        action,
    } = cmd;
    let out = out.as_deref();
    match action {
        Action::Distance { from, to, azimuth } => {
            distance(&from, &to, azimuth, degrees, out, tag)
        }
        Action::MinDistance {
            mesh,
            sites,
            index,
            surface,
            closest,
        } => min_distance(
            &mesh,
            &sites,
            SearchFlags {
                index,
                surface,
                closest,
            },
            degrees,
            out,
            tag,
        ),
        Action::PolygonDistance { mesh, sites } => polygon_distance(&mesh, &sites, out, tag),
        Action::ArcDistance { arcs, sites } => arc_distance(&arcs, &sites, degrees, out, tag),
        Action::Report => report(tag),
    }
}

fn distance(
    from: &Path,
    to: &Path,
    with_azimuth: bool,
    degrees: bool,
    out: Option<&Path>,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(from = %from.display(), to = %to.display(), tag = ?tag, "distance");
    let a = Table::read(from, degrees)?;
    let b = Table::read(to, degrees)?;
    let (lons1, lats1) = (a.angles("lon")?, a.angles("lat")?);
    let (lons2, lats2) = (b.angles("lon")?, b.angles("lat")?);

    let mut columns = Vec::new();
    if with_azimuth {
        let (dist, az) = distance_and_azimuth(&lons1, &lats1, &lons2, &lats2)?;
        columns.push(row_series(dist.len()));
        columns.push(float_series("distance_km", dist.as_slice()));
        columns.push(float_series(
            "azimuth",
            &output_angles(az.into_vec(), degrees),
        ));
    } else {
        let dist = geodetic_distance(&lons1, &lats1, &lons2, &lats2)?;
        columns.push(row_series(dist.len()));
        columns.push(float_series("distance_km", dist.as_slice()));
    }
    table::write(columns, out)?;
    sidecar(
        out,
        "distance",
        serde_json::json!({
            "from": from,
            "to": to,
            "azimuth": with_azimuth,
            "degrees": degrees,
        }),
        tag,
    )
}

struct SearchFlags {
    index: bool,
    surface: bool,
    closest: bool,
}

fn min_distance(
    mesh_path: &Path,
    sites_path: &Path,
    flags: SearchFlags,
    degrees: bool,
    out: Option<&Path>,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(
        mesh = %mesh_path.display(),
        sites = %sites_path.display(),
        index = flags.index,
        surface = flags.surface,
        tag = ?tag,
        "min_distance"
    );
    let mesh_table = Table::read(mesh_path, degrees)?;
    let sites = Table::read(sites_path, degrees)?;
    let (mesh_lons, mesh_lats) = (mesh_table.angles("lon")?, mesh_table.angles("lat")?);
    let (site_lons, site_lats) = (sites.angles("lon")?, sites.angles("lat")?);
    let (mesh_depths, site_depths) = if flags.surface {
        (None, None)
    } else {
        (
            mesh_table.optional_floats("depth")?,
            sites.optional_floats("depth")?,
        )
    };

    let mesh_depth_view = mesh_depths.as_ref().map(ArrayView::from);
    let mesh = Mesh::new(
        &ArrayView::from(&mesh_lons),
        &ArrayView::from(&mesh_lats),
        mesh_depth_view.as_ref(),
    )
    .with_context(|| format!("building mesh from {}", mesh_path.display()))?;
    let mut query = PointSet::new(&site_lons, &site_lats);
    if let Some(depths) = site_depths.as_ref() {
        query = query.with_depths(depths);
    }

    let mut columns = vec![row_series(sites.rows())];
    if flags.index {
        let indices = mesh.nearest_indices(&query)?;
        columns.push(index_series("mesh_index", indices.as_slice()));
    } else {
        let distances = mesh.nearest_distances(&query)?;
        columns.push(float_series("distance_km", distances.as_slice()));
    }
    if flags.closest {
        let closest = mesh.closest_points(&query)?;
        columns.push(float_series(
            "closest_lon",
            &output_angles(closest.lons.into_vec(), degrees),
        ));
        columns.push(float_series(
            "closest_lat",
            &output_angles(closest.lats.into_vec(), degrees),
        ));
        columns.push(float_series("closest_depth", closest.depths.as_slice()));
    }
    table::write(columns, out)?;
    sidecar(
        out,
        "min-distance",
        serde_json::json!({
            "mesh": mesh_path,
            "sites": sites_path,
            "mesh_points": mesh.len(),
            "index": flags.index,
            "surface": flags.surface,
            "closest": flags.closest,
            "degrees": degrees,
        }),
        tag,
    )
}

fn polygon_distance(
    mesh_path: &Path,
    sites_path: &Path,
    out: Option<&Path>,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(mesh = %mesh_path.display(), sites = %sites_path.display(), tag = ?tag, "polygon_distance");
    // Planar coordinates; --degrees does not apply.
    let mesh = Table::read(mesh_path, false)?;
    let sites = Table::read(sites_path, false)?;
    let (mx, my) = (mesh.floats("x")?, mesh.floats("y")?);
    let (qx, qy) = (sites.floats("x")?, sites.floats("y")?);
    let dist = point_to_polygon_distance_with(
        &ArrayView::from(&mx),
        &ArrayView::from(&my),
        &ArrayView::from(&qx),
        &ArrayView::from(&qy),
        HullCfg::default(),
        &TracingSink,
    )?;
    table::write(
        vec![row_series(dist.len()), float_series("distance", dist.as_slice())],
        out,
    )?;
    sidecar(
        out,
        "polygon-distance",
        serde_json::json!({ "mesh": mesh_path, "sites": sites_path }),
        tag,
    )
}

fn arc_distance(
    arcs_path: &Path,
    sites_path: &Path,
    degrees: bool,
    out: Option<&Path>,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(arcs = %arcs_path.display(), sites = %sites_path.display(), tag = ?tag, "arc_distance");
    let arcs = Table::read(arcs_path, degrees)?;
    let sites = Table::read(sites_path, degrees)?;
    let dist = distance_to_arc(
        &arcs.angles("lon")?,
        &arcs.angles("lat")?,
        &arcs.angles("azimuth")?,
        &sites.angles("lon")?,
        &sites.angles("lat")?,
    )?;
    table::write(
        vec![
            row_series(dist.len()),
            float_series("distance_km", dist.as_slice()),
        ],
        out,
    )?;
    sidecar(
        out,
        "arc-distance",
        serde_json::json!({ "arcs": arcs_path, "sites": sites_path, "degrees": degrees }),
        tag,
    )
}

fn report(tag: Option<String>) -> Result<()> {
    let provenance = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "geodetic_version": geodetic::VERSION,
        "earth_radius_km": geodetic::EARTH_RADIUS,
        "tag": tag,
    });
    println!("{}", serde_json::to_string_pretty(&provenance)?);
    Ok(())
}

#[track_caller]
fn sidecar(
    out: Option<&Path>,
    command: &'static str,
    params: serde_json::Value,
    tag: Option<String>,
) -> Result<()> {
    if let Some(path) = out {
        let prov = write_sidecar(path, Payload::new(command, params).with_tag(tag))?;
        tracing::info!(path = %prov.display(), "provenance");
    }
    Ok(())
}

#[cfg(test)]
mod tests;
