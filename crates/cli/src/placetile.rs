//! placetile - run a label placement pass over tile descriptions
//!
//! A command line tool that reads JSON tile descriptions, decides for
//! every candidate label whether and at what placement scale it fits
//! without overlapping previously placed labels, and writes a JSON
//! report.

use clap::{ArgAction, Parser};
use placard_core::{Aabb, CollisionIndex, FixedOrientation, GlyphBox, Point};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// A command line tool that runs a per-tile label placement pass over
/// JSON tile descriptions and reports the outcome per label.
#[derive(Parser, Debug)]
#[command(name = "placetile")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more paths to tile JSON files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Scale floor requested for every label
    #[arg(short = 'm', long = "min-scale", default_value = "1.0")]
    min_scale: f64,

    /// Pretty-print the JSON report
    #[arg(short = 'p', long, action = ArgAction::SetTrue)]
    pretty: bool,

    /// Report per-label decisions on stderr
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

/// One tile's worth of candidate labels.
#[derive(Debug, Deserialize)]
struct TileInput {
    zoom: f64,
    #[serde(default = "default_extent")]
    extent: f64,
    #[serde(default = "default_tile_size")]
    tile_size: f64,
    labels: Vec<LabelInput>,
}

fn default_extent() -> f64 {
    4096.0
}

fn default_tile_size() -> f64 {
    512.0
}

fn default_horizontal() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct LabelInput {
    /// Label anchor in tile coordinates
    anchor: [f64; 2],
    /// Straight label (true) or glyphs of a curved label (false)
    #[serde(default = "default_horizontal")]
    horizontal: bool,
    glyphs: Vec<GlyphInput>,
}

#[derive(Debug, Deserialize)]
struct GlyphInput {
    /// Collision box relative to the anchor: [x1, y1, x2, y2]
    #[serde(rename = "box")]
    bounds: [f64; 4],
    /// Optional horizontal-readout box
    #[serde(default)]
    h_box: Option<[f64; 4]>,
    /// Per-glyph anchor; defaults to the label anchor
    #[serde(default)]
    anchor: Option<[f64; 2]>,
    /// Clearance in screen pixels
    #[serde(default)]
    padding: f64,
    #[serde(default)]
    min_scale: f64,
    /// Scale past which the glyph disappears; unbounded when omitted
    #[serde(default)]
    max_scale: Option<f64>,
}

#[derive(Debug, Serialize)]
struct TileReport {
    zoom: f64,
    placed: usize,
    rejected: usize,
    labels: Vec<LabelReport>,
}

#[derive(Debug, Serialize)]
struct LabelReport {
    index: usize,
    /// Placement scale, absent when the label was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    scale: Option<f64>,
    /// Forbidden rotation interval [min, max] in radians, absent when
    /// empty
    #[serde(skip_serializing_if = "Option::is_none")]
    forbidden: Option<[f64; 2]>,
}

fn to_aabb(b: [f64; 4]) -> Aabb {
    Aabb::new(b[0], b[1], b[2], b[3])
}

/// Build the engine's glyph boxes from one label's DTO.
fn build_glyphs(label: &LabelInput) -> Vec<GlyphBox> {
    label
        .glyphs
        .iter()
        .map(|g| GlyphBox {
            bounds: to_aabb(g.bounds),
            h_bounds: g.h_box.map(to_aabb),
            anchor: g
                .anchor
                .map(|a| Point::new(a[0], a[1]))
                .unwrap_or(Point::new(label.anchor[0], label.anchor[1])),
            padding: g.padding,
            min_scale: g.min_scale,
            max_scale: g.max_scale.unwrap_or(f64::INFINITY),
        })
        .collect()
}

/// Runs the placement pass for one tile: solve the scale, solve the
/// rotation window, then commit. Labels are never rotated here, so the
/// fixed-orientation solver is used and every scaled label is committed.
fn run_tile(tile: &TileInput, min_scale: f64, debug: bool) -> placard_core::Result<TileReport> {
    let mut index = CollisionIndex::new(tile.zoom, tile.extent, tile.tile_size)?;
    if debug {
        eprintln!(
            "tile: extent {}, effective zoom {}, placement ceiling {}",
            index.extent(),
            index.zoom(),
            index.max_placement_scale()
        );
    }
    let mut report = TileReport {
        zoom: tile.zoom,
        placed: 0,
        rejected: 0,
        labels: Vec::with_capacity(tile.labels.len()),
    };

    for (i, label) in tile.labels.iter().enumerate() {
        let glyphs = build_glyphs(label);
        let anchor = Point::new(label.anchor[0], label.anchor[1]);

        let Some(scale) = index.placement_scale(&glyphs, min_scale) else {
            if debug {
                eprintln!("label {i}: rejected");
            }
            report.rejected += 1;
            report.labels.push(LabelReport {
                index: i,
                scale: None,
                forbidden: None,
            });
            continue;
        };

        let range = index.placement_range(&glyphs, scale, label.horizontal, &FixedOrientation);
        index.insert(&glyphs, anchor, scale, range, label.horizontal);

        if debug {
            eprintln!("label {i}: placed at scale {scale}");
        }
        report.placed += 1;
        report.labels.push(LabelReport {
            index: i,
            scale: Some(scale),
            forbidden: (!range.is_empty()).then(|| [range.min, range.max]),
        });
    }

    Ok(report)
}

fn process_file(path: &Path, output: &mut dyn Write, args: &Args) -> Result<(), Box<dyn Error>> {
    let data = std::fs::read_to_string(path)?;
    let tile: TileInput = serde_json::from_str(&data)?;
    let report = run_tile(&tile, args.min_scale, args.debug)?;

    if args.pretty {
        serde_json::to_writer_pretty(&mut *output, &report)?;
    } else {
        serde_json::to_writer(&mut *output, &report)?;
    }
    writeln!(output)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // Open output file or use stdout
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .map_err(|e| format!("Failed to create output file {}: {}", args.outfile, e))?;
        Box::new(BufWriter::new(file))
    };

    // Process each input tile
    for path in &args.files {
        if !path.exists() {
            eprintln!("Error: File not found: {}", path.display());
            std::process::exit(1);
        }

        if let Err(e) = process_file(path, &mut output, &args) {
            eprintln!("Error processing {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: &str = r#"{
        "zoom": 10,
        "labels": [
            {
                "anchor": [2000, 2000],
                "glyphs": [{"box": [-30, -10, 30, 10], "padding": 2}]
            },
            {
                "anchor": [2050, 2000],
                "glyphs": [{"box": [-30, -10, 30, 10], "padding": 2}]
            },
            {
                "anchor": [2000, 2000],
                "glyphs": [{"box": [-30, -10, 30, 10], "padding": 2}]
            }
        ]
    }"#;

    #[test]
    fn test_run_tile_places_and_rejects() {
        let tile: TileInput = serde_json::from_str(TILE).unwrap();
        let report = run_tile(&tile, 1.0, false).unwrap();

        assert_eq!(report.placed, 2);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.labels[0].scale, Some(1.0));
        // The second label is pushed past the first one's footprint.
        let scale = report.labels[1].scale.unwrap();
        assert!((scale - 1.52).abs() < 1e-12);
        // The third shares the first label's anchor.
        assert_eq!(report.labels[2].scale, None);
    }

    #[test]
    fn test_run_tile_surfaces_bad_geometry() {
        let tile: TileInput = serde_json::from_str(r#"{"zoom": 3, "extent": 0, "labels": []}"#)
            .unwrap();
        assert!(run_tile(&tile, 1.0, false).is_err());
    }

    #[test]
    fn test_glyph_anchor_defaults_to_label_anchor() {
        let label: LabelInput = serde_json::from_str(
            r#"{"anchor": [100, 200], "glyphs": [{"box": [-1, -1, 1, 1]}]}"#,
        )
        .unwrap();
        let glyphs = build_glyphs(&label);
        assert_eq!(glyphs[0].anchor, Point::new(100.0, 200.0));
        assert_eq!(glyphs[0].max_scale, f64::INFINITY);
        assert!(label.horizontal);
    }
}
