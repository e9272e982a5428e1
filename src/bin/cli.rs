//! CLI application for scoring a portrait from precomputed face-mesh landmarks.
//!
//! Usage:
//!   face-score <image> <landmarks.json>                 # Human-readable output
//!   face-score <image> <landmarks.json> --json          # JSON output
//!   face-score <image> <landmarks.json> -o report.json  # Save to file
//!   face-score <image> <landmarks.json> --overlay out.png

use clap::Parser;
use face_score::{
    advice, analyze, select_face, Analysis, BoundingBox, Detection, Error, ImageAccess,
    PixelBuffer, Point, Result, ScoreStatus, SubScore,
};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(name = "face-score")]
#[command(author, version, about = "Heuristic facial aesthetic scoring", long_about = None)]
struct Args {
    /// Input image file
    #[arg(required = true)]
    image: PathBuf,

    /// JSON file with the detector's faces, in the original image's coordinates
    #[arg(required = true)]
    landmarks: PathBuf,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Images wider than this are scaled down before scoring
    #[arg(long, default_value = "480")]
    max_width: u32,

    /// Images taller than this are scaled down before scoring
    #[arg(long, default_value = "640")]
    max_height: u32,

    /// Write a PNG with the landmarks of the scored face drawn on it
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Either a list of faces or a single face object.
#[derive(Deserialize)]
#[serde(untagged)]
enum LandmarkInput {
    Many(Vec<Detection>),
    One(Detection),
}

impl LandmarkInput {
    fn into_detections(self) -> Vec<Detection> {
        match self {
            LandmarkInput::Many(v) => v,
            LandmarkInput::One(d) => vec![d],
        }
    }
}

/// Output structure for JSON serialization
#[derive(Serialize)]
struct Output {
    image: String,
    width: u32,
    height: u32,
    scale: f64,
    faces_detected: usize,
    #[serde(flatten)]
    analysis: Analysis,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    info!(path = ?args.image, "loading image");
    let rgba = image::open(&args.image)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    let original = PixelBuffer::new(width, height, rgba.into_raw())?;
    let (buffer, scale) = original.fit_within(args.max_width, args.max_height);
    if scale < 1.0 {
        info!(
            scale,
            width = buffer.width(),
            height = buffer.height(),
            "scaled image down"
        );
    }

    info!(path = ?args.landmarks, "loading landmarks");
    let raw = std::fs::read_to_string(&args.landmarks)?;
    let detections: Vec<Detection> = serde_json::from_str::<LandmarkInput>(&raw)?
        .into_detections()
        .iter()
        .map(|d| d.scaled(scale))
        .collect();
    info!(count = detections.len(), "faces in landmark file");

    let face = select_face(&detections).ok_or(Error::NoFaceDetected)?;
    let analysis = analyze(&buffer, face);
    for (name, s) in sub_scores(&analysis) {
        if s.is_fallback() {
            warn!(score = name, status = ?s.status, "sub-score fell back");
        }
    }

    if let Some(ref path) = args.overlay {
        write_overlay(&buffer, face, path)?;
        info!(?path, "overlay written");
    }

    let output = Output {
        image: args.image.display().to_string(),
        width: buffer.width(),
        height: buffer.height(),
        scale,
        faces_detected: detections.len(),
        analysis,
    };

    let output_str = if args.json {
        serde_json::to_string_pretty(&output)?
    } else {
        format_human_readable(&output)
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output_str)?;
        info!(?path, "output written");
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn sub_scores(analysis: &Analysis) -> [(&'static str, SubScore); 4] {
    let s = &analysis.scores;
    [
        ("symmetry", s.symmetry),
        ("proportion", s.proportion),
        ("structure", s.structure),
        ("skin", s.skin),
    ]
}

fn format_human_readable(output: &Output) -> String {
    let mut s = String::new();

    s.push_str(&format!(
        "Image: {} ({}x{})\n",
        output.image, output.width, output.height
    ));
    s.push_str(&format!("Faces detected: {}\n", output.faces_detected));

    s.push_str(&format!("\nOverall: {}\n", output.analysis.scores.overall));
    for (name, score) in sub_scores(&output.analysis) {
        let note = match score.status {
            ScoreStatus::Computed => String::new(),
            ScoreStatus::Approximated(reason) => format!("  (approximated: {})", reason),
            ScoreStatus::Neutral(reason) => format!("  (neutral: {})", reason),
        };
        s.push_str(&format!("  {:<11} {:>3}{}\n", name, score.value, note));
    }

    s.push_str("\nAdvice:\n");
    s.push_str(&advice::render(&output.analysis.advice));
    s
}

fn write_overlay(buffer: &PixelBuffer, face: &Detection, path: &Path) -> Result<()> {
    let mut img = RgbaImage::from_raw(buffer.width(), buffer.height(), buffer.as_raw().to_vec())
        .ok_or(Error::InvalidBuffer {
            width: buffer.width(),
            height: buffer.height(),
            expected: buffer.width() as usize * buffer.height() as usize * 4,
            actual: buffer.as_raw().len(),
        })?;

    if let Some(b) = face.face_box() {
        draw_rect(&mut img, &b, Rgba([0, 255, 0, 255]));
    }
    let dot = Rgba([0, 150, 255, 230]);
    for p in &face.landmarks.points {
        draw_circle(&mut img, p, 1, dot);
    }
    img.save(path)?;
    Ok(())
}

// Drawing helpers

fn draw_rect(img: &mut RgbaImage, b: &BoundingBox, color: Rgba<u8>) {
    let (img_w, img_h) = img.dimensions();
    let (x, y) = (b.x.round() as i32, b.y.round() as i32);
    let (w, h) = (b.width.round() as i32, b.height.round() as i32);
    let mut put = |px: i32, py: i32| {
        if px >= 0 && px < img_w as i32 && py >= 0 && py < img_h as i32 {
            img.put_pixel(px as u32, py as u32, color);
        }
    };

    for dx in 0..w {
        put(x + dx, y);
        put(x + dx, y + h - 1);
    }
    for dy in 0..h {
        put(x, y + dy);
        put(x + w - 1, y + dy);
    }
}

fn draw_circle(img: &mut RgbaImage, center: &Point, radius: i32, color: Rgba<u8>) {
    let (img_w, img_h) = img.dimensions();
    let (cx, cy) = (center.x.round() as i32, center.y.round() as i32);

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                let px = cx + dx;
                let py = cy + dy;
                if px >= 0 && px < img_w as i32 && py >= 0 && py < img_h as i32 {
                    img.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }
}
