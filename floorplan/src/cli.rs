use std::path::{Path, PathBuf};

use clap::Parser;
use floorplan_core::UnitSystem;

/// Render a concept floor plan to SVG, PNG, JPEG or PDF.
#[derive(Parser, Debug)]
#[command(
    name = "floorplan",
    about = "Render a concept floor plan to SVG, PNG, JPEG or PDF"
)]
pub struct Cli {
    /// Plan JSON (a concept plan, or a generator response carrying one)
    pub input: PathBuf,

    /// Output file; the extension selects the format
    pub output: PathBuf,

    /// Label units, overriding the plan's own unit system (m or ft)
    #[arg(short = 'u', long = "unit", value_parser = parse_unit)]
    pub unit: Option<UnitSystem>,

    /// TOML render config
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Pixels per meter
    #[arg(long = "scale")]
    pub scale: Option<f64>,

    /// Raster supersampling factor
    #[arg(long = "supersample")]
    pub supersample: Option<f32>,

    /// Print the room schedule to stdout
    #[arg(short = 's', long = "schedule")]
    pub schedule: bool,

    /// Write raster and PDF output as base64 text
    #[arg(long = "base64")]
    pub base64: bool,
}

fn parse_unit(s: &str) -> Result<UnitSystem, String> {
    UnitSystem::parse(s).ok_or_else(|| format!("unknown unit `{s}`, expected m or ft"))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputKind {
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl OutputKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Some(OutputKind::Svg),
            "png" => Some(OutputKind::Png),
            "jpg" | "jpeg" => Some(OutputKind::Jpeg),
            "pdf" => Some(OutputKind::Pdf),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_kind_from_extension() {
        assert_eq!(OutputKind::from_path(Path::new("a.SVG")), Some(OutputKind::Svg));
        assert_eq!(OutputKind::from_path(Path::new("a.jpeg")), Some(OutputKind::Jpeg));
        assert_eq!(OutputKind::from_path(Path::new("a.jpg")), Some(OutputKind::Jpeg));
        assert_eq!(OutputKind::from_path(Path::new("out/plan.pdf")), Some(OutputKind::Pdf));
        assert_eq!(OutputKind::from_path(Path::new("plan.gif")), None);
        assert_eq!(OutputKind::from_path(Path::new("plan")), None);
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "floorplan",
            "plan.json",
            "plan.png",
            "--unit",
            "ft",
            "--schedule",
            "--supersample",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.unit, Some(UnitSystem::Imperial));
        assert!(cli.schedule);
        assert_eq!(cli.supersample, Some(3.0));
        assert!(Cli::try_parse_from(["floorplan", "a.json", "b.svg", "--unit", "yd"]).is_err());
    }
}
