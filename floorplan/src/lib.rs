pub mod cli;
pub mod config;
pub mod output;

use std::fs;

use anyhow::{Context, Result, anyhow, bail};
use floorplan_core::diagnostics::log_warnings;
use floorplan_core::{
    ConceptPlan, Drawing, PlanResponse, build_plan_drawing, render_table, schedule,
};
use floorplan_export::{ExportSession, ImageFormat, Stage, to_pdf};
use tracing::info;

use crate::cli::{Cli, OutputKind};
use crate::output::{FileConsumer, write_payload};

/// Read a plan file and return its concept plan.
pub fn read_plan(path: &std::path::Path) -> Result<ConceptPlan> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read plan '{}'", path.display()))?;
    let resp = PlanResponse::from_json(&text)
        .with_context(|| format!("invalid plan JSON in '{}'", path.display()))?;
    match resp.into_concept_plan() {
        Some(plan) => Ok(plan),
        None => bail!(
            "'{}' is an interior analysis and has no plan to draw",
            path.display()
        ),
    }
}

pub fn run(cli: &Cli) -> Result<()> {
    let kind = OutputKind::from_path(&cli.output).ok_or_else(|| {
        anyhow!(
            "unsupported output '{}', expected .svg, .png, .jpg, .jpeg or .pdf",
            cli.output.display()
        )
    })?;
    let cfg = config::resolve(cli).context("loading render config")?;
    let mut plan = read_plan(&cli.input)?;
    if let Some(unit) = cli.unit {
        plan.unit_system = unit;
    }

    let warnings = log_warnings(&plan);
    info!(
        project = %plan.project_name,
        rooms = plan.rooms.len(),
        warnings,
        "plan loaded"
    );

    if cli.schedule {
        print!("{}", render_table(&schedule(&plan, plan.unit_system)));
    }

    let drawing = build_plan_drawing(&plan, &cfg);
    let out = &cli.output;
    match kind {
        OutputKind::Svg => {
            fs::write(out, drawing.to_svg())
                .with_context(|| format!("cannot write '{}'", out.display()))?;
            info!(path = %out.display(), "svg written");
        }
        OutputKind::Pdf => {
            let stage = laid_out(drawing);
            let pdf = to_pdf(&stage.capture()?)?;
            write_payload(out, &pdf, cli.base64)
                .with_context(|| format!("cannot write '{}'", out.display()))?;
        }
        OutputKind::Png | OutputKind::Jpeg => {
            let format = if kind == OutputKind::Png {
                ImageFormat::Png
            } else {
                ImageFormat::Jpeg
            };
            let stage = laid_out(drawing);
            let mut session = ExportSession::from_config(&cfg, format);
            let mut consumer = FileConsumer::new(out, cli.base64);
            session
                .request_base(&stage, &mut consumer)
                .with_context(|| format!("exporting '{}'", out.display()))?;
        }
    }
    Ok(())
}

/// The command-line host lays a drawing out synchronously, so readiness
/// follows the mount immediately.
fn laid_out(drawing: Drawing) -> Stage {
    let mut stage = Stage::new();
    stage.mount(drawing);
    stage.complete_layout();
    stage
}
