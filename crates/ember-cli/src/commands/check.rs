//! Scene check command

use super::{project_registry, scene_at};
use anyhow::Result;
use ember_scene::{FileSceneSource, LoadReport, SceneLoader, Severity};

pub struct CheckArgs {
    pub scene: String,
    pub project: String,
    pub format: String,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let registry = project_registry(&args.project)?;
    let mut scene = scene_at(&args.scene)?;

    let source = FileSceneSource::new();
    let report = SceneLoader::new(&registry, &source).check(&mut scene);

    if args.format == "json" {
        print_report_json(&report)?;
    } else {
        print_report_text(&report);
    }

    if !report.is_loaded() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_report_text(report: &LoadReport) {
    println!("{}", report.summary());

    if report.diagnostics.is_empty() {
        return;
    }
    println!();

    for diagnostic in &report.diagnostics {
        let severity_str = match diagnostic.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };

        println!(
            "  [{}] {}:{}: {}",
            severity_str, diagnostic.line, diagnostic.column, diagnostic.message
        );
    }
}

fn print_report_json(report: &LoadReport) -> Result<()> {
    let diagnostics: Vec<serde_json::Value> = report
        .diagnostics
        .iter()
        .map(|d| {
            serde_json::json!({
                "severity": d.severity,
                "line": d.line,
                "column": d.column,
                "message": d.message,
            })
        })
        .collect();

    let output = serde_json::json!({
        "scene": report.scene,
        "loaded": report.is_loaded(),
        "summary": report.summary(),
        "objects": report.object_count,
        "errors": report.error_count(),
        "warnings": report.warning_count(),
        "diagnostics": diagnostics,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
