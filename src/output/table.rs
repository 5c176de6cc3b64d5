use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::catalog::Difficulty;
use crate::optimizer::{ExposureBand, OptimizationResult, RankedCandidate, Scenario, WeekPlan};
use crate::simulation::session::SessionSnapshot;
use crate::simulation::SimulationMode;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn difficulty_cell(difficulty: Difficulty) -> Cell {
    let color = match difficulty {
        Difficulty::Low => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::High => Color::Red,
    };
    Cell::new(difficulty.as_str()).fg(color)
}

pub fn render_catalog_table(ranked: &[RankedCandidate], raw_hash: &str) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Rank",
        "Checkpoint",
        "Fix",
        "Difficulty",
        "Hours",
        "Cost",
        "Points",
        "Exposure Cut",
        "ROI",
        "Sort Key",
    ]);
    for (idx, r) in ranked.iter().enumerate() {
        table.add_row(Row::from(vec![
            Cell::new(idx + 1),
            Cell::new(&r.fix.checkpoint_id),
            Cell::new(&r.fix.name),
            difficulty_cell(r.fix.difficulty),
            Cell::new(r.hours),
            Cell::new(format!("${:.0}", r.fix.estimated_cost)),
            Cell::new(format!("+{:.0}", r.fix.point_gain)),
            Cell::new(format!("${:.0}", r.fix.exposure_reduction)),
            Cell::new(format!("{:.1}", r.fix.roi)),
            Cell::new(format!("{:.1}", r.sort_key)),
        ]));
    }
    format!("{table}\nCatalog fingerprint: {raw_hash}")
}

pub fn render_result_table(result: &OptimizationResult) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "#",
        "Checkpoint",
        "Fix",
        "Difficulty",
        "Hours",
        "Cost",
        "Points",
        "Exposure Cut",
    ]);
    for (idx, fix) in result.fixes.iter().enumerate() {
        table.add_row(Row::from(vec![
            Cell::new(idx + 1),
            Cell::new(&fix.checkpoint_id),
            Cell::new(&fix.name),
            difficulty_cell(fix.difficulty),
            Cell::new(fix.hours()),
            Cell::new(format!("${:.0}", fix.estimated_cost)),
            Cell::new(format!("+{:.0}", fix.point_gain)),
            Cell::new(format!("${:.0}", fix.exposure_reduction)),
        ]));
    }

    let summary = result.roi_summary();
    let mut out = String::new();
    if result.fixes.is_empty() {
        out.push_str("No fixes fit the current constraints.");
    } else {
        out.push_str(&table.to_string());
    }
    out.push_str(&format!(
        "\nProjected score: {:.0} (+{:.0})\nProjected exposure: ${:.0}\n\
         Total cost: ${:.0} over {} hours\nROI: {:.2}x (net benefit ${:.0})",
        result.projected_score,
        summary.score_gain,
        result.projected_exposure,
        result.total_cost,
        result.total_hours,
        result.total_roi,
        summary.net_benefit
    ));
    out
}

pub fn render_weekly_table(weeks: &[WeekPlan]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Week",
        "Fixes",
        "Hours",
        "Cost",
        "Cumulative Score",
        "Cumulative Exposure",
    ]);
    for week in weeks {
        let names = week
            .fixes
            .iter()
            .map(|f| f.checkpoint_id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            week.week.to_string(),
            names,
            week.hours().to_string(),
            format!("${:.0}", week.cost()),
            format!("{:.0}", week.cumulative_score),
            format!("${:.0}", week.cumulative_exposure),
        ]);
    }
    table.to_string()
}

pub fn render_scenario_table(band: &ExposureBand) -> String {
    let mut table = new_table();
    table.set_header(vec!["Scenario", "Residual Exposure"]);
    for scenario in Scenario::ALL {
        table.add_row(vec![
            scenario.to_string(),
            format!("${:.0}", band.value(scenario)),
        ]);
    }
    table.to_string()
}

pub fn render_simulation_table(snapshot: &SessionSnapshot) -> String {
    let mut table = new_table();
    table.set_header(vec!["Checkpoint", "Status", "Points", "Exposure Cut"]);
    for fix in &snapshot.simulated_fixes {
        table.add_row(vec![
            fix.checkpoint_id.clone(),
            format!("{:?}", fix.status).to_lowercase(),
            format!("+{:.0}", fix.point_gain),
            format!("${:.0}", fix.exposure_reduction),
        ]);
    }

    let mode = match snapshot.mode {
        SimulationMode::Current => Cell::new("current").fg(Color::Cyan),
        SimulationMode::Projected => Cell::new("projected").fg(Color::Magenta),
    };
    let mut header = new_table();
    header.set_header(vec!["Mode", "Displayed Score", "Displayed Exposure"]);
    header.add_row(Row::from(vec![
        mode,
        Cell::new(format!("{:.0}", snapshot.displayed_score)),
        Cell::new(format!("${:.0}", snapshot.displayed_exposure)),
    ]));

    let mut out = header.to_string();
    if let Some(banner) = &snapshot.banner {
        out.push_str(&format!("\n{banner}"));
    }
    if !snapshot.simulated_fixes.is_empty() {
        out.push('\n');
        out.push_str(&table.to_string());
    }
    out
}
