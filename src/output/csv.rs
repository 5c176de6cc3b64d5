use anyhow::Result;

use crate::optimizer::{OptimizationResult, RankedCandidate};

pub fn catalog_to_csv(ranked: &[RankedCandidate]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "checkpoint_id",
        "name",
        "difficulty",
        "hours",
        "estimated_cost",
        "point_gain",
        "exposure_reduction",
        "roi",
        "sort_key",
    ])?;
    for r in ranked {
        writer.write_record([
            r.fix.checkpoint_id.clone(),
            r.fix.name.clone(),
            r.fix.difficulty.to_string(),
            r.hours.to_string(),
            format!("{:.2}", r.fix.estimated_cost),
            format!("{:.2}", r.fix.point_gain),
            format!("{:.2}", r.fix.exposure_reduction),
            format!("{:.4}", r.fix.roi),
            format!("{:.4}", r.sort_key),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

/// One row per selected fix, tagged with the week it was scheduled in.
pub fn result_to_csv(result: &OptimizationResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "week",
        "checkpoint_id",
        "name",
        "hours",
        "estimated_cost",
        "point_gain",
        "exposure_reduction",
        "cumulative_score",
        "cumulative_exposure",
    ])?;
    for week in &result.weekly_breakdown {
        for fix in &week.fixes {
            writer.write_record([
                week.week.to_string(),
                fix.checkpoint_id.clone(),
                fix.name.clone(),
                fix.hours().to_string(),
                format!("{:.2}", fix.estimated_cost),
                format!("{:.2}", fix.point_gain),
                format!("{:.2}", fix.exposure_reduction),
                format!("{:.2}", week.cumulative_score),
                format!("{:.2}", week.cumulative_exposure),
            ])?;
        }
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

#[cfg(test)]
mod tests {
    use super::result_to_csv;
    use crate::catalog::Catalog;
    use crate::optimizer::{optimize, Baseline, ConstraintSet};

    #[test]
    fn result_csv_has_row_per_fix() {
        let catalog = Catalog::builtin();
        let result = optimize(
            catalog.fixes(),
            &ConstraintSet::default(),
            &Baseline::default(),
        );
        let csv = result_to_csv(&result).expect("render csv");
        assert_eq!(csv.lines().count(), result.fixes.len() + 1);
        assert!(csv.lines().nth(1).unwrap_or_default().starts_with("1,GOV-001"));
    }
}
