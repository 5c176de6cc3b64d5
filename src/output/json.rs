use anyhow::Result;
use serde::Serialize;
use serde_json::{json, Value};

use crate::catalog::Catalog;
use crate::optimizer::{ExposureBand, RankedCandidate, Scenario};

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Ranked catalog along with where it came from and its content hash.
pub fn catalog_json(catalog: &Catalog, ranked: &[RankedCandidate]) -> Value {
    json!({
        "source": catalog.source,
        "raw_hash": catalog.raw_hash,
        "ranked": ranked,
    })
}

/// Full band, plus the residual exposure for `scenario` when one was picked.
pub fn scenario_json(band: &ExposureBand, scenario: Option<Scenario>) -> Value {
    json!({
        "band": band,
        "scenario": scenario,
        "residual_exposure": scenario.map(|s| band.value(s)),
    })
}

#[cfg(test)]
mod tests {
    use super::{catalog_json, scenario_json};
    use crate::catalog::Catalog;
    use crate::optimizer::{ranked_candidates, ConstraintSet, ExposureBand, Scenario};

    #[test]
    fn catalog_json_carries_fingerprint() {
        let catalog = Catalog::builtin();
        let ranked = ranked_candidates(catalog.fixes(), &ConstraintSet::default());
        let value = catalog_json(&catalog, &ranked);
        assert_eq!(value["raw_hash"], catalog.raw_hash.as_str());
        assert_eq!(value["ranked"].as_array().map(Vec::len), Some(catalog.len()));
    }

    #[test]
    fn scenario_json_omits_residual_without_selection() {
        let band = ExposureBand::project(1_000.0, 500.0, 0.2);
        assert!(scenario_json(&band, None)["residual_exposure"].is_null());
        let picked = scenario_json(&band, Some(Scenario::Pessimistic));
        assert_eq!(picked["scenario"], "pessimistic");
        assert_eq!(picked["residual_exposure"], band.value(Scenario::Pessimistic));
    }
}
