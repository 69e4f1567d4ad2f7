use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::aggregate::AccessSummary;
use crate::figure::MapFigure;

#[derive(Serialize)]
struct ExportDocument<'a> {
    summary: &'a AccessSummary,
    summary_line: String,
    figure: &'a MapFigure,
}

/// Serialise a rendered dashboard to pretty JSON.
pub fn to_json(figure: &MapFigure, summary: &AccessSummary) -> Result<String> {
    let doc = ExportDocument {
        summary,
        summary_line: summary.summary_line(),
        figure,
    };
    serde_json::to_string_pretty(&doc).context("serialising figure")
}

/// Write a rendered dashboard to `path`.
pub fn write_json(path: &Path, figure: &MapFigure, summary: &AccessSummary) -> Result<()> {
    let json = to_json(figure, summary)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    log::info!(
        "Exported {} markers in {} layers to {}",
        figure.marker_count(),
        figure.layers.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Selection;
    use crate::data::model::{AccessLevel, VenueRecord, VenueTable};
    use crate::figure::{render, MapSettings};

    #[test]
    fn export_contains_summary_and_layers() {
        let table = VenueTable::from_records(vec![VenueRecord::new(
            "Venue A".into(),
            55.95,
            -3.19,
            2022,
            AccessLevel::Numeric(1.0),
            Some(3.0),
            None,
        )]);
        let (figure, summary) = render(&table, &Selection::default(), &MapSettings::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        write_json(&path, &figure, &summary).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["summary"]["low"], 1);
        assert_eq!(value["summary"]["total"], 1);
        assert_eq!(value["figure"]["layers"][0]["name"], "Low Accessibility");
        assert_eq!(
            value["figure"]["layers"][0]["markers"][0]["tooltip"]["level"],
            "1"
        );
        assert!(value["summary_line"]
            .as_str()
            .unwrap()
            .starts_with("Total Venues: 1 |"));
    }
}
