use super::route_api::selected_sequence;
use super::Engine;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{api::ReportAPI, error::Error, report::Report};

#[async_trait]
impl ReportAPI for Engine {
    /// Uses the optimised sequence when a route is stored, otherwise the
    /// as-selected order. The file is also written to the report directory.
    #[tracing::instrument(skip(self))]
    async fn export_report(&self, date: NaiveDate) -> Result<Report, Error> {
        let sequence = {
            let state = self.state.lock().await;
            match &state.route {
                Some(outcome) => outcome.sequence.clone(),
                None => {
                    tracing::info!("no stored route, exporting selection order");
                    selected_sequence(&state.form)?
                }
            }
        };

        let report = Report::generate(&sequence, &self.report, date)?;
        report.save(&self.report.dir)?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{candidate, config, engine_with, FakeMaps};
    use super::*;
    use crate::api::{FormAPI, RouteAPI};
    use crate::report::FileNaming;

    use std::fs;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[tokio::test]
    async fn exports_optimised_sequence_to_dated_file() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_with(&FakeMaps::new(), config(dir.path()));
        engine.select_start(candidate("A")).await.unwrap();
        engine.select_end(Some(candidate("D"))).await.unwrap();
        engine
            .set_waypoints(vec![candidate("B"), candidate("C")])
            .await
            .unwrap();
        engine.show_path().await.unwrap();

        let report = engine.export_report(date()).await.unwrap();

        assert_eq!(report.file_name, "travel_plan_2025-01-15.pdf");
        let saved = fs::read(dir.path().join("travel_plan_2025-01-15.pdf")).unwrap();
        assert_eq!(saved, report.bytes);
    }

    #[tokio::test]
    async fn exports_selection_order_without_route() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path());
        config.report.naming = FileNaming::Static;
        let maps = FakeMaps::new();
        let engine = engine_with(&maps, config);
        engine.select_start(candidate("A")).await.unwrap();
        engine
            .set_waypoints(vec![candidate("B"), candidate("C")])
            .await
            .unwrap();

        let report = engine.export_report(date()).await.unwrap();

        assert_eq!(report.file_name, "travel_plan.pdf");
        assert!(dir.path().join("travel_plan.pdf").exists());
        assert!(maps.direction_calls().is_empty());
    }

    #[tokio::test]
    async fn refuses_to_export_without_destination() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_with(&FakeMaps::new(), config(dir.path()));
        engine.select_start(candidate("A")).await.unwrap();

        let err = engine.export_report(date()).await.unwrap_err();

        assert_eq!(err.code, 102);
        assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
