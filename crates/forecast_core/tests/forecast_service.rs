use chrono::{TimeZone, Utc};
use forecast_core::db::DbError;
use forecast_core::{
    ForecastId, ForecastRepository, ForecastService, RepoError, RepoResult, WeatherForecast,
};
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory stand-in that records which operations the service forwarded.
#[derive(Default)]
struct RecordingRepository {
    rows: Vec<WeatherForecast>,
    calls: Rc<RefCell<Vec<String>>>,
    fail: bool,
}

impl RecordingRepository {
    fn with_rows(rows: Vec<WeatherForecast>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn record(&self, call: String) -> RepoResult<()> {
        self.calls.borrow_mut().push(call);
        if self.fail {
            return Err(RepoError::Db(DbError::Sqlite(
                rusqlite::Error::InvalidQuery,
            )));
        }
        Ok(())
    }

    fn find(&self, id: ForecastId) -> Option<WeatherForecast> {
        self.rows.iter().find(|row| row.id == id).cloned()
    }
}

impl ForecastRepository for RecordingRepository {
    fn list_forecasts(&self) -> RepoResult<Vec<WeatherForecast>> {
        self.record("list".to_string())?;
        Ok(self.rows.clone())
    }

    fn get_forecast(&self, id: ForecastId) -> RepoResult<Option<WeatherForecast>> {
        self.record(format!("get:{id}"))?;
        Ok(self.find(id))
    }

    fn create_forecast(&self, forecast: &WeatherForecast) -> RepoResult<WeatherForecast> {
        self.record("create".to_string())?;
        let mut created = forecast.clone();
        created.id = 100;
        Ok(created)
    }

    fn update_forecast(
        &self,
        id: ForecastId,
        forecast: &WeatherForecast,
    ) -> RepoResult<Option<WeatherForecast>> {
        self.record(format!("update:{id}"))?;
        Ok(self.find(id).map(|_| forecast.clone()))
    }

    fn delete_forecast(&self, id: ForecastId) -> RepoResult<Option<WeatherForecast>> {
        self.record(format!("delete:{id}"))?;
        Ok(self.find(id))
    }
}

fn forecast(id: ForecastId, summary: &str) -> WeatherForecast {
    WeatherForecast::with_id(
        id,
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        25,
        Some(summary.to_string()),
    )
}

#[test]
fn list_forecasts_returns_repository_rows() {
    let service = ForecastService::new(RecordingRepository::with_rows(vec![
        forecast(1, "Sunny"),
        forecast(2, "Hot"),
    ]));

    let result = service.list_forecasts().unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result[1].summary.as_deref(), Some("Hot"));
}

#[test]
fn every_operation_is_forwarded_once_with_same_arguments() {
    let repo = RecordingRepository::with_rows(vec![forecast(7, "Warm")]);
    let calls = Rc::clone(&repo.calls);
    let service = ForecastService::new(repo);
    let input = forecast(0, "Mild");

    service.list_forecasts().unwrap();
    service.get_forecast(7).unwrap();
    service.create_forecast(&input).unwrap();
    service.update_forecast(7, &input).unwrap();
    service.delete_forecast(7).unwrap();

    assert_eq!(
        *calls.borrow(),
        vec!["list", "get:7", "create", "update:7", "delete:7"]
    );
}

#[test]
fn absence_is_forwarded_unchanged() {
    let service = ForecastService::new(RecordingRepository::default());
    let input = forecast(0, "Mild");

    assert!(service.get_forecast(3).unwrap().is_none());
    assert!(service.update_forecast(3, &input).unwrap().is_none());
    assert!(service.delete_forecast(3).unwrap().is_none());
}

#[test]
fn update_returns_caller_entity_from_repository() {
    let service = ForecastService::new(RecordingRepository::with_rows(vec![forecast(7, "Warm")]));
    let input = forecast(99, "Changed");

    let returned = service.update_forecast(7, &input).unwrap().unwrap();

    assert_eq!(returned, input);
}

#[test]
fn repository_errors_are_forwarded_unchanged() {
    let service = ForecastService::new(RecordingRepository::failing());

    assert!(matches!(service.list_forecasts(), Err(RepoError::Db(_))));
    assert!(matches!(
        service.create_forecast(&forecast(0, "x")),
        Err(RepoError::Db(_))
    ));
}
