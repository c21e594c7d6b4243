use crate::{
    Config,
    error::WeatherError,
    model::{CitySuggestion, CurrentConditions, Dashboard, ForecastSeries},
    provider::{Geocoder, OpenMeteo, WeatherProvider},
};

/// Entry points for presentation code: geocode a city, then fetch.
///
/// Nothing is cached; every call is an independent round trip.
#[derive(Debug)]
pub struct WeatherService {
    geocoder: Box<dyn Geocoder>,
    provider: Box<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(geocoder: Box<dyn Geocoder>, provider: Box<dyn WeatherProvider>) -> Self {
        Self { geocoder, provider }
    }

    pub async fn current_weather(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let location = self.geocoder.resolve(city).await?;
        self.provider.fetch_current(&location).await
    }

    pub async fn forecast_weather(&self, city: &str) -> Result<ForecastSeries, WeatherError> {
        let location = self.geocoder.resolve(city).await?;
        self.provider.fetch_forecast(&location).await
    }

    pub async fn search_cities(&self, query: &str) -> Result<Vec<CitySuggestion>, WeatherError> {
        self.geocoder.search(query).await
    }

    /// Geocodes once and fetches current conditions and forecast concurrently.
    /// Either failure fails the whole lookup.
    pub async fn dashboard(&self, city: &str) -> Result<Dashboard, WeatherError> {
        let location = self.geocoder.resolve(city).await?;

        let (current, forecast) = tokio::try_join!(
            self.provider.fetch_current(&location),
            self.provider.fetch_forecast(&location),
        )?;

        Ok(Dashboard { current, forecast })
    }
}

/// Construct the Open-Meteo backed service from config.
pub fn service_from_config(config: &Config) -> Result<WeatherService, WeatherError> {
    let client = OpenMeteo::from_config(config)?;
    Ok(WeatherService::new(Box::new(client.clone()), Box::new(client)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        condition::Condition,
        model::{ConditionDescriptor, ForecastEntry, LocationRef},
    };
    use async_trait::async_trait;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn paris() -> LocationRef {
        LocationRef {
            name: "Paris".into(),
            country: "France".into(),
            latitude: 48.85341,
            longitude: 2.3488,
        }
    }

    #[derive(Debug, Default)]
    struct FakeGeocoder {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn resolve(&self, query: &str) -> Result<LocationRef, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match query {
                "Paris" => Ok(paris()),
                "offline" => Err(WeatherError::Network("connection refused".into())),
                _ => Err(WeatherError::NotFound(query.to_string())),
            }
        }

        async fn search(&self, query: &str) -> Result<Vec<CitySuggestion>, WeatherError> {
            if query.starts_with("Par") {
                Ok(vec![CitySuggestion { name: "Paris".into(), country: "France".into() }])
            } else {
                Ok(Vec::new())
            }
        }
    }

    #[derive(Debug, Default)]
    struct FakeProvider {
        broken_forecast: bool,
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn fetch_current(
            &self,
            location: &LocationRef,
        ) -> Result<CurrentConditions, WeatherError> {
            Ok(CurrentConditions {
                location: location.clone(),
                temperature_c: 18.0,
                feels_like_c: 17.0,
                temp_min_c: 12.0,
                temp_max_c: 21.0,
                humidity_pct: 60,
                pressure_hpa: 1015.0,
                wind_speed_kmh: 9.0,
                wind_direction_deg: 90.0,
                visibility_m: 10_000.0,
                observed_at: 1_717_246_800,
                sunrise: 1_717_213_560,
                sunset: 1_717_272_660,
                condition: ConditionDescriptor::new(800, Condition::Clear, "01d".into()),
            })
        }

        async fn fetch_forecast(
            &self,
            location: &LocationRef,
        ) -> Result<ForecastSeries, WeatherError> {
            if self.broken_forecast {
                return Err(WeatherError::upstream("missing field `daily`"));
            }
            Ok(ForecastSeries {
                location: location.clone(),
                entries: vec![ForecastEntry {
                    timestamp: 1_717_200_000,
                    timestamp_text: "2024-06-01T00:00:00.000Z".into(),
                    temperature_c: 16.5,
                    feels_like_c: 16.0,
                    temp_min_c: 12.0,
                    temp_max_c: 21.0,
                    humidity_pct: 70,
                    condition: ConditionDescriptor::new(3, Condition::Cloudy, "04d".into()),
                }],
            })
        }
    }

    fn service(calls: Arc<AtomicUsize>, broken_forecast: bool) -> WeatherService {
        WeatherService::new(
            Box::new(FakeGeocoder { calls }),
            Box::new(FakeProvider { broken_forecast }),
        )
    }

    #[tokio::test]
    async fn current_weather_resolves_then_fetches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let svc = service(calls.clone(), false);

        let current = svc.current_weather("Paris").await.expect("lookup should succeed");
        assert_eq!(current.location, paris());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn each_entry_point_geocodes_independently() {
        let calls = Arc::new(AtomicUsize::new(0));
        let svc = service(calls.clone(), false);

        svc.current_weather("Paris").await.expect("current");
        svc.forecast_weather("Paris").await.expect("forecast");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn dashboard_geocodes_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let svc = service(calls.clone(), false);

        let dash = svc.dashboard("Paris").await.expect("dashboard");
        assert_eq!(dash.current.location, dash.forecast.location);
        assert_eq!(dash.forecast.entries.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dashboard_fails_whole_when_one_fetch_fails() {
        let svc = service(Arc::default(), true);

        let err = svc.dashboard("Paris").await.unwrap_err();
        assert!(matches!(err, WeatherError::Upstream(_)));
    }

    #[tokio::test]
    async fn geocoding_errors_propagate_unchanged() {
        let svc = service(Arc::default(), false);

        assert_eq!(
            svc.forecast_weather("Atlantis").await.unwrap_err(),
            WeatherError::NotFound("Atlantis".into())
        );
        assert!(matches!(
            svc.current_weather("offline").await.unwrap_err(),
            WeatherError::Network(_)
        ));
    }

    #[tokio::test]
    async fn search_passes_through() {
        let svc = service(Arc::default(), false);

        assert_eq!(svc.search_cities("Par").await.expect("search").len(), 1);
        assert!(svc.search_cities("zzz").await.expect("search").is_empty());
    }

    #[test]
    fn service_from_default_config_builds() {
        assert!(service_from_config(&Config::default()).is_ok());
    }
}
