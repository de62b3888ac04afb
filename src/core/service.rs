use crate::core::catalog::SpeciesCatalog;
use crate::core::telemetry::JsonlTelemetry;
use crate::core::validator::validate_selection;
use crate::domain::model::{Location, Species, TelemetryEvent, TelemetryKind, Verdict};
use crate::domain::ports::{ConfigProvider, Storage, TelemetrySink};
use crate::utils::error::Result;

/// Catalog lookup, validation and telemetry behind one handle.
pub struct SelectionService<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    telemetry: Option<Box<dyn TelemetrySink>>,
}

impl<S, C> SelectionService<S, C>
where
    S: Storage + Clone + 'static,
    C: ConfigProvider,
{
    pub fn new(storage: S, config: C) -> Self {
        let telemetry = config.telemetry_log().map(|log_file| {
            Box::new(JsonlTelemetry::new(storage.clone(), log_file)) as Box<dyn TelemetrySink>
        });
        Self {
            storage,
            config,
            telemetry,
        }
    }
}

impl<S: Storage, C: ConfigProvider> SelectionService<S, C> {
    pub async fn load_catalog(&self) -> Result<SpeciesCatalog> {
        tracing::debug!("Reading species catalog from {}", self.config.catalog_path());
        let data = self.storage.read_file(self.config.catalog_path()).await?;
        SpeciesCatalog::from_csv_bytes(&data)
    }

    /// Resolves catalog names first; an unknown name is an error, not a verdict.
    pub async fn validate_names<N: AsRef<str>>(
        &self,
        names: &[N],
        location: &Location,
    ) -> Result<Verdict> {
        let catalog = self.load_catalog().await?;
        let species = catalog.select(names)?;
        Ok(self.validate(&species, location).await)
    }

    pub async fn validate(&self, species: &[Species], location: &Location) -> Verdict {
        let verdict = validate_selection(species, location);

        let names: Vec<&str> = species.iter().map(|s| s.name.as_str()).collect();
        let event = TelemetryEvent {
            kind: TelemetryKind::Validation,
            timestamp: chrono::Utc::now().timestamp_millis(),
            data: Some(serde_json::json!({
                "species": names,
                "location": location,
                "valid": verdict.valid,
                "reason": verdict.reason,
            })),
        };
        if let Err(e) = self.log_events(vec![event]).await {
            tracing::warn!("Failed to record validation telemetry: {}", e);
        }

        verdict
    }

    pub async fn log_events(&self, events: Vec<TelemetryEvent>) -> Result<usize> {
        match &self.telemetry {
            Some(sink) => sink.log_events(events).await,
            None => Ok(0),
        }
    }
}
