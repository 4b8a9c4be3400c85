//! Booking portal source.
//!
//! Wraps the async [`PortalAdapter`] in a current-thread runtime so the rest
//! of the pipeline can make ordinary blocking calls.

use std::time::Duration;

use slotwatch_adapters::portal::PortalAdapter;
use slotwatch_types::{DayTerms, LookupEntry, TermQuery};
use tokio::runtime::{Builder, Runtime};

use super::{FetchError, LookupSource, TermSource};
use crate::config::PortalSettings;

/// Term and lookup source backed by the patient portal.
#[derive(Debug)]
pub struct PortalSource {
    adapter: PortalAdapter,
    runtime: Runtime,
    description: String,
}

impl PortalSource {
    /// Create a source around an already configured adapter.
    pub fn new(adapter: PortalAdapter, description: impl Into<String>) -> Result<Self, FetchError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            adapter,
            runtime,
            description: description.into(),
        })
    }

    /// Create a source from the `[portal]` settings.
    pub fn from_settings(settings: &PortalSettings) -> Result<Self, FetchError> {
        let mut builder = PortalAdapter::builder()
            .credentials(&settings.username, &settings.password)
            .language(&settings.language)
            .timeout(Duration::from_secs(settings.timeout_secs));
        if let Some(base_url) = &settings.base_url {
            builder = builder.base_url(base_url);
        }

        let description = format!(
            "portal: {}",
            settings.base_url.as_deref().unwrap_or("default")
        );
        Self::new(builder.build()?, description)
    }
}

impl TermSource for PortalSource {
    fn fetch_terms(&mut self, query: &TermQuery) -> Result<Vec<DayTerms>, FetchError> {
        Ok(self.runtime.block_on(self.adapter.terms(query))?)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl LookupSource for PortalSource {
    fn cities(&mut self) -> Result<Vec<LookupEntry>, FetchError> {
        Ok(self.runtime.block_on(self.adapter.cities())?)
    }

    fn services(&mut self) -> Result<Vec<LookupEntry>, FetchError> {
        Ok(self.runtime.block_on(self.adapter.services())?)
    }

    fn clinics(&mut self, city_id: u64, service_id: u64) -> Result<Vec<LookupEntry>, FetchError> {
        Ok(self
            .runtime
            .block_on(self.adapter.clinics(city_id, service_id))?)
    }

    fn doctors(
        &mut self,
        city_id: u64,
        service_id: u64,
        clinic_id: Option<u64>,
    ) -> Result<Vec<LookupEntry>, FetchError> {
        Ok(self
            .runtime
            .block_on(self.adapter.doctors(city_id, service_id, clinic_id))?)
    }
}
