//! Booking portal adapter using the patient portal HTTP API.
//!
//! The portal requires a two step login: an OAuth-style token is requested
//! from the mobile API with the patient's credentials, then the token is
//! exchanged for a web session (cookies). Every later request rides on that
//! session, so the adapter keeps a cookie-enabled [`Client`] and logs in
//! lazily on first use.
//!
//! ## Data Retrieved
//!
//! - **Cities**: `/Dictionary/cities`
//! - **Services**: `/Dictionary/serviceVariantsGroups`, flattened from the
//!   category tree
//! - **Clinics and doctors**: `/Dictionary/facilitiesAndDoctors`
//! - **Terms**: `/terms/index`, converted into [`DayTerms`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use slotwatch_adapters::portal::PortalAdapter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = PortalAdapter::builder()
//!         .credentials("patient@example.com", "secret")
//!         .language("en")
//!         .build()?;
//!
//!     for city in adapter.cities().await? {
//!         println!("{}: {}", city.id, city.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::OnceCell;
use uuid::Uuid;

use slotwatch_types::{
    doctor_display_name, merge_days, sort_by_name, DayTerms, LookupEntry, PartOfDay, Slot, TermQuery,
    VisitLanguage,
};

use crate::AdapterError;

const DEFAULT_BASE_URL: &str = "https://portalpacjenta.luxmed.pl";
const API_PATH: &str = "/PatientPortal/NewPortal";
const TOKEN_PATH: &str = "/PatientPortalMobileAPI/api/token";
const LOGIN_PATH: &str = "/PatientPortal/Account/LogInToApp";

/// Portal identifiers of the languages a visit can be held in.
const POLISH_LANGUAGE_ID: &str = "10";
const ENGLISH_LANGUAGE_ID: &str = "11";

/// Booking portal adapter.
#[derive(Debug)]
pub struct PortalAdapter {
    client: Client,
    base_url: String,
    username: String,
    password: String,
    language: String,
    device_agent: String,
    session: OnceCell<()>,
}

impl PortalAdapter {
    /// Create a new builder for configuring the adapter.
    pub fn builder() -> PortalAdapterBuilder {
        PortalAdapterBuilder::default()
    }

    /// Retrieve the list of cities.
    pub async fn cities(&self) -> Result<Vec<LookupEntry>, AdapterError> {
        tracing::info!("Retrieving cities from the booking portal...");
        let items: Vec<DictionaryItem> = self.get_json("/Dictionary/cities", &[]).await?;
        Ok(items.into_iter().map(DictionaryItem::into_entry).collect())
    }

    /// Retrieve the list of bookable services, sorted by name.
    pub async fn services(&self) -> Result<Vec<LookupEntry>, AdapterError> {
        tracing::info!("Retrieving services from the booking portal...");
        let categories: Vec<ServiceCategory> = self
            .get_json("/Dictionary/serviceVariantsGroups", &[])
            .await?;
        Ok(flatten_services(categories))
    }

    /// Retrieve clinics offering a service in a city, sorted by name.
    pub async fn clinics(
        &self,
        city_id: u64,
        service_id: u64,
    ) -> Result<Vec<LookupEntry>, AdapterError> {
        tracing::info!("Retrieving clinics from the booking portal...");
        let result = self.facilities_and_doctors(city_id, service_id).await?;
        Ok(clinic_entries(result.facilities))
    }

    /// Retrieve doctors offering a service in a city, sorted by first name.
    ///
    /// With `clinic_id` set, only doctors working in that clinic are
    /// returned.
    pub async fn doctors(
        &self,
        city_id: u64,
        service_id: u64,
        clinic_id: Option<u64>,
    ) -> Result<Vec<LookupEntry>, AdapterError> {
        tracing::info!("Retrieving doctors from the booking portal...");
        let result = self.facilities_and_doctors(city_id, service_id).await?;
        Ok(doctor_entries(result.doctors, clinic_id))
    }

    /// Retrieve free terms matching the query, one [`DayTerms`] per date.
    pub async fn terms(&self, query: &TermQuery) -> Result<Vec<DayTerms>, AdapterError> {
        tracing::info!("Getting terms for given search parameters...");

        let params = terms_params(query);
        let response: TermsResponse = self.get_json("/terms/index", &params).await?;
        let days = into_day_terms(response.terms_for_service.terms_for_days);
        tracing::debug!(days = days.len(), "terms retrieved");
        Ok(days)
    }

    async fn facilities_and_doctors(
        &self,
        city_id: u64,
        service_id: u64,
    ) -> Result<FacilitiesAndDoctors, AdapterError> {
        let params = [
            ("cityId", city_id.to_string()),
            ("serviceVariantId", service_id.to_string()),
        ];
        self.get_json("/Dictionary/facilitiesAndDoctors", &params)
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, AdapterError> {
        self.session.get_or_try_init(|| self.log_in()).await?;

        let url = format!("{}{}{}", self.base_url, API_PATH, path);
        tracing::debug!(%url, "portal request");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(ACCEPT_LANGUAGE, &self.language)
            .header("x-requested-with", "XMLHttpRequest")
            .query(params)
            .send()
            .await?;

        let response = check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| AdapterError::Parse(e.to_string()))
    }

    async fn log_in(&self) -> Result<(), AdapterError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .get(format!("{}{}", self.base_url, LOGIN_PATH))
            .header(AUTHORIZATION, token)
            .header(ACCEPT_LANGUAGE, &self.language)
            .header("upgrade-insecure-requests", "1")
            .header("x-requested-with", "pl.luxmed.pp")
            .header("Origin", &self.base_url)
            .query(&[
                ("app", "search"),
                ("client", "3"),
                ("paymentSupported", "true"),
                ("lang", self.language.as_str()),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(AdapterError::Auth(format!(
                "Unexpected response code {}, cannot log in",
                response.status()
            )));
        }

        tracing::debug!("portal session established");
        Ok(())
    }

    async fn access_token(&self) -> Result<String, AdapterError> {
        let account_id: String = Uuid::new_v4().to_string().chars().take(35).collect();
        let client_id = Uuid::new_v4().to_string();
        let form = [
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
            ("grant_type", "password"),
            ("account_id", account_id.as_str()),
            ("client_id", client_id.as_str()),
        ];

        let response = self
            .client
            .post(format!("{}{}", self.base_url, TOKEN_PATH))
            .header("Api-Version", "2.0")
            .header(ACCEPT_LANGUAGE, &self.language)
            .header("x-api-client-identifier", "Android")
            .header(USER_AGENT, "okhttp/3.11.0")
            .header("Custom-User-Agent", &self.device_agent)
            .form(&form)
            .send()
            .await?;

        if response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNAUTHORIZED
        {
            return Err(AdapterError::Auth("Invalid credentials".to_string()));
        }

        let response = check_response(response).await?;
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::Parse(e.to_string()))?;

        Ok(token.access_token)
    }
}

/// Builder for PortalAdapter.
#[derive(Debug, Default)]
pub struct PortalAdapterBuilder {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    language: Option<String>,
    timeout: Option<Duration>,
}

impl PortalAdapterBuilder {
    /// Set the portal base URL (default: the public patient portal).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the patient's login and password.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the `accept-language` sent to the portal (default: "pl").
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the request timeout (default: 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the adapter.
    pub fn build(self) -> Result<PortalAdapter, AdapterError> {
        let username = self
            .username
            .filter(|u| !u.is_empty())
            .ok_or_else(|| AdapterError::Config("portal username is required".to_string()))?;
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AdapterError::Config("portal password is required".to_string()))?;
        let timeout = self.timeout.unwrap_or(Duration::from_secs(30));

        let client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| AdapterError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(PortalAdapter {
            client,
            base_url,
            username,
            password,
            language: self.language.unwrap_or_else(|| "pl".to_string()),
            device_agent: device_user_agent(),
            session: OnceCell::new(),
        })
    }
}

/// Validate a portal response before decoding it.
async fn check_response(response: Response) -> Result<Response, AdapterError> {
    let status = response.status();

    if status == StatusCode::SERVICE_UNAVAILABLE {
        return Err(AdapterError::Unavailable);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(AdapterError::Auth(format!("API returned status {}", status)));
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    if !is_json {
        return Err(AdapterError::Parse(format!(
            "expected a JSON response from {}, got status {}",
            response.url().path(),
            status
        )));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AdapterError::Http(format!(
            "API returned status {}: {}",
            status, body
        )));
    }

    Ok(response)
}

// The portal identifies mobile clients by a randomised device string.
fn device_user_agent() -> String {
    let android_api = rand::thread_rng().gen_range(23..=29);
    format!(
        "Patient Portal; 4.19.0; {}; Android; {}; {}",
        Uuid::new_v4(),
        android_api,
        Uuid::new_v4()
    )
}

fn format_query_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn flatten_services(categories: Vec<ServiceCategory>) -> Vec<LookupEntry> {
    let mut services = Vec::new();

    for category in categories {
        for service in category.children {
            if service.children.is_empty() {
                services.push(LookupEntry::new(service.id, service.name));
            } else {
                services.extend(
                    service
                        .children
                        .into_iter()
                        .map(|variant| LookupEntry::new(variant.id, variant.name)),
                );
            }
        }
    }

    sort_by_name(&mut services);
    services
}

fn clinic_entries(facilities: Vec<DictionaryItem>) -> Vec<LookupEntry> {
    let mut clinics: Vec<LookupEntry> = facilities
        .into_iter()
        .map(DictionaryItem::into_entry)
        .collect();
    sort_by_name(&mut clinics);
    clinics
}

fn doctor_entries(mut doctors: Vec<DoctorInfo>, clinic_id: Option<u64>) -> Vec<LookupEntry> {
    doctors.sort_by(|a, b| a.first_name.cmp(&b.first_name));

    doctors
        .into_iter()
        .filter(|d| clinic_id.map_or(true, |id| d.facility_group_ids.contains(&id)))
        .map(|d| {
            let name = doctor_display_name(
                d.academic_title.as_deref(),
                d.first_name.as_deref(),
                d.last_name.as_deref(),
            );
            LookupEntry::new(d.id, name)
        })
        .collect()
}

/// Query string of the terms endpoint.
fn terms_params(query: &TermQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("cityId", query.city_id.to_string()),
        ("serviceVariantId", query.service_id.to_string()),
        ("languageId", visit_language_id(query.language).to_string()),
        ("searchDateFrom", format_query_date(query.from_date)),
        ("searchDateTo", format_query_date(query.to_date)),
    ];
    if let Some(clinic_id) = query.clinic_id {
        params.push(("facilitiesIds", clinic_id.to_string()));
    }
    if let Some(doctor_id) = query.doctor_id {
        params.push(("doctorsIds", doctor_id.to_string()));
    }
    params
}

fn visit_language_id(language: VisitLanguage) -> &'static str {
    match language {
        VisitLanguage::Polish => POLISH_LANGUAGE_ID,
        VisitLanguage::English => ENGLISH_LANGUAGE_ID,
    }
}

/// Convert the portal's per-day payload, merging any repeated date into
/// its first occurrence so dates stay unique.
fn into_day_terms(days: Vec<TermsForDay>) -> Vec<DayTerms> {
    merge_days(days.into_iter().map(|day| {
        let slots = day.terms.into_iter().map(Term::into_slot).collect();
        DayTerms::new(day.day.date(), slots)
    }))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Plain `(id, name)` dictionary item.
#[derive(Debug, Deserialize)]
struct DictionaryItem {
    id: u64,
    name: String,
}

impl DictionaryItem {
    fn into_entry(self) -> LookupEntry {
        LookupEntry::new(self.id, self.name)
    }
}

#[derive(Debug, Deserialize)]
struct ServiceCategory {
    #[serde(default)]
    children: Vec<ServiceNode>,
}

#[derive(Debug, Deserialize)]
struct ServiceNode {
    id: u64,
    name: String,
    #[serde(default)]
    children: Vec<ServiceNode>,
}

#[derive(Debug, Deserialize)]
struct FacilitiesAndDoctors {
    #[serde(default)]
    facilities: Vec<DictionaryItem>,
    #[serde(default)]
    doctors: Vec<DoctorInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DoctorInfo {
    id: u64,
    academic_title: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    #[serde(default)]
    facility_group_ids: Vec<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TermsResponse {
    terms_for_service: TermsForService,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TermsForService {
    #[serde(default)]
    terms_for_days: Vec<TermsForDay>,
}

#[derive(Debug, Deserialize)]
struct TermsForDay {
    day: NaiveDateTime,
    #[serde(default)]
    terms: Vec<Term>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Term {
    date_time_from: NaiveDateTime,
    doctor: TermDoctor,
    clinic_id: Option<u64>,
    clinic: String,
    part_of_day: u8,
}

impl Term {
    fn into_slot(self) -> Slot {
        let doctor_name = doctor_display_name(
            self.doctor.academic_title.as_deref(),
            self.doctor.first_name.as_deref(),
            self.doctor.last_name.as_deref(),
        );

        Slot {
            time: self.date_time_from.time(),
            doctor_id: self.doctor.id,
            doctor_name,
            clinic_id: self.clinic_id,
            clinic_name: self.clinic,
            part_of_day: PartOfDay::new(self.part_of_day),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TermDoctor {
    id: Option<u64>,
    academic_title: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}
