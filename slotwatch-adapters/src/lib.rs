//! # slotwatch-adapters
//!
//! Boundary adapters used by slotwatch to reach the outside world.
//!
//! Each adapter converts a vendor protocol into the types of
//! `slotwatch-types` and reports failures as [`AdapterError`]. Nothing here
//! filters or aggregates; that is the job of the `slotwatch` crate.
//!
//! ## Supported Systems
//!
//! - **Booking portal** (`portal` feature) - logs in to the patient portal
//!   and retrieves dictionaries (cities, services, clinics, doctors) and
//!   free visit terms
//! - **SMTP** (`smtp` feature) - delivers plain-text notifications over an
//!   implicit-TLS SMTP connection
//!
//! ## Quick Start (portal)
//!
//! ```rust,ignore
//! use chrono::NaiveDate;
//! use slotwatch_adapters::portal::PortalAdapter;
//! use slotwatch_adapters::TermQuery;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = PortalAdapter::builder()
//!         .credentials("patient@example.com", "secret")
//!         .language("pl")
//!         .build()?;
//!
//!     let query = TermQuery::new(
//!         5,
//!         4502,
//!         NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
//!     );
//!     let days = adapter.terms(&query).await?;
//!
//!     println!("Retrieved {} days", days.len());
//!     Ok(())
//! }
//! ```

pub mod error;

#[cfg(feature = "portal")]
pub mod portal;

#[cfg(feature = "smtp")]
pub mod smtp;

pub use error::AdapterError;

// Re-export types for convenience
pub use slotwatch_types::{DayTerms, LookupEntry, Slot, TermQuery};
