//! APOD Data Layer
//!
//! Everything between the calculator and the outside world:
//!
//! - [`source`]: Listing CSV files with caller-chosen column roles
//! - [`export`]: CSV export of the summary table
//! - [`report`]: Printable HTML report
//! - [`enrich`]: Optional map lookup through a [`Geocoder`]
//!
//! File-level problems surface as [`DataError`]. Problems within a single
//! listing stay row-scoped and flow through [`apod_core::batch`].
//!
//! # Example
//!
//! ```rust
//! use apod_core::batch::{evaluate_batch, BatchConfig};
//! use apod_core::types::Assumptions;
//! use apod_io::{results_to_csv_bytes, ColumnMapping, ListingTable};
//!
//! let csv = "Address,Price,Taxes\n5 Oak Ave,300000,3600\n";
//! let table = ListingTable::from_reader(csv.as_bytes()).unwrap();
//! let rows = table.records(&ColumnMapping::new("Address", "Price", "Taxes")).unwrap();
//!
//! let report = evaluate_batch(&rows, &Assumptions::default(), &BatchConfig::default());
//! let bytes = results_to_csv_bytes(&report.result_rows()).unwrap();
//! assert!(String::from_utf8(bytes).unwrap().contains("5 Oak Ave,300000.00"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod enrich;
pub mod error;
pub mod export;
pub mod report;
pub mod source;

pub use enrich::{
    enrich_all, enrich_listing, Enrichment, GeoPoint, Geocoder, NominatimGeocoder, StaticGeocoder,
};
pub use error::{DataError, DataResult};
pub use export::{results_to_csv_bytes, write_results_csv, write_results_csv_file};
pub use report::render_html_report;
pub use source::{ColumnMapping, ListingTable};
