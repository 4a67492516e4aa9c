//! Immutable reference tables: property catalog enums, London outcode metadata, and the sample
//! listings behind the property browser. Tables are parsed once from embedded CSV and shared
//! behind an `Arc` for the lifetime of the process.

mod catalog;
mod listings;
mod parser;
pub mod router;

pub use catalog::{EnergyRating, PriceCategory, PropertyType, Tenure};
pub use listings::{ListingFilter, ListingSort, PropertyListing};
pub use router::reference_router;

pub(crate) use catalog::joined_labels;

use serde::Serialize;
use std::collections::HashSet;
use std::io::Read;

const EMBEDDED_OUTCODES: &str = include_str!("../../data/outcodes.csv");
const EMBEDDED_LISTINGS: &str = include_str!("../../data/properties.csv");

/// Metadata for a postcode district (e.g. "SW1").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcodeRecord {
    pub id: String,
    pub name: String,
    pub average_price: u32,
    pub price_category: PriceCategory,
    pub description: String,
}

#[derive(Debug)]
pub enum ReferenceDataError {
    Csv(csv::Error),
    DuplicateOutcode(String),
    UnknownListingOutcode { listing: String, outcode: String },
}

impl std::fmt::Display for ReferenceDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceDataError::Csv(err) => write!(f, "invalid reference CSV data: {}", err),
            ReferenceDataError::DuplicateOutcode(id) => {
                write!(f, "outcode {} is listed more than once", id)
            }
            ReferenceDataError::UnknownListingOutcode { listing, outcode } => write!(
                f,
                "listing {} references unknown outcode {}",
                listing, outcode
            ),
        }
    }
}

impl std::error::Error for ReferenceDataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReferenceDataError::Csv(err) => Some(err),
            ReferenceDataError::DuplicateOutcode(_)
            | ReferenceDataError::UnknownListingOutcode { .. } => None,
        }
    }
}

impl From<csv::Error> for ReferenceDataError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Clone)]
pub struct ReferenceData {
    outcodes: Vec<OutcodeRecord>,
    listings: Vec<PropertyListing>,
}

impl ReferenceData {
    /// Load the tables compiled into the binary.
    pub fn embedded() -> Result<Self, ReferenceDataError> {
        Self::from_readers(EMBEDDED_OUTCODES.as_bytes(), EMBEDDED_LISTINGS.as_bytes())
    }

    pub fn from_readers<O: Read, L: Read>(
        outcodes: O,
        listings: L,
    ) -> Result<Self, ReferenceDataError> {
        let outcodes = parser::parse_outcodes(outcodes)?;
        let listings = parser::parse_listings(listings)?;

        let mut seen = HashSet::new();
        for record in &outcodes {
            if !seen.insert(record.id.as_str()) {
                return Err(ReferenceDataError::DuplicateOutcode(record.id.clone()));
            }
        }

        if let Some(orphan) = listings
            .iter()
            .find(|listing| !seen.contains(listing.outcode.as_str()))
        {
            return Err(ReferenceDataError::UnknownListingOutcode {
                listing: orphan.id.clone(),
                outcode: orphan.outcode.clone(),
            });
        }

        Ok(Self { outcodes, listings })
    }

    pub fn outcodes(&self) -> &[OutcodeRecord] {
        &self.outcodes
    }

    /// Case-insensitive lookup by outcode id.
    pub fn find_outcode(&self, code: &str) -> Option<&OutcodeRecord> {
        let code = code.trim();
        self.outcodes
            .iter()
            .find(|record| record.id.eq_ignore_ascii_case(code))
    }

    pub fn listings(&self) -> &[PropertyListing] {
        &self.listings
    }

    pub fn search(&self, filter: &ListingFilter) -> Vec<&PropertyListing> {
        filter.apply(&self.listings)
    }
}
