use super::catalog::{EnergyRating, PropertyType, Tenure};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sample property shown in the listing browser.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListing {
    pub id: String,
    pub title: String,
    pub address: String,
    pub outcode: String,
    pub price: u32,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub property_type: PropertyType,
    pub tenure: Tenure,
    pub energy_rating: EnergyRating,
    pub area: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingSort {
    #[default]
    PriceAsc,
    PriceDesc,
    Bedrooms,
    Area,
}

/// Criteria accepted by the listing browser. Every bound is optional and inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingFilter {
    #[serde(default)]
    pub outcode: Option<String>,
    #[serde(default)]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub tenure: Option<Tenure>,
    #[serde(default)]
    pub min_bedrooms: Option<u8>,
    #[serde(default)]
    pub min_price: Option<u32>,
    #[serde(default)]
    pub max_price: Option<u32>,
    #[serde(default)]
    pub sort: Option<ListingSort>,
}

impl ListingFilter {
    pub fn matches(&self, listing: &PropertyListing) -> bool {
        if let Some(outcode) = self.outcode.as_deref().map(str::trim) {
            if !outcode.is_empty() && !listing.outcode.eq_ignore_ascii_case(outcode) {
                return false;
            }
        }

        if self
            .property_type
            .is_some_and(|kind| kind != listing.property_type)
        {
            return false;
        }

        if self.tenure.is_some_and(|tenure| tenure != listing.tenure) {
            return false;
        }

        if self
            .min_bedrooms
            .is_some_and(|minimum| listing.bedrooms < minimum)
        {
            return false;
        }

        if self.min_price.is_some_and(|minimum| listing.price < minimum) {
            return false;
        }

        !self.max_price.is_some_and(|maximum| listing.price > maximum)
    }

    pub(crate) fn apply<'a>(&self, listings: &'a [PropertyListing]) -> Vec<&'a PropertyListing> {
        let mut matched: Vec<&PropertyListing> = listings
            .iter()
            .filter(|listing| self.matches(listing))
            .collect();

        match self.sort.unwrap_or_default() {
            ListingSort::PriceAsc => matched.sort_by_key(|listing| listing.price),
            ListingSort::PriceDesc => {
                matched.sort_by_key(|listing| std::cmp::Reverse(listing.price))
            }
            ListingSort::Bedrooms => matched.sort_by(|left, right| {
                right
                    .bedrooms
                    .cmp(&left.bedrooms)
                    .then(left.price.cmp(&right.price))
            }),
            ListingSort::Area => matched.sort_by(|left, right| {
                right
                    .area
                    .partial_cmp(&left.area)
                    .unwrap_or(Ordering::Equal)
            }),
        }

        matched
    }
}
