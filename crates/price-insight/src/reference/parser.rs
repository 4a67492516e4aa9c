use super::catalog::{EnergyRating, PriceCategory, PropertyType, Tenure};
use super::listings::PropertyListing;
use super::OutcodeRecord;
use serde::Deserialize;
use std::io::Read;

pub(crate) fn parse_outcodes<R: Read>(reader: R) -> Result<Vec<OutcodeRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<OutcodeRow>() {
        let row = row?;
        records.push(OutcodeRecord {
            id: row.id.to_ascii_uppercase(),
            name: row.name,
            average_price: row.average_price,
            price_category: row.price_category,
            description: row.description,
        });
    }

    Ok(records)
}

pub(crate) fn parse_listings<R: Read>(reader: R) -> Result<Vec<PropertyListing>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut listings = Vec::new();

    for row in csv_reader.deserialize::<ListingRow>() {
        let row = row?;
        listings.push(PropertyListing {
            id: row.id,
            title: row.title,
            address: row.address,
            outcode: row.outcode.to_ascii_uppercase(),
            price: row.price,
            bedrooms: row.bedrooms,
            bathrooms: row.bathrooms,
            property_type: row.property_type,
            tenure: row.tenure,
            energy_rating: row.energy_rating,
            area: row.area,
        });
    }

    Ok(listings)
}

#[derive(Debug, Deserialize)]
struct OutcodeRow {
    id: String,
    name: String,
    average_price: u32,
    price_category: PriceCategory,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    id: String,
    title: String,
    address: String,
    outcode: String,
    price: u32,
    bedrooms: u8,
    bathrooms: u8,
    property_type: PropertyType,
    tenure: Tenure,
    energy_rating: EnergyRating,
    area: f64,
}
