use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const NUM_DECIMAL_PLACES: u32 = 2;

/// The fixed categorical set for `Product Category`.
pub const PRODUCT_CATEGORIES: [&str; 5] = ["Electronics", "Clothing", "Books", "Home", "Sports"];

/// Raw country spellings with deliberately inconsistent casing and
/// abbreviations. These are written out as-is, never normalized.
pub const COUNTRIES_RAW: [&str; 12] = [
    "usa",
    "U.S.A.",
    "United States",
    "UK",
    "U.K.",
    "United Kingdom",
    "canada",
    "Canada",
    "ger",
    "Germany",
    "fr",
    "France",
];

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the customer-orders table. Field order matches the CSV
/// column order; a missing `Total Amount` serializes as an empty field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "Order ID")]
    pub order_id: String,
    #[serde(rename = "Customer Name")]
    pub customer_name: String,
    #[serde(rename = "Order Date", with = "order_date_format")]
    pub order_date: NaiveDateTime,
    #[serde(rename = "Product Category")]
    pub product_category: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    #[serde(rename = "Price")]
    pub price: Decimal,
    #[serde(rename = "Total Amount")]
    pub total_amount: Option<Decimal>,
    #[serde(rename = "Country")]
    pub country: String,
}

impl OrderRecord {
    /// `Price * Quantity`, the value `Total Amount` holds when it is not
    /// nulled out.
    #[must_use]
    pub fn computed_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

mod order_date_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&value, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
