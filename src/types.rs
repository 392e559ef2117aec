use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A bag tag as entered by the caller or recovered by the decoder.
///
/// Field names on the wire follow the JSON input format of the tag
/// printing application (`lpn`, `uuid`, `flights`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BagTagRecord {
    /// 3-bit format version.
    pub version: u8,
    /// Ten digit license plate number.
    #[serde(rename = "lpn", default, skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    /// UUID in canonical hyphenated form.
    #[serde(rename = "uuid", default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(rename = "flights")]
    pub flight_legs: Vec<FlightLeg>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightLeg {
    /// Two or three character airline code, e.g. `LH` or `EWG`.
    pub designator: String,
    /// 0-9999. Signed so out-of-range JSON values reach the codec's range
    /// check instead of failing deserialization.
    pub flight_number: i64,
    pub date_of_flight: NaiveDate,
    pub departure_airport: String,
    pub arrival_airport: String,
}
