//! Company records produced by the registry scraper
//!
//! A record has a fixed set of named columns plus free-form extras that are
//! written after them.

use std::collections::BTreeMap;

/// Sentinel stored when a field could not be extracted
pub const NOT_FOUND: &str = "Not found";

/// Column order used when writing records; extra fields follow, sorted
pub const PREFERRED_COLUMNS: [&str; 6] = [
    "Company Name",
    "Companies House Link",
    "Location",
    "SIC Description",
    "SIC Found Method",
    "Email Address",
];

/// One company collected from the registry
///
/// Built once per unique registry link and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
    pub name: String,

    /// Absolute detail-page URL; the de-duplication key of a run
    pub registry_link: String,

    /// Registered office address, comma-joined
    pub location: String,

    /// `" | "`-joined SIC entries
    pub sic_description: String,

    /// Which extraction strategy produced `sic_description`
    pub sic_found_method: String,

    pub email_address: String,

    /// Additional named fields, written after the preferred columns
    pub extra: BTreeMap<String, String>,
}

impl CompanyRecord {
    /// Returns every field as `(column, value)` pairs
    ///
    /// Preferred columns come first in [`PREFERRED_COLUMNS`] order, then the
    /// extra fields in sorted order.
    pub fn fields(&self) -> Vec<(&str, &str)> {
        let mut fields = vec![
            (PREFERRED_COLUMNS[0], self.name.as_str()),
            (PREFERRED_COLUMNS[1], self.registry_link.as_str()),
            (PREFERRED_COLUMNS[2], self.location.as_str()),
            (PREFERRED_COLUMNS[3], self.sic_description.as_str()),
            (PREFERRED_COLUMNS[4], self.sic_found_method.as_str()),
            (PREFERRED_COLUMNS[5], self.email_address.as_str()),
        ];
        fields.extend(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        fields
    }

    /// Looks up a field by its column name
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }
}
