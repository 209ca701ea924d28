//! Fixed column vocabulary of the LCA process dataset.
//!
//! The spreadsheet carries one row per (country, process) pair. Three columns
//! key and label the rows; five carry the GWP100 sub-metrics that the
//! aggregation routes sum.

/// Two-letter ISO country code column (filter key, compared case-insensitively).
pub const COUNTRY_CODE_COLUMN: &str = "ISOTwoLetterCountryCode";

/// Country display-name column (reported as-is, not uppercased).
pub const COUNTRY_NAME_COLUMN: &str = "country";

/// Process name column (filter/search key, compared case-insensitively).
pub const PROCESS_NAME_COLUMN: &str = "processName";

/// The five GWP100 sub-metric columns summed by the aggregation routes.
pub const GWP_COLUMNS: [&str; 5] = [
    "Carbon Minds ISO 14067 (based on IPCC 2021) - climate change - global warming potential (GWP100) [kg CO2-Eq]",
    "Carbon Minds ISO 14067 (based on IPCC 2021) - climate change: biogenic emissions - global warming potential (GWP100) [kg CO2-Eq]",
    "Carbon Minds ISO 14067 (based on IPCC 2021) - climate change: biogenic removal - global warming potential (GWP100) [kg CO2-Eq]",
    "Carbon Minds ISO 14067 (based on IPCC 2021) - climate change: fossil - global warming potential (GWP100) [kg CO2-Eq]",
    "Carbon Minds ISO 14067 (based on IPCC 2021) - climate change: land use - global warming potential (GWP100) [kg CO2-Eq]",
];
