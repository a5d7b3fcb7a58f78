//! Presentation adapter: detection results to display-ready rows.
//!
//! Pure string preparation, kept out of the components so it can be
//! tested on the host. Absent fields become an explicit placeholder
//! rather than dropping the cell; an empty sequence becomes a single
//! placeholder row so the table is never bodyless.

use crate::feature::SpectralFeature;

/// Placeholder rendered for any field absent in the service payload.
pub const NOT_AVAILABLE: &str = "N/A";

/// One display row for a detected feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRow {
    /// 1-based sequence number in service order.
    pub index: usize,
    /// Wavenumber, or [`NOT_AVAILABLE`].
    pub wavenumber: String,
    /// Absorbance, or [`NOT_AVAILABLE`].
    pub absorbance: String,
    /// Functional group label, or [`NOT_AVAILABLE`].
    pub functional_group: String,
    /// Feature tag (`"peak"` / `"minimum"`), or [`NOT_AVAILABLE`].
    pub kind: String,
}

/// A table body: either one row per feature, or a single placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureTable {
    /// One row per feature, in service order.
    Rows(Vec<FeatureRow>),
    /// The sequence was empty; render one placeholder row.
    Empty {
        /// Placeholder text, e.g. `"No peaks detected."`.
        message: String,
    },
}

/// Map a feature sequence to table rows.
///
/// `kind_label` is the plural noun for the placeholder message
/// (`"peaks"` / `"minima"`). Row count always equals the input length;
/// ordering is preserved.
#[must_use]
pub fn feature_table(features: &[SpectralFeature], kind_label: &str) -> FeatureTable {
    if features.is_empty() {
        return FeatureTable::Empty {
            message: format!("No {kind_label} detected."),
        };
    }
    let rows = features
        .iter()
        .enumerate()
        .map(|(i, feature)| FeatureRow {
            index: i + 1,
            wavenumber: number_or_placeholder(feature.wavenumber),
            absorbance: number_or_placeholder(feature.absorbance),
            functional_group: text_or_placeholder(feature.functional_group.as_deref()),
            kind: text_or_placeholder(feature.kind.as_deref()),
        })
        .collect();
    FeatureTable::Rows(rows)
}

fn number_or_placeholder(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), |v| format!("{v}"))
}

fn text_or_placeholder(value: Option<&str>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), ToOwned::to_owned)
}
