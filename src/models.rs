use serde::{Deserialize, Serialize};

/// One scraped row: field names mapped to the text the page displayed.
///
/// Field order is insertion order and is what the exporters use for the
/// header. Values are kept verbatim (currency symbols, separators and
/// abbreviations included).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Sets `name` to `value`, keeping the original position if the field already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

/// What a collection pass extracts from each table row.
#[derive(Debug, Clone)]
pub struct CollectionTarget {
    /// Stop once this many records have been collected.
    pub row_quota: usize,
    /// Rows exposing fewer cells are treated as placeholders and skipped.
    pub required_min_columns: usize,
    pub columns: Vec<(usize, String)>,
}

impl CollectionTarget {
    pub fn new(row_quota: usize, required_min_columns: usize, columns: &[(usize, &str)]) -> Self {
        Self {
            row_quota,
            required_min_columns,
            columns: columns
                .iter()
                .map(|(index, name)| (*index, name.to_string()))
                .collect(),
        }
    }

    pub fn with_quota(mut self, row_quota: usize) -> Self {
        self.row_quota = row_quota;
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(_, name)| name.as_str())
    }
}

/// Collector progress, updated once per polling iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub last_known_page_height: i64,
    /// Rows already handed to the extractor, kept or dropped. Rows at or past
    /// this index are the new ones.
    pub rows_collected: usize,
}

/// Result of a crypto-to-fiat conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub unit_price: f64,
    pub total: f64,
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_first_position_on_overwrite() {
        let mut record = Record::new();
        record.insert("Name", "Bitcoin");
        record.insert("Price", "$1");
        record.insert("Name", "BTC");

        assert_eq!(record.field_names().collect::<Vec<_>>(), ["Name", "Price"]);
        assert_eq!(record.get("Name"), Some("BTC"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn collects_from_pairs_in_order() {
        let record: Record = [("Exchange", "Binance"), ("Volume", "$1.2B")]
            .into_iter()
            .collect();

        assert_eq!(record.values().collect::<Vec<_>>(), ["Binance", "$1.2B"]);
        assert!(record.get("Market").is_none());
    }

    #[test]
    fn quota_override_keeps_columns() {
        let target = CollectionTarget::new(80, 8, &[(2, "Name"), (3, "Price")]).with_quota(5);

        assert_eq!(target.row_quota, 5);
        assert_eq!(target.field_names().collect::<Vec<_>>(), ["Name", "Price"]);
    }
}
