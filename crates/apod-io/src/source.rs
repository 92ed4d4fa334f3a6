//! CSV listing source.

use std::io::Read;
use std::path::Path;

use apod_core::batch::SourceRow;
use apod_core::error::ApodError;
use apod_core::types::{parse_amount, PropertyRecord};

use crate::error::{DataError, DataResult};

// =============================================================================
// COLUMN MAPPING
// =============================================================================

/// Which columns of the export hold which fields.
///
/// Column roles are chosen by the caller; nothing is inferred here apart
/// from [`ListingTable::suggest_tax_columns`], which only proposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Address column.
    pub address: String,
    /// List price column.
    pub list_price: String,
    /// Annual property tax column.
    pub property_tax: String,
    /// Optional photo URL column.
    pub photo_url: Option<String>,
}

impl ColumnMapping {
    /// Creates a mapping without a photo column.
    pub fn new(
        address: impl Into<String>,
        list_price: impl Into<String>,
        property_tax: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            list_price: list_price.into(),
            property_tax: property_tax.into(),
            photo_url: None,
        }
    }

    /// Sets the photo URL column.
    pub fn with_photo_url(mut self, column: impl Into<String>) -> Self {
        self.photo_url = Some(column.into());
        self
    }
}

/// Column positions after matching a mapping against the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResolvedColumns {
    address: usize,
    list_price: usize,
    property_tax: usize,
    photo_url: Option<usize>,
}

// =============================================================================
// LISTING TABLE
// =============================================================================

/// A listing export held in memory: header row plus raw string records.
#[derive(Debug, Clone)]
pub struct ListingTable {
    headers: Vec<String>,
    records: Vec<csv::StringRecord>,
}

impl ListingTable {
    /// Loads a UTF-8 CSV file with a header row.
    pub fn from_path(path: impl AsRef<Path>) -> DataResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        log::info!("loaded {} listings from {}", table.len(), path.display());
        Ok(table)
    }

    /// Loads CSV data from any reader.
    pub fn from_reader<R: Read>(reader: R) -> DataResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(String::is_empty) {
            return Err(DataError::MissingHeaders);
        }

        let records = reader
            .records()
            .filter(|r| r.as_ref().map_or(true, |rec| !is_blank(rec)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { headers, records })
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the file has no data rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Columns whose name mentions tax, in file order.
    pub fn suggest_tax_columns(&self) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|h| h.to_lowercase().contains("tax"))
            .map(String::as_str)
            .collect()
    }

    /// Builds one [`SourceRow`] per data row.
    ///
    /// Fails as a whole only if a mapped column is missing. A price cell
    /// that is not a number becomes a row-scoped `InvalidListPrice`; a tax
    /// cell that is empty or not a number counts as zero.
    pub fn records(&self, mapping: &ColumnMapping) -> DataResult<Vec<SourceRow>> {
        let columns = self.resolve(mapping)?;
        Ok(self
            .records
            .iter()
            .map(|record| row_from_record(record, columns))
            .collect())
    }

    fn resolve(&self, mapping: &ColumnMapping) -> DataResult<ResolvedColumns> {
        Ok(ResolvedColumns {
            address: self.column_index(&mapping.address)?,
            list_price: self.column_index(&mapping.list_price)?,
            property_tax: self.column_index(&mapping.property_tax)?,
            photo_url: mapping
                .photo_url
                .as_deref()
                .map(|c| self.column_index(c))
                .transpose()?,
        })
    }

    /// Exact header match first, then case-insensitive.
    fn column_index(&self, name: &str) -> DataResult<usize> {
        let name = name.trim();
        self.headers
            .iter()
            .position(|h| h == name)
            .or_else(|| self.headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
            .ok_or_else(|| DataError::UnknownColumn {
                column: name.to_string(),
                available: self.headers.clone(),
            })
    }
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn row_from_record(record: &csv::StringRecord, columns: ResolvedColumns) -> SourceRow {
    let cell = |index: usize| record.get(index).unwrap_or("").trim();

    let address = cell(columns.address).to_string();
    let raw_price = cell(columns.list_price);

    let parsed = match parse_amount(raw_price) {
        Some(price) => {
            let mut property = PropertyRecord::new(address.clone(), price)
                .with_optional_tax(parse_amount(cell(columns.property_tax)));
            if let Some(url) = columns.photo_url.map(cell).filter(|u| !u.is_empty()) {
                property = property.with_photo_url(url);
            }
            Ok(property)
        }
        None => Err(ApodError::invalid_list_price(if raw_price.is_empty() {
            "<empty>"
        } else {
            raw_price
        })),
    };

    SourceRow::new(address, parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    const EXPORT: &str = "\
MLS #,Street Address,List Price,Annual Taxes,Tax Year,Photo
A1,12 Elm St,\"$300,000\",3600,2024,https://img.example/a1.jpg
A2,9 Pine Rd,410000,,2024,
A3,3 Birch Ln,TBD,2900,2024,
";

    fn mapping() -> ColumnMapping {
        ColumnMapping::new("Street Address", "List Price", "Annual Taxes").with_photo_url("Photo")
    }

    #[test]
    fn test_headers_and_tax_suggestions() {
        let table = ListingTable::from_reader(EXPORT.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.headers()[1], "Street Address");
        assert_eq!(table.suggest_tax_columns(), vec!["Annual Taxes", "Tax Year"]);
    }

    #[test]
    fn test_records_from_mapping() {
        let table = ListingTable::from_reader(EXPORT.as_bytes()).unwrap();
        let rows = table.records(&mapping()).unwrap();
        assert_eq!(rows.len(), 3);

        let first = rows[0].record.as_ref().unwrap();
        assert_eq!(first.address, "12 Elm St");
        assert_eq!(first.list_price, dec!(300000));
        assert_eq!(first.property_tax, dec!(3600));
        assert_eq!(first.photo_url.as_deref(), Some("https://img.example/a1.jpg"));

        let second = rows[1].record.as_ref().unwrap();
        assert_eq!(second.property_tax, Decimal::ZERO);
        assert_eq!(second.photo_url, None);

        assert_eq!(rows[2].address, "3 Birch Ln");
        assert_eq!(
            rows[2].record.as_ref().unwrap_err(),
            &ApodError::invalid_list_price("TBD")
        );
    }

    #[test]
    fn test_case_insensitive_column_match() {
        let table = ListingTable::from_reader(EXPORT.as_bytes()).unwrap();
        let rows = table
            .records(&ColumnMapping::new("street address", "LIST PRICE", "annual taxes"))
            .unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_unknown_column() {
        let table = ListingTable::from_reader(EXPORT.as_bytes()).unwrap();
        let err = table
            .records(&ColumnMapping::new("Address", "List Price", "Annual Taxes"))
            .unwrap_err();
        match err {
            DataError::UnknownColumn { column, available } => {
                assert_eq!(column, "Address");
                assert!(available.contains(&"Street Address".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_and_blank_rows() {
        let csv = "Address,Price,Tax\n1 A St,100000\n,,\n2 B St,200000,1500\n";
        let table = ListingTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);

        let rows = table
            .records(&ColumnMapping::new("Address", "Price", "Tax"))
            .unwrap();
        assert_eq!(
            rows[0].record.as_ref().unwrap().property_tax,
            Decimal::ZERO
        );
        assert_eq!(
            rows[1].record.as_ref().unwrap().property_tax,
            dec!(1500)
        );
    }

    #[test]
    fn test_empty_price_cell() {
        let csv = "Address,Price,Tax\n1 A St,,100\n";
        let table = ListingTable::from_reader(csv.as_bytes()).unwrap();
        let rows = table
            .records(&ColumnMapping::new("Address", "Price", "Tax"))
            .unwrap();
        assert_eq!(
            rows[0].record.as_ref().unwrap_err(),
            &ApodError::invalid_list_price("<empty>")
        );
    }
}
