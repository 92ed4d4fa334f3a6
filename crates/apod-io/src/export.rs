//! CSV export of the summary table.

use std::io::Write;
use std::path::Path;

use apod_core::types::ResultRow;
use rust_decimal::Decimal;

use crate::error::DataResult;

/// Writes result rows as CSV with a header row.
///
/// Columns follow [`ResultRow::HEADERS`]. Numbers are written with exactly
/// two decimal places, no currency symbols and no thousands separators.
pub fn write_results_csv<W: Write>(writer: W, rows: &[ResultRow]) -> DataResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(ResultRow::HEADERS)?;

    for row in rows {
        csv_writer.write_record([
            row.address.clone(),
            fixed(row.price),
            fixed(row.rent),
            fixed(row.noi),
            fixed(row.cap_rate),
            fixed(row.cash_flow),
            fixed(row.coc_return),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Renders result rows to an in-memory CSV buffer.
pub fn results_to_csv_bytes(rows: &[ResultRow]) -> DataResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_results_csv(&mut buffer, rows)?;
    Ok(buffer)
}

/// Writes result rows to a CSV file, replacing it if present.
pub fn write_results_csv_file(path: impl AsRef<Path>, rows: &[ResultRow]) -> DataResult<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_results_csv(std::io::BufWriter::new(file), rows)?;
    log::info!("wrote {} result rows to {}", rows.len(), path.display());
    Ok(())
}

fn fixed(value: Decimal) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(address: &str, cash_flow: Decimal) -> ResultRow {
        ResultRow {
            address: address.to_string(),
            price: dec!(300000),
            rent: dec!(1300),
            noi: dec!(20068.8),
            cap_rate: dec!(6.69),
            cash_flow,
            coc_return: dec!(1.51),
        }
    }

    #[test]
    fn test_header_and_fixed_decimals() {
        let bytes = results_to_csv_bytes(&[row("5 Oak Ave", dec!(908.09))]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("Address,Price,Rent,NOI,CapRate,CashFlow,CoCReturn")
        );
        assert_eq!(
            lines.next(),
            Some("5 Oak Ave,300000.00,1300.00,20068.80,6.69,908.09,1.51")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_address_with_comma_is_quoted() {
        let bytes = results_to_csv_bytes(&[row("12 Elm St, Unit 2", dec!(-1500))]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"12 Elm St, Unit 2\",300000.00"));
        assert!(text.contains(",-1500.00,"));
    }

    #[test]
    fn test_empty_rows_writes_header_only() {
        let bytes = results_to_csv_bytes(&[]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Address,Price,Rent,NOI,CapRate,CashFlow,CoCReturn\n"
        );
    }
}
