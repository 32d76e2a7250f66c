//! Generic file export service.
//!
//! Decoupled from specific business entities: receives column headers and
//! raw rows and produces a downloadable byte stream.

use crate::error::{AppError, AppResult};

pub struct ExportService;

impl ExportService {
    /// Build a CSV byte stream from headers and rows. Row order and column
    /// order are preserved as given.
    pub fn to_csv(headers: &[&str], rows: &[Vec<String>]) -> AppResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record(headers)
            .map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))?;

        for row in rows {
            writer
                .write_record(row)
                .map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))?;
        }

        writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_headers_and_rows_in_order() {
        let headers = ["ID", "Name", "Status"];
        let rows = vec![
            vec!["1".to_string(), "Router".to_string(), "Working".to_string()],
            vec!["2".to_string(), "Printer".to_string(), "Under Repair".to_string()],
        ];

        let bytes = ExportService::to_csv(&headers, &rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("ID,Name,Status"));
        assert_eq!(lines.next(), Some("1,Router,Working"));
        assert_eq!(lines.next(), Some("2,Printer,Under Repair"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn quotes_fields_containing_separators() {
        let headers = ["ID", "Description"];
        let rows = vec![vec!["1".to_string(), "replaced fan, cleaned".to_string()]];

        let bytes = ExportService::to_csv(&headers, &rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("\"replaced fan, cleaned\""));
    }

    #[test]
    fn empty_row_set_yields_headers_only() {
        let bytes = ExportService::to_csv(&["A", "B"], &[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.trim_end(), "A,B");
    }
}
