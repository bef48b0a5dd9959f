//! Address column detection.

use polars::prelude::DataFrame;

use crate::error::{IngestError, Result};

/// Substring that identifies an address column (matched case-insensitively).
pub const ADDRESS_KEYWORD: &str = "address";

/// Returns the first column whose name contains "address", ignoring case.
///
/// Columns are scanned in table order and the first match wins; there is no
/// disambiguation between several candidates.
pub fn select_address_column<S: AsRef<str>>(columns: &[S]) -> Result<&str> {
    columns
        .iter()
        .map(AsRef::<str>::as_ref)
        .find(|name| name.to_lowercase().contains(ADDRESS_KEYWORD))
        .ok_or_else(|| IngestError::NoAddressColumn {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
        })
}

/// Resolves the column to standardize.
///
/// An explicit name must exist in the table; otherwise the column is detected
/// with [`select_address_column`].
pub fn resolve_address_column(df: &DataFrame, explicit: Option<&str>) -> Result<String> {
    let names = df.get_column_names_str();
    if let Some(name) = explicit {
        if names.contains(&name) {
            return Ok(name.to_string());
        }
        return Err(IngestError::ColumnNotFound {
            column: name.to_string(),
        });
    }
    let selected = select_address_column(&names)?;
    tracing::debug!(column = %selected, "detected address column");
    Ok(selected.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn test_selects_matching_column() {
        let columns = ["id", "Customer_Address", "zip"];
        assert_eq!(select_address_column(&columns).unwrap(), "Customer_Address");
    }

    #[test]
    fn test_first_match_wins() {
        let columns = ["billing_address", "ADDRESS", "shipping address"];
        assert_eq!(select_address_column(&columns).unwrap(), "billing_address");
    }

    #[test]
    fn test_no_address_column() {
        let columns = ["id", "zip"];
        match select_address_column(&columns) {
            Err(IngestError::NoAddressColumn { columns }) => {
                assert_eq!(columns, vec!["id", "zip"]);
            }
            other => panic!("expected NoAddressColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_spanish_header_does_not_match() {
        let columns = ["direccion", "ciudad"];
        assert!(select_address_column(&columns).is_err());
    }

    #[test]
    fn test_resolve_explicit_column() {
        let df = DataFrame::new(vec![
            Series::new("direccion".into(), vec!["Calle 5"]).into_column(),
            Series::new("address_id".into(), vec!["7"]).into_column(),
        ])
        .unwrap();

        assert_eq!(resolve_address_column(&df, Some("direccion")).unwrap(), "direccion");
        assert_eq!(resolve_address_column(&df, None).unwrap(), "address_id");
        assert!(matches!(
            resolve_address_column(&df, Some("calle")),
            Err(IngestError::ColumnNotFound { .. })
        ));
    }
}
