use crate::error::{AppError, AppResult};

/// A header-keyed table: the first row names the columns and every other
/// row addresses its cells by those names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl KeyedTable {
    /// Index of the column whose trimmed header matches `name`
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header.trim() == name)
    }
}

/// Parses CSV text into raw positional rows, header row included.
///
/// Ragged rows are kept as-is and blank lines are skipped; interpreting the
/// columns is left to the normalization step.
pub fn parse_positional(text: &str) -> Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(rows)
}

/// Parses CSV text into a header-keyed table.
pub fn parse_keyed(text: &str) -> Result<KeyedTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()?
        .iter()
        .map(|header| header.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(KeyedTable { headers, rows })
}

/// Checks that a keyed table carries every required column.
pub fn ensure_columns(table: &KeyedTable, required: &[&str], table_name: &str) -> AppResult<()> {
    for column in required {
        if table.column(column).is_none() {
            return Err(AppError::MissingColumn {
                table: table_name.to_string(),
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional_keeps_header_row() {
        let rows = parse_positional("contentId,score,r1\nabc,0.9,def\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["contentId", "score", "r1"]);
        assert_eq!(rows[1], vec!["abc", "0.9", "def"]);
    }

    #[test]
    fn test_parse_positional_accepts_ragged_rows() {
        let rows = parse_positional("a,b,c\nshort\nx,y,z,extra\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["short"]);
        assert_eq!(rows[2].len(), 4);
    }

    #[test]
    fn test_parse_positional_skips_blank_lines() {
        let rows = parse_positional("a,b\n\nc,d\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["c", "d"]);
    }

    #[test]
    fn test_parse_keyed_splits_headers_and_rows() {
        let table = parse_keyed("contentId,title\n1,Foo\n2,Bar\n").unwrap();
        assert_eq!(table.headers, vec!["contentId", "title"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["1", "Foo"]);
    }

    #[test]
    fn test_column_lookup_trims_headers() {
        let table = parse_keyed(" contentId ,title\n1,Foo\n").unwrap();
        assert_eq!(table.column("contentId"), Some(0));
        assert_eq!(table.column("title"), Some(1));
        assert_eq!(table.column("missing"), None);
    }

    #[test]
    fn test_ensure_columns_reports_the_missing_one() {
        let table = parse_keyed("contentId,title\n1,Foo\n").unwrap();
        assert!(ensure_columns(&table, &["contentId", "title"], "catalog").is_ok());

        let err = ensure_columns(&table, &["contentId", "score"], "catalog").unwrap_err();
        assert!(err.to_string().contains("score"));
        assert!(err.to_string().contains("catalog"));
    }
}
