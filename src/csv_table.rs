use crate::constants::UTF8_BOM;
use crate::error::{Result, WebApiTestError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Write rows as comma separated values, prefixed with a UTF-8 BOM so that
/// spreadsheet tools pick the right encoding.
pub fn write_csv<P: AsRef<Path>>(file_path: P, rows: &[Vec<String>]) -> Result<()> {
    let file_path = file_path.as_ref();
    log::info!("Writing csv file {file_path:?}");

    let mut csv = String::from(UTF8_BOM);
    for row in rows {
        let line: Vec<String> = row.iter().map(|cell| escape_cell(cell)).collect();
        csv.push_str(&line.join(","));
        csv.push_str("\r\n");
    }

    fs::write(file_path, csv)?;
    Ok(())
}

/// Read a csv file into rows of cells. A leading BOM is ignored.
pub fn read_csv<P: AsRef<Path>>(file_path: P) -> Result<Vec<Vec<String>>> {
    let file_path = file_path.as_ref();
    log::debug!("Reading csv file {file_path:?}");

    let content = fs::read_to_string(file_path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => WebApiTestError::FileNotFound(file_path.display().to_string()),
        ErrorKind::InvalidData => WebApiTestError::Csv(format!("{}: not valid UTF-8", file_path.display())),
        _ => WebApiTestError::Io(e),
    })?;

    parse_csv(&content)
}

/// Parse csv text. Quoted cells may contain commas, doubled quotes and line breaks.
pub fn parse_csv(content: &str) -> Result<Vec<Vec<String>>> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    cell.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => cell.push(c),
            }
            continue;
        }

        match c {
            '"' if cell.is_empty() => in_quotes = true,
            ',' => row.push(std::mem::take(&mut cell)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                row.push(std::mem::take(&mut cell));
                rows.push(std::mem::take(&mut row));
            }
            _ => cell.push(c),
        }
    }

    if in_quotes {
        return Err(WebApiTestError::Csv("unterminated quoted cell".to_string()));
    }

    // last line without a trailing line break
    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }

    Ok(rows)
}

fn escape_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_simple_rows() {
        let rows = parse_csv("a,b\r\nc,d,e\r\n").unwrap();
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d", "e"]]);
    }

    #[test]
    fn test_parse_quoted_cells() {
        let rows = parse_csv("\"x,y\",\"say \"\"hi\"\"\",\"two\nlines\"\nlast").unwrap();
        assert_eq!(
            rows,
            vec![vec!["x,y", "say \"hi\"", "two\nlines"], vec!["last"]]
        );
    }

    #[test]
    fn test_parse_unterminated_quote() {
        assert!(matches!(parse_csv("\"open,cell"), Err(WebApiTestError::Csv(_))));
    }

    #[test]
    fn test_read_non_utf8_csv_is_a_csv_error() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("s.csv");
        // "场景名" encoded as GBK
        fs::write(&file_path, [0xB3, 0xA1, 0xBE, 0xB0, 0xC3, 0xFB, b',', b's']).unwrap();

        assert!(matches!(read_csv(&file_path), Err(WebApiTestError::Csv(_))));
        assert!(matches!(
            read_csv(dir.path().join("missing.csv")),
            Err(WebApiTestError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_write_then_read_keeps_cells() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("table.csv");
        let rows = vec![
            vec!["场景名".to_string(), "login".to_string()],
            vec!["q".to_string(), "a,b".to_string(), "".to_string()],
        ];

        write_csv(&file_path, &rows).unwrap();

        let raw = fs::read(&file_path).unwrap();
        assert!(raw.starts_with(&[0xEF, 0xBB, 0xBF]));
        assert_eq!(read_csv(&file_path).unwrap(), rows);
    }
}
