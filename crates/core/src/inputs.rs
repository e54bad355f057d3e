//! Run inputs derived from a user-supplied dataset.

use std::collections::HashMap;
use std::io;
use std::path::Path;

/// Number of data rows included in a preview.
pub const PREVIEW_ROWS: usize = 5;

/// A short textual summary of a CSV-like dataset.
///
/// Rows are kept as the original lines; only the header is split into
/// column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPreview {
    pub file_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<String>,
    pub row_count: usize,
}

impl DatasetPreview {
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::from_text(file_name, &text))
    }

    pub fn from_text(file_name: impl Into<String>, text: &str) -> Self {
        let mut lines = text.lines().filter(|line| !line.trim().is_empty());

        let columns = lines
            .next()
            .map(|header| {
                header
                    .split(',')
                    .map(|column| column.trim().trim_matches('"').to_string())
                    .collect()
            })
            .unwrap_or_default();

        let mut rows = Vec::with_capacity(PREVIEW_ROWS);
        let mut row_count = 0;
        for line in lines {
            if rows.len() < PREVIEW_ROWS {
                rows.push(line.to_string());
            }
            row_count += 1;
        }

        Self {
            file_name: file_name.into(),
            columns,
            rows,
            row_count,
        }
    }

    /// Header followed by the preview rows.
    pub fn render(&self) -> String {
        let mut preview = self.columns.join(",");
        for row in &self.rows {
            preview.push('\n');
            preview.push_str(row);
        }
        preview
    }

    /// Inputs for `{file_name}`, `{data_preview}`, `{columns}` and
    /// `{row_count}` placeholders.
    pub fn into_inputs(self) -> HashMap<String, String> {
        let data_preview = self.render();
        HashMap::from([
            ("columns".to_string(), self.columns.join(", ")),
            ("row_count".to_string(), self.row_count.to_string()),
            ("data_preview".to_string(), data_preview),
            ("file_name".to_string(), self.file_name),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const IRIS: &str = "sepal_length,sepal_width,species\n5.1,3.5,setosa\n4.9,3.0,setosa\n\n4.7,3.2,setosa\n4.6,3.1,setosa\n5.0,3.6,setosa\n5.4,3.9,setosa\n";

    #[test]
    fn test_from_text() {
        let preview = DatasetPreview::from_text("iris.csv", IRIS);

        assert_eq!(preview.columns, vec!["sepal_length", "sepal_width", "species"]);
        assert_eq!(preview.row_count, 6);
        assert_eq!(preview.rows.len(), PREVIEW_ROWS);
        assert_eq!(preview.rows[0], "5.1,3.5,setosa");
        assert!(preview.render().starts_with("sepal_length,sepal_width,species\n5.1"));
    }

    #[test]
    fn test_from_text_empty() {
        let preview = DatasetPreview::from_text("empty.csv", "");
        assert!(preview.columns.is_empty());
        assert!(preview.rows.is_empty());
        assert_eq!(preview.row_count, 0);
        assert_eq!(preview.render(), "");
    }

    #[test]
    fn test_into_inputs() {
        let inputs = DatasetPreview::from_text("iris.csv", IRIS).into_inputs();

        assert_eq!(inputs["file_name"], "iris.csv");
        assert_eq!(inputs["columns"], "sepal_length, sepal_width, species");
        assert_eq!(inputs["row_count"], "6");
        assert_eq!(inputs["data_preview"].lines().count(), 1 + PREVIEW_ROWS);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"a,\"b\"\n1,2\n").unwrap();

        let preview = DatasetPreview::from_path(file.path()).unwrap();

        assert!(preview.file_name.ends_with(".csv"));
        assert_eq!(preview.columns, vec!["a", "b"]);
        assert_eq!(preview.row_count, 1);
    }

    #[test]
    fn test_from_path_missing() {
        let result = DatasetPreview::from_path(Path::new("/nonexistent/data.csv"));
        assert!(result.is_err());
    }
}
