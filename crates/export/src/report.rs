use tradedesk_core::Tabular;

/// A titled table ready to be written as CSV, PDF or a print document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTable {
    pub title: String,
    /// Lines printed between the title and the table (filters, dates).
    pub lines: Vec<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Lines printed after the table (totals).
    pub footer: Vec<String>,
}

impl ReportTable {
    pub fn new<H, S>(title: impl Into<String>, headers: H) -> Self
    where
        H: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            headers: headers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn from_records<'a, T, I>(title: impl Into<String>, records: I) -> Self
    where
        T: Tabular + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut table = Self::new(title, T::headers());
        table.rows = records.into_iter().map(Tabular::cells).collect();
        table
    }

    pub fn with_lines(mut self, lines: Vec<String>) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_footer(mut self, footer: Vec<String>) -> Self {
        self.footer = footer;
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `ledger_report_Ali_Traders` style stem for output files.
    pub fn file_stem(&self) -> String {
        let stem: Vec<String> = self
            .title
            .split(|c: char| !c.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .map(str::to_lowercase)
            .collect();
        if stem.is_empty() {
            "export".to_string()
        } else {
            stem.join("_")
        }
    }
}
