//! Printable HTML report of selected records
//!
//! [`render`] builds a self-contained document (markup plus inline styles) and
//! [`PrintSink`] is the hand-off point to whatever actually prints it.

use anyhow::Result;
use std::fmt::Write as _;

use crate::currency::CurrencyFormat;
use crate::records::Record;

/// Rendered, standalone report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub html: String,
    /// Number of data rows in the table
    pub rows: usize,
}

/// Text direction of the rendered document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Rtl,
    Ltr,
}

impl Direction {
    fn as_attr(self) -> &'static str {
        match self {
            Direction::Rtl => "rtl",
            Direction::Ltr => "ltr",
        }
    }
}

/// Column headers, in table order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeaders {
    pub id: String,
    pub name: String,
    pub agent: String,
    pub balance: String,
}

impl Default for ColumnHeaders {
    fn default() -> Self {
        Self {
            id: "מזהה".to_string(),
            name: "שם לקוח".to_string(),
            agent: "שם סוכן".to_string(),
            balance: "יתרה (₪)".to_string(),
        }
    }
}

/// Report layout settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub title: String,
    pub headers: ColumnHeaders,
    pub direction: Direction,
    pub currency: CurrencyFormat,
    /// Subtitle line, e.g. a generation timestamp
    pub caption: Option<String>,
    /// Embed a script that opens the print dialog once the page loads
    pub print_on_load: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "הדפסת לקוחות".to_string(),
            headers: ColumnHeaders::default(),
            direction: Direction::Rtl,
            currency: CurrencyFormat::default(),
            caption: None,
            print_on_load: true,
        }
    }
}

/// Something that takes a finished document and prints or exports it
pub trait PrintSink {
    fn print(&mut self, document: &Document) -> Result<()>;
}

const STYLE: &str = "body { font-family: Arial, sans-serif; margin: 24px; }\n\
table { width: 100%; border-collapse: collapse; font-family: inherit; }\n\
th, td { border: 1px solid #444; padding: 4px 8px; }\n\
th { background: #eee; }\n\
td.balance { white-space: nowrap; }\n\
@media print { body { margin: 0; } }";

const PRINT_SCRIPT: &str = "window.addEventListener('load', function () { window.print(); });";

/// Render `records` (in the given order) as a standalone HTML table
pub fn render(records: &[&Record], options: &ReportOptions) -> Document {
    let dir = options.direction.as_attr();
    let title = escape_html(&options.title);
    let headers = &options.headers;

    let mut html = String::with_capacity(1024 + records.len() * 160);
    html.push_str("<!DOCTYPE html>\n");
    let _ = writeln!(html, "<html dir=\"{dir}\">");
    html.push_str("<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    let _ = writeln!(html, "<style>\n{STYLE}\n</style>");
    if options.print_on_load {
        let _ = writeln!(html, "<script>{PRINT_SCRIPT}</script>");
    }
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{title}</h1>");
    if let Some(caption) = &options.caption {
        let _ = writeln!(html, "<p>{}</p>", escape_html(caption));
    }

    let _ = writeln!(html, "<table border=\"1\" dir=\"{dir}\">");
    html.push_str("<thead>\n<tr>");
    for header in [&headers.id, &headers.name, &headers.agent, &headers.balance] {
        let _ = write!(html, "<th>{}</th>", escape_html(header));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for record in records {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"balance\">{}</td></tr>",
            escape_html(&record.id),
            escape_html(record.name.as_deref().unwrap_or("")),
            escape_html(&record.agent_display),
            escape_html(&options.currency.format_opt(record.balance)),
        );
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");

    Document {
        title: options.title.clone(),
        html,
        rows: records.len(),
    }
}

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
