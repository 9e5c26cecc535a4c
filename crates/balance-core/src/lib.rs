//! Client balance pipeline
//!
//! Raw client entries flow through normalization, filtering, selection and
//! aggregation, and the selection can be rendered as a printable report:
//!
//! - [`records`]: raw entries to canonical [`Record`]s
//! - [`filter`]: name / agent / balance predicates
//! - [`selection`]: selected ids, independent of the filter
//! - [`aggregate`]: balance total over the selection
//! - [`render`]: standalone HTML report and the [`PrintSink`] hand-off
//! - [`view`]: the [`ReportView`] tying it together

pub mod agents;
pub mod aggregate;
pub mod currency;
pub mod filter;
pub mod records;
pub mod render;
pub mod selection;
pub mod view;

pub use agents::{AgentDirectory, AgentEntry};
pub use currency::CurrencyFormat;
pub use filter::FilterCriteria;
pub use records::{FieldNames, RawRecord, Record, normalize};
pub use render::{Document, PrintSink, ReportOptions};
pub use selection::Selection;
pub use view::{LoadState, ReportView};
