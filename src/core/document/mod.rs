pub mod aggregate;
pub mod output;
pub mod paginate;

pub use aggregate::{aggregate, AggregatedDocument, ExtractionUnit};
pub use output::{write_outputs, OutputPaths};
pub use paginate::{chunk_lines, paginate, Page, PageLayout, PaginatedDocument, PlacedLine};
