pub mod parse;
pub mod scrape;

pub use parse::{ParseError, RowFault};
pub use scrape::ScrapeError;
