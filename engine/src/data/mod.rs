// Local quote-file input
pub mod csv_parser;

pub use csv_parser::QuoteCsvParser;
