//! Tabular output

mod row;

pub use row::RowWriter;
