//! Dataset file input and output.

mod csv_table;

pub use csv_table::{read_csv, read_csv_from, write_csv, write_csv_to};
