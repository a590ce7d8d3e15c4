pub mod data_table;
pub mod statistics;
pub mod visualization;
