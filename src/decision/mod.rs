pub mod decide;
pub mod label_table;
pub mod prediction;
