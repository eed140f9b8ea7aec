//! egui rendering: filter panel, results table and insight charts.

pub mod charts;
pub mod panels;
pub mod table;
