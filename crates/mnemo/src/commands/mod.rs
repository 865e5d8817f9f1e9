pub mod chart;
pub mod due;
pub mod enrich;
pub mod tags;
