//! Small helpers shared by the data and service layers.

pub mod db;
pub mod text;
