pub mod bench;
pub mod color;
pub mod figure;
pub mod generate;
pub mod plot;
pub mod results;
