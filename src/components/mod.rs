pub mod probability_bars;
