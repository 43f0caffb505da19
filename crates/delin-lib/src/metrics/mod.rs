pub mod extrema;
pub mod premature;
pub mod rate;
