pub mod curve;
pub mod interp;
pub mod noise;
pub mod rect;
