pub mod review;
pub mod wire;
