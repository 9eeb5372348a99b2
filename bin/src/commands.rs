pub mod replay;
pub mod speed;
