pub mod delivery;
pub mod serve;
