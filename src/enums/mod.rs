pub mod direction;
pub mod policy;
