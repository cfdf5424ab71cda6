pub mod candidates_mode;
pub mod normal_mode;
