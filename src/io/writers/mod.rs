pub mod logo;
pub mod output;
pub mod pdf;
