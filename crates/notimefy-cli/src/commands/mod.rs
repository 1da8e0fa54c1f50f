pub mod check;
pub mod reset;
pub mod status;
