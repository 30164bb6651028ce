pub mod check;
pub mod csf;
