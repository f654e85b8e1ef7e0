pub mod hana;
pub mod source;
