pub mod bands;
pub mod catalog;
pub mod format;
pub mod profile;
