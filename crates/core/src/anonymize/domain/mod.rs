pub mod method;
pub mod region_anonymizer;
