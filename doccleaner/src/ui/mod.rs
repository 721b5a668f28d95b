// doccleaner/src/ui/mod.rs
pub mod clean_summary;
pub mod output_format;
