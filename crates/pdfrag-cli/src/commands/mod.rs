pub mod ask;
pub mod clear_cache;
