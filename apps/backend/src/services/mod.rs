pub mod review;
pub mod sessions;
