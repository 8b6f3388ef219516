// Library exports for csvscope

pub mod analyze;
pub mod data;
pub mod filter;
pub mod projection;
pub mod report;
pub mod resolve;
pub mod session;
pub mod summary;
