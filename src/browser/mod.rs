//! Headless Chrome implementation of [`PageDriver`](crate::page::PageDriver).
//!
//! - [`chrome`] - Browser launch and the tab driver
//! - [`scripts`] - Page-side JavaScript for each query

mod chrome;
pub mod scripts;

pub use chrome::ChromePage;
