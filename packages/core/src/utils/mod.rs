//! Utility functions for PageTree Core

mod page_url;

pub use page_url::{extract_page_id_from_url, PageUrlError};
