//! Helper functions shared by the stores and the CLI

pub mod date;
mod slug;
mod url;

pub use date::{format_date, parse_date};
pub use slug::generate_slug;
pub use url::{encode_segment, full_url_for, post_url};
