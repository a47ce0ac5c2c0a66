pub mod config;
pub mod error;
pub mod firestore_store;
pub mod json_store;
pub mod logger;
pub mod markdown_store;
pub mod page_data;
pub mod post;
pub mod store;
pub mod text_utils;
mod test_data;
