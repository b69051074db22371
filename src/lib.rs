pub mod config;
pub mod content;
pub mod error;
pub mod index_generator;
pub mod logger;
pub mod site;
pub mod site_builder;
pub mod site_index;
pub mod site_tree;
pub mod template_funcs;
pub mod text_utils;
pub mod util;
pub mod view;
mod test_data;
