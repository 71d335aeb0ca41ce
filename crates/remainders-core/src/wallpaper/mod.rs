//! Wallpaper endpoint contract.

mod url_builder;

pub use url_builder::{DEFAULT_THEME_COLOR, UrlBuilder, WALLPAPER_ENDPOINT};
