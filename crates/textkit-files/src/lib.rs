pub mod files;
pub mod json;
pub mod text;

pub use files::Files;
pub use json::JsonFormatting;
pub use text::TextFormatting;
