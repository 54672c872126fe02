pub mod app;
pub mod effect;
pub mod form;
pub mod input;
pub mod render;
pub mod selection;
pub mod tag_picker;
pub mod text_input;
pub mod theme;
mod update;

pub use app::run;
