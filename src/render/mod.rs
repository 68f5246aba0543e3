pub mod tess;
pub mod viewer;
