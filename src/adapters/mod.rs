pub mod http;
pub mod inference;
pub mod preview;
pub mod raster;
