pub mod dto;
pub mod interpreter;
pub mod ports;
pub mod renderer;
pub mod services;
