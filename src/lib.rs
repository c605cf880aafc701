pub mod analysis;
pub mod classfile;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod extract;
pub mod model;
