#![deny(unsafe_code)]

pub mod config;
pub mod manifest;
pub mod opts;
pub mod patch;
pub mod util;

pub use self::{
    config::Config,
    manifest::Manifest,
    patch::{patch, PatchError},
};

pub static NAME: &str = "set-homepage";
