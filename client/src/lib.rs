#![doc = include_str!("../README.md")]

pub mod api;
pub mod config;
pub mod form;
mod frontend;
pub mod latest;
pub mod numero;
pub mod submit;
pub mod tracing;
