//! Main module for chemeq library functionality

pub mod config;
pub mod equation;
pub mod formats;
pub mod formula;
pub mod lexing;
pub mod testing;
