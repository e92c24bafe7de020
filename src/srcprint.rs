//! Main module for srcprint library functionality

pub mod config;
pub mod formats;
pub mod lexer;
pub mod printer;
pub mod processor;
pub mod token;
