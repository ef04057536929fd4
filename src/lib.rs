// src/lib.rs

//! Codeforces blog crawler and problem reference index.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
