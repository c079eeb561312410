//! TOPSIS ranking service: the `/submit` endpoint, the ranking engine, result
//! mailing and the `topsis` command.

pub mod cli;
pub mod config;
pub mod services;
pub mod state;
