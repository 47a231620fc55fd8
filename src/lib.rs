// Library root
// -----------
// Module responsibilities:
// - `config`: token and API root from the environment.
// - `api`: HTTP calls to the VK link utilities (classify, shorten, stats).
// - `error`: error categories shared by `api` and `ui`.
// - `ui`: picks the branch for a URL and prints the result line.
//
// The binary (`main.rs`) only parses arguments and wires these together.
pub mod api;
pub mod config;
pub mod error;
pub mod ui;
