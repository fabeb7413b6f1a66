// PageSure - API Server
//
// HTTP and command-line surfaces over the `pagesure` resolution library.

pub mod config;
pub mod server;

pub use config::*;
