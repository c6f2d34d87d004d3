pub mod bootstrap;
pub mod cli;
pub mod context;
pub mod nav;
