mod common;
mod service;
mod simulator;
