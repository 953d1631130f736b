pub mod cli;
pub mod launcher;
pub mod manifest;
pub mod record;
pub mod web;
