// UI Module
// Interactive console

pub mod app;
