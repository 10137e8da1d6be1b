// Utility Module
// File handling for ciphertext input

pub mod file_ops;
