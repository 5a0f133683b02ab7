// Utility Module
// File handling and command line glue around the RSA core

pub mod cli;
pub mod file_ops;

pub use file_ops::{
    create_private_file, load_private_key, load_public_key, open_input, open_output, save_keypair,
};
