pub mod client;

pub use client::ClientRepository;
