pub mod deletion;
pub mod metadata;
pub mod naming;
pub mod reconciler;
pub mod schema;
pub mod service;

#[cfg(test)]
mod testing;

pub use reconciler::Reconciler;
pub use service::ClientService;
