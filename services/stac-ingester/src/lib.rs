//! Publishes built STAC objects to a STAC API with the transaction
//! extension.

pub mod inputs;
pub mod publish;

pub use inputs::{expand_inputs, load_documents};
pub use publish::{
    endpoint_for, PublishOutcome, StacDocument, StacObjectKind, TransactionClient, DEFAULT_TIMEOUT,
};
