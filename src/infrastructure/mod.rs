pub mod messaging;
pub mod network;
pub mod queue;
pub mod repositories;
