pub mod forward_dispatcher;

pub use forward_dispatcher::ForwardDispatchHandler;
