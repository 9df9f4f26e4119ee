//! Transports and the sinks they forward to

pub mod channel;
#[cfg(feature = "console")]
pub mod console;
pub mod forwarder;
pub mod tcp;

pub use channel::ChannelSink;
#[cfg(feature = "console")]
pub use console::ConsoleSink;
pub use forwarder::TransportForwarder;
pub use tcp::TcpSink;
