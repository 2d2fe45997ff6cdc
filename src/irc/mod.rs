//! IRC protocol layer: line framing, inbound dispatch, outbound encoding,
//! the shared socket writer and the slash-command parser.

pub mod commands;
pub mod connection;
pub mod dispatch;
pub mod encoder;
pub mod framer;
