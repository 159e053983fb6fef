pub use board::*;
pub use protocol_types::*;
pub use selector::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod protocol_types;
mod selector;
mod visualization;
