//! Message and result transformation pipeline.
//!
//! - `TransformerChain`: ordered fold over named transformers
//! - `Port`: a channel name bound to a chain (`InputPort`, `OutputPort`)
//! - `EnhancerRegistry`: name-indexed context enhancers shared by all channels

pub mod chain;
pub mod enhancer;
pub mod port;

pub use chain::{FnTransformer, Transformer, TransformerChain};
pub use enhancer::{BuiltinEnhancer, EnhancerRegistry, SharedEnhancer};
pub use port::{InputPort, OutputPort, Port};
