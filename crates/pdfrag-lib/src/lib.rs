//! Question answering over a single PDF: extract, chunk, embed, index, then
//! retrieve context for each question and ask a hosted chat model.

pub mod backend;
pub mod cache;
pub mod config;
pub mod corpus;
pub mod error;
pub mod index;
pub mod output;
pub mod pdf;
pub mod pipeline;
pub mod rag;

#[cfg(test)]
pub mod test_util;
