/*
    FIRST and FOLLOW sets for context-free grammars over single-character
    symbols. The binary wraps this with a file loader and writer.
*/

pub mod analysis;
pub mod error_handling;
pub mod grammar;
pub mod parser;
pub mod writer;
