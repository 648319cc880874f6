pub mod splitter_core;
