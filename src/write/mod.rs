mod molfile;
pub use molfile::*;
