mod dimacs;
pub use dimacs::*;

mod molfile;
pub use molfile::*;

mod tucan;
pub use tucan::*;
