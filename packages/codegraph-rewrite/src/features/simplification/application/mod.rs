mod name_simplifier;

pub use name_simplifier::{strip_annotations, NameSimplifier};
