pub mod element;
pub mod qname;

pub use element::{Element, Node};
pub use qname::{Namespace, QName};
