//! Collection Model
//!
//! Postman collection trees parsed once into an explicit folder/request sum
//! type. Fields the tool does not interpret are carried through verbatim and
//! in their original order.

pub mod document;
pub mod node;

pub use document::CollectionDocument;
pub use node::{CollectionNode, FolderNode, RequestNode};
