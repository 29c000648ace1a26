//! utilities crate for vellum
//!
//! `vellum-utils` contains small building blocks shared by the
//! other vellum crates which do not belong to any one of them.

#![cfg_attr(docsrs, feature(doc_cfg))]

#[doc(hidden)]
#[macro_use]
pub mod macros;

pub mod collections;
