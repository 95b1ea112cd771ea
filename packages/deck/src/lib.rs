#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Fixed slide content that carries data rather than prose.
//!
//! [`stations`] holds the transport triangle facts, including the Camden
//! Town passenger growth series. [`cycle`] describes the supply and local
//! impact cycle and renders it as Graphviz DOT.

pub mod cycle;
pub mod stations;
