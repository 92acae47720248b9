// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod kubernetes;
pub mod unstructured;

#[cfg(test)]
mod test_utils;

pub use client::{Client, ListObject, Object, ObjectKey, StatusWriter};
pub use error::{Error, Result};
pub use unstructured::{Unstructured, UnstructuredList, WrapperClient};
