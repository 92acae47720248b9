// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Unstructured objects and the client that substitutes them for wrapper types.

pub mod client;
pub mod object;

pub use client::{WrapperClient, WrapperStatusClient};
pub use object::{Unstructured, UnstructuredList};
