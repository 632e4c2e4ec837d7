// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - scene import, STL writers, and STL inspection

mod ascii;
mod binary;
mod importer;
mod inspect;
mod writer;

pub use ascii::AsciiTriangleWriter;
pub use binary::{BinaryTriangleWriter, COUNT_OFFSET, DEFAULT_HEADER_LABEL, HEADER_LEN, RECORD_LEN};
pub use importer::{import_scene_file, parse_scene};
pub use inspect::{inspect_stl, StlSummary};
pub use writer::{Encoding, TriangleWriter, WriterState};
