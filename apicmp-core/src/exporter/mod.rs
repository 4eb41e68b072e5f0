//! Report exporters: Markdown, HTML and JSON renderings of a
//! [`PackageReport`](crate::report::PackageReport).

pub mod html;
pub mod json;
pub mod markdown;
