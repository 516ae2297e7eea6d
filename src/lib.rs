//! # Photo Locator
//!
//! Works out where a photo was taken. Coordinates embedded in the image's
//! EXIF GPS block are preferred; when they are missing or unusable the
//! location reported by the uploading device is used instead.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌───────────┐
//! │  Upload  │──▶│  Decode  │──▶│  Extract  │──▶│  Resolve  │──▶ JSON
//! │  (HTTP)  │   │  (EXIF)  │   │ GPS → deg │   │ fallbacks │
//! └──────────┘   └──────────┘   └───────────┘   └─────┬─────┘
//!                                                     ▲
//!                                 user_lat / user_lon ┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! locator serve                              # listen on 0.0.0.0:8080
//! curl -F image=@photo.jpg localhost:8080/upload
//! locator inspect photo.jpg --lat 37.5 --lon -122.4
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Metadata values, angles, and results |
//! | [`tags`] | GPS tag identifiers and names |
//! | [`decode`] | Image metadata decoding |
//! | [`extract`] | GPS block → decimal coordinates |
//! | [`resolve`] | Metadata / device / none fallback chain |
//! | [`server`] | HTTP server |

pub mod config;
pub mod decode;
pub mod extract;
pub mod models;
pub mod resolve;
pub mod server;
pub mod tags;

#[cfg(test)]
mod fixtures;
