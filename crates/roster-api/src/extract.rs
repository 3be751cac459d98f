//! Extractors whose rejections render through [`ApiError`].
//!
//! axum's own `Json` and `Path` reject with plain-text bodies (and 422 for
//! bodies of the wrong shape); these wrappers turn every rejection into a
//! 400 with the usual `{"error": ..}` body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// A JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Param<T>(pub T);
